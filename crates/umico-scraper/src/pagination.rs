//! Page-number pagination over the marketing-names endpoint.
//!
//! The API has no cursor or total count. Pages are requested 1, 2, 3, ...
//! and the loop stops on the first of:
//!
//! - a request failure (logged; stores collected so far are kept),
//! - an empty page,
//! - a page shorter than `per_page` (the last page),
//! - `max_pages` pages fetched.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use umico_core::{AppConfig, StoreRecord};

use crate::error::ScraperError;
use crate::extract::extract_store;
use crate::types::RawStoreItem;

/// Anything that can hand out pages of raw store items by page number.
///
/// Implemented by [`crate::UmicoClient`]; tests drive [`scrape_all`] with
/// in-memory fixtures instead.
pub trait PageSource {
    /// Returns the items on 1-indexed `page`. An empty `Vec` means there is
    /// no more data.
    fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<RawStoreItem>, ScraperError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    pub per_page: u32,
    pub max_pages: u32,
    /// Pause between a successful page and the next request.
    pub inter_request_delay: Duration,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: 60,
            max_pages: 100,
            inter_request_delay: Duration::from_secs(1),
        }
    }
}

impl PaginationConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            per_page: config.per_page,
            max_pages: config.max_pages,
            inter_request_delay: Duration::from_millis(config.inter_request_delay_ms),
        }
    }
}

/// Why [`scrape_all`] stopped requesting pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// `page` came back with no items.
    Exhausted { page: u32 },
    /// `page` had fewer than `per_page` items.
    LastPage { page: u32, items: usize },
    /// `max_pages` pages were fetched without reaching the end.
    PageLimit { max_pages: u32 },
    /// The request for `page` failed. Earlier pages are still in the outcome.
    FetchFailed { page: u32, error: String },
}

impl StopReason {
    /// `true` when the run ended because of an error rather than running
    /// out of data or hitting the page ceiling.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { page } => write!(f, "no more data at page {page}"),
            Self::LastPage { page, items } => {
                write!(f, "reached the last page ({page}, {items} items)")
            }
            Self::PageLimit { max_pages } => write!(f, "page limit of {max_pages} reached"),
            Self::FetchFailed { page, error } => {
                write!(f, "request for page {page} failed: {error}")
            }
        }
    }
}

/// Result of a full pagination run.
#[derive(Debug)]
pub struct ScrapeOutcome {
    /// Flattened stores in request order.
    pub records: Vec<StoreRecord>,
    /// Pages that returned at least one item.
    pub pages_fetched: u32,
    pub stop: StopReason,
}

/// Requests pages from `source` until one of the stop conditions holds and
/// flattens every item on the way.
///
/// Never fails: a request error ends the loop with
/// [`StopReason::FetchFailed`] and whatever was collected before it.
pub async fn scrape_all<S: PageSource>(source: &S, config: &PaginationConfig) -> ScrapeOutcome {
    let per_page = usize::try_from(config.per_page).unwrap_or(usize::MAX);
    let mut records: Vec<StoreRecord> = Vec::new();
    let mut pages_fetched = 0u32;
    let mut page = 1u32;

    let stop = loop {
        if page > config.max_pages {
            break StopReason::PageLimit {
                max_pages: config.max_pages,
            };
        }

        tracing::info!(page, "fetching page");
        let items = match source.fetch_page(page, config.per_page).await {
            Ok(items) => items,
            Err(error) => {
                tracing::warn!(
                    page,
                    error = %error,
                    collected = records.len(),
                    "page request failed; stopping with the stores collected so far"
                );
                break StopReason::FetchFailed {
                    page,
                    error: error.to_string(),
                };
            }
        };

        if items.is_empty() {
            tracing::info!(page, "no more data found; stopping");
            break StopReason::Exhausted { page };
        }

        pages_fetched += 1;
        let count = items.len();
        records.extend(items.iter().map(extract_store));
        tracing::info!(page, items = count, total = records.len(), "extracted stores");

        if count < per_page {
            tracing::info!(page, "reached the last page");
            break StopReason::LastPage { page, items: count };
        }
        if page == config.max_pages {
            break StopReason::PageLimit {
                max_pages: config.max_pages,
            };
        }

        if !config.inter_request_delay.is_zero() {
            tokio::time::sleep(config.inter_request_delay).await;
        }
        page += 1;
    };

    ScrapeOutcome {
        records,
        pages_fetched,
        stop,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Instant;

    use super::*;

    /// Serves canned pages in order and records every page number requested.
    struct FixturePages {
        pages: Vec<Result<Vec<&'static str>, u16>>,
        requested: RefCell<Vec<u32>>,
    }

    impl FixturePages {
        fn new(pages: Vec<Result<Vec<&'static str>, u16>>) -> Self {
            Self {
                pages,
                requested: RefCell::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.borrow().clone()
        }
    }

    impl PageSource for FixturePages {
        async fn fetch_page(
            &self,
            page: u32,
            _per_page: u32,
        ) -> Result<Vec<RawStoreItem>, ScraperError> {
            self.requested.borrow_mut().push(page);
            let idx = usize::try_from(page - 1).unwrap();
            match self.pages.get(idx) {
                None => Ok(Vec::new()),
                Some(Err(status)) => Err(ScraperError::UnexpectedStatus {
                    status: *status,
                    url: format!("fixture://page/{page}"),
                }),
                Some(Ok(names)) => Ok(names
                    .iter()
                    .map(|name| RawStoreItem {
                        name: Some((*name).to_owned()),
                        ..RawStoreItem::default()
                    })
                    .collect()),
            }
        }
    }

    fn config(per_page: u32, max_pages: u32) -> PaginationConfig {
        PaginationConfig {
            per_page,
            max_pages,
            inter_request_delay: Duration::ZERO,
        }
    }

    fn names(outcome: &ScrapeOutcome) -> Vec<&str> {
        outcome
            .records
            .iter()
            .map(|r| r.store_name.as_str())
            .collect()
    }

    #[tokio::test]
    async fn full_page_then_short_page_yields_three_records() {
        let source = FixturePages::new(vec![Ok(vec!["a", "b"]), Ok(vec!["c"])]);
        let outcome = scrape_all(&source, &config(2, 100)).await;

        assert_eq!(names(&outcome), vec!["a", "b", "c"]);
        assert_eq!(outcome.pages_fetched, 2);
        assert_eq!(outcome.stop, StopReason::LastPage { page: 2, items: 1 });
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn short_page_stops_before_page_ceiling() {
        let source = FixturePages::new(vec![Ok(vec!["a", "b", "c"]), Ok(vec!["d"])]);
        let outcome = scrape_all(&source, &config(3, 50)).await;

        assert_eq!(outcome.records.len(), 4);
        assert_eq!(source.requested(), vec![1, 2]);
        assert!(!outcome.stop.is_failure());
    }

    #[tokio::test]
    async fn page_ceiling_stops_even_when_last_page_is_full() {
        let source = FixturePages::new(vec![
            Ok(vec!["a", "b"]),
            Ok(vec!["c", "d"]),
            Ok(vec!["e", "f"]),
        ]);
        let outcome = scrape_all(&source, &config(2, 2)).await;

        assert_eq!(names(&outcome), vec!["a", "b", "c", "d"]);
        assert_eq!(outcome.stop, StopReason::PageLimit { max_pages: 2 });
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn empty_page_stops_the_loop() {
        let source = FixturePages::new(vec![Ok(vec!["a", "b"]), Ok(vec![])]);
        let outcome = scrape_all(&source, &config(2, 10)).await;

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.pages_fetched, 1);
        assert_eq!(outcome.stop, StopReason::Exhausted { page: 2 });
    }

    #[tokio::test]
    async fn empty_first_page_yields_no_records() {
        let source = FixturePages::new(vec![]);
        let outcome = scrape_all(&source, &config(60, 100)).await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.pages_fetched, 0);
        assert_eq!(outcome.stop, StopReason::Exhausted { page: 1 });
    }

    #[tokio::test]
    async fn failure_keeps_records_from_earlier_pages() {
        let source = FixturePages::new(vec![Ok(vec!["a", "b"]), Err(502), Ok(vec!["c"])]);
        let outcome = scrape_all(&source, &config(2, 10)).await;

        assert_eq!(names(&outcome), vec!["a", "b"]);
        assert!(outcome.stop.is_failure());
        assert!(
            matches!(outcome.stop, StopReason::FetchFailed { page: 2, ref error } if error.contains("502")),
            "expected FetchFailed at page 2, got: {:?}",
            outcome.stop
        );
        // No retry, and page 3 is never requested.
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn zero_page_ceiling_requests_nothing() {
        let source = FixturePages::new(vec![Ok(vec!["a"])]);
        let outcome = scrape_all(&source, &config(1, 0)).await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.stop, StopReason::PageLimit { max_pages: 0 });
        assert!(source.requested().is_empty());
    }

    #[tokio::test]
    async fn waits_between_successful_pages() {
        let source = FixturePages::new(vec![Ok(vec!["a"]), Ok(vec!["b"])]);
        let cfg = PaginationConfig {
            per_page: 1,
            max_pages: 10,
            inter_request_delay: Duration::from_millis(25),
        };

        let started = Instant::now();
        let outcome = scrape_all(&source, &cfg).await;

        // Two full pages are each followed by a pause before the empty third page.
        assert!(started.elapsed() >= Duration::from_millis(50));
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.stop, StopReason::Exhausted { page: 3 });
    }

    #[test]
    fn pagination_defaults() {
        let cfg = PaginationConfig::default();
        assert_eq!(cfg.per_page, 60);
        assert_eq!(cfg.max_pages, 100);
        assert_eq!(cfg.inter_request_delay, Duration::from_secs(1));
    }

    #[test]
    fn stop_reason_display() {
        assert_eq!(
            StopReason::LastPage { page: 4, items: 17 }.to_string(),
            "reached the last page (4, 17 items)"
        );
        assert_eq!(
            StopReason::PageLimit { max_pages: 100 }.to_string(),
            "page limit of 100 reached"
        );
    }
}
