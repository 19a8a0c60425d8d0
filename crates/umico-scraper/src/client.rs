//! HTTP client for the Umico `v2/marketing_names` search endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use umico_core::ApiConfig;

use crate::error::ScraperError;
use crate::pagination::PageSource;
use crate::types::{MarketingNamesPage, RawStoreItem};

const MARKETING_NAMES_PATH: &str = "v2/marketing_names";
const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

/// HTTP client for the marketing-names search endpoint.
///
/// Sends the same browser-like headers as the Birmarket storefront (locale,
/// origin, referer, user agent) and returns one page of raw store items per
/// call. Failures are returned as typed errors and never retried; the
/// pagination loop decides what to do with them.
pub struct UmicoClient {
    client: Client,
    endpoint: Url,
    api: ApiConfig,
}

impl UmicoClient {
    /// Creates a client for `api.base_url` with the configured timeout and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidBaseUrl`] if `api.base_url` cannot be parsed.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed (e.g., invalid TLS config).
    pub fn new(api: &ApiConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(api.user_agent.as_str())
            .build()?;
        let endpoint = Self::endpoint(&api.base_url)?;
        Ok(Self {
            client,
            endpoint,
            api: api.clone(),
        })
    }

    /// Fetches one page (1-indexed) of store items.
    ///
    /// A body of `null`, or an object without `data`, is returned as an empty
    /// page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure, or timeout.
    /// - [`ScraperError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawStoreItem>, ScraperError> {
        let url = self.page_url(page, per_page);

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, ACCEPT_VALUE)
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.api.locale)
            .header(reqwest::header::CONTENT_LANGUAGE, &self.api.locale)
            .header(reqwest::header::ORIGIN, &self.api.origin)
            .header(reqwest::header::REFERER, self.api.referer())
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<Option<MarketingNamesPage>>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("marketing names page {page}"),
                source: e,
            }
        })?;

        Ok(parsed.unwrap_or_default().data)
    }

    /// Builds the request URL for `page` with the fixed search parameters.
    fn page_url(&self, page: u32, per_page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string())
            .append_pair("country_id", &self.api.country_id.to_string())
            .append_pair("city_id", &self.api.city_id.to_string())
            .append_pair("sort_by", &self.api.sort_by)
            .append_pair("coordinates", &self.api.coordinates);
        url
    }

    /// Resolves the endpoint path against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL.
    fn endpoint(base_url: &str) -> Result<Url, ScraperError> {
        // Ensure exactly one trailing slash so `join` appends to the path
        // rather than replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", base.scheme()),
            });
        }
        base.join(MARKETING_NAMES_PATH)
            .map_err(|e| ScraperError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })
    }
}

impl PageSource for UmicoClient {
    async fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawStoreItem>, ScraperError> {
        UmicoClient::fetch_page(self, page, per_page).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
