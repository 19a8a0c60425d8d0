pub mod client;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod types;

pub use client::UmicoClient;
pub use error::ScraperError;
pub use extract::{extract_addresses, extract_store, StoreAddress};
pub use pagination::{scrape_all, PageSource, PaginationConfig, ScrapeOutcome, StopReason};
pub use types::{MarketingNamesPage, RawStoreItem};
