use std::path::PathBuf;

pub(crate) const DEFAULT_API_BASE_URL: &str = "https://search.umico.az";
pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/141.0.0.0 Safari/537.36";
pub(crate) const DEFAULT_COORDINATES: &str = "40.372508,49.842474";

/// Connection and query settings for the marketing-names search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme and host of the search API; the endpoint path is appended by the client.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Sent as both `accept-language` and `content-language`.
    pub locale: String,
    /// Storefront origin; also used to derive the `referer` header.
    pub origin: String,
    pub country_id: u32,
    pub city_id: u32,
    pub sort_by: String,
    /// `"lat,lon"` pair the API uses to rank nearby stores.
    pub coordinates: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            locale: "az".to_string(),
            origin: "https://birmarket.az".to_string(),
            country_id: 1,
            city_id: 1,
            sort_by: "popular".to_string(),
            coordinates: DEFAULT_COORDINATES.to_string(),
        }
    }
}

impl ApiConfig {
    /// `referer` header value: the origin with a trailing slash.
    #[must_use]
    pub fn referer(&self) -> String {
        format!("{}/", self.origin.trim_end_matches('/'))
    }
}

/// Output file locations. Each run overwrites whatever is already there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub csv_path: PathBuf,
    pub xlsx_path: PathBuf,
    pub charts_dir: PathBuf,
    /// TrueType font used for chart text. When unset the renderer searches
    /// the usual system font directories.
    pub chart_font: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("umico_stores.csv"),
            xlsx_path: PathBuf::from("umico_stores.xlsx"),
            charts_dir: PathBuf::from("charts"),
            chart_font: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub api: ApiConfig,
    /// Hard ceiling on the number of pages requested in one run.
    pub max_pages: u32,
    pub per_page: u32,
    pub inter_request_delay_ms: u64,
    pub output: OutputConfig,
}
