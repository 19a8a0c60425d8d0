use crate::app_config::{
    ApiConfig, AppConfig, OutputConfig, DEFAULT_API_BASE_URL, DEFAULT_COORDINATES,
    DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the defaults reproduce a plain run against the
/// public Umico API with 60 stores per page, at most 100 pages and one second
/// between requests.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let positive_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let value = parse_u32(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let log_level = or_default("UMICO_LOG_LEVEL", "info");

    let base_url = or_default("UMICO_API_BASE_URL", DEFAULT_API_BASE_URL);
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "UMICO_API_BASE_URL".to_string(),
            reason: format!("\"{base_url}\" is not an http(s) URL"),
        });
    }

    let api = ApiConfig {
        base_url,
        request_timeout_secs: parse_u64("UMICO_REQUEST_TIMEOUT_SECS", "30")?,
        user_agent: or_default("UMICO_USER_AGENT", DEFAULT_USER_AGENT),
        locale: or_default("UMICO_LOCALE", "az"),
        origin: or_default("UMICO_ORIGIN", "https://birmarket.az"),
        country_id: parse_u32("UMICO_COUNTRY_ID", "1")?,
        city_id: parse_u32("UMICO_CITY_ID", "1")?,
        sort_by: or_default("UMICO_SORT_BY", "popular"),
        coordinates: or_default("UMICO_COORDINATES", DEFAULT_COORDINATES),
    };

    let max_pages = positive_u32("UMICO_MAX_PAGES", "100")?;
    let per_page = positive_u32("UMICO_PER_PAGE", "60")?;
    let inter_request_delay_ms = parse_u64("UMICO_INTER_REQUEST_DELAY_MS", "1000")?;

    let defaults = OutputConfig::default();
    let output = OutputConfig {
        csv_path: lookup("UMICO_CSV_PATH").map_or(defaults.csv_path, PathBuf::from),
        xlsx_path: lookup("UMICO_XLSX_PATH").map_or(defaults.xlsx_path, PathBuf::from),
        charts_dir: lookup("UMICO_CHARTS_DIR").map_or(defaults.charts_dir, PathBuf::from),
        chart_font: lookup("UMICO_CHART_FONT")
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from),
    };

    Ok(AppConfig {
        log_level,
        api,
        max_pages,
        per_page,
        inter_request_delay_ms,
        output,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
