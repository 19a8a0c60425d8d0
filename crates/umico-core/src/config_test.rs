use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.max_pages, 100);
    assert_eq!(cfg.per_page, 60);
    assert_eq!(cfg.inter_request_delay_ms, 1000);
    assert_eq!(cfg.api, ApiConfig::default());
    assert_eq!(cfg.output, OutputConfig::default());
}

#[test]
fn default_api_config_matches_public_endpoint() {
    let api = ApiConfig::default();
    assert_eq!(api.base_url, "https://search.umico.az");
    assert_eq!(api.request_timeout_secs, 30);
    assert_eq!(api.locale, "az");
    assert_eq!(api.country_id, 1);
    assert_eq!(api.city_id, 1);
    assert_eq!(api.sort_by, "popular");
    assert_eq!(api.coordinates, "40.372508,49.842474");
    assert_eq!(api.referer(), "https://birmarket.az/");
}

#[test]
fn referer_does_not_double_trailing_slash() {
    let api = ApiConfig {
        origin: "https://birmarket.az/".to_string(),
        ..ApiConfig::default()
    };
    assert_eq!(api.referer(), "https://birmarket.az/");
}

#[test]
fn default_output_paths() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.output.csv_path, Path::new("umico_stores.csv"));
    assert_eq!(cfg.output.xlsx_path, Path::new("umico_stores.xlsx"));
    assert_eq!(cfg.output.charts_dir, Path::new("charts"));
    assert_eq!(cfg.output.chart_font, None);
}

#[test]
fn chart_font_override() {
    let mut map = HashMap::new();
    map.insert("UMICO_CHART_FONT", "/opt/fonts/NotoSans-Regular.ttf");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.output.chart_font.as_deref(),
        Some(Path::new("/opt/fonts/NotoSans-Regular.ttf"))
    );
}

#[test]
fn empty_chart_font_is_ignored() {
    let mut map = HashMap::new();
    map.insert("UMICO_CHART_FONT", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.output.chart_font, None);
}

#[test]
fn output_paths_override() {
    let mut map = HashMap::new();
    map.insert("UMICO_CSV_PATH", "/tmp/out/stores.csv");
    map.insert("UMICO_CHARTS_DIR", "/tmp/out/charts");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.output.csv_path, Path::new("/tmp/out/stores.csv"));
    assert_eq!(cfg.output.xlsx_path, Path::new("umico_stores.xlsx"));
    assert_eq!(cfg.output.charts_dir, Path::new("/tmp/out/charts"));
}

#[test]
fn per_page_override() {
    let mut map = HashMap::new();
    map.insert("UMICO_PER_PAGE", "25");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.per_page, 25);
}

#[test]
fn per_page_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("UMICO_PER_PAGE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UMICO_PER_PAGE"),
        "expected InvalidEnvVar(UMICO_PER_PAGE), got: {result:?}"
    );
}

#[test]
fn max_pages_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("UMICO_MAX_PAGES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UMICO_MAX_PAGES"),
        "expected InvalidEnvVar(UMICO_MAX_PAGES), got: {result:?}"
    );
}

#[test]
fn max_pages_invalid() {
    let mut map = HashMap::new();
    map.insert("UMICO_MAX_PAGES", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UMICO_MAX_PAGES"),
        "expected InvalidEnvVar(UMICO_MAX_PAGES), got: {result:?}"
    );
}

#[test]
fn inter_request_delay_ms_override() {
    let mut map = HashMap::new();
    map.insert("UMICO_INTER_REQUEST_DELAY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.inter_request_delay_ms, 0);
}

#[test]
fn inter_request_delay_ms_invalid() {
    let mut map = HashMap::new();
    map.insert("UMICO_INTER_REQUEST_DELAY_MS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UMICO_INTER_REQUEST_DELAY_MS"),
        "expected InvalidEnvVar(UMICO_INTER_REQUEST_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("UMICO_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UMICO_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(UMICO_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn base_url_without_scheme_is_rejected() {
    let mut map = HashMap::new();
    map.insert("UMICO_API_BASE_URL", "search.umico.az");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "UMICO_API_BASE_URL"),
        "expected InvalidEnvVar(UMICO_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn api_query_overrides() {
    let mut map = HashMap::new();
    map.insert("UMICO_API_BASE_URL", "http://127.0.0.1:8080");
    map.insert("UMICO_CITY_ID", "7");
    map.insert("UMICO_SORT_BY", "rating");
    map.insert("UMICO_LOCALE", "ru");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api.base_url, "http://127.0.0.1:8080");
    assert_eq!(cfg.api.city_id, 7);
    assert_eq!(cfg.api.country_id, 1);
    assert_eq!(cfg.api.sort_by, "rating");
    assert_eq!(cfg.api.locale, "ru");
}

#[test]
fn log_level_override() {
    let mut map = HashMap::new();
    map.insert("UMICO_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
}
