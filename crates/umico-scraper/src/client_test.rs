use super::*;

fn client_for(base_url: &str) -> UmicoClient {
    let api = ApiConfig {
        base_url: base_url.to_owned(),
        ..ApiConfig::default()
    };
    UmicoClient::new(&api).expect("client should build")
}

#[test]
fn endpoint_appends_marketing_names_path() {
    let url = UmicoClient::endpoint("https://search.umico.az").unwrap();
    assert_eq!(url.as_str(), "https://search.umico.az/v2/marketing_names");
}

#[test]
fn endpoint_tolerates_trailing_slash() {
    let url = UmicoClient::endpoint("https://search.umico.az/").unwrap();
    assert_eq!(url.as_str(), "https://search.umico.az/v2/marketing_names");
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let url = UmicoClient::endpoint("http://127.0.0.1:9000/proxy").unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:9000/proxy/v2/marketing_names");
}

#[test]
fn endpoint_rejects_invalid_base() {
    let result = UmicoClient::endpoint("not-a-url");
    assert!(
        matches!(result, Err(ScraperError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl, got: {result:?}"
    );
}

#[test]
fn endpoint_rejects_non_http_scheme() {
    let result = UmicoClient::endpoint("ftp://search.umico.az");
    assert!(
        matches!(result, Err(ScraperError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl, got: {result:?}"
    );
}

#[test]
fn page_url_carries_fixed_search_parameters() {
    let client = client_for("https://search.umico.az");
    let url = client.page_url(3, 60);
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("page".to_owned(), "3".to_owned()),
            ("per_page".to_owned(), "60".to_owned()),
            ("country_id".to_owned(), "1".to_owned()),
            ("city_id".to_owned(), "1".to_owned()),
            ("sort_by".to_owned(), "popular".to_owned()),
            ("coordinates".to_owned(), "40.372508,49.842474".to_owned()),
        ]
    );
}

#[test]
fn page_url_does_not_accumulate_parameters_across_calls() {
    let client = client_for("https://search.umico.az");
    let _ = client.page_url(1, 60);
    let second = client.page_url(2, 60);
    assert_eq!(second.query_pairs().count(), 6);
}
