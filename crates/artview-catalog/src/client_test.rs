use super::*;

fn client(endpoint: &str) -> ContentClient {
    ContentClient::new(endpoint, 5, "artview-test/0.1").unwrap()
}

#[test]
fn records_url_by_slug() {
    let url = client("https://cms.example.com/_functions/variants")
        .records_url(&RecordQuery::ArtworkSlug("madness-is-genius".into()));
    assert_eq!(
        url.as_str(),
        "https://cms.example.com/_functions/variants?artworkSlug=madness-is-genius"
    );
}

#[test]
fn records_url_by_sku_is_encoded() {
    let url = client("https://cms.example.com/_functions/variants")
        .records_url(&RecordQuery::Sku("MAD 16/20&x".into()));
    assert_eq!(
        url.as_str(),
        "https://cms.example.com/_functions/variants?sku=MAD+16%2F20%26x"
    );
}

#[test]
fn records_url_keeps_existing_query() {
    let url = client("https://cms.example.com/api?collection=variants")
        .records_url(&RecordQuery::Sku("A".into()));
    assert_eq!(
        url.as_str(),
        "https://cms.example.com/api?collection=variants&sku=A"
    );
}

#[test]
fn new_rejects_relative_endpoint() {
    let err = ContentClient::new("/api/variants", 5, "ua").unwrap_err();
    assert!(
        matches!(err, LoadError::InvalidEndpoint { .. }),
        "expected InvalidEndpoint, got: {err:?}"
    );
    assert!(err.is_transport());
}

#[test]
fn new_rejects_non_http_scheme() {
    let err = ContentClient::new("ftp://cms.example.com/variants", 5, "ua").unwrap_err();
    assert!(matches!(err, LoadError::InvalidEndpoint { ref reason, .. } if reason.contains("ftp")));
}

#[test]
fn record_query_display() {
    assert_eq!(
        RecordQuery::ArtworkSlug("m".into()).to_string(),
        "artwork slug 'm'"
    );
    assert_eq!(RecordQuery::Sku("A".into()).to_string(), "sku 'A'");
}
