use super::*;

fn test_client(api_url: &str) -> WikiClient {
    WikiClient::new(api_url, 30, "placefind-test/0.1", None)
        .expect("client construction should not fail")
}

#[test]
fn build_url_prefixes_format_params() {
    let client = test_client("https://en.wikipedia.org/w/api.php");
    let url = client.build_url(&[("action", "query"), ("titles", "Paris")]);
    assert_eq!(
        url.as_str(),
        "https://en.wikipedia.org/w/api.php?format=json&formatversion=2&action=query&titles=Paris"
    );
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://en.wikipedia.org/w/api.php");
    let url = client.build_url(&[("titles", "Tom & Jerry|Oslo")]);
    assert!(
        url.as_str().contains("titles=Tom+%26+Jerry%7COslo"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn new_rejects_unparseable_api_url() {
    let result = WikiClient::new("not a url", 30, "placefind-test/0.1", None);
    assert!(matches!(result, Err(WikiError::InvalidApiUrl { .. })));
}

#[test]
fn check_api_error_surfaces_code_and_info() {
    let body = serde_json::json!({
        "error": { "code": "missingtitle", "info": "The page you specified doesn't exist." }
    });
    let err = WikiClient::check_api_error(&body).unwrap_err();
    assert!(
        matches!(err, WikiError::Api { ref code, .. } if code == "missingtitle"),
        "got: {err:?}"
    );
}

#[test]
fn check_api_error_passes_normal_bodies() {
    let body = serde_json::json!({ "batchcomplete": true, "query": { "pages": [] } });
    assert!(WikiClient::check_api_error(&body).is_ok());
}
