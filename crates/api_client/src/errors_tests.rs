use super::*;
use std::error::Error as StdError;

#[test]
fn test_invalid_url_error() {
    let parse_error = url::Url::parse("not a url").unwrap_err();
    let error = Error::InvalidUrl("not a url".to_string(), parse_error);

    assert!(error.to_string().starts_with("Invalid URL 'not a url': "));
    assert!(error.source().is_some());
}

#[test]
fn test_deserialization_error_from_serde() {
    let serde_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: Error = serde_error.into();

    assert!(error
        .to_string()
        .starts_with("Failed to deserialize response body: "));
    assert!(error.source().is_some());
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
