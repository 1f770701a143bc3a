//! Unit tests for client construction and shared state

use serial_test::serial;

use crate::{AuthCredential, Client, Error, RequestMiddleware};

#[test]
#[serial]
fn test_legacy_positional_constructor() {
    let client = Client::new("abc123", "1234").unwrap();

    assert_eq!(client.account_id(), "1234");
    assert_eq!(
        client.config().auth,
        AuthCredential::ApiKey("abc123".to_string())
    );
}

#[test]
#[serial]
fn test_legacy_positional_constructor_rejects_bad_values() {
    assert!(matches!(
        Client::new("", "1234"),
        Err(Error::InvalidApiKey(_))
    ));
    assert!(matches!(
        Client::new("abc123", ""),
        Err(Error::InvalidAccountId(_))
    ));
    assert!(matches!(
        Client::new("key with spaces", "1234"),
        Err(Error::InvalidApiKey(_))
    ));
}

#[test]
#[serial]
fn test_clone_shares_immutable_configuration() {
    let client = Client::new("abc123", "1234").unwrap();
    let cloned = client.clone();

    assert_eq!(cloned.account_id(), client.account_id());
    assert_eq!(cloned.config().auth, client.config().auth);
}

#[test]
fn test_middleware_default_is_silent() {
    let middleware = RequestMiddleware::default();

    assert!(!middleware.log_requests);
    assert!(!middleware.log_responses);
    assert!(!middleware.log_headers);
    assert!(!middleware.log_body);
}

#[test]
fn test_middleware_fluent_toggles() {
    let middleware = RequestMiddleware::default()
        .with_request_logging()
        .with_response_logging();

    assert!(middleware.log_requests);
    assert!(middleware.log_responses);
    assert!(!middleware.log_headers);
    assert!(!middleware.log_body);

    let middleware = RequestMiddleware::default().with_full_logging();
    assert!(middleware.log_requests);
    assert!(middleware.log_responses);
    assert!(middleware.log_headers);
    assert!(middleware.log_body);
}
