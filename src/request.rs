//! Request construction: paths, query strings, payload wrapping and headers.
//!
//! Every operation reduces to a [`RequestSpec`] built fresh per call. The
//! helpers here own the conventions shared across endpoints: identifiers are
//! extracted from the parameter mapping (never echoed back to the API),
//! user-controlled path segments are percent-encoded, GET parameters become
//! the query string, and write payloads are wrapped in the collection-keyed
//! one-element list the API expects.

use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::config::{AuthCredential, Config};
use crate::error::Error;
use crate::Result;

pub(crate) const ACCEPT_VALUE: &str = "application/json, text/javascript, */*; q=0.01";
pub(crate) const CONTENT_TYPE_VALUE: &str = "application/vnd.api+json";

/// A fully-shaped request, ready to be sent.
///
/// Paths are relative to the configured base URL. Headers and the
/// credential are attached uniformly at send time from the client
/// configuration; they are not part of the spec.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestSpec {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Serialize the remaining parameters as query pairs.
    ///
    /// Scalars are stringified; arrays and objects are carried as JSON text
    /// so no key is ever silently dropped.
    pub fn with_query(mut self, params: &Map<String, Value>) -> Self {
        for (key, value) in params {
            self.query.push((key.clone(), query_value(value)));
        }
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Percent-encode a user-controlled identifier for use as a path segment,
/// e.g. `test@example.com` -> `test%40example.com`.
pub(crate) fn encode_path_segment(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Wrap a resource payload in a one-element list under its collection key:
/// `{"subscribers": [{...}]}`, `{"tags": [{...}]}`, `{"events": [{...}]}`.
pub(crate) fn wrap_singular(collection: &str, params: Map<String, Value>) -> Value {
    let mut body = Map::new();
    body.insert(
        collection.to_string(),
        Value::Array(vec![Value::Object(params)]),
    );
    Value::Object(body)
}

/// Wrap a batch chunk under its collection key: `{"orders": [...]}`.
pub(crate) fn wrap_batch(collection: &str, records: Vec<Value>) -> Value {
    let mut body = Map::new();
    body.insert(collection.to_string(), Value::Array(records));
    Value::Object(body)
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        // Value's Display prints compact JSON, which covers numbers and
        // booleans as well as nested structures.
        other => other.to_string(),
    }
}

/// Interpret operation parameters as a JSON object mapping.
pub(crate) fn into_object(params: Value) -> Result<Map<String, Value>> {
    match params {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(Error::InvalidArgument(format!(
            "parameters must be a JSON object, got: {other}"
        ))),
    }
}

/// Remove an identifier from the parameter mapping so it is not echoed back
/// to the API as a query key or body field. Numeric identifiers are accepted
/// and stringified; empty strings count as missing.
pub(crate) fn take_id(params: &mut Map<String, Value>, key: &str) -> Option<String> {
    match params.remove(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn user_agent() -> String {
    format!("drip-rust-sdk/{}", env!("CARGO_PKG_VERSION"))
}

/// The fixed header set attached to every request, including exactly one
/// `Authorization` scheme for the configured credential kind.
pub(crate) fn headers_for(config: &Config) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_VALUE));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&user_agent())
            .map_err(|e| Error::Config(format!("Invalid user agent: {e}")))?,
    );
    headers.insert(AUTHORIZATION, auth_header_value(&config.auth)?);
    Ok(headers)
}

pub(crate) fn auth_header_value(auth: &AuthCredential) -> Result<HeaderValue> {
    let raw = match auth {
        AuthCredential::ApiKey(key) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{key}:"));
            format!("Basic {encoded}")
        }
        AuthCredential::AccessToken(token) => format!("Bearer {token}"),
    };

    let mut value = HeaderValue::from_str(&raw)
        .map_err(|e| Error::Config(format!("Invalid credential value: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("1234"), "1234");
        assert_eq!(
            encode_path_segment("test@example.com"),
            "test%40example.com"
        );
        assert_eq!(encode_path_segment("a/b"), "a%2Fb");
        assert_eq!(encode_path_segment("a b"), "a+b");
    }

    #[test]
    fn test_wrap_singular() {
        let params = json!({"email": "test@example.com", "double_optin": true});
        let body = wrap_singular("subscribers", params.as_object().cloned().unwrap());

        assert_eq!(
            body,
            json!({"subscribers": [{"email": "test@example.com", "double_optin": true}]})
        );
    }

    #[test]
    fn test_wrap_batch() {
        let body = wrap_batch("orders", vec![json!({"order_id": "a"}), json!({"order_id": "b"})]);
        assert_eq!(
            body,
            json!({"orders": [{"order_id": "a"}, {"order_id": "b"}]})
        );
    }

    #[test]
    fn test_with_query_stringifies_without_dropping_keys() {
        let params = json!({
            "status": "active",
            "page": 2,
            "prospect": true,
            "ids": [1, 2],
        });
        let spec = RequestSpec::get("123/campaigns").with_query(params.as_object().unwrap());

        assert_eq!(
            spec.query,
            vec![
                ("status".to_string(), "active".to_string()),
                ("page".to_string(), "2".to_string()),
                ("prospect".to_string(), "true".to_string()),
                ("ids".to_string(), "[1,2]".to_string()),
            ]
        );
    }

    #[test]
    fn test_into_object() {
        assert!(into_object(json!({"a": 1})).is_ok());
        assert!(into_object(Value::Null).unwrap().is_empty());
        assert!(matches!(
            into_object(json!([1, 2])),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_take_id() {
        let mut params = json!({"campaign_id": "1234", "status": "active"})
            .as_object()
            .cloned()
            .unwrap();

        assert_eq!(take_id(&mut params, "campaign_id").as_deref(), Some("1234"));
        // removed from the mapping, not echoed back
        assert!(!params.contains_key("campaign_id"));
        assert!(params.contains_key("status"));

        let mut params = json!({"campaign_id": 1234}).as_object().cloned().unwrap();
        assert_eq!(take_id(&mut params, "campaign_id").as_deref(), Some("1234"));

        let mut params = json!({"campaign_id": ""}).as_object().cloned().unwrap();
        assert_eq!(take_id(&mut params, "campaign_id"), None);

        let mut params = json!({}).as_object().cloned().unwrap();
        assert_eq!(take_id(&mut params, "campaign_id"), None);
    }

    #[test]
    fn test_auth_header_basic() {
        let value =
            auth_header_value(&AuthCredential::ApiKey("abc123".to_string())).unwrap();
        // base64("abc123:")
        assert_eq!(value.to_str().unwrap(), "Basic YWJjMTIzOg==");
    }

    #[test]
    fn test_auth_header_bearer() {
        let value =
            auth_header_value(&AuthCredential::AccessToken("tok456".to_string())).unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer tok456");
    }

    #[test]
    fn test_headers_for_includes_vendor_content_type() {
        let config = Config {
            auth: AuthCredential::ApiKey("abc123".to_string()),
            account_id: "1234".to_string(),
            base_url: crate::config::DEFAULT_BASE_URL.parse().unwrap(),
            timeout: std::time::Duration::from_secs(30),
            connect_timeout: std::time::Duration::from_secs(30),
        };

        let headers = headers_for(&config).unwrap();
        assert_eq!(
            headers.get(ACCEPT).unwrap(),
            "application/json, text/javascript, */*; q=0.01"
        );
        assert_eq!(
            headers.get(CONTENT_TYPE).unwrap(),
            "application/vnd.api+json"
        );
        assert!(headers
            .get(USER_AGENT)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("drip-rust-sdk/"));
        // exactly one Authorization header
        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
    }
}
