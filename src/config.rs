//! Configuration and builder patterns for the Drip client

use std::time::Duration;
use url::Url;

use crate::{
    client::{Client, ClientInner, RequestMiddleware},
    error::Error,
    Result,
};

/// Default API endpoint for the Drip v2 REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.getdrip.com/v2/";

/// Credential material attached to every request.
///
/// Exactly one scheme is used per client: an API key sent as the username of
/// an HTTP Basic `Authorization` header (empty password), or an OAuth access
/// token sent as a Bearer `Authorization` header. Never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// API key, attached via HTTP Basic auth (key as username, empty password)
    ApiKey(String),
    /// OAuth access token, attached via a Bearer Authorization header
    AccessToken(String),
}

impl AuthCredential {
    /// The raw credential value
    pub fn value(&self) -> &str {
        match self {
            AuthCredential::ApiKey(key) => key,
            AuthCredential::AccessToken(token) => token,
        }
    }
}

/// Configuration for the Drip client
///
/// Immutable for the life of the client; every request reads from it and no
/// call mutates it.
#[derive(Debug, Clone)]
pub struct Config {
    pub auth: AuthCredential,
    pub account_id: String,
    pub base_url: Url,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Config {
    /// Validate the configuration parameters
    ///
    /// # Errors
    ///
    /// Returns the credential-specific error kind
    /// ([`Error::InvalidApiKey`], [`Error::InvalidAccessToken`],
    /// [`Error::InvalidAccountId`]) when a value is empty or fails the
    /// `^[\w-]+$` format check after trimming, and [`Error::Config`] for an
    /// unusable base URL or zero timeout.
    pub fn validate(&self) -> Result<()> {
        match &self.auth {
            AuthCredential::ApiKey(key) => {
                if !is_credential_token(key) {
                    return Err(Error::InvalidApiKey(
                        "Missing or invalid Drip API key.".to_string(),
                    ));
                }
            }
            AuthCredential::AccessToken(token) => {
                if !is_credential_token(token) {
                    return Err(Error::InvalidAccessToken(
                        "Missing or invalid Drip access token.".to_string(),
                    ));
                }
            }
        }

        if !is_credential_token(&self.account_id) {
            return Err(Error::InvalidAccountId(
                "Missing or invalid Drip account ID.".to_string(),
            ));
        }

        if self.base_url.scheme() != "https" && self.base_url.scheme() != "http" {
            return Err(Error::Config(format!(
                "Base URL must use http or https scheme, got: {}",
                self.base_url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(Error::Config(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(Error::Config(
                "Connect timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Whether a trimmed credential or account identifier matches `^[\w-]+$`.
fn is_credential_token(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Builder for creating Drip clients
#[derive(Debug, Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    access_token: Option<String>,
    account_id: Option<String>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
    middleware: Option<RequestMiddleware>,
}

impl ClientBuilder {
    /// Create a new client builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key (HTTP Basic auth)
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the OAuth access token (Bearer auth)
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the account ID requests are scoped to
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Set the base URL
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the value does not parse as a URL.
    pub fn base_url(mut self, url: impl TryInto<Url>) -> Result<Self> {
        self.base_url = Some(
            url.try_into()
                .map_err(|_| Error::Config("Invalid base URL".to_string()))?,
        );
        Ok(self)
    }

    /// Set the total request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set a custom HTTP client
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set request middleware for logging and debugging
    pub fn middleware(mut self, middleware: RequestMiddleware) -> Self {
        self.middleware = Some(middleware);
        self
    }

    /// Enable full request/response logging
    pub fn with_logging(mut self) -> Self {
        let middleware = self.middleware.take().unwrap_or_default();
        self.middleware = Some(middleware.with_full_logging());
        self
    }

    /// Build the client
    ///
    /// Credentials and the account ID fall back to the `DRIP_ACCESS_TOKEN`,
    /// `DRIP_API_KEY`, `DRIP_ACCOUNT_ID` and `DRIP_BASE_URL` environment
    /// variables when not set on the builder. An access token takes
    /// precedence over an API key when both are present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`] when neither credential kind is
    /// available, or the validation errors described on
    /// [`Config::validate`].
    pub fn build(self) -> Result<Client> {
        let auth = if let Some(token) = self.access_token {
            AuthCredential::AccessToken(token.trim().to_string())
        } else if let Some(key) = self.api_key {
            AuthCredential::ApiKey(key.trim().to_string())
        } else if let Ok(token) = std::env::var("DRIP_ACCESS_TOKEN") {
            AuthCredential::AccessToken(token.trim().to_string())
        } else if let Ok(key) = std::env::var("DRIP_API_KEY") {
            AuthCredential::ApiKey(key.trim().to_string())
        } else {
            return Err(Error::MissingCredentials);
        };

        let account_id = self
            .account_id
            .or_else(|| std::env::var("DRIP_ACCOUNT_ID").ok())
            .map(|id| id.trim().to_string())
            .ok_or_else(|| {
                Error::InvalidAccountId("Missing or invalid Drip account ID.".to_string())
            })?;

        let base_url = if let Some(base_url) = self.base_url {
            base_url
        } else if let Ok(env_url) = std::env::var("DRIP_BASE_URL") {
            env_url.parse().map_err(|_| {
                Error::Config(format!(
                    "Invalid base URL in DRIP_BASE_URL environment variable: {env_url}"
                ))
            })?
        } else {
            DEFAULT_BASE_URL
                .parse()
                .expect("Default base URL should be valid")
        };

        let config = Config {
            auth,
            account_id,
            base_url,
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)),
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(30)),
        };

        config.validate()?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(config.timeout)
                .connect_timeout(config.connect_timeout)
                .build()
                .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?,
        };

        let inner = ClientInner {
            http_client,
            config,
            middleware: self.middleware.unwrap_or_default(),
        };

        Ok(Client::from_inner(inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn valid_config() -> Config {
        Config {
            auth: AuthCredential::ApiKey("qsor48ughrjufyu2dadraasfa1212424".to_string()),
            account_id: "123456".to_string(),
            base_url: DEFAULT_BASE_URL.parse().unwrap(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_config_validation_valid() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_api_key() {
        let config = Config {
            auth: AuthCredential::ApiKey(String::new()),
            ..valid_config()
        };

        let result = config.validate();
        assert!(matches!(result, Err(Error::InvalidApiKey(_))));
    }

    #[test]
    fn test_config_validation_malformed_api_key() {
        let config = Config {
            auth: AuthCredential::ApiKey("key with spaces".to_string()),
            ..valid_config()
        };

        let result = config.validate();
        assert!(matches!(result, Err(Error::InvalidApiKey(_))));
    }

    #[test]
    fn test_config_validation_malformed_access_token() {
        let config = Config {
            auth: AuthCredential::AccessToken("token!".to_string()),
            ..valid_config()
        };

        let result = config.validate();
        assert!(matches!(result, Err(Error::InvalidAccessToken(_))));
    }

    #[test]
    fn test_config_validation_empty_account_id() {
        let config = Config {
            account_id: "   ".to_string(),
            ..valid_config()
        };

        let result = config.validate();
        assert!(matches!(result, Err(Error::InvalidAccountId(_))));
    }

    #[test]
    fn test_config_validation_account_id_with_separator_chars() {
        let config = Config {
            account_id: "acct_01-test".to_string(),
            ..valid_config()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_url_scheme() {
        let config = Config {
            base_url: "ftp://invalid.com".parse().unwrap(),
            ..valid_config()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Base URL must use http or https scheme"));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let config = Config {
            timeout: Duration::from_secs(0),
            ..valid_config()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Timeout must be greater than zero"));
    }

    #[test]
    fn test_is_credential_token() {
        assert!(is_credential_token("qsor48ughrjufyu2dadraasfa1212424"));
        assert!(is_credential_token("abc_123-XYZ"));
        assert!(is_credential_token("  abc123  ")); // trimmed before checking
        assert!(!is_credential_token(""));
        assert!(!is_credential_token("   "));
        assert!(!is_credential_token("key with spaces"));
        assert!(!is_credential_token("key!"));
        assert!(!is_credential_token("key@example.com"));
    }

    #[test]
    fn test_client_builder_fluent_api() {
        let builder = ClientBuilder::new()
            .api_key("abc123")
            .account_id("9999999")
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5));

        assert_eq!(builder.api_key.as_deref(), Some("abc123"));
        assert_eq!(builder.account_id.as_deref(), Some("9999999"));
        assert_eq!(builder.timeout, Some(Duration::from_secs(10)));
        assert_eq!(builder.connect_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_client_builder_base_url_invalid() {
        let result = ClientBuilder::new().base_url("not-a-url");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid base URL"));
    }

    #[test]
    #[serial]
    fn test_client_builder_api_key_auth() {
        let client = ClientBuilder::new()
            .api_key("abc123")
            .account_id("1234")
            .build()
            .unwrap();

        assert_eq!(
            client.config().auth,
            AuthCredential::ApiKey("abc123".to_string())
        );
        assert_eq!(client.account_id(), "1234");
        assert_eq!(client.config().base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(client.config().timeout, Duration::from_secs(30));
        assert_eq!(client.config().connect_timeout, Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_client_builder_access_token_takes_precedence() {
        let client = ClientBuilder::new()
            .api_key("abc123")
            .access_token("tok456")
            .account_id("1234")
            .build()
            .unwrap();

        assert_eq!(
            client.config().auth,
            AuthCredential::AccessToken("tok456".to_string())
        );
    }

    #[test]
    #[serial]
    fn test_client_builder_trims_credentials() {
        let client = ClientBuilder::new()
            .api_key("  abc123  ")
            .account_id(" 1234 ")
            .build()
            .unwrap();

        assert_eq!(client.config().auth.value(), "abc123");
        assert_eq!(client.account_id(), "1234");
    }

    #[test]
    #[serial]
    fn test_client_builder_env_vars() {
        // Save original values
        let original_api_key = env::var("DRIP_API_KEY").ok();
        let original_access_token = env::var("DRIP_ACCESS_TOKEN").ok();
        let original_account_id = env::var("DRIP_ACCOUNT_ID").ok();
        let original_base_url = env::var("DRIP_BASE_URL").ok();

        env::remove_var("DRIP_API_KEY");
        env::remove_var("DRIP_ACCESS_TOKEN");
        env::remove_var("DRIP_ACCOUNT_ID");
        env::remove_var("DRIP_BASE_URL");

        // Missing credentials
        let result = ClientBuilder::new().account_id("1234").build();
        assert!(matches!(result, Err(Error::MissingCredentials)));

        // Missing account ID
        let result = ClientBuilder::new().api_key("abc123").build();
        assert!(matches!(result, Err(Error::InvalidAccountId(_))));

        // DRIP_API_KEY + DRIP_ACCOUNT_ID
        env::set_var("DRIP_API_KEY", "envkey123");
        env::set_var("DRIP_ACCOUNT_ID", "9876");
        let client = ClientBuilder::new().build().unwrap();
        assert_eq!(
            client.config().auth,
            AuthCredential::ApiKey("envkey123".to_string())
        );
        assert_eq!(client.account_id(), "9876");

        // DRIP_ACCESS_TOKEN wins over DRIP_API_KEY
        env::set_var("DRIP_ACCESS_TOKEN", "envtok456");
        let client = ClientBuilder::new().build().unwrap();
        assert_eq!(
            client.config().auth,
            AuthCredential::AccessToken("envtok456".to_string())
        );

        // DRIP_BASE_URL
        env::set_var("DRIP_BASE_URL", "http://api.example.com/v9001/");
        let client = ClientBuilder::new().build().unwrap();
        assert_eq!(
            client.config().base_url.as_str(),
            "http://api.example.com/v9001/"
        );

        // Invalid base URL in env var
        env::set_var("DRIP_BASE_URL", "not-a-valid-url");
        let result = ClientBuilder::new().build();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid base URL in DRIP_BASE_URL"));

        // Builder precedence over env vars
        env::set_var("DRIP_BASE_URL", "http://env.example.com/");
        let client = ClientBuilder::new()
            .api_key("builderkey")
            .account_id("1111")
            .base_url("http://builder.example.com/")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            client.config().auth,
            AuthCredential::ApiKey("builderkey".to_string())
        );
        assert_eq!(client.account_id(), "1111");
        assert_eq!(
            client.config().base_url.as_str(),
            "http://builder.example.com/"
        );

        // Restore original values
        env::remove_var("DRIP_API_KEY");
        env::remove_var("DRIP_ACCESS_TOKEN");
        env::remove_var("DRIP_ACCOUNT_ID");
        env::remove_var("DRIP_BASE_URL");

        if let Some(val) = original_api_key {
            env::set_var("DRIP_API_KEY", val);
        }
        if let Some(val) = original_access_token {
            env::set_var("DRIP_ACCESS_TOKEN", val);
        }
        if let Some(val) = original_account_id {
            env::set_var("DRIP_ACCOUNT_ID", val);
        }
        if let Some(val) = original_base_url {
            env::set_var("DRIP_BASE_URL", val);
        }
    }

    #[test]
    #[serial]
    fn test_client_builder_invalid_credentials_fail_with_specific_kind() {
        let result = ClientBuilder::new()
            .api_key("bad key!")
            .account_id("1234")
            .build();
        assert!(matches!(result, Err(Error::InvalidApiKey(_))));

        let result = ClientBuilder::new()
            .access_token("bad token!")
            .account_id("1234")
            .build();
        assert!(matches!(result, Err(Error::InvalidAccessToken(_))));

        let result = ClientBuilder::new()
            .api_key("abc123")
            .account_id("bad id!")
            .build();
        assert!(matches!(result, Err(Error::InvalidAccountId(_))));
    }

    #[test]
    #[serial]
    fn test_client_builder_with_custom_http_client() {
        let custom_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        let result = ClientBuilder::new()
            .api_key("abc123")
            .account_id("1234")
            .http_client(custom_client)
            .build();

        assert!(result.is_ok());
    }
}
