//! Client implementation for the Drip REST API

use std::sync::Arc;

use serde_json::Value;

use crate::{
    config::{ClientBuilder, Config},
    error::Error,
    request::{self, RequestSpec},
    response::{self, ApiResponse},
    Result,
};

/// Main client for interacting with the Drip API
///
/// Cheap to clone; all state is immutable and shared behind an `Arc`, so a
/// single client can be used freely from concurrent call sites.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) inner: Arc<ClientInner>,
}

/// Middleware for request/response logging and debugging
#[derive(Debug, Clone, Default)]
pub struct RequestMiddleware {
    pub log_requests: bool,
    pub log_responses: bool,
    pub log_headers: bool,
    pub log_body: bool,
}

impl RequestMiddleware {
    /// Enable request logging
    pub fn with_request_logging(mut self) -> Self {
        self.log_requests = true;
        self
    }

    /// Enable response logging
    pub fn with_response_logging(mut self) -> Self {
        self.log_responses = true;
        self
    }

    /// Enable header logging
    pub fn with_header_logging(mut self) -> Self {
        self.log_headers = true;
        self
    }

    /// Enable body logging
    pub fn with_body_logging(mut self) -> Self {
        self.log_body = true;
        self
    }

    /// Enable all logging
    pub fn with_full_logging(mut self) -> Self {
        self.log_requests = true;
        self.log_responses = true;
        self.log_headers = true;
        self.log_body = true;
        self
    }
}

#[derive(Debug)]
pub(crate) struct ClientInner {
    pub(crate) http_client: reqwest::Client,
    pub(crate) config: Config,
    pub(crate) middleware: RequestMiddleware,
}

impl ClientInner {
    /// Send a built request and classify the raw response.
    ///
    /// Every HTTP status produces an `Ok(ApiResponse)`; only transport
    /// failures and serialization problems surface as `Err`.
    pub(crate) async fn execute(&self, spec: RequestSpec) -> Result<ApiResponse> {
        let mut url = self
            .config
            .base_url
            .join(&spec.path)
            .map_err(|e| Error::Config(format!("Invalid URL path '{}': {}", spec.path, e)))?;

        for (key, value) in &spec.query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let headers = request::headers_for(&self.config)?;

        let mut request_builder = self
            .http_client
            .request(spec.method.clone(), url.clone())
            .headers(headers.clone());

        if let Some(body) = &spec.body {
            request_builder = request_builder.body(serde_json::to_string(body)?);
        }

        if self.middleware.log_requests {
            eprintln!("HTTP Request: {} {}", spec.method, url);

            if self.middleware.log_headers {
                eprintln!("Request Headers: {headers:?}");
            }

            if self.middleware.log_body {
                if let Some(body) = &spec.body {
                    eprintln!(
                        "Request Body: {}",
                        serde_json::to_string_pretty(body)
                            .unwrap_or_else(|_| "Invalid JSON".to_string())
                    );
                }
            }
        }

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(self.config.timeout)
            } else if e.is_connect() {
                Error::Network(format!("Connection failed: {e}"))
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();

        if self.middleware.log_responses {
            eprintln!("HTTP Response: {} {}", status, response.url());

            if self.middleware.log_headers {
                eprintln!("Response Headers: {:?}", response.headers());
            }
        }

        let response_text = response.text().await.map_err(Error::Http)?;

        if self.middleware.log_responses && self.middleware.log_body {
            eprintln!("Response Body: {response_text}");
        }

        // Echoed back on the response: the wrapped body for writes, the
        // query mapping for reads.
        let params = match spec.body {
            Some(body) => body,
            None => Value::Object(
                spec.query
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect(),
            ),
        };

        Ok(response::classify(
            url.to_string(),
            params,
            status,
            &response_text,
        ))
    }
}

impl Client {
    /// Create a new client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client from an API key and account ID
    ///
    /// The positional form kept for callers migrating from older client
    /// versions; equivalent to
    /// `Client::builder().api_key(key).account_id(id).build()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidApiKey`] or [`Error::InvalidAccountId`] when a
    /// value is empty or fails the `^[\w-]+$` format check after trimming.
    pub fn new(api_key: impl Into<String>, account_id: impl Into<String>) -> Result<Self> {
        Self::builder()
            .api_key(api_key)
            .account_id(account_id)
            .build()
    }

    /// Create a client from ClientInner (internal use)
    pub(crate) fn from_inner(inner: ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// The account ID requests are scoped to
    pub fn account_id(&self) -> &str {
        &self.inner.config.account_id
    }

    /// The client's configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
