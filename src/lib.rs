//! # Drip Rust SDK
//!
//! A Rust client for the Drip marketing-automation REST API v2, providing
//! type-safe, async-first access to campaigns, subscribers, tags, events and
//! shopper activity.
//!
//! Every operation validates its parameters before anything is sent, then
//! returns an [`ApiResponse`]: HTTP 4xx/5xx outcomes are normal values with
//! structured error reasons, not `Err`s. Errors are reserved for bad
//! credentials, failed validation and transport failures.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use drip_rust::Client;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .api_key("qsor48ughrjufyu2dadraasfa1212424")
//!         .account_id("123456")
//!         .build()?;
//!
//!     let response = client
//!         .subscribe_subscriber(json!({
//!             "campaign_id": "1234",
//!             "email": "test@example.com",
//!         }))
//!         .await?;
//!
//!     if response.is_success() {
//!         println!("Enrolled: {:?}", response.contents());
//!     } else {
//!         for reason in response.errors() {
//!             println!("{}: {}", reason.code, reason.message);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod validation;

mod accounts;
mod broadcasts;
mod campaigns;
mod events;
mod forms;
mod orders;
mod subscribers;
mod tags;


#[cfg(test)]
mod client_test;

// Re-export commonly used types for convenience
pub use client::{Client, RequestMiddleware};
pub use config::{AuthCredential, ClientBuilder, Config, DEFAULT_BASE_URL};
pub use error::{Error, ErrorCategory};
pub use request::RequestSpec;
pub use response::{ApiResponse, ErrorReason, ErrorResponse, SuccessResponse};
pub use validation::{validate, FieldType, Rule};

/// Result type alias for the SDK
pub type Result<T> = std::result::Result<T, Error>;
