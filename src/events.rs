//! Custom event operations.

use serde_json::Value;

use crate::client::Client;
use crate::request::{self, RequestSpec};
use crate::response::ApiResponse;
use crate::validation::{validate, FieldType, Rule};
use crate::Result;

const RECORD_EVENT_RULES: &[Rule] = &[
    Rule::RequiredField("action", FieldType::String),
    Rule::OneOf(&["email", "id"]),
    Rule::Field("prospect", FieldType::Bool),
    Rule::Field("properties", FieldType::Object),
    Rule::Field("occurred_at", FieldType::Timestamp),
];

const EVENT_ACTION_LIST_RULES: &[Rule] = &[
    Rule::IntRange("page", 1, i64::MAX),
    Rule::IntRange("per_page", 1, 1000),
];

impl Client {
    /// Record an event performed by a subscriber.
    ///
    /// Requires `action` and one of `email` or `id`; optional `properties`
    /// mapping and RFC 3339 `occurred_at`. The payload is sent as
    /// `{"events": [{...}]}`.
    pub async fn record_event(&self, params: Value) -> Result<ApiResponse> {
        let params = request::into_object(params)?;
        validate(RECORD_EVENT_RULES, &params)?;

        let path = format!("{}/events", self.account_id());
        let body = request::wrap_singular("events", params);
        self.inner
            .execute(RequestSpec::post(path).with_body(body))
            .await
    }

    /// List all custom event actions used in the account.
    pub async fn get_event_actions(&self, params: Value) -> Result<ApiResponse> {
        let params = request::into_object(params)?;
        validate(EVENT_ACTION_LIST_RULES, &params)?;

        let path = format!("{}/event_actions", self.account_id());
        self.inner
            .execute(RequestSpec::get(path).with_query(&params))
            .await
    }
}
