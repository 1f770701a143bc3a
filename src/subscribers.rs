//! Subscriber operations: create/update (single and batched), fetch,
//! unsubscribe and delete.

use serde_json::{Map, Value};

use crate::client::Client;
use crate::error::Error;
use crate::request::{self, RequestSpec};
use crate::response::ApiResponse;
use crate::validation::{validate, FieldType, Rule};
use crate::Result;

/// Records sent to the batch endpoint are chunked to this many per request.
pub(crate) const BATCH_SIZE: usize = 1000;

const SUBSCRIBER_RULES: &[Rule] = &[
    Rule::OneOf(&["email", "id", "visitor_uuid"]),
    Rule::Field("email", FieldType::Email),
    Rule::Field("new_email", FieldType::Email),
    Rule::Field("first_name", FieldType::String),
    Rule::Field("last_name", FieldType::String),
    Rule::Field("address1", FieldType::String),
    Rule::Field("address2", FieldType::String),
    Rule::Field("city", FieldType::String),
    Rule::Field("state", FieldType::String),
    Rule::Field("zip", FieldType::String),
    Rule::Field("country", FieldType::String),
    Rule::Field("time_zone", FieldType::String),
    Rule::Field("lifetime_value", FieldType::Number),
    Rule::Field("ip_address", FieldType::Ip),
    Rule::Field("custom_fields", FieldType::Object),
    Rule::Field("tags", FieldType::Array),
    Rule::Field("remove_tags", FieldType::Array),
    Rule::Field("prospect", FieldType::Bool),
    Rule::Field("base_lead_score", FieldType::Integer),
    Rule::InSet("eu_consent", &["granted", "denied"]),
    Rule::Field("eu_consent_message", FieldType::String),
    Rule::InSet("status", &["active", "unsubscribed"]),
];

impl Client {
    /// Create or update a subscriber record.
    ///
    /// The record must carry at least one of `email`, `id` or
    /// `visitor_uuid`; everything else is optional and type-checked. The
    /// payload is sent as `{"subscribers": [{...}]}`.
    pub async fn create_or_update_subscriber(&self, params: Value) -> Result<ApiResponse> {
        let params = request::into_object(params)?;
        validate(SUBSCRIBER_RULES, &params)?;

        let path = format!("{}/subscribers", self.account_id());
        let body = request::wrap_singular("subscribers", params);
        self.inner
            .execute(RequestSpec::post(path).with_body(body))
            .await
    }

    /// Create or update a batch (up to 1000) of subscribers.
    ///
    /// The caller provides the full batch structure
    /// (`{"batches": [{"subscribers": [...]}]}`); it is passed through
    /// unchanged.
    pub async fn create_or_update_subscribers(&self, params: Value) -> Result<ApiResponse> {
        let path = format!("{}/subscribers/batches", self.account_id());
        self.inner
            .execute(RequestSpec::post(path).with_body(params))
            .await
    }

    /// Create or update an arbitrary number of subscriber records.
    ///
    /// Records are validated individually and submitted in chunks of 1000
    /// per request. On the first batch that comes back as an error result,
    /// iteration stops and that result is returned without sending the
    /// remaining batches.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when the list is empty or any record fails
    /// the subscriber rule set; nothing is sent in either case before the
    /// offending batch.
    pub async fn batch_create_or_update_subscribers(
        &self,
        subscribers: Vec<Value>,
    ) -> Result<ApiResponse> {
        let path = format!("{}/subscribers/batches", self.account_id());

        let mut last = None;
        for chunk in subscribers.chunks(BATCH_SIZE) {
            for subscriber in chunk {
                let record = subscriber.as_object().ok_or_else(|| {
                    Error::InvalidArgument("each subscriber must be a JSON object".to_string())
                })?;
                validate(SUBSCRIBER_RULES, record)?;
            }

            let mut batch = Map::new();
            batch.insert("subscribers".to_string(), Value::Array(chunk.to_vec()));
            let body = request::wrap_batch("batches", vec![Value::Object(batch)]);

            let response = self
                .inner
                .execute(RequestSpec::post(path.clone()).with_body(body))
                .await?;
            if !response.is_success() {
                return Ok(response);
            }
            last = Some(response);
        }

        last.ok_or_else(|| {
            Error::InvalidArgument("subscribers must not be empty".to_string())
        })
    }

    /// Fetch a subscriber by ID or email.
    pub async fn fetch_subscriber(&self, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let subscriber_id = take_subscriber_ref(&mut params)?;

        let path = format!(
            "{}/subscribers/{}",
            self.account_id(),
            request::encode_path_segment(&subscriber_id)
        );
        self.inner.execute(RequestSpec::get(path)).await
    }

    /// List the subscribers for the account.
    pub async fn fetch_subscribers(&self) -> Result<ApiResponse> {
        let path = format!("{}/subscribers", self.account_id());
        self.inner.execute(RequestSpec::get(path)).await
    }

    /// List the campaigns a subscriber is enrolled in.
    pub async fn fetch_subscriber_campaigns(&self, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let subscriber_id = take_subscriber_ref(&mut params)?;

        let path = format!(
            "{}/subscribers/{}/campaign_subscriptions",
            self.account_id(),
            request::encode_path_segment(&subscriber_id)
        );
        self.inner.execute(RequestSpec::get(path)).await
    }

    /// Unsubscribe someone from all mailings.
    ///
    /// The identifying key is removed from the parameters so it is not sent
    /// along with the other data.
    pub async fn unsubscribe_subscriber(&self, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let subscriber_id = take_subscriber_ref(&mut params)?;

        let path = format!(
            "{}/subscribers/{}/unsubscribe",
            self.account_id(),
            request::encode_path_segment(&subscriber_id)
        );
        self.inner
            .execute(RequestSpec::post(path).with_body(Value::Object(params)))
            .await
    }

    /// Delete a subscriber by ID or email.
    pub async fn delete_subscriber(&self, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let subscriber_id = take_subscriber_ref(&mut params)?;

        let path = format!(
            "{}/subscribers/{}",
            self.account_id(),
            request::encode_path_segment(&subscriber_id)
        );
        self.inner
            .execute(RequestSpec::delete(path).with_body(Value::Object(params)))
            .await
    }
}

fn take_subscriber_ref(params: &mut Map<String, Value>) -> Result<String> {
    request::take_id(params, "subscriber_id")
        .or_else(|| request::take_id(params, "email"))
        .ok_or_else(|| {
            Error::InvalidArgument(
                "Subscriber ID or Email was not specified. \
                 You must specify either Subscriber ID or Email."
                    .to_string(),
            )
        })
}
