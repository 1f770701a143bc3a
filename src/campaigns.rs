//! Campaign operations: listing, fetching, activation state, and enrolling
//! subscribers into a campaign.

use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::request::{self, RequestSpec};
use crate::response::ApiResponse;
use crate::validation::{validate, FieldType, Rule};
use crate::Result;

const CAMPAIGN_LIST_RULES: &[Rule] = &[
    Rule::Only(&["status", "sort", "direction"]),
    Rule::InSet("status", &["active", "draft", "paused", "all"]),
    Rule::InSet("sort", &["created_at", "send_at", "name"]),
    Rule::InSet("direction", &["asc", "desc"]),
];

const CAMPAIGN_SUBSCRIBER_LIST_RULES: &[Rule] = &[
    Rule::Only(&["status", "page", "sort", "direction", "per_page"]),
    Rule::InSet("status", &["active", "unsubscribed", "removed"]),
    Rule::IntRange("page", 1, i64::MAX),
    Rule::InSet("sort", &["id", "created_at"]),
    Rule::InSet("direction", &["asc", "desc"]),
    Rule::IntRange("per_page", 1, 1000),
];

const SUBSCRIBE_RULES: &[Rule] = &[
    Rule::RequiredField("email", FieldType::String),
    Rule::Field("double_optin", FieldType::Bool),
];

impl Client {
    /// List the campaigns for the account.
    ///
    /// Accepts optional `status` (`active`, `draft`, `paused`, `all`),
    /// `sort` and `direction` filters, forwarded as query parameters.
    pub async fn get_campaigns(&self, params: Value) -> Result<ApiResponse> {
        let params = request::into_object(params)?;
        validate(CAMPAIGN_LIST_RULES, &params)?;

        let path = format!("{}/campaigns", self.account_id());
        self.inner
            .execute(RequestSpec::get(path).with_query(&params))
            .await
    }

    /// Fetch a single campaign by its ID.
    pub async fn fetch_campaign(&self, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let campaign_id = require_campaign_id(&mut params)?;

        let path = format!(
            "{}/campaigns/{}",
            self.account_id(),
            request::encode_path_segment(&campaign_id)
        );
        self.inner
            .execute(RequestSpec::get(path).with_query(&params))
            .await
    }

    /// Activate a campaign.
    pub async fn activate_campaign(&self, params: Value) -> Result<ApiResponse> {
        self.campaign_state_change("activate", params).await
    }

    /// Pause a campaign.
    pub async fn pause_campaign(&self, params: Value) -> Result<ApiResponse> {
        self.campaign_state_change("pause", params).await
    }

    async fn campaign_state_change(&self, action: &str, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let campaign_id = require_campaign_id(&mut params)?;

        let path = format!(
            "{}/campaigns/{}/{}",
            self.account_id(),
            request::encode_path_segment(&campaign_id),
            action
        );
        self.inner
            .execute(RequestSpec::post(path).with_body(Value::Object(params)))
            .await
    }

    /// List the subscribers of a campaign.
    pub async fn campaign_subscribers(&self, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let campaign_id = require_campaign_id(&mut params)?;
        validate(CAMPAIGN_SUBSCRIBER_LIST_RULES, &params)?;

        let path = format!(
            "{}/campaigns/{}/subscribers",
            self.account_id(),
            request::encode_path_segment(&campaign_id)
        );
        self.inner
            .execute(RequestSpec::get(path).with_query(&params))
            .await
    }

    /// Subscribe someone to a campaign.
    ///
    /// Requires `campaign_id` and `email`. When the caller does not specify
    /// `double_optin` it is injected as `true`, so enrollment defaults to the
    /// confirmation-required flow. The payload is sent as
    /// `{"subscribers": [{...}]}`.
    pub async fn subscribe_subscriber(&self, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let campaign_id = request::take_id(&mut params, "campaign_id")
            .ok_or_else(|| Error::InvalidArgument("Campaign ID not specified".to_string()))?;

        validate(SUBSCRIBE_RULES, &params)?;

        // Injected after validation so the rule set treats it as optional.
        params.entry("double_optin").or_insert(Value::Bool(true));

        let path = format!(
            "{}/campaigns/{}/subscribers",
            self.account_id(),
            request::encode_path_segment(&campaign_id)
        );
        let body = request::wrap_singular("subscribers", params);
        self.inner
            .execute(RequestSpec::post(path).with_body(body))
            .await
    }
}

fn require_campaign_id(params: &mut serde_json::Map<String, Value>) -> Result<String> {
    request::take_id(params, "campaign_id")
        .ok_or_else(|| Error::InvalidArgument("campaign_id was not specified".to_string()))
}
