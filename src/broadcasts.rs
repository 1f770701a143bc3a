//! Broadcast (one-off email) operations.

use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::request::{self, RequestSpec};
use crate::response::ApiResponse;
use crate::validation::{validate, Rule};
use crate::Result;

const BROADCAST_LIST_RULES: &[Rule] = &[
    Rule::Only(&["status", "sort", "direction"]),
    Rule::InSet("status", &["draft", "scheduled", "sent", "all"]),
    Rule::InSet("sort", &["created_at", "send_at", "name"]),
    Rule::InSet("direction", &["asc", "desc"]),
];

impl Client {
    /// List the broadcasts for the account.
    pub async fn get_broadcasts(&self, params: Value) -> Result<ApiResponse> {
        let params = request::into_object(params)?;
        validate(BROADCAST_LIST_RULES, &params)?;

        let path = format!("{}/broadcasts", self.account_id());
        self.inner
            .execute(RequestSpec::get(path).with_query(&params))
            .await
    }

    /// Fetch a broadcast by its ID.
    pub async fn fetch_broadcast(&self, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let broadcast_id = request::take_id(&mut params, "broadcast_id")
            .ok_or_else(|| Error::InvalidArgument("broadcast_id was not specified".to_string()))?;

        let path = format!(
            "{}/broadcasts/{}",
            self.account_id(),
            request::encode_path_segment(&broadcast_id)
        );
        self.inner.execute(RequestSpec::get(path)).await
    }
}
