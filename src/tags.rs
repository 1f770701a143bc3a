//! Tag operations: listing account tags and applying/removing a tag on a
//! subscriber.

use serde_json::Value;

use crate::client::Client;
use crate::request::{self, RequestSpec};
use crate::response::ApiResponse;
use crate::validation::{validate, FieldType, Rule};
use crate::Result;

const TAG_RULES: &[Rule] = &[
    Rule::Only(&["email", "tag"]),
    Rule::RequiredField("email", FieldType::String),
    Rule::RequiredField("tag", FieldType::String),
];

impl Client {
    /// List all tags used in the account.
    pub async fn get_tags(&self) -> Result<ApiResponse> {
        let path = format!("{}/tags", self.account_id());
        self.inner.execute(RequestSpec::get(path)).await
    }

    /// Apply a tag to a subscriber.
    ///
    /// The API returns a bare status code with no content on success.
    pub async fn tag_subscriber(&self, params: Value) -> Result<ApiResponse> {
        let params = request::into_object(params)?;
        validate(TAG_RULES, &params)?;

        let path = format!("{}/tags", self.account_id());
        let body = request::wrap_singular("tags", params);
        self.inner
            .execute(RequestSpec::post(path).with_body(body))
            .await
    }

    /// Remove a tag from a subscriber.
    pub async fn untag_subscriber(&self, params: Value) -> Result<ApiResponse> {
        let params = request::into_object(params)?;
        validate(TAG_RULES, &params)?;

        let path = format!("{}/tags", self.account_id());
        let body = request::wrap_singular("tags", params);
        self.inner
            .execute(RequestSpec::delete(path).with_body(body))
            .await
    }
}
