//! Form, conversion goal and custom-field catalog operations.

use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::request::{self, RequestSpec};
use crate::response::ApiResponse;
use crate::validation::{validate, Rule};
use crate::Result;

const CONVERSION_LIST_RULES: &[Rule] = &[
    Rule::Only(&["status", "sort", "direction"]),
    Rule::InSet("status", &["active", "disabled", "all"]),
    Rule::InSet("sort", &["created_at", "name"]),
    Rule::InSet("direction", &["asc", "desc"]),
];

impl Client {
    /// List all forms for the account.
    pub async fn get_forms(&self) -> Result<ApiResponse> {
        let path = format!("{}/forms", self.account_id());
        self.inner.execute(RequestSpec::get(path)).await
    }

    /// Fetch a form by its ID.
    pub async fn fetch_form(&self, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let form_id = request::take_id(&mut params, "form_id")
            .ok_or_else(|| Error::InvalidArgument("form_id was not specified".to_string()))?;

        let path = format!(
            "{}/forms/{}",
            self.account_id(),
            request::encode_path_segment(&form_id)
        );
        self.inner.execute(RequestSpec::get(path)).await
    }

    /// List conversion goals for the account.
    pub async fn get_conversions(&self, params: Value) -> Result<ApiResponse> {
        let params = request::into_object(params)?;
        validate(CONVERSION_LIST_RULES, &params)?;

        let path = format!("{}/goals", self.account_id());
        self.inner
            .execute(RequestSpec::get(path).with_query(&params))
            .await
    }

    /// Fetch a conversion goal by its ID.
    pub async fn fetch_conversion(&self, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let conversion_id = request::take_id(&mut params, "conversion_id")
            .ok_or_else(|| {
                Error::InvalidArgument("conversion_id was not specified".to_string())
            })?;

        let path = format!(
            "{}/goals/{}",
            self.account_id(),
            request::encode_path_segment(&conversion_id)
        );
        self.inner.execute(RequestSpec::get(path)).await
    }

    /// List all custom field identifiers used in the account.
    pub async fn get_custom_fields(&self) -> Result<ApiResponse> {
        let path = format!("{}/custom_field_identifiers", self.account_id());
        self.inner.execute(RequestSpec::get(path)).await
    }
}
