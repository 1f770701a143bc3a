//! Account and authenticated-user operations.

use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::request::{self, RequestSpec};
use crate::response::ApiResponse;
use crate::Result;

impl Client {
    /// List the accounts the credential has access to.
    ///
    /// The only collection endpoint not scoped under an account ID.
    pub async fn get_accounts(&self) -> Result<ApiResponse> {
        self.inner.execute(RequestSpec::get("accounts")).await
    }

    /// Fetch an account by its ID.
    pub async fn fetch_account(&self, params: Value) -> Result<ApiResponse> {
        let mut params = request::into_object(params)?;
        let account_id = request::take_id(&mut params, "account_id")
            .ok_or_else(|| Error::InvalidArgument("account_id was not specified".to_string()))?;

        let path = format!("accounts/{}", request::encode_path_segment(&account_id));
        self.inner
            .execute(RequestSpec::get(path).with_query(&params))
            .await
    }

    /// Fetch the currently authenticated user.
    pub async fn fetch_user(&self) -> Result<ApiResponse> {
        self.inner.execute(RequestSpec::get("user")).await
    }
}
