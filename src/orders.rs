//! Shopper activity order events, single and auto-batched.

use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::request::{self, RequestSpec};
use crate::response::ApiResponse;
use crate::validation::{validate, FieldType, Rule};
use crate::Result;

/// Orders sent to the batch endpoint are chunked to this many per request.
pub(crate) const BATCH_SIZE: usize = 1000;

const ADDRESS_RULES: &[Rule] = &[
    Rule::Only(&[
        "label",
        "first_name",
        "last_name",
        "company",
        "address_1",
        "address_2",
        "city",
        "state",
        "postal_code",
        "country",
        "phone",
    ]),
    Rule::Field("label", FieldType::String),
    Rule::Field("first_name", FieldType::String),
    Rule::Field("last_name", FieldType::String),
    Rule::Field("company", FieldType::String),
    Rule::Field("address_1", FieldType::String),
    Rule::Field("address_2", FieldType::String),
    Rule::Field("city", FieldType::String),
    Rule::Field("state", FieldType::String),
    Rule::Field("postal_code", FieldType::String),
    Rule::Field("country", FieldType::String),
    Rule::Field("phone", FieldType::String),
];

const ITEM_RULES: &[Rule] = &[
    Rule::RequiredField("name", FieldType::String),
    Rule::RequiredField("price", FieldType::Number),
    Rule::Field("brand", FieldType::String),
    Rule::Field("categories", FieldType::Array),
    Rule::Field("quantity", FieldType::Integer),
    Rule::Field("discounts", FieldType::Number),
    Rule::Field("taxes", FieldType::Number),
    Rule::Field("fees", FieldType::Number),
    Rule::Field("shipping", FieldType::Number),
    Rule::Field("total", FieldType::Number),
    Rule::Field("product_url", FieldType::String),
    Rule::Field("image_url", FieldType::String),
];

const ORDER_RULES: &[Rule] = &[
    Rule::OneOf(&["email", "person_id"]),
    Rule::RequiredField("provider", FieldType::String),
    Rule::RequiredInSet(
        "action",
        &["placed", "updated", "paid", "fulfilled", "refunded", "canceled"],
    ),
    Rule::RequiredField("order_id", FieldType::String),
    Rule::Required("items"),
    Rule::Items("items", ITEM_RULES),
    Rule::Field("occurred_at", FieldType::Timestamp),
    Rule::Field("new_email", FieldType::Email),
    Rule::Field("order_public_id", FieldType::String),
    Rule::Field("grand_total", FieldType::Number),
    Rule::Field("total_discounts", FieldType::Number),
    Rule::Field("total_taxes", FieldType::Number),
    Rule::Field("total_fees", FieldType::Number),
    Rule::Field("total_shipping", FieldType::Number),
    Rule::Field("refund_amount", FieldType::Number),
    Rule::Field("currency", FieldType::CurrencyCode),
    Rule::Field("order_url", FieldType::String),
    Rule::Nested("billing_address", ADDRESS_RULES),
    Rule::Nested("shipping_address", ADDRESS_RULES),
];

impl Client {
    /// Record a shopper activity order event.
    ///
    /// The order must identify a person (`email` or `person_id`) and carry
    /// `provider`, `action`, `order_id` and an `items` list; addresses and
    /// totals are optional and type-checked. The body is sent through
    /// unwrapped.
    pub async fn create_order_activity_event(&self, order: Value) -> Result<ApiResponse> {
        let order = request::into_object(order)?;
        validate(ORDER_RULES, &order)?;

        let path = format!("{}/shopper_activity/order", self.account_id());
        self.inner
            .execute(RequestSpec::post(path).with_body(Value::Object(order)))
            .await
    }

    /// Record shopper activity order events in bulk.
    ///
    /// Orders are validated individually and submitted in chunks of 1000 per
    /// request as `{"orders": [...]}`. On the first batch that comes back as
    /// an error result, iteration stops and that result is returned without
    /// sending the remaining batches.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when the list is empty or any order in a
    /// batch fails the order rule set; the offending batch is never sent.
    pub async fn create_order_activity_events(&self, orders: Vec<Value>) -> Result<ApiResponse> {
        let path = format!("{}/shopper_activity/order/batch", self.account_id());

        let mut last = None;
        for chunk in orders.chunks(BATCH_SIZE) {
            for order in chunk {
                let record = order.as_object().ok_or_else(|| {
                    Error::InvalidArgument("each order must be a JSON object".to_string())
                })?;
                validate(ORDER_RULES, record)?;
            }

            let body = request::wrap_batch("orders", chunk.to_vec());
            let response = self
                .inner
                .execute(RequestSpec::post(path.clone()).with_body(body))
                .await?;
            if !response.is_success() {
                return Ok(response);
            }
            last = Some(response);
        }

        last.ok_or_else(|| Error::InvalidArgument("orders must not be empty".to_string()))
    }
}
