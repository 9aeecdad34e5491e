//! Order gateway trait and wire types.
//!
//! This module defines the core abstraction for the remote order backend - the
//! single external collaborator of the order-edit workflow. The gateway fetches
//! an existing order for hydration and persists the edited aggregate back.
//!
//! # Design
//!
//! The `OrderGateway` trait is deliberately minimal. It provides exactly what
//! the workflow needs:
//!
//! - Fetch an order record by id
//! - Persist a fully serialized update payload
//!
//! The wire types (`OrderRecord` in, `OrderUpdatePayload` out) live next to the
//! trait because every implementation speaks the same JSON shapes. Inbound
//! fields are loosely typed (free-form status strings, stringly-typed charge
//! amounts) because the backend contract predates this client; normalization
//! into domain types happens in the feature crate, not here.
//!
//! # Implementations
//!
//! - `InMemoryOrderGateway` (in `orderdesk-testing` crate): scriptable success
//! - `FailingOrderGateway` (in `orderdesk-testing` crate): scriptable failure
//!
//! # Example
//!
//! ```no_run
//! use orderdesk_core::gateway::{OrderGateway, GatewayError, OrderId};
//!
//! async fn example<G: OrderGateway>(gateway: &G) -> Result<(), GatewayError> {
//!     let order_id = OrderId::new("order-123");
//!     let record = gateway.fetch_order(order_id).await?;
//!     println!("fetched order with {} products", record.products.len());
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Unique identifier for an order on the remote backend.
///
/// Opaque string newtype. The backend issues these; the client never parses
/// or synthesizes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Create an order id from a backend-issued string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur during gateway operations.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Transport-level failure: connection refused, timeout, DNS.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Server error {status}: {message}")]
    Server {
        /// HTTP-like status code reported by the backend.
        status: u16,
        /// Human-readable message from the response body.
        message: String,
    },

    /// Request or response body could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No order exists under the requested id.
    #[error("Order not found: {0}")]
    NotFound(OrderId),
}

/// A product as the backend describes it inside a fetched order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Backend product id
    pub id: String,
    /// Display name
    pub name: String,
    /// Image URLs, possibly empty
    #[serde(default)]
    pub image: Vec<String>,
    /// Undiscounted price in major units
    #[serde(default)]
    pub original_price: Option<f64>,
    /// Discounted price in major units, when a discount applies
    #[serde(default)]
    pub discount_price: Option<f64>,
}

/// One line of a fetched order.
///
/// `product` is `None` when the product was deleted from the catalog after the
/// order was placed; the line still carries its quantity and snapshot price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRecord {
    /// The product, absent when deleted from the catalog
    #[serde(default)]
    pub product: Option<ProductRecord>,
    /// Selected variant id, if any
    #[serde(default)]
    pub variant: Option<String>,
    /// Ordered quantity
    pub quantity: u32,
    /// Price snapshot in major units taken when the line was created
    #[serde(default)]
    pub price: Option<f64>,
}

/// Additional charges as the backend stores them: one object with two
/// stringly-typed amounts. The array wrapper is a backend quirk; only the
/// first element carries data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargesRecord {
    /// Packaging charge amount as a decimal string
    #[serde(default)]
    pub packaging_charge: String,
    /// Transaction charge amount as a decimal string
    #[serde(default)]
    pub transaction_charge: String,
}

/// A fetched order, as the backend serializes it.
///
/// Status fields arrive as free strings with backend-defined casing; mapping
/// onto the known enums (with defaults for unknown values) is the feature
/// crate's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Selected customer reference, if one was attached
    #[serde(default)]
    pub customer: Option<String>,
    /// Billing address reference
    #[serde(default)]
    pub billing_address: Option<String>,
    /// Shipping address reference
    #[serde(default)]
    pub shipping_address: Option<String>,
    /// Order lines
    #[serde(default)]
    pub products: Vec<OrderLineRecord>,
    /// Shipping method as a free string
    #[serde(default)]
    pub shipping_method: String,
    /// Order status as a free string
    #[serde(default)]
    pub order_status: String,
    /// Payment status as a free string
    #[serde(default)]
    pub payment_status: String,
    /// Discount percentage
    #[serde(default)]
    pub discount: f64,
    /// Free-form note attached to the order
    #[serde(default)]
    pub order_note: String,
    /// Charge amounts; only the first element is meaningful
    #[serde(default)]
    pub additional_charges: Vec<ChargesRecord>,
}

/// One line of an outbound update payload.
///
/// Quantity is serialized as a string because the backend's order schema
/// stores it that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadLine {
    /// Product id, `null` for deleted products
    pub product: Option<String>,
    /// Variant id, if any
    pub variant: Option<String>,
    /// Quantity as a decimal string
    pub quantity: String,
    /// Unit price in major units
    pub price: f64,
}

/// Outbound charge amounts, stringly-typed to match the backend schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadCharges {
    /// Packaging charge amount as a decimal string
    pub packaging_charge: String,
    /// Transaction charge amount as a decimal string
    pub transaction_charge: String,
}

/// The fully serialized aggregate sent to `update_order`.
///
/// Status strings are capitalized (first character uppercase) per the backend
/// contract; see [`capitalize_first`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdatePayload {
    /// Selected customer reference
    pub customer: Option<String>,
    /// Billing address reference
    pub billing_address: Option<String>,
    /// Shipping address reference
    pub shipping_address: Option<String>,
    /// Order lines
    pub products: Vec<PayloadLine>,
    /// Capitalized shipping method
    pub shipping_method: String,
    /// Capitalized order status
    pub order_status: String,
    /// Capitalized payment status
    pub payment_status: String,
    /// Charge amounts wrapped in the backend's one-element array
    pub additional_charges: Vec<PayloadCharges>,
    /// Free-form note
    pub order_note: String,
    /// Discount percentage
    pub discount: f64,
    /// Computed order total in major units
    pub payment_total: f64,
}

/// Uppercase the first character of `s`, leaving the remainder unchanged.
///
/// The backend expects status fields in this form ("standard" → "Standard").
/// Applied independently to each of the three status fields.
#[must_use]
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Remote order backend abstraction.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so effects can capture them as
/// `Arc<dyn OrderGateway>` and run on spawned tasks.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `async fn` to enable trait object usage (`Arc<dyn OrderGateway>`). This is
/// required for the effect system where reducers create effects that capture
/// the gateway.
pub trait OrderGateway: Send + Sync {
    /// Fetch the order stored under `order_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no order exists under this id
    /// - `Network`: transport failure
    /// - `Server`: backend rejected the request
    /// - `Serialization`: response body did not match the wire shape
    fn fetch_order(
        &self,
        order_id: OrderId,
    ) -> Pin<Box<dyn Future<Output = Result<OrderRecord, GatewayError>> + Send + '_>>;

    /// Persist `payload` as the new content of the order under `order_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no order exists under this id
    /// - `Network`: transport failure
    /// - `Server`: backend rejected the update
    /// - `Serialization`: payload could not be serialized
    fn update_order(
        &self,
        order_id: OrderId,
        payload: OrderUpdatePayload,
    ) -> Pin<Box<dyn Future<Output = Result<(), GatewayError>> + Send + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_first_uppercases_only_the_first_char() {
        assert_eq!(capitalize_first("standard"), "Standard");
        assert_eq!(capitalize_first("confirmed"), "Confirmed");
        assert_eq!(capitalize_first("eXPRESS"), "EXPRESS");
    }

    #[test]
    fn capitalize_first_handles_empty_and_single_char() {
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("x"), "X");
    }

    #[test]
    fn order_record_tolerates_missing_optional_fields() {
        let record: OrderRecord = serde_json::from_str(r#"{"products": []}"#)
            .unwrap_or_else(|e| panic!("minimal record must parse: {e}"));
        assert!(record.customer.is_none());
        assert!(record.additional_charges.is_empty());
        assert_eq!(record.discount, 0.0);
    }

    #[test]
    fn order_record_parses_deleted_product_line() {
        let json = r#"{
            "products": [
                {"product": null, "variant": null, "quantity": 3, "price": 12.5}
            ],
            "orderStatus": "pending"
        }"#;
        let record: OrderRecord = serde_json::from_str(json)
            .unwrap_or_else(|e| panic!("record must parse: {e}"));
        assert_eq!(record.products.len(), 1);
        assert!(record.products[0].product.is_none());
        assert_eq!(record.products[0].quantity, 3);
        assert_eq!(record.order_status, "pending");
    }

    #[test]
    fn update_payload_serializes_camel_case_fields() {
        let payload = OrderUpdatePayload {
            customer: Some("cust-1".into()),
            billing_address: None,
            shipping_address: Some("addr-2".into()),
            products: vec![PayloadLine {
                product: Some("prod-1".into()),
                variant: None,
                quantity: "2".into(),
                price: 100.0,
            }],
            shipping_method: "Standard".into(),
            order_status: "Pending".into(),
            payment_status: "Confirmed".into(),
            additional_charges: vec![PayloadCharges {
                packaging_charge: "20".into(),
                transaction_charge: "5".into(),
            }],
            order_note: String::new(),
            discount: 10.0,
            payment_total: 250.0,
        };

        let value = serde_json::to_value(&payload)
            .unwrap_or_else(|e| panic!("payload must serialize: {e}"));
        assert_eq!(value["billingAddress"], serde_json::Value::Null);
        assert_eq!(value["shippingAddress"], "addr-2");
        assert_eq!(value["products"][0]["quantity"], "2");
        assert_eq!(value["additionalCharges"][0]["packagingCharge"], "20");
        assert_eq!(value["paymentTotal"], 250.0);
    }
}
