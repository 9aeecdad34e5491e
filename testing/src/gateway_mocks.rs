//! In-memory order gateway testing utilities
//!
//! Provides fast, deterministic gateway doubles:
//! - [`InMemoryOrderGateway`]: scriptable success with call recording
//! - [`FailingOrderGateway`]: scriptable fetch/update failure

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use orderdesk_core::gateway::{
    GatewayError, OrderGateway, OrderId, OrderRecord, OrderUpdatePayload,
};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory order gateway for fast, deterministic testing.
///
/// Orders are scripted up front with [`insert_order`](Self::insert_order);
/// every `update_order` call is recorded so tests can assert on what was
/// (or was not) submitted.
///
/// # Example
///
/// ```
/// use orderdesk_testing::InMemoryOrderGateway;
/// use orderdesk_core::gateway::{OrderGateway, OrderId, OrderRecord};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = InMemoryOrderGateway::new();
/// gateway.insert_order(OrderId::new("order-1"), OrderRecord {
///     customer: Some("cust-1".into()),
///     billing_address: None,
///     shipping_address: None,
///     products: vec![],
///     shipping_method: "standard".into(),
///     order_status: "pending".into(),
///     payment_status: "pending".into(),
///     discount: 0.0,
///     order_note: String::new(),
///     additional_charges: vec![],
/// });
///
/// let record = gateway.fetch_order(OrderId::new("order-1")).await?;
/// assert_eq!(record.customer.as_deref(), Some("cust-1"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryOrderGateway {
    records: Arc<RwLock<HashMap<OrderId, OrderRecord>>>,
    fetched: Arc<RwLock<Vec<OrderId>>>,
    submitted: Arc<RwLock<Vec<(OrderId, OrderUpdatePayload)>>>,
}

impl InMemoryOrderGateway {
    /// Create an empty gateway
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fetched: Arc::new(RwLock::new(Vec::new())),
            submitted: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Script an order so `fetch_order` can find it
    pub fn insert_order(&self, order_id: OrderId, record: OrderRecord) {
        self.records.write().unwrap().insert(order_id, record);
    }

    /// Builder-style variant of [`insert_order`](Self::insert_order)
    #[must_use]
    pub fn with_order(self, order_id: OrderId, record: OrderRecord) -> Self {
        self.insert_order(order_id, record);
        self
    }

    /// Ids fetched so far, in call order
    #[must_use]
    pub fn fetched(&self) -> Vec<OrderId> {
        self.fetched.read().unwrap().clone()
    }

    /// Number of `update_order` calls made
    #[must_use]
    pub fn submit_count(&self) -> usize {
        self.submitted.read().unwrap().len()
    }

    /// All submitted payloads with their order ids, in call order
    #[must_use]
    pub fn submitted(&self) -> Vec<(OrderId, OrderUpdatePayload)> {
        self.submitted.read().unwrap().clone()
    }

    /// The most recently submitted payload, if any
    #[must_use]
    pub fn last_submitted(&self) -> Option<OrderUpdatePayload> {
        self.submitted
            .read()
            .unwrap()
            .last()
            .map(|(_, payload)| payload.clone())
    }
}

impl Default for InMemoryOrderGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderGateway for InMemoryOrderGateway {
    fn fetch_order(
        &self,
        order_id: OrderId,
    ) -> Pin<Box<dyn Future<Output = Result<OrderRecord, GatewayError>> + Send + '_>> {
        Box::pin(async move {
            self.fetched.write().unwrap().push(order_id.clone());
            self.records
                .read()
                .unwrap()
                .get(&order_id)
                .cloned()
                .ok_or(GatewayError::NotFound(order_id))
        })
    }

    fn update_order(
        &self,
        order_id: OrderId,
        payload: OrderUpdatePayload,
    ) -> Pin<Box<dyn Future<Output = Result<(), GatewayError>> + Send + '_>> {
        Box::pin(async move {
            self.submitted.write().unwrap().push((order_id, payload));
            Ok(())
        })
    }
}

/// The kind of failure a [`FailingOrderGateway`] produces.
///
/// [`GatewayError`] itself is not `Clone`, so failures are scripted as data
/// and materialized per call.
#[derive(Debug, Clone)]
pub enum FailureMode {
    /// Transport-level failure
    Network(String),
    /// Backend rejection with a status code
    Server {
        /// Status code to report
        status: u16,
        /// Message to report
        message: String,
    },
    /// Order does not exist
    NotFound,
}

impl FailureMode {
    fn to_error(&self, order_id: &OrderId) -> GatewayError {
        match self {
            Self::Network(message) => GatewayError::Network(message.clone()),
            Self::Server { status, message } => GatewayError::Server {
                status: *status,
                message: message.clone(),
            },
            Self::NotFound => GatewayError::NotFound(order_id.clone()),
        }
    }
}

/// Gateway that fails on script, for exercising error paths.
///
/// # Example
///
/// ```ignore
/// // Fetch succeeds with the scripted record, every submit fails with a 500
/// let gateway = FailingOrderGateway::failing_update(
///     record,
///     FailureMode::Server { status: 500, message: "boom".into() },
/// );
/// ```
#[derive(Clone, Debug)]
pub struct FailingOrderGateway {
    record: Option<OrderRecord>,
    fetch_failure: Option<FailureMode>,
    update_failure: Option<FailureMode>,
    fetch_calls: Arc<AtomicUsize>,
    update_calls: Arc<AtomicUsize>,
}

impl FailingOrderGateway {
    /// Gateway whose `fetch_order` always fails with `mode`
    #[must_use]
    pub fn failing_fetch(mode: FailureMode) -> Self {
        Self {
            record: None,
            fetch_failure: Some(mode),
            update_failure: None,
            fetch_calls: Arc::new(AtomicUsize::new(0)),
            update_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Gateway whose `fetch_order` succeeds with `record` but whose
    /// `update_order` always fails with `mode`
    #[must_use]
    pub fn failing_update(record: OrderRecord, mode: FailureMode) -> Self {
        Self {
            record: Some(record),
            fetch_failure: None,
            update_failure: Some(mode),
            fetch_calls: Arc::new(AtomicUsize::new(0)),
            update_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `fetch_order` calls made
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of `update_order` calls made
    #[must_use]
    pub fn update_count(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

impl OrderGateway for FailingOrderGateway {
    fn fetch_order(
        &self,
        order_id: OrderId,
    ) -> Pin<Box<dyn Future<Output = Result<OrderRecord, GatewayError>> + Send + '_>> {
        Box::pin(async move {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(mode) = &self.fetch_failure {
                return Err(mode.to_error(&order_id));
            }
            self.record
                .clone()
                .ok_or(GatewayError::NotFound(order_id))
        })
    }

    fn update_order(
        &self,
        order_id: OrderId,
        _payload: OrderUpdatePayload,
    ) -> Pin<Box<dyn Future<Output = Result<(), GatewayError>> + Send + '_>> {
        Box::pin(async move {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            match &self.update_failure {
                Some(mode) => Err(mode.to_error(&order_id)),
                None => Ok(()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_record() -> OrderRecord {
        OrderRecord {
            customer: Some("cust-1".into()),
            billing_address: Some("addr-1".into()),
            shipping_address: Some("addr-2".into()),
            products: vec![],
            shipping_method: "standard".into(),
            order_status: "pending".into(),
            payment_status: "pending".into(),
            discount: 0.0,
            order_note: String::new(),
            additional_charges: vec![],
        }
    }

    fn minimal_payload() -> OrderUpdatePayload {
        OrderUpdatePayload {
            customer: Some("cust-1".into()),
            billing_address: Some("addr-1".into()),
            shipping_address: Some("addr-2".into()),
            products: vec![],
            shipping_method: "Standard".into(),
            order_status: "Pending".into(),
            payment_status: "Pending".into(),
            additional_charges: vec![],
            order_note: String::new(),
            discount: 0.0,
            payment_total: 0.0,
        }
    }

    #[tokio::test]
    async fn in_memory_gateway_serves_scripted_record() {
        let gateway =
            InMemoryOrderGateway::new().with_order(OrderId::new("order-1"), minimal_record());

        let record = gateway.fetch_order(OrderId::new("order-1")).await.unwrap();
        assert_eq!(record.customer.as_deref(), Some("cust-1"));
        assert_eq!(gateway.fetched(), vec![OrderId::new("order-1")]);
    }

    #[tokio::test]
    async fn in_memory_gateway_reports_missing_order() {
        let gateway = InMemoryOrderGateway::new();

        let result = gateway.fetch_order(OrderId::new("absent")).await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))));
    }

    #[tokio::test]
    async fn in_memory_gateway_records_submissions() {
        let gateway = InMemoryOrderGateway::new();

        gateway
            .update_order(OrderId::new("order-1"), minimal_payload())
            .await
            .unwrap();

        assert_eq!(gateway.submit_count(), 1);
        let (order_id, payload) = &gateway.submitted()[0];
        assert_eq!(order_id, &OrderId::new("order-1"));
        assert_eq!(payload.customer.as_deref(), Some("cust-1"));
    }

    #[tokio::test]
    async fn failing_fetch_gateway_returns_scripted_error() {
        let gateway = FailingOrderGateway::failing_fetch(FailureMode::Network("down".into()));

        let result = gateway.fetch_order(OrderId::new("order-1")).await;
        assert!(matches!(result, Err(GatewayError::Network(_))));
        assert_eq!(gateway.fetch_count(), 1);
    }

    #[tokio::test]
    async fn failing_update_gateway_serves_fetch_then_fails_submit() {
        let gateway = FailingOrderGateway::failing_update(
            minimal_record(),
            FailureMode::Server {
                status: 500,
                message: "boom".into(),
            },
        );

        let record = gateway.fetch_order(OrderId::new("order-1")).await.unwrap();
        assert_eq!(record.order_status, "pending");

        let result = gateway
            .update_order(OrderId::new("order-1"), minimal_payload())
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::Server { status: 500, .. })
        ));
        assert_eq!(gateway.update_count(), 1);
    }
}
