//! Composer state machine for the order-edit workflow.
//!
//! The composer owns the aggregate: it is the only place the three slices
//! (line items, shipping/payment, customer selection) mutate, and it
//! recomputes the financial summary after every change. Phase transitions:
//!
//! ```text
//! Fetching -> Ready -> Submitting -> Succeeded
//!    |          |          |
//!    |          +--- Cancel +--> back to Ready on submit failure
//!    v          v
//! FetchFailed  Cancelled
//! ```
//!
//! Stale gateway responses (wrong phase or wrong order id) are discarded,
//! so a late duplicate fetch can never clobber in-progress edits.

use crate::error::OrderEditError;
use crate::line_items::{LineItemSet, ProductRef};
use crate::serialize;
use crate::shipping::ShippingAndPayment;
use crate::types::{
    AddressId, ChargeSlot, CustomerId, FinancialSummary, LineKey, Money, OrderStatus,
    PaymentStatus, ShippingMethod,
};
use orderdesk_core::effect::Effect;
use orderdesk_core::environment::Clock;
use orderdesk_core::gateway::{OrderGateway, OrderId, OrderRecord};
use orderdesk_core::reducer::Reducer;
use orderdesk_core::{fetch_order, smallvec, update_order, SmallVec};
use std::sync::Arc;

/// Phase of one order-edit session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditPhase {
    /// Waiting for the order to load; edits are not yet possible
    Fetching,
    /// Order loaded; all edit commands are processed
    Ready,
    /// Update in flight; edit commands are ignored
    Submitting,
    /// Update accepted by the backend
    Succeeded,
    /// The order could not be loaded; terminal
    FetchFailed,
    /// The session was abandoned without contacting the gateway
    Cancelled,
}

/// State of one order-edit session
///
/// Exclusively owned by the composer; instance-scoped, never shared between
/// sessions.
#[derive(Clone, Debug)]
pub struct OrderEditState {
    /// The order being edited
    pub order_id: OrderId,
    /// Current phase of the session
    pub phase: EditPhase,
    /// Selected customer
    pub customer: Option<CustomerId>,
    /// Selected billing address
    pub billing_address: Option<AddressId>,
    /// Selected shipping address
    pub shipping_address: Option<AddressId>,
    /// Line-item working set
    pub lines: LineItemSet,
    /// Shipping, payment, and charges slice
    pub shipping: ShippingAndPayment,
    /// Derived money view, recomputed on every slice change
    pub summary: FinancialSummary,
    /// Which order has been hydrated, if any; guards one-shot hydration
    pub hydrated_order: Option<OrderId>,
    /// Most recent error message, if any
    pub last_error: Option<String>,
}

impl OrderEditState {
    /// Creates the entry state for editing `order_id`
    #[must_use]
    pub fn opening(order_id: OrderId) -> Self {
        Self {
            order_id,
            phase: EditPhase::Fetching,
            customer: None,
            billing_address: None,
            shipping_address: None,
            lines: LineItemSet::new(),
            shipping: ShippingAndPayment::default(),
            summary: FinancialSummary::default(),
            hydrated_order: None,
            last_error: None,
        }
    }

    /// Whether the aggregate may be submitted
    ///
    /// Requires a customer, both addresses, at least one line, and the
    /// `Ready` phase.
    #[must_use]
    pub fn is_submit_eligible(&self) -> bool {
        matches!(self.phase, EditPhase::Ready)
            && self.customer.is_some()
            && self.billing_address.is_some()
            && self.shipping_address.is_some()
            && !self.lines.is_empty()
    }

    fn recompute_summary(&mut self) {
        self.summary = FinancialSummary::derive(
            self.lines.subtotal(),
            self.shipping.discount,
            self.shipping.additional_charges.total(),
        );
    }
}

/// Actions for the order-edit workflow
///
/// User commands and gateway feedback flow through this one enum, so every
/// slice change passes the composer's recompute path.
#[derive(Clone, Debug)]
pub enum OrderEditAction {
    // ========== Lifecycle ==========
    /// Begin the session by fetching the order
    Start,
    /// Feedback: the order was fetched
    OrderFetched {
        /// Order the response belongs to
        order_id: OrderId,
        /// Fetched wire record
        record: OrderRecord,
    },
    /// Feedback: the fetch failed
    FetchFailed {
        /// Order the response belongs to
        order_id: OrderId,
        /// Rendered error message
        error: String,
    },
    /// Abandon the session without contacting the gateway
    Cancel,

    // ========== Line items ==========
    /// Add a product to the order, merging into an existing line
    AddLine {
        /// Product to add
        product: ProductRef,
        /// Units to add; zero is ignored
        quantity: u32,
    },
    /// Remove a line
    RemoveLine {
        /// Key of the line to remove
        key: LineKey,
    },
    /// Replace a line's quantity; zero is ignored
    SetQuantity {
        /// Key of the line to change
        key: LineKey,
        /// New quantity
        quantity: u32,
    },

    // ========== Shipping & payment ==========
    /// Replace the shipping method
    SetShippingMethod {
        /// New method
        method: ShippingMethod,
    },
    /// Replace the order status
    SetOrderStatus {
        /// New status
        status: OrderStatus,
    },
    /// Replace the payment status
    SetPaymentStatus {
        /// New status
        status: PaymentStatus,
    },
    /// Set the discount percentage (clamped to `[0, 100]`)
    SetDiscount {
        /// Requested percentage
        percent: f64,
    },
    /// Replace the order note
    SetOrderNote {
        /// New note
        note: String,
    },
    /// Set an additional charge amount (negative clamps to zero)
    SetChargeAmount {
        /// Which slot to set
        slot: ChargeSlot,
        /// Requested amount
        amount: Money,
    },

    // ========== Customer selection ==========
    /// Accept a customer selection with its default addresses
    CustomerSelected {
        /// Selected customer
        customer: CustomerId,
        /// Default billing address, if any
        billing_address: Option<AddressId>,
        /// Default shipping address, if any
        shipping_address: Option<AddressId>,
    },
    /// Clear the customer and both addresses
    ClearCustomer,
    /// Replace the billing address
    SetBillingAddress {
        /// New address, or `None` to clear
        address: Option<AddressId>,
    },
    /// Replace the shipping address
    SetShippingAddress {
        /// New address, or `None` to clear
        address: Option<AddressId>,
    },

    // ========== Submission ==========
    /// Submit the aggregate when eligible
    Submit,
    /// Feedback: the backend accepted the update
    SubmitSucceeded,
    /// Feedback: the update failed
    SubmitFailed {
        /// Rendered error message
        error: String,
    },
}

/// Environment for the order-edit workflow containing dependencies
#[derive(Clone)]
pub struct OrderEditEnvironment {
    /// Remote order gateway
    pub gateway: Arc<dyn OrderGateway>,
    /// Clock for timestamps
    pub clock: Arc<dyn Clock>,
}

impl OrderEditEnvironment {
    /// Creates a new order-edit environment
    pub fn new(gateway: Arc<dyn OrderGateway>, clock: Arc<dyn Clock>) -> Self {
        Self { gateway, clock }
    }
}

/// Reducer implementing the order-edit state machine
#[derive(Clone)]
pub struct OrderEditReducer;

impl OrderEditReducer {
    /// Creates a new order-edit reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates the submit-eligibility invariant
    fn validate_submit(state: &OrderEditState) -> Result<(), String> {
        if state.customer.is_none() {
            return Err("a customer must be selected".to_owned());
        }

        if state.billing_address.is_none() {
            return Err("a billing address must be selected".to_owned());
        }

        if state.shipping_address.is_none() {
            return Err("a shipping address must be selected".to_owned());
        }

        if state.lines.is_empty() {
            return Err("the order must contain at least one line item".to_owned());
        }

        Ok(())
    }

    /// Phase guard for edit commands
    fn ready_for_edits(state: &OrderEditState, command: &str) -> bool {
        if matches!(state.phase, EditPhase::Ready) {
            true
        } else {
            tracing::debug!(phase = ?state.phase, command, "edit command ignored outside Ready");
            false
        }
    }
}

impl Default for OrderEditReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for OrderEditReducer {
    type State = OrderEditState;
    type Action = OrderEditAction;
    type Environment = OrderEditEnvironment;

    #[allow(clippy::too_many_lines)] // One match arm per action keeps the state machine in one place
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Lifecycle ==========
            OrderEditAction::Start => {
                if !matches!(state.phase, EditPhase::Fetching) {
                    tracing::debug!(phase = ?state.phase, "Start ignored outside Fetching");
                    return smallvec![Effect::None];
                }

                let order_id = state.order_id.clone();
                let success_id = order_id.clone();
                let failure_id = order_id.clone();
                tracing::info!(order_id = %order_id, "fetching order for edit");

                smallvec![fetch_order! {
                    gateway: env.gateway,
                    order_id: order_id,
                    on_success: |record| Some(OrderEditAction::OrderFetched {
                        order_id: success_id,
                        record,
                    }),
                    on_error: |error| Some(OrderEditAction::FetchFailed {
                        order_id: failure_id,
                        error: OrderEditError::Fetch(error).to_string(),
                    })
                }]
            },

            OrderEditAction::OrderFetched { order_id, record } => {
                if !matches!(state.phase, EditPhase::Fetching) || order_id != state.order_id {
                    tracing::debug!(
                        %order_id,
                        phase = ?state.phase,
                        "discarding stale fetch response"
                    );
                    return smallvec![Effect::None];
                }

                if state.hydrated_order.as_ref() == Some(&order_id) {
                    tracing::debug!(%order_id, "order already hydrated; discarding duplicate");
                    return smallvec![Effect::None];
                }

                serialize::decompose(state, &record);
                state.hydrated_order = Some(order_id);
                state.phase = EditPhase::Ready;
                state.last_error = None;
                state.recompute_summary();

                tracing::info!(
                    order_id = %state.order_id,
                    lines = state.lines.len(),
                    "order hydrated, ready for edits"
                );
                smallvec![Effect::None]
            },

            OrderEditAction::FetchFailed { order_id, error } => {
                if !matches!(state.phase, EditPhase::Fetching) || order_id != state.order_id {
                    tracing::debug!(%order_id, "discarding stale fetch failure");
                    return smallvec![Effect::None];
                }

                tracing::warn!(%order_id, %error, "order fetch failed");
                state.phase = EditPhase::FetchFailed;
                state.last_error = Some(error);
                smallvec![Effect::None]
            },

            OrderEditAction::Cancel => {
                match state.phase {
                    EditPhase::Fetching | EditPhase::Ready | EditPhase::FetchFailed => {
                        tracing::info!(order_id = %state.order_id, "edit session cancelled");
                        state.phase = EditPhase::Cancelled;
                    },
                    _ => {
                        tracing::debug!(phase = ?state.phase, "Cancel ignored");
                    },
                }
                smallvec![Effect::None]
            },

            // ========== Line items ==========
            OrderEditAction::AddLine { product, quantity } => {
                if Self::ready_for_edits(state, "AddLine") {
                    if quantity == 0 {
                        tracing::debug!("ignoring zero-quantity add");
                    } else {
                        state.lines.add(product, quantity);
                        state.recompute_summary();
                    }
                }
                smallvec![Effect::None]
            },

            OrderEditAction::RemoveLine { key } => {
                if Self::ready_for_edits(state, "RemoveLine") {
                    state.lines.remove(key);
                    state.recompute_summary();
                }
                smallvec![Effect::None]
            },

            OrderEditAction::SetQuantity { key, quantity } => {
                if Self::ready_for_edits(state, "SetQuantity") {
                    if quantity == 0 {
                        // decrement from 1 is a no-op, not a removal
                        tracing::debug!(%key, "ignoring zero quantity");
                    } else {
                        state.lines.set_quantity(key, quantity);
                        state.recompute_summary();
                    }
                }
                smallvec![Effect::None]
            },

            // ========== Shipping & payment ==========
            OrderEditAction::SetShippingMethod { method } => {
                if Self::ready_for_edits(state, "SetShippingMethod") {
                    state.shipping.shipping_method = method;
                    state.recompute_summary();
                }
                smallvec![Effect::None]
            },

            OrderEditAction::SetOrderStatus { status } => {
                if Self::ready_for_edits(state, "SetOrderStatus") {
                    state.shipping.order_status = status;
                    state.recompute_summary();
                }
                smallvec![Effect::None]
            },

            OrderEditAction::SetPaymentStatus { status } => {
                if Self::ready_for_edits(state, "SetPaymentStatus") {
                    state.shipping.payment_status = status;
                    state.recompute_summary();
                }
                smallvec![Effect::None]
            },

            OrderEditAction::SetDiscount { percent } => {
                if Self::ready_for_edits(state, "SetDiscount") {
                    state.shipping.set_discount(percent);
                    state.recompute_summary();
                }
                smallvec![Effect::None]
            },

            OrderEditAction::SetOrderNote { note } => {
                if Self::ready_for_edits(state, "SetOrderNote") {
                    state.shipping.order_note = note;
                    state.recompute_summary();
                }
                smallvec![Effect::None]
            },

            OrderEditAction::SetChargeAmount { slot, amount } => {
                if Self::ready_for_edits(state, "SetChargeAmount") {
                    state.shipping.set_charge_amount(slot, amount);
                    state.recompute_summary();
                }
                smallvec![Effect::None]
            },

            // ========== Customer selection ==========
            OrderEditAction::CustomerSelected {
                customer,
                billing_address,
                shipping_address,
            } => {
                if Self::ready_for_edits(state, "CustomerSelected") {
                    state.customer = Some(customer);
                    state.billing_address = billing_address;
                    state.shipping_address = shipping_address;
                    state.recompute_summary();
                }
                smallvec![Effect::None]
            },

            OrderEditAction::ClearCustomer => {
                if Self::ready_for_edits(state, "ClearCustomer") {
                    state.customer = None;
                    state.billing_address = None;
                    state.shipping_address = None;
                    state.recompute_summary();
                }
                smallvec![Effect::None]
            },

            OrderEditAction::SetBillingAddress { address } => {
                if Self::ready_for_edits(state, "SetBillingAddress") {
                    state.billing_address = address;
                    state.recompute_summary();
                }
                smallvec![Effect::None]
            },

            OrderEditAction::SetShippingAddress { address } => {
                if Self::ready_for_edits(state, "SetShippingAddress") {
                    state.shipping_address = address;
                    state.recompute_summary();
                }
                smallvec![Effect::None]
            },

            // ========== Submission ==========
            OrderEditAction::Submit => {
                if !matches!(state.phase, EditPhase::Ready) {
                    tracing::debug!(phase = ?state.phase, "Submit ignored outside Ready");
                    return smallvec![Effect::None];
                }

                if let Err(error) = Self::validate_submit(state) {
                    tracing::warn!(order_id = %state.order_id, %error, "submit blocked");
                    state.last_error = Some(OrderEditError::Validation(error).to_string());
                    return smallvec![Effect::None];
                }

                state.phase = EditPhase::Submitting;
                state.last_error = None;

                let payload = serialize::build_update_payload(state);
                tracing::info!(
                    order_id = %state.order_id,
                    total = %state.summary.total,
                    submitted_at = %env.clock.now(),
                    "submitting order update"
                );

                smallvec![update_order! {
                    gateway: env.gateway,
                    order_id: state.order_id.clone(),
                    payload: payload,
                    on_success: || Some(OrderEditAction::SubmitSucceeded),
                    on_error: |error| Some(OrderEditAction::SubmitFailed {
                        error: OrderEditError::Submit(error).to_string(),
                    })
                }]
            },

            OrderEditAction::SubmitSucceeded => {
                if !matches!(state.phase, EditPhase::Submitting) {
                    tracing::debug!(phase = ?state.phase, "discarding stray submit success");
                    return smallvec![Effect::None];
                }

                tracing::info!(order_id = %state.order_id, "order update accepted");
                state.phase = EditPhase::Succeeded;
                smallvec![Effect::None]
            },

            OrderEditAction::SubmitFailed { error } => {
                if !matches!(state.phase, EditPhase::Submitting) {
                    tracing::debug!(phase = ?state.phase, "discarding stray submit failure");
                    return smallvec![Effect::None];
                }

                tracing::warn!(order_id = %state.order_id, %error, "order update failed");
                state.phase = EditPhase::Ready;
                state.last_error = Some(error);
                smallvec![Effect::None]
            },
        }
    }
}
