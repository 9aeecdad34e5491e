//! # Orderdesk Order Edit
//!
//! The order-edit workflow for the admin console: three independently-edited
//! slices (line items, shipping/payment, customer selection) composed into
//! one consistent order aggregate with a running financial summary and
//! submit-eligibility gating.
//!
//! The workflow is a reducer-driven state machine:
//!
//! - [`OrderEditState`] owns the aggregate for one edit session
//! - [`OrderEditAction`] unifies user commands and gateway feedback
//! - [`OrderEditReducer`] validates commands, mutates slices, and recomputes
//!   the [`FinancialSummary`] on every change
//! - Gateway fetch/submit run as effects executed by the Store runtime
//!
//! ## Example
//!
//! ```ignore
//! use orderdesk_order_edit::{OrderEditAction, OrderEditEnvironment, OrderEditReducer, OrderEditState};
//! use orderdesk_runtime::Store;
//!
//! let env = OrderEditEnvironment::new(gateway, clock);
//! let store = Store::new(OrderEditState::opening(order_id), OrderEditReducer::new(), env);
//!
//! store.send(OrderEditAction::Start).await?;
//! ```

/// Composer state machine: state, actions, environment, reducer
pub mod composer;

/// Error taxonomy for the workflow
pub mod error;

/// Line-item working set
pub mod line_items;

/// Wire decomposition and payload composition
pub mod serialize;

/// Shipping, payment, and charges slice
pub mod shipping;

/// Money, ids, wire enums, charges, and the financial summary
pub mod types;

pub use composer::{
    EditPhase, OrderEditAction, OrderEditEnvironment, OrderEditReducer, OrderEditState,
};
pub use error::OrderEditError;
pub use line_items::{LineItem, LineItemSet, ProductRef, DELETED_PRODUCT_NAME};
pub use shipping::ShippingAndPayment;
pub use types::{
    AdditionalCharges, AddressId, ChargeSlot, CustomerId, FinancialSummary, LineKey, Money,
    OrderStatus, PaymentStatus, ProductId, ShippingMethod, VariantId,
};
