//! Error taxonomy for the order-edit workflow.

use orderdesk_core::gateway::GatewayError;
use thiserror::Error;

/// Errors surfaced by the order-edit workflow
///
/// A fetch failure is fatal to the edit session; a submit failure is
/// recoverable and leaves local edits intact; a validation failure never
/// reaches the gateway.
#[derive(Debug, Error)]
pub enum OrderEditError {
    /// The order could not be loaded for editing
    #[error("failed to fetch order: {0}")]
    Fetch(GatewayError),

    /// The aggregate is not eligible for submission
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backend rejected or never received the update
    #[error("failed to submit order: {0}")]
    Submit(GatewayError),
}
