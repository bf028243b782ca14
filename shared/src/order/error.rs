//! Order flow errors
//!
//! Reported synchronously to the caller; nothing here is retried
//! automatically. A failed operation leaves the order record unchanged.

use super::status::{OrderStatus, StatusAction};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderFlowError {
    /// Checkout attempted with no items in the cart
    #[error("cart is empty")]
    EmptyCart,

    /// Cash tendered does not cover the total
    #[error("insufficient cash: {given:.2} tendered, {required:.2} required")]
    InsufficientCash { required: f64, given: f64 },

    /// The state machine rejected a lifecycle action
    #[error("invalid transition: cannot {action} an order in status {from}")]
    InvalidTransition {
        from: OrderStatus,
        action: StatusAction,
    },

    /// Malformed input rejected at the boundary
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The document store rejected or failed the write
    #[error("store write failed: {0}")]
    StoreWriteFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = OrderFlowError::InsufficientCash {
            required: 198.0,
            given: 150.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("150.00"));
        assert!(msg.contains("198.00"));

        let err = OrderFlowError::InvalidTransition {
            from: OrderStatus::Completed,
            action: StatusAction::Accept,
        };
        assert!(err.to_string().contains("COMPLETED"));
        assert!(err.to_string().contains("accept"));
    }
}
