//! Order status state machine
//!
//! Every status change in the system routes through [`OrderStatus::apply`].
//! Components never write a status string directly; they request a
//! [`StatusAction`] and persist only what the machine returns.

use super::error::OrderFlowError;
use serde::{Deserialize, Serialize};

/// Position of an order in its fulfillment lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 线上订单初始状态，等待店员接单
    #[default]
    Pending,
    /// 已接单，制作中
    Preparing,
    /// 制作完成，等待交付
    Ready,
    /// 已完成 (终态)
    Completed,
    /// 已取消 (终态)
    Cancelled,
}

impl OrderStatus {
    /// Terminal states admit no further mutation
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Still moving through the pipeline
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// Staff-initiated lifecycle action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    /// Pending → Preparing
    Accept,
    /// Preparing → Ready
    #[serde(rename = "ready")]
    MarkReady,
    /// Ready → Completed
    Complete,
    /// Any active state → Cancelled (administrative edge)
    Cancel,
}

impl std::fmt::Display for StatusAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StatusAction::Accept => "accept",
            StatusAction::MarkReady => "ready",
            StatusAction::Complete => "complete",
            StatusAction::Cancel => "cancel",
        };
        f.write_str(s)
    }
}

impl OrderStatus {
    /// Pure transition function: `(current, action) → next | InvalidTransition`.
    ///
    /// No timers and no automatic transitions; persistence of the returned
    /// status is the caller's responsibility, after validation succeeds.
    pub fn apply(self, action: StatusAction) -> Result<OrderStatus, OrderFlowError> {
        use OrderStatus::*;
        use StatusAction::*;
        match (self, action) {
            (Pending, Accept) => Ok(Preparing),
            (Preparing, MarkReady) => Ok(Ready),
            (Ready, Complete) => Ok(Completed),
            // Cancellation is allowed from any non-terminal state
            (Pending | Preparing | Ready, Cancel) => Ok(Cancelled),
            (from, action) => Err(OrderFlowError::InvalidTransition { from, action }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];
    const ALL_ACTIONS: [StatusAction; 4] = [
        StatusAction::Accept,
        StatusAction::MarkReady,
        StatusAction::Complete,
        StatusAction::Cancel,
    ];

    #[test]
    fn happy_path_reaches_completed() {
        let s = OrderStatus::Pending;
        let s = s.apply(StatusAction::Accept).unwrap();
        assert_eq!(s, OrderStatus::Preparing);
        let s = s.apply(StatusAction::MarkReady).unwrap();
        assert_eq!(s, OrderStatus::Ready);
        let s = s.apply(StatusAction::Complete).unwrap();
        assert_eq!(s, OrderStatus::Completed);
        assert!(s.is_terminal());
    }

    #[test]
    fn terminal_states_reject_everything() {
        for state in [OrderStatus::Completed, OrderStatus::Cancelled] {
            for action in ALL_ACTIONS {
                let err = state.apply(action).unwrap_err();
                assert!(
                    matches!(err, OrderFlowError::InvalidTransition { .. }),
                    "{state} + {action} must be rejected"
                );
            }
        }
    }

    #[test]
    fn skipping_states_is_rejected() {
        assert!(OrderStatus::Pending.apply(StatusAction::MarkReady).is_err());
        assert!(OrderStatus::Pending.apply(StatusAction::Complete).is_err());
        assert!(OrderStatus::Preparing.apply(StatusAction::Complete).is_err());
    }

    #[test]
    fn going_backwards_is_rejected() {
        assert!(OrderStatus::Ready.apply(StatusAction::Accept).is_err());
        assert!(OrderStatus::Ready.apply(StatusAction::MarkReady).is_err());
        assert!(OrderStatus::Preparing.apply(StatusAction::Accept).is_err());
    }

    #[test]
    fn cancel_is_allowed_from_every_active_state() {
        for state in [OrderStatus::Pending, OrderStatus::Preparing, OrderStatus::Ready] {
            assert_eq!(state.apply(StatusAction::Cancel).unwrap(), OrderStatus::Cancelled);
        }
    }

    #[test]
    fn transition_table_is_exhaustive() {
        // Exactly 6 legal (state, action) pairs exist in the machine
        let legal = ALL_STATES
            .iter()
            .flat_map(|s| ALL_ACTIONS.iter().map(move |a| (*s, *a)))
            .filter(|(s, a)| s.apply(*a).is_ok())
            .count();
        assert_eq!(legal, 6);
    }
}
