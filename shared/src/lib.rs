//! Shared domain types for the Kape ordering system
//!
//! This crate holds everything both the server and its clients need to agree
//! on: the order record, the status state machine, pricing arithmetic, and
//! the sync-feed payload. It performs no I/O.

pub mod order;
pub mod sync;
pub mod util;

// Re-export the order domain at the crate root for convenience
pub use order::{
    CartItem, CheckoutRequest, CustomerRef, DiscountType, OnlineOrderRequest, Order,
    OrderFlowError, OrderItem, OrderSource, OrderStatus, PaymentMethod, PricingBreakdown,
    StatusAction,
};
pub use sync::SyncPayload;
