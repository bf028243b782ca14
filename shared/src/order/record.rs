//! The order record - one sale, POS- or online-originated

use super::error::OrderFlowError;
use super::pricing::{self, PricingBreakdown};
use super::status::OrderStatus;
use super::types::{CustomerRef, DiscountType, OrderItem, OrderSource, PaymentMethod};
use crate::util;
use serde::{Deserialize, Serialize};

/// A single sale transaction.
///
/// `subtotal` / `discount_amount` / `total` are derived from
/// `items` / `discount_type` / `tip_percent` by [`pricing::price_order`] and
/// are never mutated independently; [`Order::validate`] enforces this at the
/// store boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// `POS-<digits>` or `O-<digits>`
    pub id: String,
    pub source: OrderSource,
    /// Insertion order = add order
    pub items: Vec<OrderItem>,
    pub customer: CustomerRef,
    pub subtotal: f64,
    pub discount_type: DiscountType,
    pub discount_amount: f64,
    pub tip_percent: f64,
    pub tip_amount: f64,
    /// Raw computed total; clamping happens only in display helpers
    pub total: f64,
    pub payment: PaymentMethod,
    /// Present (and validated on completion) only for Cash payments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_given: Option<f64>,
    pub status: OrderStatus,
    /// Millisecond UTC timestamp, immutable after creation
    pub placed_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl Order {
    /// Assemble a record from already-validated parts.
    ///
    /// Callers go through the order flow service, which performs cart and
    /// cash validation before this is reached.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: OrderSource,
        items: Vec<OrderItem>,
        customer: CustomerRef,
        discount_type: DiscountType,
        tip_percent: f64,
        payment: PaymentMethod,
        cash_given: Option<f64>,
        status: OrderStatus,
    ) -> Self {
        let PricingBreakdown {
            subtotal,
            discount_amount,
            tip_amount,
            total,
        } = pricing::price_order(&items, discount_type, tip_percent);
        let now = util::now_millis();
        Self {
            id: util::new_order_id(source.id_prefix()),
            source,
            items,
            customer,
            subtotal,
            discount_type,
            discount_amount,
            tip_percent,
            tip_amount,
            total,
            payment,
            cash_given,
            status,
            placed_at: now,
            completed_at: if status == OrderStatus::Completed {
                Some(now)
            } else {
                None
            },
        }
    }

    /// Re-derive the money fields from the record's own inputs
    pub fn pricing(&self) -> PricingBreakdown {
        pricing::price_order(&self.items, self.discount_type, self.tip_percent)
    }

    /// Change owed to the customer on a cash sale (display value)
    pub fn change_due(&self) -> Option<f64> {
        self.cash_given
            .map(|given| pricing::change_due(given, self.total))
    }

    /// Store-boundary validation: deserialize-or-reject.
    ///
    /// Rejects records whose derived fields drifted from their inputs, whose
    /// lines are malformed, or whose terminal bookkeeping is inconsistent.
    pub fn validate(&self) -> Result<(), OrderFlowError> {
        if self.id.is_empty() {
            return Err(OrderFlowError::InvalidInput("order id is empty".into()));
        }
        for item in &self.items {
            if item.quantity <= 0 {
                return Err(OrderFlowError::InvalidInput(format!(
                    "item '{}' has non-positive quantity {}",
                    item.name, item.quantity
                )));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(OrderFlowError::InvalidInput(format!(
                    "item '{}' has invalid price {}",
                    item.name, item.price
                )));
            }
        }

        let derived = self.pricing();
        if !pricing::money_eq(derived.subtotal, self.subtotal)
            || !pricing::money_eq(derived.discount_amount, self.discount_amount)
            || !pricing::money_eq(derived.total, self.total)
        {
            return Err(OrderFlowError::InvalidInput(format!(
                "stored totals drifted from derived values (stored {:.2}, derived {:.2})",
                self.total, derived.total
            )));
        }

        if self.status == OrderStatus::Completed {
            if self.items.is_empty() {
                return Err(OrderFlowError::EmptyCart);
            }
            if self.completed_at.is_none() {
                return Err(OrderFlowError::InvalidInput(
                    "completed order missing completed_at".into(),
                ));
            }
            if self.payment.is_cash() {
                let given = self.cash_given.unwrap_or(0.0);
                if !pricing::is_cash_sufficient(given, self.total) {
                    return Err(OrderFlowError::InsufficientCash {
                        required: self.total,
                        given,
                    });
                }
            }
        }

        Ok(())
    }
}
