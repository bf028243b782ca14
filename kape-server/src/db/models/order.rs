//! Order document - store-boundary shape of [`shared::Order`]
//!
//! The record is keyed by the order id (`POS-…` / `O-…`); the same id is
//! kept as a plain `order_id` field so reads never depend on record-id
//! escaping rules.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::order::{
    CustomerRef, DiscountType, Order, OrderItem, OrderSource, OrderStatus, PaymentMethod,
};
use surrealdb::RecordId;

/// Store document for one order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDoc {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// `POS-<digits>` or `O-<digits>` (also the record key)
    pub order_id: String,
    pub source: OrderSource,
    pub items: Vec<OrderItem>,
    pub customer: CustomerRef,
    pub subtotal: f64,
    pub discount_type: DiscountType,
    pub discount_amount: f64,
    pub tip_percent: f64,
    pub tip_amount: f64,
    pub total: f64,
    pub payment: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_given: Option<f64>,
    pub status: OrderStatus,
    pub placed_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl OrderDoc {
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: None,
            order_id: order.id.clone(),
            source: order.source,
            items: order.items.clone(),
            customer: order.customer.clone(),
            subtotal: order.subtotal,
            discount_type: order.discount_type,
            discount_amount: order.discount_amount,
            tip_percent: order.tip_percent,
            tip_amount: order.tip_amount,
            total: order.total,
            payment: order.payment,
            cash_given: order.cash_given,
            status: order.status,
            placed_at: order.placed_at,
            completed_at: order.completed_at,
        }
    }

    /// Store-boundary conversion: reject documents whose invariants fail
    /// rather than trusting whatever shape the store returned.
    pub fn try_into_order(self) -> Result<Order, shared::order::OrderFlowError> {
        let order = Order {
            id: self.order_id,
            source: self.source,
            items: self.items,
            customer: self.customer,
            subtotal: self.subtotal,
            discount_type: self.discount_type,
            discount_amount: self.discount_amount,
            tip_percent: self.tip_percent,
            tip_amount: self.tip_amount,
            total: self.total,
            payment: self.payment,
            cash_given: self.cash_given,
            status: self.status,
            placed_at: self.placed_at,
            completed_at: self.completed_at,
        };
        order.validate()?;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::StatusAction;

    fn order() -> Order {
        Order::new(
            OrderSource::Online,
            vec![OrderItem {
                name: "Latte".to_string(),
                price: 120.0,
                quantity: 2,
            }],
            CustomerRef {
                id: "users:maria".to_string(),
                name: "Maria".to_string(),
            },
            DiscountType::None,
            0.0,
            PaymentMethod::Gcash,
            None,
            OrderStatus::Pending,
        )
    }

    #[test]
    fn doc_round_trip() {
        let order = order();
        let doc = OrderDoc::from_order(&order);
        assert_eq!(doc.order_id, order.id);
        let back = doc.try_into_order().unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn tampered_doc_is_rejected_at_boundary() {
        let order = order();
        let mut doc = OrderDoc::from_order(&order);
        doc.total = 1.0; // drifted from derivable value
        assert!(doc.try_into_order().is_err());
    }

    #[test]
    fn completed_doc_keeps_completion_stamp() {
        let mut order = order();
        order.status = order.status.apply(StatusAction::Accept).unwrap();
        order.status = order.status.apply(StatusAction::MarkReady).unwrap();
        order.status = order.status.apply(StatusAction::Complete).unwrap();
        order.completed_at = Some(shared::util::now_millis());
        let doc = OrderDoc::from_order(&order);
        let back = doc.try_into_order().unwrap();
        assert_eq!(back.status, OrderStatus::Completed);
        assert!(back.completed_at.is_some());
    }
}
