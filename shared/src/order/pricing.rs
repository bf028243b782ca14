//! Pricing computation using rust_decimal for precision
//!
//! All arithmetic is done in `Decimal` internally and converted to `f64`
//! only at the storage/serialization boundary, rounded to 2 decimal places
//! half-up. The breakdown is always derived from
//! `(items, discount_type, tip_percent)`; derived fields are never mutated
//! independently.

use super::types::{DiscountType, OrderItem};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Derived money fields of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricingBreakdown {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub tip_amount: f64,
    pub total: f64,
}

/// Price an order from its parts.
///
/// - `subtotal = Σ price_i × quantity_i`
/// - `discount_amount = subtotal × discount% / 100`
/// - `tip_amount = subtotal × tip_percent / 100`; the tip is computed off
///   the subtotal, not the discounted amount
/// - `total = subtotal − discount_amount + tip_amount`, stored raw
///
/// Pure and idempotent: pricing the same inputs twice yields identical
/// results.
pub fn price_order(
    items: &[OrderItem],
    discount_type: DiscountType,
    tip_percent: f64,
) -> PricingBreakdown {
    let subtotal: Decimal = items
        .iter()
        .map(|item| to_decimal(item.price) * Decimal::from(item.quantity))
        .sum();
    let subtotal = subtotal.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

    let discount = (subtotal * discount_type.percent() / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    let tip = (subtotal * to_decimal(tip_percent) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

    let total = subtotal - discount + tip;

    PricingBreakdown {
        subtotal: to_f64(subtotal),
        discount_amount: to_f64(discount),
        tip_amount: to_f64(tip),
        total: to_f64(total),
    }
}

/// Total clamped to zero for display only; the stored total stays raw
pub fn display_total(total: f64) -> f64 {
    total.max(0.0)
}

/// Change owed on a cash sale, floored at zero for display
pub fn change_due(cash_given: f64, total: f64) -> f64 {
    to_f64((to_decimal(cash_given) - to_decimal(total)).max(Decimal::ZERO))
}

/// Check that tendered cash covers the total (within 0.01 tolerance)
pub fn is_cash_sufficient(cash_given: f64, total: f64) -> bool {
    to_decimal(cash_given) >= to_decimal(total) - MONEY_TOLERANCE
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> Vec<OrderItem> {
        vec![
            OrderItem {
                name: "Latte".to_string(),
                price: 120.0,
                quantity: 1,
            },
            OrderItem {
                name: "Croissant".to_string(),
                price: 100.0,
                quantity: 1,
            },
        ]
    }

    #[test]
    fn no_discount_no_tip() {
        let p = price_order(&cart(), DiscountType::None, 0.0);
        assert_eq!(p.subtotal, 220.0);
        assert_eq!(p.discount_amount, 0.0);
        assert_eq!(p.tip_amount, 0.0);
        assert_eq!(p.total, 220.0);
    }

    #[test]
    fn senior_discount_with_tip() {
        // 220 - 20% + 10% tip (off subtotal) = 220 - 44 + 22 = 198
        let p = price_order(&cart(), DiscountType::Senior, 10.0);
        assert_eq!(p.subtotal, 220.0);
        assert_eq!(p.discount_amount, 44.0);
        assert_eq!(p.tip_amount, 22.0);
        assert_eq!(p.total, 198.0);
    }

    #[test]
    fn pwd_discount_equals_senior() {
        let senior = price_order(&cart(), DiscountType::Senior, 0.0);
        let pwd = price_order(&cart(), DiscountType::Pwd, 0.0);
        assert_eq!(senior.discount_amount, pwd.discount_amount);
        assert_eq!(senior.total, pwd.total);
    }

    #[test]
    fn pricing_is_idempotent() {
        let a = price_order(&cart(), DiscountType::Senior, 12.5);
        let b = price_order(&cart(), DiscountType::Senior, 12.5);
        assert_eq!(a, b);
    }

    #[test]
    fn total_identity_holds_for_every_combination() {
        for discount in [DiscountType::None, DiscountType::Senior, DiscountType::Pwd] {
            for tip in [0.0, 5.0, 10.0, 12.5, 100.0] {
                let p = price_order(&cart(), discount, tip);
                let expected =
                    to_decimal(p.subtotal) - to_decimal(p.discount_amount) + to_decimal(p.tip_amount);
                assert_eq!(to_f64(expected), p.total, "{discount:?} tip={tip}");
            }
        }
    }

    #[test]
    fn quantities_multiply_prices() {
        let items = vec![OrderItem {
            name: "Americano".to_string(),
            price: 95.5,
            quantity: 3,
        }];
        let p = price_order(&items, DiscountType::None, 0.0);
        assert_eq!(p.subtotal, 286.5);
    }

    #[test]
    fn decimal_precision_survives_accumulation() {
        // 100 lines at 0.01 must sum to exactly 1.00, not 0.99999…
        let items: Vec<OrderItem> = (0..100)
            .map(|i| OrderItem {
                name: format!("penny-{i}"),
                price: 0.01,
                quantity: 1,
            })
            .collect();
        let p = price_order(&items, DiscountType::None, 0.0);
        assert_eq!(p.subtotal, 1.0);
    }

    #[test]
    fn total_cannot_go_negative_with_fixed_discounts() {
        // 20% is the largest discount the table allows; total stays positive
        let p = price_order(&cart(), DiscountType::Senior, 0.0);
        assert!(p.total > 0.0);
        assert_eq!(display_total(p.total), p.total);
    }

    #[test]
    fn change_due_scenarios() {
        assert_eq!(change_due(200.0, 198.0), 2.0);
        assert_eq!(change_due(198.0, 198.0), 0.0);
        // Short payments floor at zero for display
        assert_eq!(change_due(150.0, 198.0), 0.0);
    }

    #[test]
    fn cash_sufficiency() {
        assert!(is_cash_sufficient(200.0, 198.0));
        assert!(is_cash_sufficient(198.0, 198.0));
        assert!(is_cash_sufficient(197.995, 198.0)); // within tolerance
        assert!(!is_cash_sufficient(150.0, 198.0));
    }

    #[test]
    fn money_eq_tolerance() {
        assert!(money_eq(100.0, 100.0));
        assert!(money_eq(100.004, 100.006));
        assert!(!money_eq(100.0, 100.02));
    }

    #[test]
    fn empty_item_list_prices_to_zero() {
        // The flow rejects empty carts before pricing; the function itself
        // stays total and returns zeros
        let p = price_order(&[], DiscountType::Senior, 10.0);
        assert_eq!(p.subtotal, 0.0);
        assert_eq!(p.total, 0.0);
    }
}
