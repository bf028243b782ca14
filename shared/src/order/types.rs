//! Shared enums and input types for the order flow

use super::error::OrderFlowError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum allowed price per item (₱1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 999;
/// Maximum allowed tip percentage
pub const MAX_TIP_PERCENT: f64 = 100.0;

/// Customer id used for anonymous POS sales
pub const WALK_IN: &str = "walk-in";

// ============================================================================
// Enums
// ============================================================================

/// Origin channel of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSource {
    /// 门店收银台下单，当场结清
    Pos,
    /// 线上下单，由员工逐步推进
    Online,
}

impl OrderSource {
    /// Order id prefix for this channel (`POS-…` / `O-…`)
    pub fn id_prefix(&self) -> &'static str {
        match self {
            OrderSource::Pos => "POS",
            OrderSource::Online => "O",
        }
    }
}

/// Named percentage-off rule applied to the subtotal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    #[default]
    None,
    /// Senior citizen discount (RA 9994)
    Senior,
    /// Person-with-disability discount (RA 10754)
    Pwd,
}

impl DiscountType {
    /// Fixed discount percentage mandated for this type
    pub fn percent(&self) -> Decimal {
        match self {
            DiscountType::None => Decimal::ZERO,
            DiscountType::Senior | DiscountType::Pwd => Decimal::from(20),
        }
    }
}

/// Settlement method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Gcash,
}

impl PaymentMethod {
    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

// ============================================================================
// Record components
// ============================================================================

/// One line of an order, snapshotted at checkout time.
///
/// Insertion order is preserved; the sequence is the add order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

/// Identity reference carried by the order (not owned by it)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
}

impl CustomerRef {
    /// Anonymous in-store customer
    pub fn walk_in() -> Self {
        Self {
            id: WALK_IN.to_string(),
            name: "Walk-in".to_string(),
        }
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// Cart line as sent by the POS/storefront client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Inventory item id
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

impl CartItem {
    pub fn into_order_item(self) -> OrderItem {
        OrderItem {
            name: self.name,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// POS checkout input - settled immediately at the counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub tip_percent: f64,
    pub payment: PaymentMethod,
    /// Required when `payment` is Cash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_given: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

/// Online order input - created at `Pending`, advanced by staff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineOrderRequest {
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub tip_percent: f64,
    pub payment: PaymentMethod,
    pub customer_id: String,
    pub customer_name: String,
}

// ============================================================================
// Boundary validation
// ============================================================================

fn require_finite(value: f64, field: &str) -> Result<(), OrderFlowError> {
    if !value.is_finite() {
        return Err(OrderFlowError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Validate a single cart line before it enters the order flow
pub fn validate_cart_item(item: &CartItem) -> Result<(), OrderFlowError> {
    require_finite(item.price, "price")?;
    if item.price < 0.0 {
        return Err(OrderFlowError::InvalidInput(format!(
            "price must be non-negative, got {}",
            item.price
        )));
    }
    if item.price > MAX_PRICE {
        return Err(OrderFlowError::InvalidInput(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, item.price
        )));
    }
    if item.quantity <= 0 {
        return Err(OrderFlowError::InvalidInput(format!(
            "quantity must be positive, got {}",
            item.quantity
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(OrderFlowError::InvalidInput(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, item.quantity
        )));
    }
    if item.name.trim().is_empty() {
        return Err(OrderFlowError::InvalidInput(
            "item name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate a whole cart: rejects the empty cart and every invalid line
pub fn validate_cart(items: &[CartItem]) -> Result<(), OrderFlowError> {
    if items.is_empty() {
        return Err(OrderFlowError::EmptyCart);
    }
    for item in items {
        validate_cart_item(item)?;
    }
    Ok(())
}

/// Validate the tip percentage entered by staff
pub fn validate_tip_percent(tip_percent: f64) -> Result<(), OrderFlowError> {
    require_finite(tip_percent, "tip_percent")?;
    if !(0.0..=MAX_TIP_PERCENT).contains(&tip_percent) {
        return Err(OrderFlowError::InvalidInput(format!(
            "tip_percent must be between 0 and {}, got {}",
            MAX_TIP_PERCENT, tip_percent
        )));
    }
    Ok(())
}

/// Validate a tendered cash amount
pub fn validate_cash_given(cash_given: f64) -> Result<(), OrderFlowError> {
    require_finite(cash_given, "cash_given")?;
    if cash_given < 0.0 {
        return Err(OrderFlowError::InvalidInput(
            "cash_given must be non-negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latte(quantity: i32) -> CartItem {
        CartItem {
            id: "inventory:latte".to_string(),
            name: "Latte".to_string(),
            price: 120.0,
            quantity,
        }
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert!(matches!(
            validate_cart(&[]),
            Err(OrderFlowError::EmptyCart)
        ));
    }

    #[test]
    fn valid_cart_passes() {
        assert!(validate_cart(&[latte(2)]).is_ok());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(validate_cart(&[latte(0)]).is_err());
    }

    #[test]
    fn nan_price_is_rejected() {
        let mut item = latte(1);
        item.price = f64::NAN;
        assert!(validate_cart_item(&item).is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut item = latte(1);
        item.price = -1.0;
        assert!(validate_cart_item(&item).is_err());
    }

    #[test]
    fn discount_percentages_match_mandate() {
        use rust_decimal::Decimal;
        assert_eq!(DiscountType::None.percent(), Decimal::ZERO);
        assert_eq!(DiscountType::Senior.percent(), Decimal::from(20));
        assert_eq!(DiscountType::Pwd.percent(), Decimal::from(20));
    }

    #[test]
    fn source_prefixes() {
        assert_eq!(OrderSource::Pos.id_prefix(), "POS");
        assert_eq!(OrderSource::Online.id_prefix(), "O");
    }

    #[test]
    fn tip_percent_bounds() {
        assert!(validate_tip_percent(0.0).is_ok());
        assert!(validate_tip_percent(10.0).is_ok());
        assert!(validate_tip_percent(-1.0).is_err());
        assert!(validate_tip_percent(150.0).is_err());
        assert!(validate_tip_percent(f64::INFINITY).is_err());
    }
}
