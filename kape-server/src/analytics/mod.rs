//! 后台聚合统计
//!
//! 与源系统一致：一次性取回集合内容，在内存中单趟聚合。
//! 这里只做纯函数，取数和序列化在 api 层。

use crate::db::models::InventoryItem;
use serde::{Deserialize, Serialize};
use shared::order::pricing::{to_decimal, to_f64};
use shared::order::{Order, OrderStatus};
use std::collections::HashMap;

// ============================================================================
// Menu performance
// ============================================================================

/// Per-item sales over completed orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuPerformanceRow {
    pub name: String,
    pub units_sold: i64,
    pub revenue: f64,
}

/// Single pass over completed orders, grouped by item name,
/// sorted by revenue descending.
pub fn menu_performance(orders: &[Order]) -> Vec<MenuPerformanceRow> {
    let mut by_name: HashMap<&str, (i64, rust_decimal::Decimal)> = HashMap::new();

    for order in orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
    {
        for item in &order.items {
            let entry = by_name
                .entry(item.name.as_str())
                .or_insert((0, rust_decimal::Decimal::ZERO));
            entry.0 += item.quantity as i64;
            entry.1 += to_decimal(item.price) * rust_decimal::Decimal::from(item.quantity);
        }
    }

    let mut rows: Vec<MenuPerformanceRow> = by_name
        .into_iter()
        .map(|(name, (units_sold, revenue))| MenuPerformanceRow {
            name: name.to_string(),
            units_sold,
            revenue: to_f64(revenue),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

// ============================================================================
// Customer analytics
// ============================================================================

/// Aggregates for one customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerRow {
    pub customer_id: String,
    pub name: String,
    pub orders: i64,
    pub total_spent: f64,
    pub last_order_at: i64,
}

/// Customer analytics summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAnalytics {
    /// Distinct identified customers with at least one completed order
    pub total_customers: i64,
    /// Share of identified customers with more than one completed order
    pub repeat_rate: f64,
    /// Spenders sorted by total, largest first
    pub top_customers: Vec<CustomerRow>,
}

/// Single pass over completed orders, grouped by customer id.
/// Walk-in sales are excluded: they carry no identity to aggregate.
pub fn customer_analytics(orders: &[Order], top_n: usize) -> CustomerAnalytics {
    struct Acc {
        name: String,
        orders: i64,
        spent: rust_decimal::Decimal,
        last_at: i64,
    }

    let mut by_customer: HashMap<&str, Acc> = HashMap::new();

    for order in orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .filter(|o| o.customer.id != shared::order::types::WALK_IN)
    {
        let acc = by_customer.entry(order.customer.id.as_str()).or_insert(Acc {
            name: order.customer.name.clone(),
            orders: 0,
            spent: rust_decimal::Decimal::ZERO,
            last_at: 0,
        });
        acc.orders += 1;
        acc.spent += to_decimal(order.total);
        acc.last_at = acc.last_at.max(order.placed_at);
    }

    let total_customers = by_customer.len() as i64;
    let repeat = by_customer.values().filter(|a| a.orders > 1).count();
    let repeat_rate = if total_customers > 0 {
        repeat as f64 / total_customers as f64
    } else {
        0.0
    };

    let mut top_customers: Vec<CustomerRow> = by_customer
        .into_iter()
        .map(|(id, acc)| CustomerRow {
            customer_id: id.to_string(),
            name: acc.name,
            orders: acc.orders,
            total_spent: to_f64(acc.spent),
            last_order_at: acc.last_at,
        })
        .collect();
    top_customers.sort_by(|a, b| {
        b.total_spent
            .partial_cmp(&a.total_spent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    top_customers.truncate(top_n);

    CustomerAnalytics {
        total_customers,
        repeat_rate,
        top_customers,
    }
}

// ============================================================================
// Inventory valuation
// ============================================================================

/// Valuation summary over the inventory collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub total_items: i64,
    pub total_units: i64,
    /// Σ cost × stock
    pub stock_value: f64,
    /// Σ price × stock
    pub retail_value: f64,
    /// Items at or below their low-stock threshold
    pub low_stock: Vec<LowStockRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LowStockRow {
    pub id: String,
    pub name: String,
    pub stock: i32,
    pub low_stock_threshold: i32,
}

/// Single pass over the inventory collection
pub fn inventory_valuation(items: &[InventoryItem]) -> ValuationSummary {
    let mut total_units = 0i64;
    let mut stock_value = rust_decimal::Decimal::ZERO;
    let mut retail_value = rust_decimal::Decimal::ZERO;
    let mut low_stock = Vec::new();

    for item in items {
        let qty = rust_decimal::Decimal::from(item.stock);
        total_units += item.stock as i64;
        stock_value += to_decimal(item.cost) * qty;
        retail_value += to_decimal(item.price) * qty;
        if item.is_low_stock() {
            low_stock.push(LowStockRow {
                id: item
                    .id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                name: item.name.clone(),
                stock: item.stock,
                low_stock_threshold: item.low_stock_threshold,
            });
        }
    }

    low_stock.sort_by(|a, b| a.stock.cmp(&b.stock).then_with(|| a.name.cmp(&b.name)));

    ValuationSummary {
        total_items: items.len() as i64,
        total_units,
        stock_value: to_f64(stock_value),
        retail_value: to_f64(retail_value),
        low_stock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{
        CustomerRef, DiscountType, OrderItem, OrderSource, PaymentMethod,
    };

    fn completed_order(customer_id: &str, name: &str, items: Vec<OrderItem>) -> Order {
        Order::new(
            OrderSource::Online,
            items,
            CustomerRef {
                id: customer_id.to_string(),
                name: name.to_string(),
            },
            DiscountType::None,
            0.0,
            PaymentMethod::Card,
            None,
            OrderStatus::Completed,
        )
    }

    fn item(name: &str, price: f64, quantity: i32) -> OrderItem {
        OrderItem {
            name: name.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn menu_performance_groups_and_sorts() {
        let orders = vec![
            completed_order("users:a", "A", vec![item("Latte", 120.0, 2)]),
            completed_order("users:b", "B", vec![item("Latte", 120.0, 1), item("Croissant", 100.0, 1)]),
        ];
        let rows = menu_performance(&orders);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Latte");
        assert_eq!(rows[0].units_sold, 3);
        assert_eq!(rows[0].revenue, 360.0);
        assert_eq!(rows[1].name, "Croissant");
        assert_eq!(rows[1].revenue, 100.0);
    }

    #[test]
    fn menu_performance_ignores_non_completed_orders() {
        let mut pending = completed_order("users:a", "A", vec![item("Latte", 120.0, 5)]);
        pending.status = OrderStatus::Pending;
        pending.completed_at = None;
        assert!(menu_performance(&[pending]).is_empty());
    }

    #[test]
    fn customer_analytics_excludes_walk_ins_and_computes_repeat_rate() {
        let orders = vec![
            completed_order("users:a", "Ana", vec![item("Latte", 120.0, 1)]),
            completed_order("users:a", "Ana", vec![item("Latte", 120.0, 1)]),
            completed_order("users:b", "Ben", vec![item("Croissant", 100.0, 1)]),
            completed_order(shared::order::types::WALK_IN, "Walk-in", vec![item("Brew", 90.0, 1)]),
        ];
        let stats = customer_analytics(&orders, 10);
        assert_eq!(stats.total_customers, 2);
        assert_eq!(stats.repeat_rate, 0.5);
        assert_eq!(stats.top_customers[0].customer_id, "users:a");
        assert_eq!(stats.top_customers[0].orders, 2);
        assert_eq!(stats.top_customers[0].total_spent, 240.0);
    }

    #[test]
    fn customer_analytics_on_empty_input() {
        let stats = customer_analytics(&[], 5);
        assert_eq!(stats.total_customers, 0);
        assert_eq!(stats.repeat_rate, 0.0);
        assert!(stats.top_customers.is_empty());
    }

    #[test]
    fn valuation_sums_and_flags_low_stock() {
        let items = vec![
            InventoryItem {
                id: None,
                name: "Latte beans".into(),
                category: "Supplies".into(),
                price: 0.0,
                cost: 350.0,
                stock: 2,
                low_stock_threshold: 5,
                is_available: false,
                created_at: None,
                updated_at: None,
            },
            InventoryItem {
                id: None,
                name: "Croissant".into(),
                category: "Pastry".into(),
                price: 100.0,
                cost: 45.0,
                stock: 20,
                low_stock_threshold: 5,
                is_available: true,
                created_at: None,
                updated_at: None,
            },
        ];
        let summary = inventory_valuation(&items);
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.total_units, 22);
        assert_eq!(summary.stock_value, 350.0 * 2.0 + 45.0 * 20.0);
        assert_eq!(summary.retail_value, 100.0 * 20.0);
        assert_eq!(summary.low_stock.len(), 1);
        assert_eq!(summary.low_stock[0].name, "Latte beans");
    }
}
