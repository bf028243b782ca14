//! OrderService - checkout and lifecycle command processing
//!
//! # Command Flow
//!
//! ```text
//! checkout_pos / place_online / advance
//!     ├─ 1. Validate input (cart, tip, cash)
//!     ├─ 2. Price via shared::order::pricing (pure)
//!     ├─ 3. Apply the status machine (pure)
//!     ├─ 4. Persist (create-only / compare-and-set)
//!     ├─ 5. Audit entry (fire-and-forget)
//!     └─ 6. Broadcast sync payload
//! ```
//!
//! Failed operations leave the record unchanged; nothing is retried here.

use crate::audit::{AuditAction, AuditService};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{OrderRepository, RepoError, SettingsRepository};
use crate::sync::SyncBus;
use crate::utils::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use shared::order::{
    self, CheckoutRequest, CustomerRef, OnlineOrderRequest, Order, OrderFlowError, OrderSource,
    OrderStatus, StatusAction, pricing,
};
use shared::util::now_millis;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const COLLECTION: &str = "orders";

/// Result of a POS checkout: the settled order plus the change to display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosReceipt {
    pub order: Order,
    /// Present for cash sales, floored at zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_due: Option<f64>,
}

/// Order flow service - the only writer of the `orders` collection
#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    settings: SettingsRepository,
    sync: Arc<SyncBus>,
    audit: AuditService,
}

impl OrderService {
    pub fn new(db: Surreal<Db>, sync: Arc<SyncBus>, audit: AuditService) -> Self {
        Self {
            repo: OrderRepository::new(db.clone()),
            settings: SettingsRepository::new(db),
            sync,
            audit,
        }
    }

    pub fn from_state(state: &ServerState) -> Self {
        Self::new(state.db.clone(), state.sync.clone(), state.audit.clone())
    }

    /// A store failure on the write path surfaces as `StoreWriteFailed`
    fn store_err(err: RepoError) -> AppError {
        match err {
            RepoError::Database(msg) | RepoError::Duplicate(msg) => {
                OrderFlowError::StoreWriteFailed(msg).into()
            }
            other => other.into(),
        }
    }

    // ========================================================================
    // POS path
    // ========================================================================

    /// POS checkout: validate, price, settle and persist in one step.
    ///
    /// The caller clears its in-memory cart after a successful return; the
    /// record itself knows nothing about carts.
    pub async fn checkout_pos(
        &self,
        req: CheckoutRequest,
        operator: &CurrentUser,
    ) -> AppResult<PosReceipt> {
        order::types::validate_cart(&req.items)?;
        order::types::validate_tip_percent(req.tip_percent)?;

        let items: Vec<_> = req
            .items
            .into_iter()
            .map(|item| item.into_order_item())
            .collect();
        let breakdown = pricing::price_order(&items, req.discount_type, req.tip_percent);

        // Cash must cover the total before anything is written
        let cash_given = if req.payment.is_cash() {
            let given = req.cash_given.ok_or_else(|| {
                OrderFlowError::InvalidInput("cash_given is required for cash payment".into())
            })?;
            order::types::validate_cash_given(given)?;
            if !pricing::is_cash_sufficient(given, breakdown.total) {
                return Err(OrderFlowError::InsufficientCash {
                    required: breakdown.total,
                    given,
                }
                .into());
            }
            Some(given)
        } else {
            None
        };

        let customer = match req.customer_name {
            Some(name) if !name.trim().is_empty() => CustomerRef {
                id: order::types::WALK_IN.to_string(),
                name,
            },
            _ => CustomerRef::walk_in(),
        };

        let order = Order::new(
            OrderSource::Pos,
            items,
            customer,
            req.discount_type,
            req.tip_percent,
            req.payment,
            cash_given,
            OrderStatus::Completed,
        );

        let order = self.repo.create(&order).await.map_err(Self::store_err)?;
        let change_due = order.change_due();

        tracing::info!(
            order_id = %order.id,
            total = order.total,
            payment = ?order.payment,
            "POS sale completed"
        );

        self.audit
            .record(
                AuditAction::PosSaleCompleted,
                COLLECTION,
                &order.id,
                Some(operator),
                serde_json::json!({ "total": order.total, "payment": order.payment }),
            )
            .await;
        self.sync.publish(COLLECTION, "created", &order.id, Some(&order));

        Ok(PosReceipt { order, change_due })
    }

    // ========================================================================
    // Online path
    // ========================================================================

    /// Create an online order at `Pending`; staff actions advance it.
    pub async fn place_online(&self, req: OnlineOrderRequest) -> AppResult<Order> {
        let settings = self
            .settings
            .get_or_create()
            .await
            .map_err(AppError::from)?;
        if !settings.online_ordering_enabled {
            return Err(AppError::Validation(
                "online ordering is currently disabled".into(),
            ));
        }

        order::types::validate_cart(&req.items)?;
        order::types::validate_tip_percent(req.tip_percent)?;

        let items: Vec<_> = req
            .items
            .into_iter()
            .map(|item| item.into_order_item())
            .collect();

        let order = Order::new(
            OrderSource::Online,
            items,
            CustomerRef {
                id: req.customer_id,
                name: req.customer_name,
            },
            req.discount_type,
            req.tip_percent,
            req.payment,
            None,
            OrderStatus::Pending,
        );

        let order = self.repo.create(&order).await.map_err(Self::store_err)?;

        tracing::info!(order_id = %order.id, total = order.total, "online order placed");

        self.audit
            .record(
                AuditAction::OnlineOrderPlaced,
                COLLECTION,
                &order.id,
                None,
                serde_json::json!({ "total": order.total, "customer": order.customer.id }),
            )
            .await;
        self.sync.publish(COLLECTION, "created", &order.id, Some(&order));

        Ok(order)
    }

    // ========================================================================
    // Staff lifecycle actions
    // ========================================================================

    /// Apply a staff lifecycle action to an order.
    ///
    /// The transition itself is the pure state machine; this method adds the
    /// completion invariants (non-empty items, cash coverage), then persists
    /// with a compare-and-set on the status observed here. A losing racer
    /// gets `InvalidTransition` against the fresh status.
    pub async fn advance(
        &self,
        order_id: &str,
        action: StatusAction,
        cash_given: Option<f64>,
        operator: &CurrentUser,
    ) -> AppResult<Order> {
        let current = self
            .repo
            .get(order_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("order {order_id}")))?;

        let next = current.status.apply(action)?;

        let (completed_at, settle_cash) = if next == OrderStatus::Completed {
            if current.items.is_empty() {
                return Err(OrderFlowError::EmptyCart.into());
            }
            let settle_cash = if current.payment.is_cash() {
                let given = cash_given.or(current.cash_given).ok_or_else(|| {
                    OrderFlowError::InvalidInput(
                        "cash_given is required to complete a cash order".into(),
                    )
                })?;
                order::types::validate_cash_given(given)?;
                if !pricing::is_cash_sufficient(given, current.total) {
                    return Err(OrderFlowError::InsufficientCash {
                        required: current.total,
                        given,
                    }
                    .into());
                }
                Some(given)
            } else {
                None
            };
            (Some(now_millis()), settle_cash)
        } else {
            (None, None)
        };

        let updated = self
            .repo
            .transition(order_id, current.status, next, completed_at, settle_cash)
            .await
            .map_err(Self::store_err)?;

        let order = match updated {
            Some(order) => order,
            None => {
                // Guard failed: somebody else moved the order (or deleted it)
                return match self.repo.get(order_id).await.map_err(AppError::from)? {
                    Some(fresh) => Err(OrderFlowError::InvalidTransition {
                        from: fresh.status,
                        action,
                    }
                    .into()),
                    None => Err(AppError::not_found(format!("order {order_id}"))),
                };
            }
        };

        tracing::info!(order_id = %order.id, from = %current.status, to = %order.status, "order transitioned");

        let audit_action = match action {
            StatusAction::Accept => AuditAction::OrderAccepted,
            StatusAction::MarkReady => AuditAction::OrderReady,
            StatusAction::Complete => AuditAction::OrderCompleted,
            StatusAction::Cancel => AuditAction::OrderCancelled,
        };
        self.audit
            .record(
                audit_action,
                COLLECTION,
                &order.id,
                Some(operator),
                serde_json::json!({ "from": current.status, "to": order.status }),
            )
            .await;
        self.sync.publish(COLLECTION, "updated", &order.id, Some(&order));

        Ok(order)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub async fn get(&self, order_id: &str) -> AppResult<Order> {
        self.repo
            .get(order_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("order {order_id}")))
    }

    pub async fn list_all(&self) -> AppResult<Vec<Order>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn list_active(&self) -> AppResult<Vec<Order>> {
        Ok(self.repo.find_active().await?)
    }

    pub async fn list_by_status(&self, status: OrderStatus) -> AppResult<Vec<Order>> {
        Ok(self.repo.find_by_status(status).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::UserRole;
    use shared::order::{CartItem, DiscountType, PaymentMethod};

    async fn service() -> OrderService {
        let db = DbService::memory().await.unwrap().db;
        let audit = AuditService::new(db.clone());
        audit.init().await.unwrap();
        OrderService::new(db, Arc::new(SyncBus::new()), audit)
    }

    fn staff() -> CurrentUser {
        CurrentUser {
            id: "users:ana".into(),
            username: "ana".into(),
            display_name: "Ana".into(),
            role: UserRole::Staff,
        }
    }

    fn cart() -> Vec<CartItem> {
        vec![
            CartItem {
                id: "inventory:latte".into(),
                name: "Latte".into(),
                price: 120.0,
                quantity: 1,
            },
            CartItem {
                id: "inventory:croissant".into(),
                name: "Croissant".into(),
                price: 100.0,
                quantity: 1,
            },
        ]
    }

    fn checkout(payment: PaymentMethod, cash: Option<f64>) -> CheckoutRequest {
        CheckoutRequest {
            items: cart(),
            discount_type: DiscountType::Senior,
            tip_percent: 10.0,
            payment,
            cash_given: cash,
            customer_name: None,
        }
    }

    #[tokio::test]
    async fn pos_checkout_settles_immediately() {
        let svc = service().await;
        let receipt = svc
            .checkout_pos(checkout(PaymentMethod::Cash, Some(200.0)), &staff())
            .await
            .unwrap();

        assert!(receipt.order.id.starts_with("POS-"));
        assert_eq!(receipt.order.status, OrderStatus::Completed);
        assert_eq!(receipt.order.total, 198.0);
        assert_eq!(receipt.change_due, Some(2.0));
        assert!(receipt.order.completed_at.is_some());

        // Persisted and readable back
        let stored = svc.get(&receipt.order.id).await.unwrap();
        assert_eq!(stored, receipt.order);
    }

    #[tokio::test]
    async fn pos_checkout_rejects_empty_cart() {
        let svc = service().await;
        let req = CheckoutRequest {
            items: vec![],
            discount_type: DiscountType::None,
            tip_percent: 0.0,
            payment: PaymentMethod::Card,
            cash_given: None,
            customer_name: None,
        };
        let err = svc.checkout_pos(req, &staff()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::OrderFlow(OrderFlowError::EmptyCart)
        ));
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn pos_checkout_rejects_short_cash_without_writing() {
        let svc = service().await;
        let err = svc
            .checkout_pos(checkout(PaymentMethod::Cash, Some(150.0)), &staff())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::OrderFlow(OrderFlowError::InsufficientCash { .. })
        ));
        // The failed checkout must not have created a record
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn online_order_walks_the_full_lifecycle() {
        let svc = service().await;
        let order = svc
            .place_online(OnlineOrderRequest {
                items: cart(),
                discount_type: DiscountType::None,
                tip_percent: 0.0,
                payment: PaymentMethod::Gcash,
                customer_id: "users:maria".into(),
                customer_name: "Maria".into(),
            })
            .await
            .unwrap();
        assert!(order.id.starts_with("O-"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, 220.0);

        // Each intermediate state is observable
        let order = svc
            .advance(&order.id, StatusAction::Accept, None, &staff())
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(svc.get(&order.id).await.unwrap().status, OrderStatus::Preparing);

        let order = svc
            .advance(&order.id, StatusAction::MarkReady, None, &staff())
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Ready);

        let order = svc
            .advance(&order.id, StatusAction::Complete, None, &staff())
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert!(order.completed_at.is_some());

        // Terminal: accepting a completed order is rejected
        let err = svc
            .advance(&order.id, StatusAction::Accept, None, &staff())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::OrderFlow(OrderFlowError::InvalidTransition {
                from: OrderStatus::Completed,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn completing_a_cash_online_order_requires_covering_cash() {
        let svc = service().await;
        let order = svc
            .place_online(OnlineOrderRequest {
                items: cart(),
                discount_type: DiscountType::Senior,
                tip_percent: 10.0,
                payment: PaymentMethod::Cash,
                customer_id: "users:maria".into(),
                customer_name: "Maria".into(),
            })
            .await
            .unwrap();

        let order = svc
            .advance(&order.id, StatusAction::Accept, None, &staff())
            .await
            .unwrap();
        let order = svc
            .advance(&order.id, StatusAction::MarkReady, None, &staff())
            .await
            .unwrap();

        // Short cash at handover is rejected and the order stays Ready
        let err = svc
            .advance(&order.id, StatusAction::Complete, Some(150.0), &staff())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::OrderFlow(OrderFlowError::InsufficientCash { .. })
        ));
        assert_eq!(svc.get(&order.id).await.unwrap().status, OrderStatus::Ready);

        // Covering cash completes and records the tendered amount
        let order = svc
            .advance(&order.id, StatusAction::Complete, Some(200.0), &staff())
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.cash_given, Some(200.0));
        assert_eq!(order.change_due(), Some(2.0));
    }

    #[tokio::test]
    async fn skipping_states_is_rejected() {
        let svc = service().await;
        let order = svc
            .place_online(OnlineOrderRequest {
                items: cart(),
                discount_type: DiscountType::None,
                tip_percent: 0.0,
                payment: PaymentMethod::Card,
                customer_id: "users:maria".into(),
                customer_name: "Maria".into(),
            })
            .await
            .unwrap();

        let err = svc
            .advance(&order.id, StatusAction::Complete, None, &staff())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::OrderFlow(OrderFlowError::InvalidTransition {
                from: OrderStatus::Pending,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn cancel_is_a_valid_administrative_edge() {
        let svc = service().await;
        let order = svc
            .place_online(OnlineOrderRequest {
                items: cart(),
                discount_type: DiscountType::None,
                tip_percent: 0.0,
                payment: PaymentMethod::Card,
                customer_id: "users:maria".into(),
                customer_name: "Maria".into(),
            })
            .await
            .unwrap();

        let order = svc
            .advance(&order.id, StatusAction::Cancel, None, &staff())
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);

        // Terminal: cancelled orders admit nothing further
        let err = svc
            .advance(&order.id, StatusAction::Accept, None, &staff())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::OrderFlow(OrderFlowError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn racing_transitions_have_exactly_one_winner() {
        let svc = service().await;
        let order = svc
            .place_online(OnlineOrderRequest {
                items: cart(),
                discount_type: DiscountType::None,
                tip_percent: 0.0,
                payment: PaymentMethod::Card,
                customer_id: "users:maria".into(),
                customer_name: "Maria".into(),
            })
            .await
            .unwrap();

        // Two sessions race the same Accept; the CAS lets one through
        let (a, b) = tokio::join!(
            svc.advance(&order.id, StatusAction::Accept, None, &staff()),
            svc.advance(&order.id, StatusAction::Accept, None, &staff()),
        );
        let winners = [a.is_ok(), b.is_ok()].iter().filter(|w| **w).count();
        assert_eq!(winners, 1, "exactly one racer may win the transition");
        assert_eq!(
            svc.get(&order.id).await.unwrap().status,
            OrderStatus::Preparing
        );
    }

    #[tokio::test]
    async fn disabled_online_ordering_rejects_placement() {
        let svc = service().await;
        svc.settings
            .update(crate::db::models::StoreSettingsUpdate {
                online_ordering_enabled: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();

        let err = svc
            .place_online(OnlineOrderRequest {
                items: cart(),
                discount_type: DiscountType::None,
                tip_percent: 0.0,
                payment: PaymentMethod::Card,
                customer_id: "users:maria".into(),
                customer_name: "Maria".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
