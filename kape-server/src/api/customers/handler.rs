//! Customers API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{UserCreate, UserRole, UserView};
use crate::db::repository::{OrderRepository, UserRepository};
use crate::utils::{AppError, AppResult};
use shared::order::{Order, OrderStatus};
use shared::order::pricing::{to_decimal, to_f64};

const RESOURCE: &str = "users";

/// Customer listing (back office)
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<UserView>>> {
    current_user.require_staff()?;
    let repo = UserRepository::new(state.db.clone());
    let customers = repo.find_by_role(UserRole::Customer).await?;
    Ok(Json(customers.into_iter().map(UserView::from).collect()))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 60))]
    pub username: String,
    #[validate(length(min = 1, max = 120))]
    pub display_name: String,
    #[validate(email)]
    pub email: Option<String>,
}

/// Storefront self-registration: creates a customer profile, no password,
/// no session. Orders reference the returned id.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserView>)> {
    payload.validate()?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .create(UserCreate {
            username: payload.username,
            display_name: payload.display_name,
            role: UserRole::Customer,
            password_hash: None,
            email: payload.email,
        })
        .await?;
    let id = user.id_string();

    state
        .audit
        .record(
            AuditAction::UserCreated,
            RESOURCE,
            &id,
            None,
            serde_json::json!({ "role": "customer" }),
        )
        .await;
    let view = UserView::from(user);
    state.broadcast_sync(RESOURCE, "created", &id, Some(&view));

    Ok((StatusCode::CREATED, Json(view)))
}

/// Per-customer spend summary derived in memory from their orders
#[derive(Debug, Serialize)]
pub struct CustomerStats {
    pub orders: i64,
    pub total_spent: f64,
    pub last_order_at: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CustomerDetail {
    pub user: UserView,
    pub stats: CustomerStats,
    /// Latest orders, newest first
    pub recent_orders: Vec<Order>,
}

/// Customer profile with order aggregates
pub async fn get_customer(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<CustomerDetail>> {
    current_user.require_staff()?;

    let user_repo = UserRepository::new(state.db.clone());
    let user = user_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("customer {id}")))?;
    let user_id = user.id_string();

    // Fetch wholesale, filter and fold in memory, like the rest of the back office
    let order_repo = OrderRepository::new(state.db.clone());
    let mut orders: Vec<Order> = order_repo
        .find_all()
        .await?
        .into_iter()
        .filter(|o| o.customer.id == user_id)
        .collect();
    orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));

    let completed: Vec<&Order> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .collect();
    let total_spent = to_f64(completed.iter().map(|o| to_decimal(o.total)).sum());
    let stats = CustomerStats {
        orders: completed.len() as i64,
        total_spent,
        last_order_at: orders.first().map(|o| o.placed_at),
    };

    orders.truncate(10);

    Ok(Json(CustomerDetail {
        user: user.into(),
        stats,
        recent_orders: orders,
    }))
}
