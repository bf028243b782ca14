//! Analytics API Handlers
//!
//! 与源系统一致：整表取回订单后在内存单趟聚合，聚合本身是
//! [`crate::analytics`] 里的纯函数。

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::analytics::{self, CustomerAnalytics, MenuPerformanceRow};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::utils::AppResult;

const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Deserialize)]
pub struct CustomersQuery {
    pub top: Option<usize>,
}

/// Customer analytics (top spenders, repeat rate)
pub async fn customers(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Query(query): Query<CustomersQuery>,
) -> AppResult<Json<CustomerAnalytics>> {
    current_user.require_staff()?;
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all().await?;
    Ok(Json(analytics::customer_analytics(
        &orders,
        query.top.unwrap_or(DEFAULT_TOP_N),
    )))
}

/// Menu performance (per-item units and revenue)
pub async fn menu(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<MenuPerformanceRow>>> {
    current_user.require_staff()?;
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all().await?;
    Ok(Json(analytics::menu_performance(&orders)))
}
