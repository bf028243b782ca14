//! Orders API Handlers
//!
//! Thin over [`OrderService`]; all rules live in the service and the shared
//! state machine.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::{OrderService, PosReceipt};
use crate::utils::AppResult;
use shared::order::{
    CheckoutRequest, OnlineOrderRequest, Order, OrderStatus, StatusAction,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    /// `true` 时只返回活动订单 (Pending/Preparing/Ready)，队列按下单先后排序
    pub active: Option<bool>,
}

/// POS checkout - settled immediately
pub async fn pos_checkout(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<PosReceipt>)> {
    current_user.require_staff()?;
    let service = OrderService::from_state(&state);
    let receipt = service.checkout_pos(payload, &current_user).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// Online order placement (storefront, no session required)
pub async fn place_online(
    State(state): State<ServerState>,
    Json(payload): Json<OnlineOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let service = OrderService::from_state(&state);
    let order = service.place_online(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Staff order list
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    current_user.require_staff()?;
    let service = OrderService::from_state(&state);
    let orders = match (query.active, query.status) {
        (Some(true), _) => service.list_active().await?,
        (_, Some(status)) => service.list_by_status(status).await?,
        _ => service.list_all().await?,
    };
    Ok(Json(orders))
}

/// Order lookup by id (customers track their order status with this)
pub async fn get_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let service = OrderService::from_state(&state);
    Ok(Json(service.get(&id).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct CompleteBody {
    /// 现金订单交付时收取的金额
    pub cash_given: Option<f64>,
}

pub async fn accept(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    current_user.require_staff()?;
    let service = OrderService::from_state(&state);
    let order = service
        .advance(&id, StatusAction::Accept, None, &current_user)
        .await?;
    Ok(Json(order))
}

pub async fn ready(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    current_user.require_staff()?;
    let service = OrderService::from_state(&state);
    let order = service
        .advance(&id, StatusAction::MarkReady, None, &current_user)
        .await?;
    Ok(Json(order))
}

pub async fn complete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<CompleteBody>,
) -> AppResult<Json<Order>> {
    current_user.require_staff()?;
    let cash_given = body.cash_given;
    let service = OrderService::from_state(&state);
    let order = service
        .advance(&id, StatusAction::Complete, cash_given, &current_user)
        .await?;
    Ok(Json(order))
}

pub async fn cancel(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    current_user.require_staff()?;
    let service = OrderService::from_state(&state);
    let order = service
        .advance(&id, StatusAction::Cancel, None, &current_user)
        .await?;
    Ok(Json(order))
}
