//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::analytics::{self, ValuationSummary};
use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use crate::db::repository::InventoryRepository;
use crate::utils::AppResult;

const RESOURCE: &str = "inventory";

fn id_string(item: &InventoryItem) -> String {
    item.id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default()
}

/// Full inventory listing (back office)
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<InventoryItem>>> {
    current_user.require_staff()?;
    let repo = InventoryRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// Valuation summary: one pass over the fetched collection
pub async fn valuation(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ValuationSummary>> {
    current_user.require_staff()?;
    let repo = InventoryRepository::new(state.db.clone());
    let items = repo.find_all().await?;
    Ok(Json(analytics::inventory_valuation(&items)))
}

pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<(StatusCode, Json<InventoryItem>)> {
    current_user.require_admin()?;
    payload.validate()?;

    let repo = InventoryRepository::new(state.db.clone());
    let item = repo.create(payload).await?;
    let id = id_string(&item);

    state
        .audit
        .record(
            AuditAction::InventoryCreated,
            RESOURCE,
            &id,
            Some(&current_user),
            serde_json::json!({ "name": item.name }),
        )
        .await;
    state.broadcast_sync(RESOURCE, "created", &id, Some(&item));

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<InventoryItemUpdate>,
) -> AppResult<Json<InventoryItem>> {
    current_user.require_admin()?;
    payload.validate()?;

    let repo = InventoryRepository::new(state.db.clone());
    let item = repo.update(&id, payload).await?;
    let id = id_string(&item);

    state
        .audit
        .record(
            AuditAction::InventoryUpdated,
            RESOURCE,
            &id,
            Some(&current_user),
            serde_json::json!({ "name": item.name }),
        )
        .await;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&item));

    Ok(Json(item))
}

pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    current_user.require_admin()?;

    let repo = InventoryRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    if !deleted {
        return Err(crate::utils::AppError::not_found(format!(
            "inventory item {id}"
        )));
    }

    state
        .audit
        .record(
            AuditAction::InventoryDeleted,
            RESOURCE,
            &id,
            Some(&current_user),
            serde_json::json!({}),
        )
        .await;
    state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);

    Ok(Json(serde_json::json!({ "deleted": true })))
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockBody {
    /// 正数进货，负数耗损/售出
    pub delta: i32,
}

pub async fn adjust_stock(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<AdjustStockBody>,
) -> AppResult<Json<InventoryItem>> {
    current_user.require_staff()?;

    let repo = InventoryRepository::new(state.db.clone());
    let item = repo.adjust_stock(&id, body.delta).await?;
    let id = id_string(&item);

    state
        .audit
        .record(
            AuditAction::StockAdjusted,
            RESOURCE,
            &id,
            Some(&current_user),
            serde_json::json!({ "delta": body.delta, "stock": item.stock }),
        )
        .await;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&item));

    Ok(Json(item))
}
