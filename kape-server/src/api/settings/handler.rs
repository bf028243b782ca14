//! Store Settings API Handlers

use axum::{Json, extract::State};

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{StoreSettings, StoreSettingsUpdate};
use crate::db::repository::SettingsRepository;
use crate::utils::AppResult;

const RESOURCE: &str = "settings";

/// Get current store settings (storefront reads name/hours from here)
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<StoreSettings>> {
    let repo = SettingsRepository::new(state.db.clone());
    let settings = repo.get_or_create().await?;
    Ok(Json(settings))
}

/// Update store settings
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<StoreSettingsUpdate>,
) -> AppResult<Json<StoreSettings>> {
    current_user.require_admin()?;

    let repo = SettingsRepository::new(state.db.clone());
    let settings = repo.update(payload).await?;

    state
        .audit
        .record(
            AuditAction::SettingsChanged,
            RESOURCE,
            "settings:main",
            Some(&current_user),
            serde_json::json!({ "name": &settings.name }),
        )
        .await;
    state.broadcast_sync(RESOURCE, "updated", "main", Some(&settings));

    Ok(Json(settings))
}
