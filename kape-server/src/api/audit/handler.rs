//! Audit Log API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::audit::AuditEntry;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;

const DEFAULT_PAGE_SIZE: usize = 50;
const MAX_PAGE_SIZE: usize = 200;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AuditPage {
    pub entries: Vec<AuditEntry>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Paged audit log, newest first (admin console)
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<AuditPage>> {
    current_user.require_admin()?;

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let repo = state.audit.repository();
    let entries = repo.list(page, page_size).await?;
    let total = repo.count().await?;

    Ok(Json(AuditPage {
        entries,
        total,
        page,
        page_size,
    }))
}
