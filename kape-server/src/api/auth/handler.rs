//! Auth API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::audit::AuditAction;
use crate::auth::{self, CurrentUser};
use crate::core::ServerState;
use crate::db::models::UserView;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserView,
}

/// Staff/admin login: verify Argon2 hash, issue a JWT session
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo.find_by_username(&payload.username).await?;

    let user = match user {
        Some(user)
            if user
                .password_hash
                .as_deref()
                .is_some_and(|hash| auth::verify_password(&payload.password, hash)) =>
        {
            user
        }
        _ => {
            tracing::warn!(username = %payload.username, "login failed");
            state
                .audit
                .record(
                    AuditAction::LoginFailed,
                    "users",
                    &payload.username,
                    None,
                    serde_json::json!({}),
                )
                .await;
            return Err(AppError::unauthorized());
        }
    };
    let user_id = user.id_string();
    let token = state
        .jwt_service
        .generate_token(
            &user_id,
            &user.username,
            &user.display_name,
            &user.role.to_string(),
        )
        .map_err(|e| AppError::Internal(e.to_string()))?;

    state
        .audit
        .record(
            AuditAction::LoginSuccess,
            "users",
            &user_id,
            None,
            serde_json::json!({ "username": user.username }),
        )
        .await;

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// Current session info
pub async fn me(current_user: CurrentUser) -> Json<CurrentUser> {
    Json(current_user)
}

/// Logout: the session object dies with the token; we record the event.
pub async fn logout(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<serde_json::Value>> {
    state
        .audit
        .record(
            AuditAction::Logout,
            "users",
            &current_user.id,
            Some(&current_user),
            serde_json::json!({}),
        )
        .await;
    Ok(Json(serde_json::json!({ "ok": true })))
}
