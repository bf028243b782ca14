//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构。
//!
//! # 错误码规范
//!
//! | 前缀 | 分类 | 示例 |
//! |------|------|------|
//! | E0xxx | 通用业务错误 | E0003 资源不存在 |
//! | E2xxx | 权限错误 | E2001 无权限 |
//! | E3xxx | 认证令牌错误 | E3002 无效令牌 |
//! | E4xxx | 订单流程错误 | E4002 现金不足 |
//! | E9xxx | 系统错误 | E9002 数据库错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::NotFound("order not found".into()))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::order::OrderFlowError;
use tracing::error;

use crate::db::repository::RepoError;

/// API 错误响应体
///
/// ```json
/// {
///   "code": "E4002",
///   "message": "insufficient cash: 150.00 tendered, 198.00 required"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// 错误码
    pub code: &'static str,
    /// 人类可读消息
    pub message: String,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (401/403) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// 订单流程错误 (EmptyCart / InsufficientCash / InvalidTransition / ...)
    #[error(transparent)]
    OrderFlow(#[from] OrderFlowError),

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn unauthorized() -> Self {
        AppError::Unauthorized
    }

    pub fn token_expired() -> Self {
        AppError::TokenExpired
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        AppError::InvalidToken(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    fn code_and_status(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "E3001"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "E3003"),
            AppError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "E3002"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "E2001"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "E0003"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "E0004"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "E0002"),
            AppError::OrderFlow(e) => match e {
                OrderFlowError::EmptyCart => (StatusCode::BAD_REQUEST, "E4001"),
                OrderFlowError::InsufficientCash { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "E4002")
                }
                OrderFlowError::InvalidTransition { .. } => (StatusCode::CONFLICT, "E4003"),
                OrderFlowError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "E0002"),
                OrderFlowError::StoreWriteFailed(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "E9002")
                }
            },
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "E9002"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "E9001"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.code_and_status();

        // 5xx 细节进日志，不进响应体
        let message = if status.is_server_error() {
            error!(error = %self, code, "request failed");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// handler 返回类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderStatus, StatusAction};

    #[test]
    fn order_flow_errors_map_to_expected_status() {
        let cases = [
            (AppError::from(OrderFlowError::EmptyCart), StatusCode::BAD_REQUEST, "E4001"),
            (
                AppError::from(OrderFlowError::InsufficientCash {
                    required: 198.0,
                    given: 150.0,
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
                "E4002",
            ),
            (
                AppError::from(OrderFlowError::InvalidTransition {
                    from: OrderStatus::Completed,
                    action: StatusAction::Accept,
                }),
                StatusCode::CONFLICT,
                "E4003",
            ),
            (
                AppError::from(OrderFlowError::StoreWriteFailed("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "E9002",
            ),
        ];
        for (err, status, code) in cases {
            let (s, c) = err.code_and_status();
            assert_eq!(s, status);
            assert_eq!(c, code);
        }
    }

    #[test]
    fn repo_errors_convert() {
        let err: AppError = RepoError::NotFound("orders:O-1".into()).into();
        assert!(matches!(err, AppError::NotFound(_)));
        let err: AppError = RepoError::Duplicate("orders:O-1".into()).into();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
