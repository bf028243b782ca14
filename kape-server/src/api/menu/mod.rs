//! Menu API Module (public storefront)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Menu router - 公开路由，无需认证
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/menu", get(handler::list))
}
