//! Analytics API Module
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/analytics/customers | GET | 顾客消费分析 | 店员 |
//! | /api/analytics/menu | GET | 菜单销售表现 | 店员 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/analytics", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/customers", get(handler::customers))
        .route("/menu", get(handler::menu))
}
