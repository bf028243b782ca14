//! Customers API Module
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/customers | GET | 顾客列表 | 店员 |
//! | /api/customers/register | POST | 顾客注册 (线上点单) | 无 |
//! | /api/customers/{id} | GET | 顾客档案 + 消费汇总 | 店员 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/register", post(handler::register))
        .route("/{id}", get(handler::get_customer))
}
