//! Orders API Module
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/orders/pos | POST | POS 结账 (一步完成) | 店员 |
//! | /api/orders/online | POST | 线上下单 | 无 |
//! | /api/orders | GET | 订单列表 (?status= / ?active=) | 店员 |
//! | /api/orders/{id} | GET | 订单查询 (顾客追踪状态) | 无 |
//! | /api/orders/{id}/accept | POST | Pending → Preparing | 店员 |
//! | /api/orders/{id}/ready | POST | Preparing → Ready | 店员 |
//! | /api/orders/{id}/complete | POST | Ready → Completed | 店员 |
//! | /api/orders/{id}/cancel | POST | 活动状态 → Cancelled | 店员 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/pos", post(handler::pos_checkout))
        .route("/online", post(handler::place_online))
        .route("/{id}", get(handler::get_order))
        .route("/{id}/accept", post(handler::accept))
        .route("/{id}/ready", post(handler::ready))
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}/cancel", post(handler::cancel))
}
