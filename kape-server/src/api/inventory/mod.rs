//! Inventory API Module
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/inventory | GET | 全部商品 | 店员 |
//! | /api/inventory | POST | 新建商品 | 管理员 |
//! | /api/inventory/valuation | GET | 库存估值汇总 | 店员 |
//! | /api/inventory/{id} | PUT | 更新商品 | 管理员 |
//! | /api/inventory/{id} | DELETE | 删除商品 | 管理员 |
//! | /api/inventory/{id}/adjust | POST | 库存调整 | 店员 |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/valuation", get(handler::valuation))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/adjust", post(handler::adjust_stock))
}
