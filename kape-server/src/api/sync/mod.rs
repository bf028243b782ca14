//! Sync Feed API Module (SSE)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/sync/stream", get(handler::stream))
}
