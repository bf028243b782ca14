//! Store Settings API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Settings router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/settings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::get).put(handler::update))
}
