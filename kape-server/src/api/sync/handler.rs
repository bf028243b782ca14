//! Sync Feed API Handler
//!
//! 把进程内广播总线暴露为 SSE 流。落后的订阅者跳过丢失的消息
//! 继续接收——客户端发现版本号跳变后自行全量刷新。

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;

/// Live change feed: one SSE event per SyncPayload
pub async fn stream(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.sync.subscribe();

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(payload) => {
                    let event = Event::default()
                        .event("sync")
                        .json_data(&payload)
                        .unwrap_or_default();
                    return Some((Ok(event), rx));
                }
                // 落后就跳过，让客户端用版本号发现缺口
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "sync subscriber lagged");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
