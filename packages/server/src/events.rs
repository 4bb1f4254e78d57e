use crate::state::SharedState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream};
use pagecraft_model::CACHE_INVALIDATE_EVENT;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

/// SSE endpoint forwarding every cache invalidation signal
pub async fn events_handler(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    tracing::debug!("cache invalidation subscriber connected");

    let stream = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(signal) => {
                    let data = serde_json::to_string(&signal).unwrap_or_default();
                    let event = Event::default().event(CACHE_INVALIDATE_EVENT).data(data);
                    return Some((Ok(event), rx));
                }
                Err(RecvError::Lagged(n)) => {
                    tracing::warn!("[SSE] Subscriber lagged by {} messages", n);
                }
                Err(RecvError::Closed) => {
                    tracing::info!("[SSE] Broadcast channel closed");
                    return None;
                }
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}
