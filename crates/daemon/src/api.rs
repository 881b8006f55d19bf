use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use pulse_types::BpmUpdate;
use tokio::sync::watch;

// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Latest published estimate from the acquisition loop.
    pub bpm_rx: watch::Receiver<u32>,
}

/// Query interface: the live smoothed estimate.
///
/// A plain read with no side effects on pipeline state; `bpm` is zero
/// until the smoothing window holds at least one accepted beat.
pub async fn data_handler(State(state): State<AppState>) -> Json<BpmUpdate> {
    Json(BpmUpdate {
        bpm: *state.bpm_rx.borrow(),
    })
}

/// The embedded monitoring page. All history handling is browser-local.
pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| push_estimates(socket, state.bpm_rx.clone()))
}

/// Push the estimate to a client whenever it changes.
async fn push_estimates(mut socket: WebSocket, mut bpm_rx: watch::Receiver<u32>) {
    loop {
        let update = BpmUpdate {
            bpm: *bpm_rx.borrow_and_update(),
        };
        let text = match serde_json::to_string(&update) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to serialize BPM update: {}", e);
                break;
            }
        };
        if socket.send(Message::Text(text)).await.is_err() {
            // Client disconnected
            break;
        }
        if bpm_rx.changed().await.is_err() {
            // Acquisition loop has gone away; nothing more to push.
            break;
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/data", get(data_handler))
        .route("/ws/bpm", get(websocket_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn data_handler_reports_zero_before_any_estimate() {
        let (_tx, rx) = watch::channel(0u32);
        let state = AppState { bpm_rx: rx };

        let Json(update) = data_handler(State(state)).await;
        assert_eq!(update, BpmUpdate { bpm: 0 });
    }

    #[tokio::test]
    async fn data_handler_reports_latest_estimate() {
        let (tx, rx) = watch::channel(0u32);
        let state = AppState { bpm_rx: rx };

        tx.send(85).unwrap();
        let Json(update) = data_handler(State(state)).await;
        assert_eq!(update.bpm, 85);
    }

    #[tokio::test]
    async fn data_handler_is_a_plain_read() {
        let (tx, rx) = watch::channel(72u32);
        let state = AppState { bpm_rx: rx };

        // Reading twice with no writes in between observes the same value.
        let Json(first) = data_handler(State(state.clone())).await;
        let Json(second) = data_handler(State(state)).await;
        assert_eq!(first, second);
        drop(tx);
    }
}
