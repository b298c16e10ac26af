use axum::{
    debug_handler,
    extract::{State, WebSocketUpgrade, ws::Message},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use uuid::Uuid;

use crate::AppState;

use super::{conn::Conn, event::ClientEvent};

#[debug_handler]
pub async fn room_ws(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(async move |stream| {
        let id = Uuid::now_v7();
        let mut rx = state.hub.connect(id);
        let conn = Conn::new(id, &state);
        tracing::debug!(conn = %id, "socket opened");

        let (mut sender, mut receiver) = stream.split();

        let send_task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let Ok(text) = serde_json::to_string(&event) else {
                    continue;
                };
                if sender.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        });

        while let Some(Ok(msg)) = receiver.next().await {
            let data = match msg {
                Message::Text(text) => text,
                // keep polling after Close so the queued close reply gets flushed
                _ => continue,
            };

            match serde_json::from_str::<ClientEvent>(data.as_str()) {
                Ok(event) => conn.handle(event),
                Err(err) => tracing::debug!(conn = %id, "bad frame: {err}"),
            }
        }

        conn.disconnect();
        // the hub dropped our sender, so the writer drains what is queued and stops
        if let Err(err) = send_task.await {
            tracing::debug!(conn = %id, "writer task failed: {err}");
        }
        tracing::debug!(conn = %id, "socket closed");
    })
}
