use serde::{Deserialize, Serialize};

use super::msg::{FormattedMessage, RoomUsers};

/// What a client may send: `{"event": "joinRoom", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub(crate) enum ClientEvent {
    JoinRoom(JoinRoomQuery),
    ChatMessage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct JoinRoomQuery {
    pub(crate) username: String,
    pub(crate) room: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    UsernameError(String),
    Message(FormattedMessage),
    RoomUsers(RoomUsers),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_inbound_frames() {
        let join: ClientEvent = serde_json::from_value(json!({
            "event": "joinRoom",
            "data": { "username": "Alice", "room": "lobby" }
        }))
        .unwrap();
        assert_eq!(
            join,
            ClientEvent::JoinRoom(JoinRoomQuery { username: "Alice".into(), room: "lobby".into() })
        );

        let chat: ClientEvent =
            serde_json::from_value(json!({ "event": "chatMessage", "data": "hi" })).unwrap();
        assert_eq!(chat, ClientEvent::ChatMessage("hi".into()));
    }

    #[test]
    fn rejects_unknown_events() {
        assert!(serde_json::from_value::<ClientEvent>(json!({ "event": "disconnect" })).is_err());
        assert!(serde_json::from_value::<ClientEvent>(json!({ "event": "joinRoom", "data": "lobby" })).is_err());
    }

    #[test]
    fn outbound_shape() {
        let v = serde_json::to_value(ServerEvent::UsernameError("Username is already taken".into())).unwrap();
        assert_eq!(v, json!({ "event": "usernameError", "data": "Username is already taken" }));

        let v = serde_json::to_value(ServerEvent::RoomUsers(RoomUsers { room: "lobby".into(), users: vec![] })).unwrap();
        assert_eq!(v, json!({ "event": "roomUsers", "data": { "room": "lobby", "users": [] } }));
    }
}
