mod conn;
mod event;
mod msg;
mod ws;

use axum::{routing::get, Router};
use time::UtcOffset;

use crate::AppState;

pub use event::ServerEvent;
pub use msg::{FormattedMessage, RoomUsers};

/// The server's own voice in every room, and the clock all messages are stamped with.
#[derive(Debug, Clone)]
pub struct Bot {
    pub name: String,
    pub offset: UtcOffset,
}

impl Bot {
    pub fn say(&self, text: &str) -> FormattedMessage {
        msg::format(&self.name, text, self.offset)
    }

    pub fn relay(&self, username: &str, text: &str) -> FormattedMessage {
        msg::format(username, text, self.offset)
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::room_ws))
}
