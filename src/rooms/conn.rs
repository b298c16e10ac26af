use crate::{hub::Hub, users::{ConnectionId, Users}, AppState};

use super::{
    event::{ClientEvent, JoinRoomQuery, ServerEvent},
    msg::RoomUsers,
    Bot,
};

/// Per-socket protocol: a connection starts unjoined, joins once it picks a free name,
/// and is gone after [`Conn::disconnect`].
pub(crate) struct Conn {
    id: ConnectionId,
    users: Users,
    hub: Hub,
    bot: Bot,
}

impl Conn {
    pub(crate) fn new(id: ConnectionId, state: &AppState) -> Self {
        Self {
            id,
            users: state.users.clone(),
            hub: state.hub.clone(),
            bot: state.bot.clone(),
        }
    }

    pub(crate) fn handle(&self, event: ClientEvent) {
        match event {
            ClientEvent::JoinRoom(query) => self.join_room(query),
            ClientEvent::ChatMessage(text) => self.chat_message(&text),
        }
    }

    fn join_room(&self, JoinRoomQuery { username, room }: JoinRoomQuery) {
        let _membership = self.users.membership();

        // one name per socket
        if self.users.find(self.id).is_some() {
            tracing::debug!(conn = %self.id, "join from already joined connection dropped");
            return;
        }

        let user = match self.users.join(self.id, &username, &room) {
            Ok(user) => user,
            Err(err) => {
                tracing::info!(conn = %self.id, %username, "join refused: {err}");
                self.hub.emit(self.id, ServerEvent::UsernameError(err.to_string()));
                return;
            }
        };
        tracing::info!(conn = %self.id, username = %user.username, room = %user.room, "user joined");

        self.hub.join_group(self.id, &user.room);

        self.hub.emit(self.id, ServerEvent::Message(self.bot.say("Welcome to XeroxChat!")));

        self.hub.to_room_except(
            &user.room,
            self.id,
            ServerEvent::Message(self.bot.say(&format!("{} has joined the chat!", user.username))),
        );

        self.send_roster(&user.room);
    }

    fn chat_message(&self, text: &str) {
        let Some(user) = self.users.find(self.id) else {
            tracing::debug!(conn = %self.id, "message from unjoined connection dropped");
            return;
        };

        self.hub.to_room(&user.room, ServerEvent::Message(self.bot.relay(&user.username, text)));
    }

    /// Tears the connection down. Consumes the handler, so nothing can follow it.
    pub(crate) fn disconnect(self) {
        let _membership = self.users.membership();

        // out of the groups first: the notices below go to the remaining members only
        self.hub.disconnect(self.id);

        let Some(user) = self.users.leave(self.id) else {
            return;
        };
        tracing::info!(conn = %self.id, username = %user.username, room = %user.room, "user left");

        self.hub.to_room(
            &user.room,
            ServerEvent::Message(self.bot.say(&format!("{} has left the chat!", user.username))),
        );
        self.send_roster(&user.room);
    }

    fn send_roster(&self, room: &str) {
        self.hub.to_room(
            room,
            ServerEvent::RoomUsers(RoomUsers {
                room: room.to_owned(),
                users: self.users.list_by_room(room),
            }),
        );
    }
}
