use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
};

use tokio::sync::mpsc;

use crate::{rooms::ServerEvent, users::ConnectionId};

pub type ConnectionSender = mpsc::UnboundedSender<ServerEvent>;
pub type ConnectionReceiver = mpsc::UnboundedReceiver<ServerEvent>;

#[derive(Default)]
struct Inner {
    connections: HashMap<ConnectionId, ConnectionSender>,
    groups: HashMap<String, HashSet<ConnectionId>>,
}

/// Outbound side of every open socket, plus which room group each one listens to.
///
/// Delivery is best effort: sends to a peer whose socket already went away are dropped.
#[derive(Clone, Default)]
pub struct Hub {
    inner: Arc<Mutex<Inner>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn connect(&self, id: ConnectionId) -> ConnectionReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().connections.insert(id, tx);
        rx
    }

    /// Drops the connection's sender and takes it out of every group.
    pub fn disconnect(&self, id: ConnectionId) {
        let mut inner = self.lock();
        inner.connections.remove(&id);
        inner.groups.retain(|_, members| {
            members.remove(&id);
            !members.is_empty()
        });
    }

    pub fn join_group(&self, id: ConnectionId, room: &str) {
        self.lock()
            .groups
            .entry(room.to_owned())
            .or_default()
            .insert(id);
    }

    pub fn emit(&self, id: ConnectionId, event: ServerEvent) {
        if let Some(tx) = self.lock().connections.get(&id) {
            let _ = tx.send(event);
        }
    }

    pub fn to_room(&self, room: &str, event: ServerEvent) {
        self.broadcast(room, None, event);
    }

    pub fn to_room_except(&self, room: &str, except: ConnectionId, event: ServerEvent) {
        self.broadcast(room, Some(except), event);
    }

    fn broadcast(&self, room: &str, except: Option<ConnectionId>, event: ServerEvent) {
        let inner = self.lock();
        let Some(members) = inner.groups.get(room) else {
            return;
        };

        for id in members {
            if Some(*id) == except {
                continue;
            }
            if let Some(tx) = inner.connections.get(id) {
                let _ = tx.send(event.clone());
            }
        }
    }
}
