use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Identifier handed out by the transport for every live connection.
pub type ConnectionId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: ConnectionId,
    pub username: String,
    pub room: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("Username is already taken")]
    UsernameTaken,
}

/// Everyone currently in a room, in the order they joined.
///
/// Names are unique across the whole server, not per room.
#[derive(Clone, Default)]
pub struct Users {
    inner: Arc<Mutex<Vec<User>>>,
    membership: Arc<Mutex<()>>,
}

impl Users {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<User>> {
        // the Vec is never left half-written, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Held across a join or leave and the roster broadcast that follows it, so rosters
    /// reach every socket in the order membership actually changed.
    pub fn membership(&self) -> MutexGuard<'_, ()> {
        self.membership.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn join(&self, id: ConnectionId, username: &str, room: &str) -> Result<User, UserError> {
        let mut users = self.lock();

        let wanted = username.to_lowercase();
        if users.iter().any(|u| u.username.to_lowercase() == wanted) {
            return Err(UserError::UsernameTaken);
        }

        let user = User {
            id,
            username: username.to_owned(),
            room: room.to_owned(),
        };
        users.push(user.clone());

        Ok(user)
    }

    pub fn find(&self, id: ConnectionId) -> Option<User> {
        self.lock().iter().find(|u| u.id == id).cloned()
    }

    pub fn leave(&self, id: ConnectionId) -> Option<User> {
        let mut users = self.lock();
        let index = users.iter().position(|u| u.id == id)?;
        Some(users.remove(index))
    }

    pub fn list_by_room(&self, room: &str) -> Vec<User> {
        self.lock()
            .iter()
            .filter(|u| u.room == room)
            .cloned()
            .collect()
    }
}
