//! Process-wide session state: bearer token plus the cached current user.
//!
//! The session is only ever changed through [`Session::init`] and
//! [`Session::clear`]; storage backends persist whatever those leave behind.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;
use crate::id::Identified;
use crate::models::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

impl Session {
    /// Builds an authenticated session in one step.
    pub fn authenticated(token: impl Into<String>, user: Option<User>) -> Result<Self, ClientError> {
        let mut session = Self::default();
        session.init(token, user)?;
        Ok(session)
    }

    /// Starts a session. A blank token is rejected and leaves the session untouched.
    pub fn init(&mut self, token: impl Into<String>, user: Option<User>) -> Result<(), ClientError> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ClientError::Unauthenticated);
        }
        self.token = Some(trimmed.to_string());
        self.user = user;
        Ok(())
    }

    /// Ends the session, dropping both token and cached user.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Token for the `Authorization` header, if a session is active.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Token required by mutating calls.
    pub fn bearer(&self) -> Result<&str, ClientError> {
        self.token.as_deref().ok_or(ClientError::Unauthenticated)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Replaces the cached user without touching the token.
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Id of the logged-in user; needed for every membership toggle.
    pub fn user_id(&self) -> Result<String, ClientError> {
        self.bearer()?;
        let user = self.user.as_ref().ok_or(ClientError::NoCurrentUser)?;
        Ok(user.entity_id()?)
    }
}

/// Where sessions survive between runs.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Session, ClientError>;
    fn save(&self, session: &Session) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// JSON file store (`{"token": .., "user": ..}`).
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session, ClientError> {
        if !self.path.exists() {
            return Ok(Session::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|err| ClientError::Storage(format!("failed to read {}: {err}", self.path.display())))?;
        if content.trim().is_empty() {
            return Ok(Session::default());
        }
        serde_json::from_str(&content)
            .map_err(|err| ClientError::Storage(format!("failed to parse {}: {err}", self.path.display())))
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|err| ClientError::Storage(format!("failed to create {}: {err}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|err| ClientError::Storage(format!("failed to encode session: {err}")))?;
        std::fs::write(&self.path, json)
            .map_err(|err| ClientError::Storage(format!("failed to write {}: {err}", self.path.display())))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ClientError::Storage(format!(
                "failed to remove {}: {err}",
                self.path.display()
            ))),
        }
    }
}

/// Volatile store, used by tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Session>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session, ClientError> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| ClientError::Storage("session lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| ClientError::Storage("session lock poisoned".to_string()))?;
        *guard = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        self.save(&Session::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::EntityKey;

    fn user(id: &str) -> User {
        User {
            key: EntityKey::new(id),
            name: "Ada".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn init_and_clear_lifecycle() {
        let mut session = Session::default();
        assert!(matches!(session.bearer(), Err(ClientError::Unauthenticated)));

        session.init(" tok-123 ", Some(user("U1"))).unwrap();
        assert_eq!(session.bearer().unwrap(), "tok-123");
        assert_eq!(session.user_id().unwrap(), "U1");

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn blank_token_is_rejected() {
        let mut session = Session::authenticated("tok", None).unwrap();
        assert!(session.init("  ", Some(user("U2"))).is_err());
        assert_eq!(session.token(), Some("tok"));
    }

    #[test]
    fn user_id_requires_cached_user() {
        let session = Session::authenticated("tok", None).unwrap();
        assert!(matches!(session.user_id(), Err(ClientError::NoCurrentUser)));
        assert!(matches!(Session::default().user_id(), Err(ClientError::Unauthenticated)));
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySessionStore::default();
        let session = Session::authenticated("tok", Some(user("U1"))).unwrap();
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), session);
        store.clear().unwrap();
        assert!(!store.load().unwrap().is_authenticated());
    }
}
