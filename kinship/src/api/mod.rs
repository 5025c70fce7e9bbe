//! Typed client for the Kinship REST API.
//!
//! This module provides:
//! - `ApiClient` - Main entry point, owns the transport and the session
//! - Resource handles (`posts()`, `albums()`, `groups()`, ...) for each route family
//! - `Transport` - the seam between typed calls and the wire
//!
//! # Example
//! ```ignore
//! let transport = HttpTransport::from_config(&config)?;
//! let client = ApiClient::new(transport, session);
//!
//! let feed = client.posts().list().await?;
//! let post = client.posts().like("65f0c1d2e3").await?;
//! ```

mod albums;
mod groups;
pub mod http;
mod jobs;
mod posts;
mod stories;
pub mod transport;
mod users;

pub use albums::AlbumsHandle;
pub use groups::{GroupQuery, GroupsHandle};
pub use http::{HttpTransport, extract_error_message};
pub use jobs::JobsHandle;
pub use posts::{PostDraft, PostsHandle};
pub use stories::StoriesHandle;
pub use transport::{ApiRequest, FilePart, Method, MultipartForm, RequestBody, Transport};
pub use users::UsersHandle;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ClientError;
use crate::id::IdError;
use crate::session::Session;

/// Key under which list endpoints commonly wrap their payload.
const DATA_KEY: &str = "data";

pub struct ApiClient<T: Transport> {
    transport: T,
    session: Session,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, session: Session) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn posts(&self) -> PostsHandle<'_, T> {
        PostsHandle::new(self)
    }

    pub fn albums(&self) -> AlbumsHandle<'_, T> {
        AlbumsHandle::new(self)
    }

    pub fn groups(&self) -> GroupsHandle<'_, T> {
        GroupsHandle::new(self)
    }

    pub fn stories(&self) -> StoriesHandle<'_, T> {
        StoriesHandle::new(self)
    }

    pub fn users(&self) -> UsersHandle<'_, T> {
        UsersHandle::new(self)
    }

    pub fn jobs(&self) -> JobsHandle<'_, T> {
        JobsHandle::new(self)
    }

    /// Sends a read. The token is attached when a session exists but not required.
    pub(crate) async fn fetch(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let request = request.bearer(self.session.token());
        self.transport.send(request).await
    }

    /// Sends a mutation. Fails with [`ClientError::Unauthenticated`] before
    /// touching the network when no session is active.
    pub(crate) async fn mutate(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let token = self.session.bearer()?;
        let request = request.bearer(Some(token));
        self.transport.send(request).await
    }
}

/// Decodes `value`, looking first under each of `keys`, then `data`, then the bare value.
pub fn unwrap_payload<D: DeserializeOwned>(value: Value, keys: &[&str]) -> Result<D, ClientError> {
    let inner = match value {
        Value::Object(mut map) => {
            let hit = keys
                .iter()
                .copied()
                .chain([DATA_KEY])
                .find(|key| map.get(*key).is_some_and(|found| !found.is_null()));
            match hit {
                Some(key) => map.remove(key).unwrap_or(Value::Null),
                None => Value::Object(map),
            }
        }
        other => other,
    };
    serde_json::from_value(inner).map_err(|err| ClientError::Decode(err.to_string()))
}

/// Validates an id before it is spliced into a route.
pub(crate) fn segment(id: &str) -> Result<&str, ClientError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty.into());
    }
    if trimmed.contains(['/', '?', '#']) {
        return Err(IdError::Unsupported("path separator in id").into());
    }
    Ok(trimmed)
}
