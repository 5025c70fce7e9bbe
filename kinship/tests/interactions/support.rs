pub(crate) use kinship::api::{ApiClient, ApiRequest, Method, RequestBody, Transport};
pub(crate) use kinship::id::{EntityKey, EntityRef, Identified};
pub(crate) use kinship::models::{Group, Post, User};
pub(crate) use kinship::optimistic::Reconciliation;
pub(crate) use kinship::{ClientError, Interactions, Notifier, Session};
pub(crate) use serde_json::{Value, json};

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

/// Records every request and answers from a scripted queue.
#[derive(Default)]
pub(crate) struct FakeTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<Value, ClientError>>>,
}

impl FakeTransport {
    pub(crate) fn respond(&self, response: Result<Value, ClientError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<Value, ClientError>> + Send {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted response".to_string())));
        async move { response }
    }
}

/// Collects user-facing messages instead of showing toasts.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, error: &ClientError) {
        self.messages.lock().unwrap().push(error.user_message());
    }
}

pub(crate) const TOKEN: &str = "tok-test";

pub(crate) fn client_as(user_id: &str) -> ApiClient<FakeTransport> {
    let user = User {
        key: EntityKey::new(user_id),
        name: format!("User {user_id}"),
        ..Default::default()
    };
    let session = Session::authenticated(TOKEN, Some(user)).unwrap();
    ApiClient::new(FakeTransport::default(), session)
}

pub(crate) fn anonymous_client() -> ApiClient<FakeTransport> {
    ApiClient::new(FakeTransport::default(), Session::default())
}

pub(crate) fn post(id: &str, likes: &[&str]) -> Post {
    Post {
        key: EntityKey::new(id),
        content: format!("content of {id}"),
        likes: likes.iter().map(|user| EntityRef::from_id(*user)).collect(),
        ..Default::default()
    }
}

pub(crate) fn like_ids(post: &Post) -> Vec<String> {
    post.likes.iter().map(|like| like.user_id().unwrap()).collect()
}

pub(crate) fn server_error(status: u16, message: &str) -> Result<Value, ClientError> {
    Err(ClientError::Http {
        status,
        message: message.to_string(),
    })
}
