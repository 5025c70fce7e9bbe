//! Reqwest-backed transport.
//!
//! Owns wire details only: URL building, bearer header, body encoding, and
//! mapping of non-2xx responses to [`ClientError`].

use std::time::Duration;

use reqwest::{Client, StatusCode, Url, multipart};
use serde_json::Value;

use super::transport::{ApiRequest, Method, MultipartForm, RequestBody, Transport};
use crate::config::ClientConfig;
use crate::errors::ClientError;

const USER_AGENT: &str = concat!("kinship/", env!("CARGO_PKG_VERSION"));
const API_PREFIX: &str = "api";

pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    /// Builds a transport rooted at `base` (the `API_URL`, without `/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| ClientError::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { client, base })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(config.api_url.clone(), config.timeout)
    }

    /// Absolute URL for an API path such as `/posts/P1/like`.
    pub fn url_for(&self, path: &str) -> Result<Url, ClientError> {
        endpoint_url(&self.base, path)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = self.url_for(&request.path)?;
        log::debug!("{} {}", request.method.as_str(), url);

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        builder = builder.header(reqwest::header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(form) => builder.multipart(into_reqwest_form(form)?),
        };

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            log::debug!("request failed with status {}", status.as_u16());
            return Err(map_status_error(status, body.as_ref()));
        }
        decode_body(body.as_ref())
    }
}

pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url, ClientError> {
    let root = base.as_str().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    let raw = format!("{root}/{API_PREFIX}/{path}");
    Url::parse(&raw).map_err(|err| ClientError::Config(format!("invalid endpoint '{raw}': {err}")))
}

fn into_reqwest_form(form: MultipartForm) -> Result<multipart::Form, ClientError> {
    let mut out = multipart::Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    for file in form.files {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|err| ClientError::Config(format!("invalid content type: {err}")))?;
        out = out.part(file.field, part);
    }
    Ok(out)
}

pub(crate) fn decode_body(body: &[u8]) -> Result<Value, ClientError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|err| ClientError::Decode(format!("invalid JSON response: {err}")))
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Transport(format!("request timed out: {error}"))
    } else {
        ClientError::Transport(error.to_string())
    }
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> ClientError {
    if status == StatusCode::UNAUTHORIZED {
        return ClientError::Unauthenticated;
    }
    ClientError::Http {
        status: status.as_u16(),
        message: extract_error_message(status.as_u16(), body),
    }
}

/// Best-effort message from an error body: `message`, then `error`, then raw text.
pub fn extract_error_message(status: u16, body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        let from_key = |key: &str| match map.get(key) {
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Some(Value::Object(inner)) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };
        if let Some(message) = from_key("message").or_else(|| from_key("error")) {
            return message;
        }
        return fallback_message(status);
    }

    let preview = body_preview(body);
    if preview.is_empty() {
        fallback_message(status)
    } else {
        preview
    }
}

fn fallback_message(status: u16) -> String {
    format!("Request failed with status {status}")
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
