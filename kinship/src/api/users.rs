use serde_json::Value;

use super::{ApiClient, ApiRequest, Transport, segment, unwrap_payload};
use crate::errors::ClientError;
use crate::models::{Album, Post, Product, ProfileUpdate, User};
use crate::validators::validate_profile_update;

/// Handle for `/users/:id` and its sub-collections.
pub struct UsersHandle<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> UsersHandle<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn get(&self, user_id: &str) -> Result<User, ClientError> {
        let path = format!("/users/{}", segment(user_id)?);
        let value = self.client.fetch(ApiRequest::get(path)).await?;
        unwrap_payload(value, &["user"])
    }

    pub async fn update(&self, user_id: &str, update: &ProfileUpdate) -> Result<User, ClientError> {
        validate_profile_update(update)?;
        let path = format!("/users/{}", segment(user_id)?);
        let body = serde_json::to_value(update).map_err(|err| ClientError::Encode(err.to_string()))?;
        let value = self.client.mutate(ApiRequest::put(path).json(body)).await?;
        unwrap_payload(value, &["user"])
    }

    pub async fn posts(&self, user_id: &str) -> Result<Vec<Post>, ClientError> {
        let value = self.sub_collection(user_id, "posts").await?;
        unwrap_payload(value, &["posts"])
    }

    pub async fn albums(&self, user_id: &str) -> Result<Vec<Album>, ClientError> {
        let value = self.sub_collection(user_id, "albums").await?;
        unwrap_payload(value, &["albums"])
    }

    pub async fn products(&self, user_id: &str) -> Result<Vec<Product>, ClientError> {
        let value = self.sub_collection(user_id, "products").await?;
        unwrap_payload(value, &["products"])
    }

    /// Server-side activity log. Entries are kept as raw JSON; their shape varies by kind.
    pub async fn activities(&self, user_id: &str) -> Result<Vec<Value>, ClientError> {
        let value = self.sub_collection(user_id, "activities").await?;
        unwrap_payload(value, &["activities"])
    }

    /// Server-side analytics document, passed through untouched.
    pub async fn analytics(&self, user_id: &str) -> Result<Value, ClientError> {
        let value = self.sub_collection(user_id, "analytics").await?;
        unwrap_payload(value, &["analytics"])
    }

    async fn sub_collection(&self, user_id: &str, name: &str) -> Result<Value, ClientError> {
        let path = format!("/users/{}/{name}", segment(user_id)?);
        self.client.fetch(ApiRequest::get(path)).await
    }
}
