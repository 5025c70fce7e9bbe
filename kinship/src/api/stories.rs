use serde_json::json;

use super::{ApiClient, ApiRequest, Transport, segment, unwrap_payload};
use crate::errors::ClientError;
use crate::models::Story;

/// Handle for `/stories` routes.
pub struct StoriesHandle<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> StoriesHandle<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /stories/feed`: active stories from the viewer and people they follow.
    pub async fn feed(&self) -> Result<Vec<Story>, ClientError> {
        let value = self.client.fetch(ApiRequest::get("/stories/feed")).await?;
        unwrap_payload(value, &["stories"])
    }

    pub async fn react(&self, story_id: &str, reaction: &str) -> Result<Story, ClientError> {
        let path = format!("/stories/{}/reaction", segment(story_id)?);
        let request = ApiRequest::post(path).json(json!({ "type": reaction }));
        let value = self.client.mutate(request).await?;
        unwrap_payload(value, &["story"])
    }
}
