use serde_json::json;

use super::{ApiClient, ApiRequest, MultipartForm, Transport, segment, unwrap_payload};
use crate::errors::{ClientError, ValidationError};
use crate::models::Post;
use crate::upload::{UploadFile, media_parts};

const POST_KEYS: &[&str] = &["post"];
const POSTS_KEYS: &[&str] = &["posts"];

/// Content of a new post before it is sent as `multipart/form-data`.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub content: String,
    pub title: Option<String>,
    pub media: Vec<UploadFile>,
}

impl PostDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn attach(mut self, file: UploadFile) -> Self {
        self.media.push(file);
        self
    }

    /// Validates the draft and builds the multipart body.
    pub fn into_form(self) -> Result<MultipartForm, ValidationError> {
        let content = self.content.trim().to_string();
        if content.is_empty() && self.media.is_empty() {
            return Err(ValidationError::single(
                "content",
                "required",
                "Post must have text or at least one media file",
            ));
        }
        let parts = media_parts("media", self.media)?;
        let mut form = MultipartForm::new().text("content", content);
        if let Some(title) = self.title.filter(|title| !title.trim().is_empty()) {
            form = form.text("title", title.trim());
        }
        Ok(parts.into_iter().fold(form, MultipartForm::file))
    }
}

/// Handle for `/posts` routes.
pub struct PostsHandle<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> PostsHandle<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Post>, ClientError> {
        let value = self.client.fetch(ApiRequest::get("/posts")).await?;
        unwrap_payload(value, POSTS_KEYS)
    }

    pub async fn get(&self, post_id: &str) -> Result<Post, ClientError> {
        let path = format!("/posts/{}", segment(post_id)?);
        let value = self.client.fetch(ApiRequest::get(path)).await?;
        unwrap_payload(value, POST_KEYS)
    }

    pub async fn create(&self, draft: PostDraft) -> Result<Post, ClientError> {
        let form = draft.into_form()?;
        let value = self.client.mutate(ApiRequest::post("/posts").multipart(form)).await?;
        unwrap_payload(value, POST_KEYS)
    }

    pub async fn update(&self, post_id: &str, content: &str, title: Option<&str>) -> Result<Post, ClientError> {
        let path = format!("/posts/{}", segment(post_id)?);
        let body = json!({ "content": content, "title": title });
        let value = self.client.mutate(ApiRequest::put(path).json(body)).await?;
        unwrap_payload(value, POST_KEYS)
    }

    pub async fn delete(&self, post_id: &str) -> Result<(), ClientError> {
        let path = format!("/posts/{}", segment(post_id)?);
        self.client.mutate(ApiRequest::delete(path)).await?;
        Ok(())
    }

    /// Toggles the current user's like; the server answers with the updated post.
    pub async fn like(&self, post_id: &str) -> Result<Post, ClientError> {
        self.action(post_id, "like", None).await
    }

    pub async fn save(&self, post_id: &str) -> Result<Post, ClientError> {
        self.action(post_id, "save", None).await
    }

    pub async fn comment(&self, post_id: &str, content: &str) -> Result<Post, ClientError> {
        self.action(post_id, "comment", Some(json!({ "content": content }))).await
    }

    pub async fn share(&self, post_id: &str, message: Option<&str>) -> Result<Post, ClientError> {
        self.action(post_id, "share", Some(json!({ "message": message }))).await
    }

    pub async fn react(&self, post_id: &str, reaction: &str) -> Result<Post, ClientError> {
        self.action(post_id, "reaction", Some(json!({ "type": reaction }))).await
    }

    pub async fn toggle_comments(&self, post_id: &str) -> Result<Post, ClientError> {
        self.action(post_id, "toggle-comments", None).await
    }

    pub async fn pin(&self, post_id: &str) -> Result<Post, ClientError> {
        self.action(post_id, "pin", None).await
    }

    pub async fn boost(&self, post_id: &str, budget: u32, duration_days: u32) -> Result<Post, ClientError> {
        let body = json!({ "budget": budget, "durationDays": duration_days });
        self.action(post_id, "boost", Some(body)).await
    }

    /// Records a view. The response body carries nothing the client keeps.
    pub async fn view(&self, post_id: &str) -> Result<(), ClientError> {
        let path = format!("/posts/{}/view", segment(post_id)?);
        self.client.fetch(ApiRequest::post(path)).await?;
        Ok(())
    }

    async fn action(&self, post_id: &str, action: &str, body: Option<serde_json::Value>) -> Result<Post, ClientError> {
        let path = format!("/posts/{}/{action}", segment(post_id)?);
        let mut request = ApiRequest::post(path);
        if let Some(body) = body {
            request = request.json(body);
        }
        let value = self.client.mutate(request).await?;
        unwrap_payload(value, POST_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_is_rejected() {
        let err = PostDraft::new("   ").into_form().unwrap_err();
        assert_eq!(err.issues[0].code, "required");
    }

    #[test]
    fn media_only_draft_is_accepted() {
        let form = PostDraft::new("")
            .attach(UploadFile::new("cat.gif", vec![7; 32]))
            .into_form()
            .unwrap();
        assert_eq!(form.field("content"), Some(""));
        assert_eq!(form.files.len(), 1);
        assert_eq!(form.files[0].content_type, "image/gif");
    }

    #[test]
    fn blank_title_is_dropped() {
        let form = PostDraft::new("hello").title("  ").into_form().unwrap();
        assert_eq!(form.field("title"), None);
        let form = PostDraft::new("hello").title(" Trip ").into_form().unwrap();
        assert_eq!(form.field("title"), Some("Trip"));
    }
}
