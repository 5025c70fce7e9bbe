use serde_json::json;

use super::{ApiClient, ApiRequest, MultipartForm, Transport, segment, unwrap_payload};
use crate::errors::{ClientError, ValidationError};
use crate::models::Album;
use crate::upload::{UploadFile, media_parts};

const ALBUM_KEYS: &[&str] = &["album"];
const ALBUMS_KEYS: &[&str] = &["albums"];

/// Handle for `/albums` routes. Mirrors the post routes that albums support.
pub struct AlbumsHandle<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AlbumsHandle<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Album>, ClientError> {
        let value = self.client.fetch(ApiRequest::get("/albums")).await?;
        unwrap_payload(value, ALBUMS_KEYS)
    }

    pub async fn get(&self, album_id: &str) -> Result<Album, ClientError> {
        let path = format!("/albums/{}", segment(album_id)?);
        let value = self.client.fetch(ApiRequest::get(path)).await?;
        unwrap_payload(value, ALBUM_KEYS)
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        media: Vec<UploadFile>,
    ) -> Result<Album, ClientError> {
        if name.trim().is_empty() {
            return Err(ValidationError::single("name", "required", "Album name is required").into());
        }
        if media.is_empty() {
            return Err(ValidationError::single("media", "required", "Add at least one photo or video").into());
        }
        let parts = media_parts("media", media)?;
        let mut form = MultipartForm::new().text("name", name.trim());
        if let Some(description) = description {
            form = form.text("description", description);
        }
        let form = parts.into_iter().fold(form, MultipartForm::file);
        let value = self.client.mutate(ApiRequest::post("/albums").multipart(form)).await?;
        unwrap_payload(value, ALBUM_KEYS)
    }

    pub async fn delete(&self, album_id: &str) -> Result<(), ClientError> {
        let path = format!("/albums/{}", segment(album_id)?);
        self.client.mutate(ApiRequest::delete(path)).await?;
        Ok(())
    }

    pub async fn like(&self, album_id: &str) -> Result<Album, ClientError> {
        self.action(album_id, "like", None).await
    }

    pub async fn save(&self, album_id: &str) -> Result<Album, ClientError> {
        self.action(album_id, "save", None).await
    }

    pub async fn comment(&self, album_id: &str, content: &str) -> Result<Album, ClientError> {
        self.action(album_id, "comment", Some(json!({ "content": content }))).await
    }

    pub async fn share(&self, album_id: &str, message: Option<&str>) -> Result<Album, ClientError> {
        self.action(album_id, "share", Some(json!({ "message": message }))).await
    }

    async fn action(&self, album_id: &str, action: &str, body: Option<serde_json::Value>) -> Result<Album, ClientError> {
        let path = format!("/albums/{}/{action}", segment(album_id)?);
        let mut request = ApiRequest::post(path);
        if let Some(body) = body {
            request = request.json(body);
        }
        let value = self.client.mutate(request).await?;
        unwrap_payload(value, ALBUM_KEYS)
    }
}
