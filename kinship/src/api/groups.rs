use super::{ApiClient, ApiRequest, Transport, segment, unwrap_payload};
use crate::errors::ClientError;
use crate::models::{Group, GroupCategory, GroupDraft, GroupPrivacy};
use crate::validators::validate_group_draft;

const GROUP_KEYS: &[&str] = &["group"];
const GROUPS_KEYS: &[&str] = &["groups"];
const CATEGORIES_KEYS: &[&str] = &["categories"];

/// Server-side filters for `GET /groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub privacy: Option<GroupPrivacy>,
}

impl GroupQuery {
    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|text| !text.is_empty()) {
            request = request.query("search", search);
        }
        if let Some(category) = self.category.as_deref().filter(|text| !text.is_empty()) {
            request = request.query("category", category);
        }
        if let Some(privacy) = self.privacy {
            request = request.query("privacy", privacy.as_str());
        }
        request
    }
}

/// Handle for `/groups` routes.
pub struct GroupsHandle<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> GroupsHandle<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &GroupQuery) -> Result<Vec<Group>, ClientError> {
        let request = query.apply(ApiRequest::get("/groups"));
        let value = self.client.fetch(request).await?;
        unwrap_payload(value, GROUPS_KEYS)
    }

    pub async fn create(&self, draft: &GroupDraft) -> Result<Group, ClientError> {
        validate_group_draft(draft)?;
        let body = serde_json::to_value(draft).map_err(|err| ClientError::Encode(err.to_string()))?;
        let value = self.client.mutate(ApiRequest::post("/groups").json(body)).await?;
        unwrap_payload(value, GROUP_KEYS)
    }

    pub async fn update(&self, group_id: &str, draft: &GroupDraft) -> Result<Group, ClientError> {
        validate_group_draft(draft)?;
        let path = format!("/groups/{}", segment(group_id)?);
        let body = serde_json::to_value(draft).map_err(|err| ClientError::Encode(err.to_string()))?;
        let value = self.client.mutate(ApiRequest::put(path).json(body)).await?;
        unwrap_payload(value, GROUP_KEYS)
    }

    pub async fn delete(&self, group_id: &str) -> Result<(), ClientError> {
        let path = format!("/groups/{}", segment(group_id)?);
        self.client.mutate(ApiRequest::delete(path)).await?;
        Ok(())
    }

    pub async fn join(&self, group_id: &str) -> Result<Group, ClientError> {
        let path = format!("/groups/{}/join", segment(group_id)?);
        let value = self.client.mutate(ApiRequest::post(path)).await?;
        unwrap_payload(value, GROUP_KEYS)
    }

    pub async fn leave(&self, group_id: &str) -> Result<Group, ClientError> {
        let path = format!("/groups/{}/leave", segment(group_id)?);
        let value = self.client.mutate(ApiRequest::post(path)).await?;
        unwrap_payload(value, GROUP_KEYS)
    }

    /// `GET /categories/groups`.
    pub async fn categories(&self) -> Result<Vec<GroupCategory>, ClientError> {
        let value = self.client.fetch(ApiRequest::get("/categories/groups")).await?;
        unwrap_payload(value, CATEGORIES_KEYS)
    }
}
