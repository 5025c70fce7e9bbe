use super::{ApiClient, ApiRequest, Transport, segment, unwrap_payload};
use crate::errors::ClientError;
use crate::models::{Job, JobDraft};
use crate::validators::validate_job_draft;

/// Handle for `/jobs` routes.
pub struct JobsHandle<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> JobsHandle<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Job>, ClientError> {
        let value = self.client.fetch(ApiRequest::get("/jobs")).await?;
        unwrap_payload(value, &["jobs"])
    }

    pub async fn create(&self, draft: &JobDraft) -> Result<Job, ClientError> {
        validate_job_draft(draft)?;
        let body = serde_json::to_value(draft).map_err(|err| ClientError::Encode(err.to_string()))?;
        let value = self.client.mutate(ApiRequest::post("/jobs").json(body)).await?;
        unwrap_payload(value, &["job"])
    }

    pub async fn update(&self, job_id: &str, draft: &JobDraft) -> Result<Job, ClientError> {
        validate_job_draft(draft)?;
        let path = format!("/jobs/{}", segment(job_id)?);
        let body = serde_json::to_value(draft).map_err(|err| ClientError::Encode(err.to_string()))?;
        let value = self.client.mutate(ApiRequest::put(path).json(body)).await?;
        unwrap_payload(value, &["job"])
    }
}
