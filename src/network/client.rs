//! Typed API client - one method per backend endpoint

use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};
use crate::models::{Content, DryRunOutcome, Model, UserData, UserSettings};
use crate::network::transport::{ApiRequest, RawResponse, Transport};

/// Typed calls against the backend, over any [`Transport`]
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        ApiClient { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        tracing::info!(method = request.method.as_str(), path = %request.path, "Sending request");
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "Response received");
        Ok(response)
    }

    /// GET and decode, turning a non-2xx status into [`StoreError::Status`]
    async fn get_json<D: DeserializeOwned>(&self, path: String, context: &'static str) -> Result<D> {
        let response = self.send(ApiRequest::get(path)).await?;
        if !response.is_success() {
            return Err(StoreError::Status {
                status: response.status,
                context,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// `GET /content/{lang}`
    pub async fn fetch_content(&self, lang: &str) -> Result<Content> {
        self.get_json(format!("/content/{}", lang), "Network response was not ok")
            .await
    }

    /// `GET /models`
    pub async fn fetch_models(&self) -> Result<Vec<Model>> {
        self.get_json("/models".to_string(), "Network response was not ok")
            .await
    }

    /// `GET /user/{id}`
    pub async fn fetch_user_data(&self, id: i64) -> Result<UserData> {
        self.get_json(format!("/user/{}", id), "HTTP error").await
    }

    /// `POST /user/{id}/settings`
    pub async fn save_settings(&self, settings: &UserSettings, id: i64) -> Result<()> {
        let body = serde_json::to_value(settings)?;
        let response = self
            .send(ApiRequest::post(format!("/user/{}/settings", id), Some(body)))
            .await?;
        if !response.is_success() {
            return Err(StoreError::SaveFailed {
                status: response.status,
            });
        }
        Ok(())
    }

    /// `POST /user/{id}/reset`
    pub async fn reset(&self, id: i64) -> Result<()> {
        let response = self
            .send(ApiRequest::post(format!("/user/{}/reset", id), None))
            .await?;
        if !response.is_success() {
            return Err(StoreError::ResetFailed {
                status: response.status,
            });
        }
        Ok(())
    }

    /// `POST /dry_run`.
    ///
    /// The body is decoded whatever the status is; callers decide what a
    /// non-2xx outcome means.
    pub async fn dry_run(&self, settings: &UserSettings) -> Result<DryRunOutcome> {
        let body = serde_json::to_value(settings)?;
        let response = self
            .send(ApiRequest::post("/dry_run", Some(body)))
            .await?;
        let data: serde_json::Value = serde_json::from_str(&response.body)?;
        Ok(DryRunOutcome {
            status: response.status,
            kudos: data.get("kudos").and_then(|k| k.as_f64()),
        })
    }
}
