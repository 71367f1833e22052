//! HTTP implementation of [`TaskApi`]
//!
//! Every request carries the cached bearer token (when there is one) and a
//! fresh request id. A 401 from any endpoint wipes the cached session.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use super::dto::{
    AuthResponse, LoginRequest, ProfileEnvelope, RegisterRequest, UpdateProfileRequest,
};
use super::error::{error_message, ClientError};
use super::TaskApi;
use crate::config::ApiConfig;
use crate::session::{SessionStore, UserProfile};
use crate::tasks::{Task, TaskDraft, TaskId};

/// Header used to correlate client and server logs
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// TaskFlow REST API client
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client for `config.base_url` that authenticates from `session`
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());

        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and map non-success statuses to errors
    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "Request to TaskFlow API failed");
            ClientError::from_transport(e)
        })?;

        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "API response");

        if status == StatusCode::UNAUTHORIZED {
            match self.session.clear() {
                Ok(()) => tracing::warn!("API answered 401, cached session cleared"),
                Err(e) => tracing::error!(error = %e, "API answered 401, failed to clear session"),
            }
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("request failed");
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body, fallback);
            tracing::warn!(status = status.as_u16(), %message, "API request rejected");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn send_json<T>(&self, request: RequestBuilder) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::POST, path).json(body)).await
    }
}

#[async_trait]
impl TaskApi for ApiClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let tasks: Vec<Task> = self.send_json(self.request(Method::GET, "/tasks")).await?;
        tracing::debug!(count = tasks.len(), "Fetched tasks");
        Ok(tasks)
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ClientError> {
        let task: Task = self.post_json("/tasks", draft).await?;
        tracing::info!(id = task.id, title = %task.title, "Task created");
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> Result<(), ClientError> {
        let path = format!("/tasks/{}", id);
        self.send(self.request(Method::PUT, &path).json(draft)).await?;
        tracing::info!(id, status = %draft.status, "Task updated");
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), ClientError> {
        let path = format!("/tasks/{}", id);
        self.send(self.request(Method::DELETE, &path)).await?;
        tracing::info!(id, "Task deleted");
        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        self.post_json("/auth/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        self.post_json("/auth/register", request).await
    }

    async fn get_profile(&self) -> Result<UserProfile, ClientError> {
        let envelope: ProfileEnvelope = self
            .send_json(self.request(Method::GET, "/auth/profile"))
            .await?;
        Ok(envelope.user)
    }

    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, ClientError> {
        let envelope: ProfileEnvelope = self
            .send_json(self.request(Method::PUT, "/auth/profile").json(request))
            .await?;
        Ok(envelope.user)
    }
}
