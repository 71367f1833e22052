//! TaskFlow REST API client
//!
//! ## Endpoints
//!
//! - `GET /tasks` - List tasks
//! - `POST /tasks` - Create a task
//! - `PUT /tasks/{id}` - Replace a task
//! - `DELETE /tasks/{id}` - Delete a task
//! - `POST /auth/login` - Log in
//! - `POST /auth/register` - Create an account
//! - `GET /auth/profile` - Current profile
//! - `PUT /auth/profile` - Change the full name
//!
//! Views depend on the [`TaskApi`] trait rather than on [`ApiClient`]
//! directly.

mod dto;
mod error;
mod http;

pub use dto::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest};
pub use error::ClientError;
pub use http::{ApiClient, REQUEST_ID_HEADER};

use async_trait::async_trait;

use crate::session::UserProfile;
use crate::tasks::{Task, TaskDraft, TaskId};

/// Operations the client needs from the remote API
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ClientError>;

    /// Full-object replace
    async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> Result<(), ClientError>;

    async fn delete_task(&self, id: TaskId) -> Result<(), ClientError>;

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError>;

    async fn get_profile(&self) -> Result<UserProfile, ClientError>;

    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, ClientError>;
}
