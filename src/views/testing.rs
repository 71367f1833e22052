//! In-memory `TaskApi` used by the view tests

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::client::{
    AuthResponse, ClientError, LoginRequest, RegisterRequest, TaskApi, UpdateProfileRequest,
};
use crate::session::{MemoryStorage, SessionStore, Storage, UserProfile};
use crate::tasks::{Task, TaskDraft, TaskId};

pub const FAKE_TOKEN: &str = "fake-jwt";
pub const WRONG_PASSWORD: &str = "Wrong1!pass";

#[derive(Default)]
pub struct FakeApi {
    tasks: Mutex<Vec<Task>>,
    profile: Mutex<UserProfile>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    profile_calls: AtomicUsize,
    expired: AtomicBool,
}

impl FakeApi {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Default::default()
        }
    }

    pub fn with_profile(self, profile: UserProfile) -> Self {
        *self.profile.lock().unwrap() = profile;
        self
    }

    pub fn task(id: TaskId, title: &str) -> Task {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        Task {
            id,
            title: title.to_string(),
            description: None,
            priority: Default::default(),
            status: Default::default(),
            due_date: None,
            created_at,
            updated_at: Some(created_at),
            user_id: Some(1),
        }
    }

    /// Every following call answers 401
    pub fn expire_session(&self) {
        self.expired.store(true, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ClientError> {
        if self.expired.load(Ordering::SeqCst) {
            Err(ClientError::Unauthorized)
        } else {
            Ok(())
        }
    }

    fn auth_response(email: &str, full_name: &str) -> AuthResponse {
        AuthResponse {
            access_token: FAKE_TOKEN.to_string(),
            token_type: Some("bearer".to_string()),
            user: UserProfile {
                id: Some(1),
                email: email.to_string(),
                full_name: full_name.to_string(),
            },
        }
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.check()?;
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored())
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ClientError> {
        self.check()?;
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        let mut tasks = self.tasks.lock().unwrap();
        let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        let task = Task {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            priority: draft.priority,
            status: draft.status,
            due_date: draft.due_date,
            created_at: now,
            updated_at: Some(now),
            user_id: Some(1),
        };
        tasks.insert(0, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> Result<(), ClientError> {
        self.check()?;
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ClientError::Api {
                status: 404,
                message: "Task not found".to_string(),
            })?;

        task.title = draft.title.clone();
        task.description = draft.description.clone();
        task.priority = draft.priority;
        task.status = draft.status;
        task.due_date = draft.due_date;
        task.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), ClientError> {
        self.check()?;
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(ClientError::Api {
                status: 404,
                message: "Task not found".to_string(),
            });
        }
        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        if request.password == WRONG_PASSWORD {
            return Err(ClientError::Api {
                status: 400,
                message: "Incorrect email or password".to_string(),
            });
        }
        let name = self.profile.lock().unwrap().full_name.clone();
        Ok(Self::auth_response(&request.email, &name))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        Ok(Self::auth_response(&request.email, &request.full_name))
    }

    async fn get_profile(&self) -> Result<UserProfile, ClientError> {
        self.check()?;
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, ClientError> {
        self.check()?;
        let mut profile = self.profile.lock().unwrap();
        profile.full_name = request.full_name.clone();
        Ok(profile.clone())
    }
}

/// Fresh in-memory storage plus a session store over it
pub fn memory_session() -> (Arc<dyn Storage>, SessionStore) {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let session = SessionStore::new(Arc::clone(&storage));
    (storage, session)
}
