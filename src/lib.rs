//! # TaskFlow
//!
//! Client for the TaskFlow task-management REST API: authentication, a
//! dashboard, task CRUD, an analytics report and settings, with the session
//! and preferences cached on local disk.
//!
//! ## Modules
//!
//! - [`tasks`]: task records, filtering, statistics and export
//! - [`client`]: HTTP client for the REST API
//! - [`session`]: cached credential, user profile, theme and locale
//! - [`validation`]: form checks run before anything is sent
//! - [`views`]: the screens, built on top of the modules above
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskflow::client::ApiClient;
//! use taskflow::config::Config;
//! use taskflow::session::{FileStorage, SessionStore};
//! use taskflow::tasks::DashboardFilter;
//! use taskflow::views::DashboardView;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let storage = Arc::new(FileStorage::open(config.storage.storage_path())?);
//!     let session = SessionStore::new(storage);
//!     let api = Arc::new(ApiClient::new(&config.api, session)?);
//!
//!     let mut dashboard = DashboardView::new(api);
//!     dashboard.load().await?;
//!
//!     let now = chrono::Utc::now();
//!     for task in dashboard.recent(DashboardFilter::All, now) {
//!         println!("{} [{}] {}", task.id, task.status, task.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod session;
pub mod tasks;
pub mod validation;
pub mod views;

// Re-export top-level types for convenience
pub use client::{ApiClient, ClientError, TaskApi};

pub use config::{Config, ConfigError};

pub use session::{
    FileStorage, Locale, MemoryStorage, Preferences, Session, SessionStore, Storage,
    StorageError, Theme, UserProfile,
};

pub use tasks::{
    AnalyticsReport, DashboardFilter, DashboardStats, ExportFormat, Priority, Status, Task,
    TaskDraft, TaskFilter, TaskId,
};

pub use views::{Route, ViewError};
