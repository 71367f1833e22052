//! Screens of the client
//!
//! Each view owns a [`TaskApi`](crate::client::TaskApi) handle and its own
//! in-memory state. Nothing is shared between views: the task list is
//! fetched when a view loads and re-fetched in full after every successful
//! mutation.
//!
//! Any operation may fail with [`ViewError`]; [`ViewError::redirect`] tells
//! the shell when it has to switch to the login screen.

mod analytics;
mod auth;
mod board;
mod dashboard;
mod list;
mod navigation;
mod settings;

#[cfg(test)]
pub(crate) mod testing;

pub use analytics::AnalyticsView;
pub use auth::AuthView;
pub use board::TaskBoard;
pub use dashboard::{DashboardView, RECENT_LIMIT};
pub use navigation::{guard, Navigation, DEFAULT_GREETING};
pub use settings::SettingsView;

use std::str::FromStr;
use thiserror::Error;

use crate::client::ClientError;
use crate::session::StorageError;
use crate::tasks::{ExportError, ParseEnumError, TaskId};
use crate::validation::ValidationError;

/// A screen of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
    Tasks,
    Analytics,
    Settings,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[
            Route::Login,
            Route::Signup,
            Route::Dashboard,
            Route::Tasks,
            Route::Analytics,
            Route::Settings,
        ]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
            Route::Tasks => "/tasks",
            Route::Analytics => "/analytics",
            Route::Settings => "/settings",
        }
    }

    /// Login and signup are the only screens open to anonymous users
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('/').to_lowercase();
        Route::all()
            .iter()
            .copied()
            .find(|route| route.path()[1..] == name)
            .ok_or_else(|| ParseEnumError::new("route", s))
    }
}

/// Errors surfaced by view operations
#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Task {0} not found")]
    TaskNotFound(TaskId),
}

impl ViewError {
    /// Route the shell must switch to, if the failure ended the session
    pub fn redirect(&self) -> Option<Route> {
        match self {
            ViewError::Client(err) if err.requires_login() => Some(Route::Login),
            _ => None,
        }
    }
}
