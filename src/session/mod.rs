//! Client-side session and preferences
//!
//! Everything the client remembers between runs lives in a single
//! key/value [`Storage`]:
//!
//! | Key | Value |
//! |---|---|
//! | `token` | bearer credential |
//! | `user` | JSON-serialized [`UserProfile`] |
//! | `colorTheme` (legacy `theme`) | [`Theme`] |
//! | `i18nextLng` | [`Locale`] code |
//!
//! The session has no expiry of its own; it is dropped when the server
//! answers 401 or the user logs out.

mod error;
mod preferences;
mod storage;

pub use error::{StorageError, StorageResult};
pub use preferences::{Locale, Preferences, Theme};
pub use storage::{FileStorage, MemoryStorage, Storage, STORAGE_FILE};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const KEY_TOKEN: &str = "token";
pub const KEY_USER: &str = "user";
pub const KEY_COLOR_THEME: &str = "colorTheme";
pub const KEY_LEGACY_THEME: &str = "theme";
pub const KEY_LOCALE: &str = "i18nextLng";

/// Denormalized profile of the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "full_name")]
    pub full_name: String,
}

impl UserProfile {
    /// First word of the full name, if any
    pub fn first_name(&self) -> Option<&str> {
        self.full_name.split_whitespace().next()
    }
}

/// Cached credential plus profile
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Reads and writes the cached session
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Underlying storage
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn token(&self) -> Option<String> {
        self.storage
            .get_item(KEY_TOKEN)
            .filter(|token| !token.is_empty())
    }

    /// Cached profile; unreadable JSON counts as absent
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.storage.get_item(KEY_USER)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable cached user");
                None
            }
        }
    }

    /// Authenticated means a token is present
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn load(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            user: self.user().unwrap_or_default(),
        })
    }

    pub fn save(&self, session: &Session) -> StorageResult<()> {
        self.storage.set_item(KEY_TOKEN, &session.token)?;
        self.storage
            .set_item(KEY_USER, &serde_json::to_string(&session.user)?)?;
        tracing::info!(email = %session.user.email, "Session stored");
        Ok(())
    }

    /// Drop token and user; preferences are kept
    pub fn clear(&self) -> StorageResult<()> {
        self.storage.remove_item(KEY_TOKEN)?;
        self.storage.remove_item(KEY_USER)?;
        Ok(())
    }

    /// Merge new profile fields into the cached user
    pub fn update_profile(&self, full_name: &str, email: &str) -> StorageResult<UserProfile> {
        let mut user = self.user().unwrap_or_default();
        user.full_name = full_name.to_string();
        user.email = email.to_string();
        self.storage.set_item(KEY_USER, &serde_json::to_string(&user)?)?;
        Ok(user)
    }
}
