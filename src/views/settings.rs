//! Profile, appearance, language and data export

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::ViewError;
use crate::client::{TaskApi, UpdateProfileRequest};
use crate::session::{Locale, Preferences, SessionStore, Theme, UserProfile};
use crate::tasks::export::write_export;
use crate::tasks::{default_export_filename, ExportFormat};
use crate::validation::require;

pub struct SettingsView {
    api: Arc<dyn TaskApi>,
    session: SessionStore,
    preferences: Preferences,
}

impl SettingsView {
    pub fn new(api: Arc<dyn TaskApi>, session: SessionStore) -> Self {
        let preferences = Preferences::new(Arc::clone(session.storage()));
        Self {
            api,
            session,
            preferences,
        }
    }

    /// Profile form contents, read from the cached user
    pub fn profile(&self) -> UserProfile {
        self.session.user().unwrap_or_default()
    }

    /// Change the display name and merge the result into the cached user.
    ///
    /// Empty fields in the response fall back to the submitted name and the
    /// cached email.
    pub async fn save_profile(&self, full_name: &str) -> Result<UserProfile, ViewError> {
        require("Full name", full_name)?;
        let full_name = full_name.trim();

        let response = self
            .api
            .update_profile(&UpdateProfileRequest {
                full_name: full_name.to_string(),
            })
            .await?;

        let name = if response.full_name.is_empty() {
            full_name
        } else {
            response.full_name.as_str()
        };
        let email = if response.email.is_empty() {
            self.profile().email
        } else {
            response.email.clone()
        };

        let user = self.session.update_profile(name, &email)?;
        tracing::info!(email = %user.email, "Profile updated");
        Ok(user)
    }

    pub fn theme(&self) -> Theme {
        self.preferences.theme()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), ViewError> {
        Ok(self.preferences.set_theme(theme)?)
    }

    pub fn toggle_theme(&self) -> Result<Theme, ViewError> {
        Ok(self.preferences.toggle_theme()?)
    }

    pub fn locale(&self) -> Locale {
        self.preferences.locale()
    }

    pub fn set_locale(&self, locale: Locale) -> Result<(), ViewError> {
        Ok(self.preferences.set_locale(locale)?)
    }

    /// Fetch the current task list and write it to `target`.
    ///
    /// When `target` is an existing directory the file is named after
    /// `today`. Returns the written path.
    pub async fn export(
        &self,
        format: ExportFormat,
        target: &Path,
        today: NaiveDate,
    ) -> Result<PathBuf, ViewError> {
        let tasks = self.api.list_tasks().await?;

        let path = if target.is_dir() {
            target.join(default_export_filename(format, today))
        } else {
            target.to_path_buf()
        };

        write_export(format, &tasks, &path)?;
        Ok(path)
    }
}
