//! UI preferences: color theme and locale

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use super::error::StorageResult;
use super::storage::Storage;
use super::{KEY_COLOR_THEME, KEY_LEGACY_THEME, KEY_LOCALE};
use crate::tasks::ParseEnumError;

/// Color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    ProDark,
    ProLight,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::ProDark => "pro-dark",
            Theme::ProLight => "pro-light",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::ProDark)
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::ProDark => Theme::ProLight,
            Theme::ProLight => Theme::ProDark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pro-dark" | "dark" => Ok(Theme::ProDark),
            "pro-light" | "light" => Ok(Theme::ProLight),
            _ => Err(ParseEnumError::new("theme", s)),
        }
    }
}

/// Supported interface languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Hi,
    Mr,
}

impl Locale {
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Hi, Locale::Mr]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Hi => "hi",
            Locale::Mr => "mr",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Hi => "हिन्दी",
            Locale::Mr => "मराठी",
        }
    }

    /// Resolve a stored or detected language tag, falling back to English
    pub fn resolve(tag: &str) -> Locale {
        tag.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ParseEnumError;

    /// Accepts bare codes and region-qualified tags (`hi-IN`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base = s.trim().split(['-', '_']).next().unwrap_or("").to_lowercase();
        match base.as_str() {
            "en" => Ok(Locale::En),
            "hi" => Ok(Locale::Hi),
            "mr" => Ok(Locale::Mr),
            _ => Err(ParseEnumError::new("locale", s)),
        }
    }
}

/// Theme and locale persisted in local storage
#[derive(Clone)]
pub struct Preferences {
    storage: Arc<dyn Storage>,
}

impl Preferences {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Saved theme; `colorTheme` wins over the legacy `theme` key
    pub fn theme(&self) -> Theme {
        self.storage
            .get_item(KEY_COLOR_THEME)
            .or_else(|| self.storage.get_item(KEY_LEGACY_THEME))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> StorageResult<()> {
        self.storage.set_item(KEY_COLOR_THEME, theme.as_str())?;
        tracing::debug!(theme = %theme, "Theme saved");
        Ok(())
    }

    /// Flip between dark and light and persist the result
    pub fn toggle_theme(&self) -> StorageResult<Theme> {
        let theme = self.theme().toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    pub fn locale(&self) -> Locale {
        self.storage
            .get_item(KEY_LOCALE)
            .map(|tag| Locale::resolve(&tag))
            .unwrap_or_default()
    }

    pub fn set_locale(&self, locale: Locale) -> StorageResult<()> {
        self.storage.set_item(KEY_LOCALE, locale.code())?;
        tracing::debug!(locale = %locale, "Locale saved");
        Ok(())
    }
}
