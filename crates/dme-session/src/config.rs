//! Session configuration.

use serde::{Deserialize, Serialize};

/// When the confirm-save prompt is offered before a document is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmPolicy {
    /// Prompt whenever a document is loaded, edited or not.
    #[default]
    Always,
    /// Prompt only when the document has changed since it was loaded or saved.
    WhenModified,
}

impl ConfirmPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Always => "Always",
            Self::WhenModified => "When modified",
        }
    }
}

/// Search filter matching options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Match letter case exactly. Off by default.
    pub case_sensitive: bool,
}

/// Session-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub confirm: ConfirmPolicy,
    pub filter: FilterOptions,
    /// Extension appended by Save As when the chosen path has none.
    pub default_extension: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            confirm: ConfirmPolicy::default(),
            filter: FilterOptions::default(),
            default_extension: "dat".to_string(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_confirm(mut self, confirm: ConfirmPolicy) -> Self {
        self.confirm = confirm;
        self
    }

    #[must_use]
    pub fn with_case_sensitive_filter(mut self, enable: bool) -> Self {
        self.filter.case_sensitive = enable;
        self
    }

    #[must_use]
    pub fn with_default_extension(mut self, extension: impl Into<String>) -> Self {
        self.default_extension = extension.into();
        self
    }
}
