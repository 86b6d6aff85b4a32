//! Persisted user settings.
//!
//! Stored as TOML in the platform config directory and loaded at startup.
//! A missing or unreadable file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dme_session::SessionConfig;
use serde::{Deserialize, Serialize};

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Behaviour of the editing session (confirm policy, filter, extension).
    pub session: SessionConfig,

    /// Recently opened or saved menu files.
    pub recent: RecentFiles,
}

impl Settings {
    /// Load settings from a specific path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|error| {
                tracing::warn!(path = %path.display(), %error, "ignoring invalid settings file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, content)
            .with_context(|| format!("failed to write settings to {}", path.display()))
    }

    /// The default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "DebugMenuEditor", "DebugMenuEditor")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }
}

/// Most-recently-used menu files, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentFiles {
    pub files: Vec<PathBuf>,

    /// Maximum number of files to remember.
    pub max_recent: usize,
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            max_recent: 10,
        }
    }
}

impl RecentFiles {
    /// Move `path` to the front, adding it if new, and trim to `max_recent`.
    pub fn add(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.files.retain(|p| p != &path);
        self.files.insert(0, path);
        self.files.truncate(self.max_recent);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
