//! Session error types.
//!
//! Two classes of error exist. Invalid-operation errors mean a command was
//! issued whose precondition does not hold; a front-end that honours the
//! `can_*` predicates never sees them. Load/save errors wrap the codec or
//! file-system failure; the loaded document is left untouched when they occur.

use std::path::PathBuf;

use dme_format::FormatError;
use dme_model::{CategoryId, EntryId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no document is loaded")]
    NoDocumentLoaded,

    #[error("no category is selected")]
    NoCategorySelected,

    #[error("no entries are selected")]
    NoEntriesSelected,

    #[error("exactly one entry must be selected, found {count}")]
    NoSingleEntrySelected { count: usize },

    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("category index {index} is out of range (document has {len} categories)")]
    CategoryIndexOutOfRange { index: usize, len: usize },

    #[error("entry is not in the visible list: {0}")]
    EntryNotVisible(EntryId),

    #[error("path has no usable file name: {0}")]
    InvalidPath(PathBuf),

    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("failed to save {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("the session has been terminated")]
    Terminated,
}

impl SessionError {
    /// True for precondition violations, as opposed to I/O failures.
    pub fn is_invalid_operation(&self) -> bool {
        !matches!(self, Self::Load { .. } | Self::Save { .. })
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Load { source, .. } | Self::Save { source, .. } => source.user_message(),
            other => other.to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Load { source, .. } | Self::Save { source, .. } => source.suggestion(),
            Self::NoDocumentLoaded => Some("Create or open a menu file first.".into()),
            Self::NoCategorySelected => Some("Select a category first.".into()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
