//! Error types for menu file operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing menu files.
#[derive(Debug, Error)]
pub enum FormatError {
    /// File-level I/O failure with the path involved.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure on an anonymous stream.
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// The data does not start with the menu magic bytes.
    #[error("not a debug menu file (invalid magic bytes)")]
    InvalidMagic,

    /// The file was written by a newer format revision.
    #[error("menu file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion { found: u16, max_supported: u16 },

    /// The data ended in the middle of a record.
    #[error("unexpected end of data while reading {context}")]
    Truncated { context: &'static str },

    /// A string field holds bytes that are not UTF-8.
    #[error("{context} is not valid UTF-8")]
    InvalidUtf8 { context: &'static str },

    /// A string field does not fit its length prefix.
    #[error("{context} is {len} bytes long (maximum {max})")]
    TooLong {
        context: &'static str,
        len: usize,
        max: usize,
    },

    /// A list does not fit its count prefix.
    #[error("too many {context}: {count} (maximum {max})")]
    TooMany {
        context: &'static str,
        count: usize,
        max: usize,
    },

    /// Bytes remain after the last category.
    #[error("{count} unexpected trailing bytes after the last category")]
    TrailingBytes { count: usize },

    /// The temp file was written but could not replace the target.
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FormatError {
    /// Wrap a file-system error with the operation and path involved.
    pub fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by malformed content rather than the file system.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic
                | Self::UnsupportedVersion { .. }
                | Self::Truncated { .. }
                | Self::InvalidUtf8 { .. }
                | Self::TrailingBytes { .. }
        )
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the file at {}", operation, path.display()),
            Self::Stream(source) => format!("Could not read or write the menu data: {source}"),
            Self::InvalidMagic => "The file is not a debug menu file.".to_string(),
            Self::UnsupportedVersion {
                found,
                max_supported,
            } => format!(
                "This menu file uses format version {found}, but only versions up to \
                 {max_supported} are supported."
            ),
            Self::Truncated { .. } | Self::InvalidUtf8 { .. } | Self::TrailingBytes { .. } => {
                format!("The menu file is corrupted: {self}")
            }
            Self::TooLong { .. } | Self::TooMany { .. } => {
                format!("The menu cannot be saved: {self}")
            }
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save the file to {}. Please check disk space and permissions.",
                target_path.display()
            ),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" || *operation == "open" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidMagic => Some("Make sure you selected a .dat debug menu file.".into()),
            Self::TooLong { .. } => Some("Shorten the offending name and save again.".into()),
            Self::TooMany { .. } => Some("Split the menu into smaller categories.".into()),
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
            _ => None,
        }
    }
}

/// Result type alias for menu format operations.
pub type Result<T> = std::result::Result<T, FormatError>;
