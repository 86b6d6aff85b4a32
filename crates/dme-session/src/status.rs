//! Status line and window title text.

use dme_model::Document;

pub const APP_NAME: &str = "Debug Menu Editor";

/// `"<name> - Debug Menu Editor"`, or just the application name.
pub fn window_title(document: Option<&Document>) -> String {
    match document {
        Some(doc) => format!("{} - {APP_NAME}", doc.display_name()),
        None => APP_NAME.to_string(),
    }
}

pub(crate) fn created(name: &str) -> String {
    format!("Created {name}")
}

pub(crate) fn loading(file: &str) -> String {
    format!("Loading {file}...")
}

pub(crate) fn loaded(file: &str) -> String {
    format!("Loaded {file}")
}

pub(crate) fn load_failed(error: &dyn std::fmt::Display) -> String {
    format!("Exception while loading: {error}")
}

pub(crate) fn saving(file: &str) -> String {
    format!("Saving file {file}...")
}

pub(crate) fn saved(file: &str) -> String {
    format!("Saved file {file}")
}

pub(crate) fn save_failed(error: &dyn std::fmt::Display) -> String {
    format!("Exception while saving: {error}")
}

pub(crate) fn unloaded(name: &str) -> String {
    format!("Unloaded {name}")
}
