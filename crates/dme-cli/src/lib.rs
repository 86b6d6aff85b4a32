//! Command-line front-end for debug menu files.
//!
//! One-shot commands (`show`, `search`, `new`) live in [`commands`]; the
//! interactive editor built on [`dme_session::Session`] lives in [`shell`].

pub mod commands;
pub mod logging;
pub mod render;
pub mod settings;
pub mod shell;
