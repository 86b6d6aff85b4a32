//! Document model for debug menu files.
//!
//! A [`Document`] owns an ordered list of [`Category`] values, each owning an
//! ordered list of [`Entry`] values. Categories and entries carry stable ids
//! ([`CategoryId`], [`EntryId`]) so that selection state can refer to them
//! without borrowing.

mod category;
mod document;
mod entry;
mod error;
mod ids;

pub use category::Category;
pub use document::{Document, UNTITLED};
pub use entry::Entry;
pub use error::{ModelError, Result};
pub use ids::{CategoryId, EntryId};
