//! Editor session controller for debug menu documents.
//!
//! A [`Session`] holds at most one open [`Document`](dme_model::Document) and
//! keeps the pieces that depend on it consistent:
//!
//! - Category selection and the search filter are mutually exclusive; the
//!   [`ViewMode`] is one or the other, or neither.
//! - Selected entries are always visible in the current view. Anything that
//!   changes the view drops selected entries that left it.
//! - When a document is created or opened its first category is selected.
//! - With no document loaded nothing is selected.
//!
//! File dialogs, the "save changes?" prompt and the byte format sit behind
//! the traits in [`boundary`], so a session runs the same under a GUI, a
//! terminal or a test.
//!
//! # Example
//!
//! ```
//! use dme_session::{FixedAnswer, NoPicker, SaveDecision, Session};
//!
//! let mut session = Session::new(NoPicker, FixedAnswer(SaveDecision::DontSave));
//! session.new_document().unwrap();
//! session.add_category_named("Sea").unwrap();
//! let entry = session.add_entry().unwrap();
//! assert_eq!(session.selected_entries(), &[entry]);
//! ```

pub mod boundary;
mod config;
mod dirty;
mod error;
mod notify;
mod selection;
mod session;
pub mod status;
pub mod view;

pub use boundary::{
    BinaryCodec, Confirmer, DocumentCodec, FilePicker, FixedAnswer, NoPicker, SaveDecision,
};
pub use config::{ConfirmPolicy, FilterOptions, SessionConfig};
pub use error::{Result, SessionError};
pub use notify::{Notifier, Property};
pub use selection::Selection;
pub use session::{Outcome, Session};
pub use status::APP_NAME;
pub use view::ViewMode;
