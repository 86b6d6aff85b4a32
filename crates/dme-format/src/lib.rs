//! Binary reader and writer for debug menu files.
//!
//! # File Format
//!
//! Menu files are big-endian throughout:
//!
//! ```text
//! +--------------------+
//! | Magic: "DMNU"      | 4 bytes
//! +--------------------+
//! | Version: 1         | u16
//! +--------------------+
//! | Category count     | u16
//! +--------------------+
//! | Categories...      | name (u16 len + UTF-8), entry count (u16),
//! |                    | entries: display name, map name (u16 len + UTF-8),
//! |                    |          room, spawn, layer (u8 each)
//! +--------------------+
//! ```
//!
//! Category and entry ids are not stored; decoding always produces fresh ids.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use dme_format::{read_menu, write_menu};
//!
//! let document = read_menu(Path::new("Menu1.dat")).unwrap();
//! write_menu(Path::new("Menu1.copy.dat"), &document).unwrap();
//! ```

mod error;
pub mod header;
mod reader;
mod writer;

pub use error::{FormatError, Result};
pub use header::{CURRENT_VERSION, MAGIC_BYTES};
pub use reader::{MenuReader, decode, read_menu};
pub use writer::{MenuWriter, encode, write_atomic, write_menu};
