//! Contracts with the collaborators a session depends on.
//!
//! The session never talks to a file dialog, a message box or a byte layout
//! directly. Front-ends supply implementations of these traits; tests supply
//! scripted ones.

use std::io::{Read, Write};
use std::path::PathBuf;

use dme_format::{FormatError, MenuReader, MenuWriter};
use dme_model::Document;

/// Converts between a document and its byte representation.
pub trait DocumentCodec {
    fn decode(&self, reader: &mut dyn Read) -> Result<Document, FormatError>;

    fn encode(&self, document: &Document, writer: &mut dyn Write) -> Result<(), FormatError>;
}

/// The big-endian `.dat` codec from `dme-format`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl DocumentCodec for BinaryCodec {
    fn decode(&self, reader: &mut dyn Read) -> Result<Document, FormatError> {
        MenuReader::new(reader).read_document()
    }

    fn encode(&self, document: &Document, writer: &mut dyn Write) -> Result<(), FormatError> {
        MenuWriter::new(writer).write_document(document)
    }
}

/// "Pick a file" interactions. `None` means the user cancelled.
pub trait FilePicker {
    fn pick_open(&mut self) -> Option<PathBuf>;

    fn pick_save(&mut self, suggested_name: &str) -> Option<PathBuf>;
}

/// Answer to "save changes to the file?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    Save,
    DontSave,
    /// Abort the operation that asked.
    Cancel,
}

/// The yes/no prompt used by confirm-save.
pub trait Confirmer {
    fn confirm_save(&mut self, document_name: &str) -> SaveDecision;
}

/// Picker that always cancels. Useful for headless sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPicker;

impl FilePicker for NoPicker {
    fn pick_open(&mut self) -> Option<PathBuf> {
        None
    }

    fn pick_save(&mut self, _suggested_name: &str) -> Option<PathBuf> {
        None
    }
}

/// Confirmer that always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub SaveDecision);

impl Confirmer for FixedAnswer {
    fn confirm_save(&mut self, _document_name: &str) -> SaveDecision {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dme_model::{Category, Entry};
    use std::io::Cursor;

    #[test]
    fn binary_codec_round_trips() {
        let doc = Document::from_categories([
            Category::new("Sea").with_entries([Entry::named("Outset", "sea")]),
        ]);
        let codec = BinaryCodec;
        let mut bytes = Vec::new();
        codec.encode(&doc, &mut bytes).unwrap();
        let back = codec.decode(&mut Cursor::new(bytes)).unwrap();
        assert!(doc.same_content(&back));
    }
}
