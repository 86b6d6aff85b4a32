//! Scripted collaborators shared by the session tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use dme_format::{FormatError, write_menu};
use dme_model::{Category, Document, Entry};
use dme_session::{
    BinaryCodec, Confirmer, DocumentCodec, FilePicker, SaveDecision, Session, SessionConfig,
};
use tempfile::TempDir;

/// File picker answering from queues the test fills in advance.
///
/// Clones share the same queues, so the test keeps one handle while the
/// session owns another.
#[derive(Clone, Default)]
pub struct ScriptedPicker {
    opens: Rc<RefCell<VecDeque<Option<PathBuf>>>>,
    saves: Rc<RefCell<VecDeque<Option<PathBuf>>>>,
    suggestions: Rc<RefCell<Vec<String>>>,
}

impl ScriptedPicker {
    pub fn push_open(&self, answer: Option<PathBuf>) {
        self.opens.borrow_mut().push_back(answer);
    }

    pub fn push_save(&self, answer: Option<PathBuf>) {
        self.saves.borrow_mut().push_back(answer);
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.suggestions.borrow().clone()
    }
}

impl FilePicker for ScriptedPicker {
    fn pick_open(&mut self) -> Option<PathBuf> {
        self.opens.borrow_mut().pop_front().flatten()
    }

    fn pick_save(&mut self, suggested_name: &str) -> Option<PathBuf> {
        self.suggestions
            .borrow_mut()
            .push(suggested_name.to_string());
        self.saves.borrow_mut().pop_front().flatten()
    }
}

/// Confirmer that records every prompt. Answers `DontSave` once the script
/// runs out.
#[derive(Clone, Default)]
pub struct ScriptedConfirmer {
    answers: Rc<RefCell<VecDeque<SaveDecision>>>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl ScriptedConfirmer {
    pub fn push(&self, answer: SaveDecision) {
        self.answers.borrow_mut().push_back(answer);
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm_save(&mut self, document_name: &str) -> SaveDecision {
        self.prompts.borrow_mut().push(document_name.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(SaveDecision::DontSave)
    }
}

/// Codec that can be switched to fail on decode or encode.
#[derive(Clone, Default)]
pub struct FlakyCodec {
    fail_decode: Rc<RefCell<bool>>,
    fail_encode: Rc<RefCell<bool>>,
}

impl FlakyCodec {
    pub fn fail_decode(&self, fail: bool) {
        *self.fail_decode.borrow_mut() = fail;
    }

    pub fn fail_encode(&self, fail: bool) {
        *self.fail_encode.borrow_mut() = fail;
    }
}

impl DocumentCodec for FlakyCodec {
    fn decode(&self, reader: &mut dyn Read) -> Result<Document, FormatError> {
        if *self.fail_decode.borrow() {
            return Err(FormatError::InvalidMagic);
        }
        BinaryCodec.decode(reader)
    }

    fn encode(&self, document: &Document, writer: &mut dyn Write) -> Result<(), FormatError> {
        if *self.fail_encode.borrow() {
            return Err(FormatError::Stream(io::Error::other("disk full")));
        }
        BinaryCodec.encode(document, writer)
    }
}

/// A session plus handles on its scripted collaborators.
pub struct Harness {
    pub session: Session,
    pub picker: ScriptedPicker,
    pub confirmer: ScriptedConfirmer,
    pub codec: FlakyCodec,
    pub dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let picker = ScriptedPicker::default();
        let confirmer = ScriptedConfirmer::default();
        let codec = FlakyCodec::default();
        let session = Session::new(picker.clone(), confirmer.clone())
            .with_config(config)
            .with_codec(codec.clone());
        Self {
            session,
            picker,
            confirmer,
            codec,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `document` to `name` in the temp dir and open it.
    pub fn open(&mut self, name: &str, document: &Document) -> PathBuf {
        let path = self.path(name);
        write_menu(&path, document).unwrap();
        self.session.open_path(&path).unwrap();
        path
    }
}

/// Categories named after `names`, each holding `entries_per` entries.
pub fn document(names: &[&str], entries_per: usize) -> Document {
    Document::from_categories(names.iter().map(|name| {
        Category::new(*name).with_entries(
            (0..entries_per).map(|i| Entry::named(format!("{name}{i}"), format!("map_{name}{i}"))),
        )
    }))
}

pub fn category_names(session: &Session) -> Vec<String> {
    session
        .document()
        .map(|doc| doc.categories().iter().map(|c| c.name.clone()).collect())
        .unwrap_or_default()
}

pub fn visible_names(session: &Session) -> Vec<String> {
    session
        .visible_entries()
        .iter()
        .map(|e| e.display_name.clone())
        .collect()
}

pub fn selected_category_name(session: &Session) -> Option<String> {
    session.current_category().map(|c| c.name.clone())
}

pub fn read_back(path: &Path) -> Document {
    dme_format::read_menu(path).unwrap()
}
