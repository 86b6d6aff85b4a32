//! The session controller.
//!
//! A [`Session`] owns the loaded document and everything derived from it:
//! the view mode (category or search), the entry selection, the status line
//! and the window title. Operations are split by concern:
//!
//! - `lifecycle`: new, open, save, save as, close, quit
//! - `editing`: category and entry mutations
//! - `navigation`: category/entry selection and the search filter

mod editing;
mod lifecycle;
mod navigation;

use std::sync::mpsc::Receiver;

use dme_model::{Category, CategoryId, Document, Entry, EntryId};

use crate::boundary::{BinaryCodec, Confirmer, DocumentCodec, FilePicker};
use crate::config::SessionConfig;
use crate::dirty::DirtyTracker;
use crate::error::{Result, SessionError};
use crate::notify::{Notifier, Property};
use crate::selection::Selection;
use crate::status;
use crate::view::{self, ViewMode};

/// How a user-facing operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The user backed out at a picker or confirmation prompt. Nothing changed.
    Cancelled,
}

impl Outcome {
    pub fn is_cancelled(self) -> bool {
        self == Self::Cancelled
    }
}

/// Editor session over at most one loaded document.
pub struct Session {
    config: SessionConfig,
    codec: Box<dyn DocumentCodec>,
    picker: Box<dyn FilePicker>,
    confirmer: Box<dyn Confirmer>,

    document: Option<Document>,
    view: ViewMode,
    selection: Selection,

    status: String,
    window_title: String,
    dirty: DirtyTracker,
    notifier: Notifier,
    terminated: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("document", &self.document.as_ref().map(Document::display_name))
            .field("view", &self.view)
            .field("selection", &self.selection)
            .field("status", &self.status)
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session with no document loaded, using the binary codec.
    pub fn new(picker: impl FilePicker + 'static, confirmer: impl Confirmer + 'static) -> Self {
        Self {
            config: SessionConfig::default(),
            codec: Box::new(BinaryCodec),
            picker: Box::new(picker),
            confirmer: Box::new(confirmer),
            document: None,
            view: ViewMode::Unrestricted,
            selection: Selection::new(),
            status: String::new(),
            window_title: status::window_title(None),
            dirty: DirtyTracker::new(),
            notifier: Notifier::new(),
            terminated: false,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_codec(mut self, codec: impl DocumentCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    /// Receive a [`Property`] every time an observable value changes.
    pub fn subscribe(&mut self) -> Receiver<Property> {
        self.notifier.subscribe()
    }

    // ------------------------------------------------------------------
    // Observable state
    // ------------------------------------------------------------------

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn view_mode(&self) -> &ViewMode {
        &self.view
    }

    pub fn selected_category(&self) -> Option<CategoryId> {
        self.view.selected_category()
    }

    /// The selected category itself, rather than its id.
    pub fn current_category(&self) -> Option<&Category> {
        let id = self.view.selected_category()?;
        self.document.as_ref()?.category(id)
    }

    pub fn selected_entries(&self) -> &[EntryId] {
        self.selection.ids()
    }

    /// The entry being edited: defined only while exactly one is selected.
    pub fn selected_entry(&self) -> Option<&Entry> {
        let id = self.selection.single()?;
        self.document.as_ref()?.entry(id)
    }

    pub fn visible_entries(&self) -> Vec<&Entry> {
        match &self.document {
            Some(doc) => view::visible_entries(doc, &self.view, self.config.filter),
            None => Vec::new(),
        }
    }

    pub fn search_filter(&self) -> &str {
        self.view.filter()
    }

    pub fn is_filtering(&self) -> bool {
        self.view.is_filtering()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    /// Whether the document changed since it was loaded, created or saved.
    pub fn is_modified(&self) -> bool {
        self.document.is_some() && self.dirty.is_dirty()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    // ------------------------------------------------------------------
    // Command enablement
    // ------------------------------------------------------------------

    pub fn can_close(&self) -> bool {
        self.is_loaded()
    }

    pub fn can_save(&self) -> bool {
        self.is_loaded()
    }

    pub fn can_add_category(&self) -> bool {
        self.is_loaded()
    }

    pub fn can_remove_category(&self) -> bool {
        self.current_category().is_some()
    }

    pub fn can_add_entry(&self) -> bool {
        self.current_category().is_some()
    }

    pub fn can_remove_entries(&self) -> bool {
        self.can_remove_category() && !self.selection.is_empty()
    }

    // ------------------------------------------------------------------
    // Internal state transitions
    // ------------------------------------------------------------------

    fn ensure_running(&self) -> Result<()> {
        if self.terminated {
            return Err(SessionError::Terminated);
        }
        Ok(())
    }

    fn require_document(&self) -> Result<&Document> {
        self.document.as_ref().ok_or(SessionError::NoDocumentLoaded)
    }

    fn require_document_mut(&mut self) -> Result<&mut Document> {
        self.document.as_mut().ok_or(SessionError::NoDocumentLoaded)
    }

    /// The selected category id, checked against the loaded document.
    fn require_category(&self) -> Result<CategoryId> {
        let doc = self.require_document()?;
        let id = self
            .view
            .selected_category()
            .ok_or(SessionError::NoCategorySelected)?;
        if doc.category(id).is_none() {
            return Err(SessionError::CategoryNotFound(id));
        }
        Ok(id)
    }

    fn visible_ids(&self) -> Vec<EntryId> {
        match &self.document {
            Some(doc) => view::visible_ids(doc, &self.view, self.config.filter),
            None => Vec::new(),
        }
    }

    fn set_status(&mut self, text: String) {
        tracing::debug!(status = %text, "status updated");
        self.status = text;
        self.notifier.notify(Property::Status);
    }

    fn refresh_title(&mut self) {
        let title = status::window_title(self.document.as_ref());
        if title != self.window_title {
            self.window_title = title;
            self.notifier.notify(Property::WindowTitle);
        }
    }

    fn mark_modified(&mut self) {
        self.dirty.mark_dirty();
    }

    fn notify_selection(&mut self) {
        self.notifier
            .notify_all(&[Property::SelectedEntries, Property::SelectedEntry]);
    }

    /// Switch view mode, notify what changed and drop entries that left view.
    fn set_view(&mut self, view: ViewMode) {
        let old = std::mem::replace(&mut self.view, view);
        if old.selected_category() != self.view.selected_category() {
            self.notifier.notify(Property::SelectedCategory);
        }
        if old.filter() != self.view.filter() {
            self.notifier.notify(Property::SearchFilter);
        }
        self.notifier.notify(Property::VisibleEntries);
        tracing::debug!(view = ?self.view, "view changed");
        self.repair_selection();
    }

    fn repair_selection(&mut self) {
        let visible = self.visible_ids();
        if self.selection.retain_visible(&visible) {
            self.notify_selection();
        }
    }

    /// Replace the loaded document (or unload it) and reset derived state.
    ///
    /// A document with categories starts with its first category selected.
    fn install_document(&mut self, document: Option<Document>) {
        let first = document.as_ref().and_then(Document::first_category);
        self.document = document;
        self.dirty.mark_clean();
        self.notifier
            .notify_all(&[Property::Document, Property::Categories]);
        self.set_view(first.map_or(ViewMode::Unrestricted, ViewMode::Category));
        self.refresh_title();
    }
}

/// Index to select after removing the item at `removed` from a list that now
/// has `len` items: the same position, or the new last item.
pub(crate) fn shift_left(removed: usize, len: usize) -> Option<usize> {
    len.checked_sub(1).map(|last| removed.min(last))
}
