//! Categories: named, ordered groups of entries.

use serde::Serialize;

use crate::entry::Entry;
use crate::ids::{CategoryId, EntryId};

/// A named group of entries. Entry order is significant and preserved on disk.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    id: CategoryId,
    pub name: String,
    entries: Vec<Entry>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Builder-style helper used by decoders and tests.
    #[must_use]
    pub fn with_entries(mut self, entries: impl IntoIterator<Item = Entry>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Position of an entry in this category.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.position(id).is_some()
    }

    /// Append an entry and return its id.
    pub fn push_entry(&mut self, entry: Entry) -> EntryId {
        let id = entry.id();
        self.entries.push(entry);
        id
    }

    /// Remove every entry whose id is listed. Returns how many were removed.
    pub fn remove_entries(&mut self, ids: &[EntryId]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !ids.contains(&e.id()));
        before - self.entries.len()
    }

    /// Compare names and entry contents, ignoring identity.
    pub fn same_content(&self, other: &Category) -> bool {
        self.name == other.name
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.same_content(b))
    }
}
