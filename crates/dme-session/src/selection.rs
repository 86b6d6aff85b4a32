//! Entry selection.

use std::collections::HashSet;

use dme_model::EntryId;

/// The selected entries, by id, in visible-list order.
///
/// A selection never owns entries; it names them. The session keeps it
/// consistent with the visible list by calling [`Selection::retain_visible`]
/// after anything that can change that list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<EntryId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[EntryId] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.contains(&id)
    }

    /// The single selected entry, if exactly one is selected.
    pub fn single(&self) -> Option<EntryId> {
        match self.entries.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Returns `true` if anything was deselected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.entries.is_empty();
        self.entries.clear();
        changed
    }

    pub fn select_only(&mut self, id: EntryId) {
        self.entries.clear();
        self.entries.push(id);
    }

    /// Replace the selection with `ids`, ordered by `visible`.
    ///
    /// Duplicates collapse. Fails with the first id that is not in `visible`,
    /// leaving the selection unchanged.
    pub fn set(&mut self, ids: &[EntryId], visible: &[EntryId]) -> Result<(), EntryId> {
        let visible_set: HashSet<EntryId> = visible.iter().copied().collect();
        if let Some(missing) = ids.iter().find(|id| !visible_set.contains(id)) {
            return Err(*missing);
        }
        let wanted: HashSet<EntryId> = ids.iter().copied().collect();
        self.entries = visible
            .iter()
            .copied()
            .filter(|id| wanted.contains(id))
            .collect();
        Ok(())
    }

    /// Drop every id that is no longer visible and restore list order.
    ///
    /// Returns `true` if the selection changed.
    pub fn retain_visible(&mut self, visible: &[EntryId]) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let current: HashSet<EntryId> = self.entries.iter().copied().collect();
        let repaired: Vec<EntryId> = visible
            .iter()
            .copied()
            .filter(|id| current.contains(id))
            .collect();
        if repaired == self.entries {
            return false;
        }
        self.entries = repaired;
        true
    }
}
