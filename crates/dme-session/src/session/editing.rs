//! Category and entry mutations.

use dme_model::{Category, CategoryId, Entry, EntryId};

use super::{Session, shift_left};
use crate::error::{Result, SessionError};
use crate::notify::Property;
use crate::view::ViewMode;

impl Session {
    /// Append an unnamed category and select it.
    pub fn add_category(&mut self) -> Result<CategoryId> {
        self.add_category_named(String::new())
    }

    /// Append a category and select it, clearing any search filter.
    pub fn add_category_named(&mut self, name: impl Into<String>) -> Result<CategoryId> {
        self.ensure_running()?;
        let id = self
            .require_document_mut()?
            .push_category(Category::new(name));
        self.mark_modified();
        self.notifier.notify(Property::Categories);
        tracing::debug!(category = %id, "added category");
        self.set_view(ViewMode::Category(id));
        Ok(id)
    }

    /// Remove the selected category.
    ///
    /// The category that slides into its position is selected next; when the
    /// last category was removed its predecessor is selected instead, and when
    /// none remain the view becomes unrestricted.
    pub fn remove_category(&mut self) -> Result<CategoryId> {
        self.ensure_running()?;
        let selected = self.require_category()?;
        let document = self.require_document_mut()?;
        let (index, removed) = document
            .remove_category(selected)
            .ok_or(SessionError::CategoryNotFound(selected))?;
        let next = shift_left(index, document.category_count())
            .and_then(|i| document.category_at(i))
            .map(Category::id);

        self.mark_modified();
        self.notifier.notify(Property::Categories);
        tracing::debug!(
            category = %selected,
            index,
            entries = removed.len(),
            "removed category"
        );
        self.set_view(next.map_or(ViewMode::Unrestricted, ViewMode::Category));
        Ok(selected)
    }

    /// Rename the selected category.
    pub fn rename_selected_category(&mut self, name: impl Into<String>) -> Result<()> {
        self.ensure_running()?;
        let selected = self.require_category()?;
        let category = self
            .require_document_mut()?
            .category_mut(selected)
            .ok_or(SessionError::CategoryNotFound(selected))?;
        category.name = name.into();
        self.mark_modified();
        self.notifier.notify(Property::Categories);
        tracing::debug!(category = %selected, "renamed category");
        Ok(())
    }

    /// Append an empty entry to the selected category and make it the only
    /// selected entry.
    pub fn add_entry(&mut self) -> Result<EntryId> {
        self.ensure_running()?;
        let selected = self.require_category()?;
        let id = self
            .require_document_mut()?
            .category_mut(selected)
            .ok_or(SessionError::CategoryNotFound(selected))?
            .push_entry(Entry::new());

        self.mark_modified();
        self.notifier.notify(Property::VisibleEntries);
        self.selection.select_only(id);
        self.notify_selection();
        tracing::debug!(category = %selected, entry = %id, "added entry");
        Ok(id)
    }

    /// Remove every selected entry from the selected category.
    ///
    /// Afterwards the entry now at the first removed entry's position is
    /// selected, or the new last entry, or nothing if the category is empty.
    /// Returns how many entries were removed.
    pub fn remove_entry(&mut self) -> Result<usize> {
        self.ensure_running()?;
        let selected = self.require_category()?;
        if self.selection.is_empty() {
            return Err(SessionError::NoEntriesSelected);
        }
        let ids = self.selection.ids().to_vec();

        let category = self
            .require_document_mut()?
            .category_mut(selected)
            .ok_or(SessionError::CategoryNotFound(selected))?;
        let anchor = ids.iter().filter_map(|id| category.position(*id)).min();
        let removed = category.remove_entries(&ids);
        let next = anchor
            .and_then(|i| shift_left(i, category.len()))
            .and_then(|i| category.entry_at(i))
            .map(Entry::id);

        self.selection.clear();
        if let Some(next) = next {
            self.selection.select_only(next);
        }
        self.mark_modified();
        self.notifier.notify(Property::VisibleEntries);
        self.notify_selection();
        tracing::debug!(category = %selected, removed, "removed entries");
        Ok(removed)
    }

    /// Edit the single selected entry in place.
    ///
    /// Under a search filter the edit can move the entry out of view, in which
    /// case it is deselected.
    pub fn update_selected_entry<F>(&mut self, edit: F) -> Result<EntryId>
    where
        F: FnOnce(&mut Entry),
    {
        self.ensure_running()?;
        self.require_document()?;
        let id = self
            .selection
            .single()
            .ok_or(SessionError::NoSingleEntrySelected {
                count: self.selection.len(),
            })?;
        let entry = self
            .require_document_mut()?
            .entry_mut(id)
            .ok_or(SessionError::EntryNotVisible(id))?;
        edit(entry);

        self.mark_modified();
        self.notifier
            .notify_all(&[Property::SelectedEntry, Property::VisibleEntries]);
        tracing::debug!(entry = %id, "updated entry");
        self.repair_selection();
        Ok(id)
    }
}
