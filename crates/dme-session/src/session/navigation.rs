//! Category selection, entry selection and the search filter.

use dme_model::{Category, CategoryId, EntryId};

use super::Session;
use crate::error::{Result, SessionError};
use crate::view::ViewMode;

impl Session {
    /// Select a category, or pass `None` to show entries from every category.
    ///
    /// Selecting a category always clears the search filter.
    pub fn select_category(&mut self, category: Option<CategoryId>) -> Result<()> {
        self.ensure_running()?;
        let document = self.require_document()?;
        let view = match category {
            Some(id) if document.category(id).is_none() => {
                return Err(SessionError::CategoryNotFound(id));
            }
            Some(id) => ViewMode::Category(id),
            None => ViewMode::Unrestricted,
        };
        self.set_view(view);
        Ok(())
    }

    /// Select the category at `index` in document order.
    pub fn select_category_at(&mut self, index: usize) -> Result<CategoryId> {
        let document = self.require_document()?;
        let id = document
            .category_at(index)
            .map(Category::id)
            .ok_or(SessionError::CategoryIndexOutOfRange {
                index,
                len: document.category_count(),
            })?;
        self.select_category(Some(id))?;
        Ok(id)
    }

    /// Replace the entry selection.
    ///
    /// Every id must be in the visible list; the stored order follows that
    /// list regardless of the order given here. An empty slice deselects all.
    pub fn select_entries(&mut self, ids: &[EntryId]) -> Result<()> {
        self.ensure_running()?;
        self.require_document()?;
        let visible = self.visible_ids();
        let before = self.selection.clone();
        self.selection
            .set(ids, &visible)
            .map_err(SessionError::EntryNotVisible)?;
        if self.selection != before {
            self.notify_selection();
        }
        Ok(())
    }

    /// Set the search text.
    ///
    /// Non-empty text switches to search mode, deselecting the category but
    /// remembering it. Empty text leaves search mode and restores the
    /// remembered category, or the unrestricted view if there was none.
    pub fn set_search_filter(&mut self, text: impl Into<String>) -> Result<()> {
        self.ensure_running()?;
        let text = text.into();
        let next = if text.is_empty() {
            match &self.view {
                ViewMode::Search { resume, .. } => {
                    let resume = (*resume).filter(|id| {
                        self.document
                            .as_ref()
                            .is_some_and(|doc| doc.category(*id).is_some())
                    });
                    resume.map_or(ViewMode::Unrestricted, ViewMode::Category)
                }
                _ => return Ok(()),
            }
        } else {
            let resume = match &self.view {
                ViewMode::Unrestricted => None,
                ViewMode::Category(id) => Some(*id),
                ViewMode::Search { resume, .. } => *resume,
            };
            ViewMode::Search {
                filter: text,
                resume,
            }
        };
        self.set_view(next);
        Ok(())
    }

    /// Shorthand for `set_search_filter("")`.
    pub fn clear_search_filter(&mut self) -> Result<()> {
        self.set_search_filter(String::new())
    }
}
