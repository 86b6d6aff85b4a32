//! View mode and the visible-entry projection.
//!
//! Category selection and text search are mutually exclusive ways of
//! choosing which entries are shown. [`ViewMode`] makes that exclusivity
//! structural: a session is in exactly one mode at a time.

use dme_model::{CategoryId, Document, Entry, EntryId};

use crate::config::FilterOptions;

/// Which entries the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// No category selected and no search: every entry is shown.
    #[default]
    Unrestricted,
    /// The entries of one category, in order.
    Category(CategoryId),
    /// Every entry in the document matching `filter`.
    ///
    /// `resume` is the category that was selected when the search began; it
    /// is selected again once the filter is cleared.
    Search {
        filter: String,
        resume: Option<CategoryId>,
    },
}

impl ViewMode {
    pub fn selected_category(&self) -> Option<CategoryId> {
        match self {
            Self::Category(id) => Some(*id),
            _ => None,
        }
    }

    /// Current search text, empty when not searching.
    pub fn filter(&self) -> &str {
        match self {
            Self::Search { filter, .. } => filter,
            _ => "",
        }
    }

    pub fn is_filtering(&self) -> bool {
        matches!(self, Self::Search { .. })
    }
}

/// Substring match against the display name or the map name.
///
/// An empty filter matches everything.
pub fn entry_matches(entry: &Entry, filter: &str, options: FilterOptions) -> bool {
    if filter.is_empty() {
        return true;
    }
    if options.case_sensitive {
        entry.display_name.contains(filter) || entry.map_name.contains(filter)
    } else {
        let needle = filter.to_lowercase();
        entry.display_name.to_lowercase().contains(&needle)
            || entry.map_name.to_lowercase().contains(&needle)
    }
}

/// Entries visible under `mode`, in category order then entry order.
pub fn visible_entries<'a>(
    document: &'a Document,
    mode: &ViewMode,
    options: FilterOptions,
) -> Vec<&'a Entry> {
    match mode {
        ViewMode::Unrestricted => document.entries().collect(),
        ViewMode::Category(id) => document
            .category(*id)
            .map(|c| c.entries().iter().collect())
            .unwrap_or_default(),
        ViewMode::Search { filter, .. } => document
            .entries()
            .filter(|e| entry_matches(e, filter, options))
            .collect(),
    }
}

/// Ids of [`visible_entries`], for selection bookkeeping.
pub fn visible_ids(document: &Document, mode: &ViewMode, options: FilterOptions) -> Vec<EntryId> {
    visible_entries(document, mode, options)
        .into_iter()
        .map(Entry::id)
        .collect()
}
