//! The top-level menu document.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::category::Category;
use crate::entry::Entry;
use crate::error::{ModelError, Result};
use crate::ids::{CategoryId, EntryId};

/// Name shown for documents that have never been saved.
pub const UNTITLED: &str = "Untitled";

/// One debug menu file: an ordered list of categories.
///
/// `name` and `folder` stay `None` until the document is saved or was opened
/// from disk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    pub name: Option<String>,
    pub folder: Option<PathBuf>,
    categories: Vec<Category>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from already-constructed categories.
    pub fn from_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            ..Self::default()
        }
    }

    /// File name if known, otherwise [`UNTITLED`].
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNTITLED)
    }

    /// Full path, known only once both folder and file name are set.
    pub fn path(&self) -> Option<PathBuf> {
        match (&self.folder, &self.name) {
            (Some(folder), Some(name)) if !name.is_empty() => Some(folder.join(name)),
            _ => None,
        }
    }

    /// Split a path into folder and file name and remember both.
    pub fn set_path(&mut self, path: &Path) -> Result<()> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ModelError::InvalidPath(path.to_path_buf()))?;
        let folder = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.name = Some(name.to_string());
        self.folder = Some(folder);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id() == id)
    }

    pub fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id() == id)
    }

    pub fn category_at(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn category_index(&self, id: CategoryId) -> Option<usize> {
        self.categories.iter().position(|c| c.id() == id)
    }

    pub fn first_category(&self) -> Option<CategoryId> {
        self.categories.first().map(Category::id)
    }

    /// Append a category and return its id.
    pub fn push_category(&mut self, category: Category) -> CategoryId {
        let id = category.id();
        self.categories.push(category);
        id
    }

    /// Remove a category, returning the index it occupied and the category itself.
    pub fn remove_category(&mut self, id: CategoryId) -> Option<(usize, Category)> {
        let index = self.category_index(id)?;
        Some((index, self.categories.remove(index)))
    }

    // ------------------------------------------------------------------
    // Entries
    // ------------------------------------------------------------------

    /// Every entry in category order, then entry order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.categories.iter().flat_map(|c| c.entries().iter())
    }

    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }

    /// Locate an entry: owning category and position inside it.
    pub fn find_entry(&self, id: EntryId) -> Option<(CategoryId, usize)> {
        self.categories
            .iter()
            .find_map(|c| c.position(id).map(|pos| (c.id(), pos)))
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.categories.iter().find_map(|c| c.entry(id))
    }

    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.categories.iter_mut().find_map(|c| c.entry_mut(id))
    }

    pub fn contains_entry(&self, id: EntryId) -> bool {
        self.find_entry(id).is_some()
    }

    /// Structural equality ignoring ids and path.
    pub fn same_content(&self, other: &Document) -> bool {
        self.categories.len() == other.categories.len()
            && self
                .categories
                .iter()
                .zip(&other.categories)
                .all(|(a, b)| a.same_content(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::from_categories([
            Category::new("Sea").with_entries([
                Entry::named("Outset", "sea"),
                Entry::named("Windfall", "sea"),
            ]),
            Category::new("Empty"),
            Category::new("Dungeons").with_entries([Entry::named("Dragon Roost", "M_NewD2")]),
        ])
    }

    #[test]
    fn untitled_until_named() {
        let mut doc = Document::new();
        assert_eq!(doc.display_name(), UNTITLED);
        assert!(doc.path().is_none());

        doc.set_path(Path::new("/tmp/menus/Menu1.dat")).unwrap();
        assert_eq!(doc.display_name(), "Menu1.dat");
        assert_eq!(doc.folder.as_deref(), Some(Path::new("/tmp/menus")));
        assert_eq!(doc.path(), Some(PathBuf::from("/tmp/menus/Menu1.dat")));
    }

    #[test]
    fn set_path_rejects_paths_without_file_name() {
        let mut doc = Document::new();
        let err = doc.set_path(Path::new("/")).unwrap_err();
        assert!(matches!(err, ModelError::InvalidPath(_)));
        assert!(doc.name.is_none());
    }

    #[test]
    fn entries_follow_category_then_entry_order() {
        let doc = sample();
        let names: Vec<_> = doc.entries().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["Outset", "Windfall", "Dragon Roost"]);
        assert_eq!(doc.entry_count(), 3);
    }

    #[test]
    fn find_entry_reports_owner_and_position() {
        let doc = sample();
        let dungeons = doc.categories()[2].id();
        let roost = doc.categories()[2].entries()[0].id();
        assert_eq!(doc.find_entry(roost), Some((dungeons, 0)));
        assert!(doc.find_entry(EntryId::new()).is_none());
    }

    #[test]
    fn remove_category_reports_index() {
        let mut doc = sample();
        let empty = doc.categories()[1].id();
        let (index, removed) = doc.remove_category(empty).unwrap();
        assert_eq!(index, 1);
        assert_eq!(removed.name, "Empty");
        assert_eq!(doc.category_count(), 2);
        assert!(doc.remove_category(empty).is_none());
    }

    #[test]
    fn serializes_to_json() {
        let doc = sample();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["categories"][0]["name"], "Sea");
        assert_eq!(json["categories"][0]["entries"][1]["display_name"], "Windfall");
    }
}
