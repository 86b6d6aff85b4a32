//! Menu entries.

use serde::Serialize;

use crate::ids::EntryId;

/// A single warp entry in a debug menu category.
///
/// `display_name` is what the menu shows; `map_name` is the stage the entry
/// warps to and doubles as the secondary search key. The remaining fields
/// select the room, spawn point and layer inside that stage.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    id: EntryId,
    pub display_name: String,
    pub map_name: String,
    pub room: u8,
    pub spawn: u8,
    pub layer: u8,
}

impl Entry {
    /// Create an entry with empty defaults.
    pub fn new() -> Self {
        Self {
            id: EntryId::new(),
            display_name: String::new(),
            map_name: String::new(),
            room: 0,
            spawn: 0,
            layer: 0,
        }
    }

    /// Create an entry with the given names and a zeroed target.
    pub fn named(display_name: impl Into<String>, map_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            map_name: map_name.into(),
            ..Self::new()
        }
    }

    /// Set the room/spawn/layer target.
    #[must_use]
    pub fn with_target(mut self, room: u8, spawn: u8, layer: u8) -> Self {
        self.room = room;
        self.spawn = spawn;
        self.layer = layer;
        self
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Compare everything except identity.
    pub fn same_content(&self, other: &Entry) -> bool {
        self.display_name == other.display_name
            && self.map_name == other.map_name
            && self.room == other.room
            && self.spawn == other.spawn
            && self.layer == other.layer
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_empty() {
        let entry = Entry::new();
        assert!(entry.display_name.is_empty());
        assert!(entry.map_name.is_empty());
        assert_eq!((entry.room, entry.spawn, entry.layer), (0, 0, 0));
    }

    #[test]
    fn same_content_ignores_identity() {
        let a = Entry::named("Outset Island", "sea").with_target(44, 0, 255);
        let b = Entry::named("Outset Island", "sea").with_target(44, 0, 255);
        assert_ne!(a.id(), b.id());
        assert!(a.same_content(&b));

        let c = b.clone().with_target(44, 1, 255);
        assert!(!a.same_content(&c));
    }
}
