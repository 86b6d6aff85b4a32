//! Modification tracking.

/// Tracks whether the loaded document has unsaved changes.
///
/// Drives [`ConfirmPolicy::WhenModified`](crate::ConfirmPolicy::WhenModified)
/// and the modified indicator; with the default policy it is informational.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DirtyTracker {
    dirty: bool,
}

impl DirtyTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn is_dirty(self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Reset after a successful save, load or new document.
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
