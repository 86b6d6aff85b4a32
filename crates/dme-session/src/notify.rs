//! Change notifications for observable session properties.

use std::sync::mpsc::{self, Receiver, Sender};

/// An externally observable property of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// The loaded document was replaced, created or closed.
    Document,
    WindowTitle,
    Status,
    SearchFilter,
    SelectedCategory,
    SelectedEntries,
    /// Derived from `SelectedEntries`; fires together with it.
    SelectedEntry,
    /// Categories were added, removed or renamed.
    Categories,
    /// The visible entry list may have changed.
    VisibleEntries,
}

/// Fan-out of property changes to any number of subscribers.
///
/// Subscribers whose receiver has been dropped are pruned on the next send.
#[derive(Debug, Default)]
pub struct Notifier {
    subscribers: Vec<Sender<Property>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<Property> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    pub fn notify(&mut self, property: Property) {
        tracing::trace!(?property, "property changed");
        self.subscribers
            .retain(|subscriber| subscriber.send(property).is_ok());
    }

    pub fn notify_all(&mut self, properties: &[Property]) {
        for property in properties {
            self.notify(*property);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
