//! Event listener table
//!
//! Listeners are stored per (target, event type) in registration order.
//! Removal compares handler identity with `Rc::ptr_eq`, so two closures with
//! the same shape are still distinct listeners.

use std::collections::HashMap;
use std::rc::Rc;

use crate::NodeId;

/// Registered listeners keyed by target node and event type
pub struct ListenerTable<H: ?Sized> {
    listeners: HashMap<(NodeId, String), Vec<Rc<H>>>,
}

impl<H: ?Sized> Default for ListenerTable<H> {
    fn default() -> Self {
        Self { listeners: HashMap::new() }
    }
}

impl<H: ?Sized> std::fmt::Debug for ListenerTable<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerTable")
            .field("listeners", &self.len())
            .finish()
    }
}

impl<H: ?Sized> ListenerTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener; the same handler may be added more than once
    pub fn add(&mut self, target: NodeId, event: &str, handler: Rc<H>) {
        self.listeners
            .entry((target, event.to_string()))
            .or_default()
            .push(handler);
    }

    /// Remove the first listener that is the very same handler
    pub fn remove(&mut self, target: NodeId, event: &str, handler: &Rc<H>) -> bool {
        let key = (target, event.to_string());
        let Some(list) = self.listeners.get_mut(&key) else {
            return false;
        };
        let Some(pos) = list.iter().position(|h| Rc::ptr_eq(h, handler)) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.listeners.remove(&key);
        }
        true
    }

    /// Snapshot of the listeners for a target and event type
    pub fn get(&self, target: NodeId, event: &str) -> Vec<Rc<H>> {
        self.listeners
            .get(&(target, event.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of listeners on a target for an event type
    pub fn count(&self, target: NodeId, event: &str) -> usize {
        self.listeners
            .get(&(target, event.to_string()))
            .map_or(0, Vec::len)
    }

    /// Total number of listeners
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
