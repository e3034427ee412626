//! Disposable listener ledger
//!
//! Every listener a component attaches through the runtime is recorded here
//! so disconnecting the component can remove all of them.

use std::rc::Rc;

use weft_dom::NodeId;

use crate::event::Handler;

/// One recorded listener
#[derive(Clone)]
pub struct Disposable {
    pub element: NodeId,
    pub event: String,
    pub handler: Rc<Handler>,
}

impl std::fmt::Debug for Disposable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposable")
            .field("element", &self.element)
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

/// Listeners owned by one component
#[derive(Debug, Default)]
pub struct DisposableLedger {
    entries: Vec<Disposable>,
}

impl DisposableLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, element: NodeId, event: &str, handler: Rc<Handler>) {
        self.entries.push(Disposable {
            element,
            event: event.to_string(),
            handler,
        });
    }

    /// Forget the entry for exactly this handler. Handlers are compared by
    /// identity, so two closures with identical bodies never match each other.
    pub fn forget(&mut self, element: NodeId, event: &str, handler: &Rc<Handler>) -> bool {
        let found = self.entries.iter().rposition(|d| {
            d.element == element && d.event == event && Rc::ptr_eq(&d.handler, handler)
        });
        match found {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Take every entry, leaving the ledger empty
    pub fn drain(&mut self) -> Vec<Disposable> {
        std::mem::take(&mut self.entries)
    }

    pub fn entries(&self) -> &[Disposable] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
