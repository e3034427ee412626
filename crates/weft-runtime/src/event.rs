//! Events
//!
//! Events are dispatched synchronously along the composed path from the
//! target to the document. Non-bubbling events only reach the target.

use weft_dom::NodeId;

use crate::Value;
use crate::runtime::Runtime;

/// Listener callback. Handlers get the runtime so they can write controller
/// properties and touch the tree.
pub type Handler = dyn Fn(&mut Runtime, &mut Event);

/// A dispatched event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub target: NodeId,
    /// Node whose listeners are currently running
    pub current_target: NodeId,
    /// Node the event is about, e.g. the clicked menu item
    pub related: Option<NodeId>,
    pub detail: Option<Value>,
    pub bubbles: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// A non-bubbling event
    pub fn new(name: &str, target: NodeId) -> Self {
        Self {
            name: name.to_string(),
            target,
            current_target: target,
            related: None,
            detail: None,
            bubbles: false,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// A bubbling event
    pub fn bubbling(name: &str, target: NodeId) -> Self {
        Self { bubbles: true, ..Self::new(name, target) }
    }

    pub fn with_related(mut self, node: NodeId) -> Self {
        self.related = Some(node);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<Value>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
