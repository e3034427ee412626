//! Controller scope
//!
//! While the tree is mounted, every element declaring `[controller]` pushes
//! a frame. Each component keeps the scope it was mounted in (its own frame
//! included), so the nearest controller and the ordered ancestor chain are
//! read from the scope instead of from a walk up the live tree. A host passes
//! its scope into its shadow content.

use std::rc::Rc;

use weft_dom::NodeId;

#[derive(Debug)]
struct Frame {
    element: NodeId,
    class_name: String,
    parent: Option<Rc<Frame>>,
}

/// Immutable, shareable chain of controller frames, nearest first
#[derive(Debug, Clone, Default)]
pub struct Scope {
    head: Option<Rc<Frame>>,
}

impl Scope {
    /// The empty scope at the document root
    pub fn root() -> Self {
        Self::default()
    }

    /// A child scope with `element` as the nearest controller
    pub fn enter(&self, element: NodeId, class_name: &str) -> Self {
        Self {
            head: Some(Rc::new(Frame {
                element,
                class_name: class_name.to_string(),
                parent: self.head.clone(),
            })),
        }
    }

    /// Nearest element declaring a controller
    pub fn nearest(&self) -> Option<NodeId> {
        self.head.as_ref().map(|f| f.element)
    }

    /// Declaring elements with their declared class names, nearest first
    pub fn frames(&self) -> impl Iterator<Item = (NodeId, &str)> {
        std::iter::successors(self.head.as_deref(), |f| f.parent.as_deref())
            .map(|f| (f.element, f.class_name.as_str()))
    }

    /// Declaring elements, nearest first
    pub fn chain(&self) -> Vec<NodeId> {
        self.frames().map(|(element, _)| element).collect()
    }

    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}
