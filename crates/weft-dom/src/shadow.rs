//! Shadow DOM
//!
//! Shadow roots are ordinary arena nodes (`NodeData::ShadowRoot`) whose
//! parent link stays empty; the host keeps the root id in its element data.
//! Composed traversal hops from a shadow root to its host.

use crate::{DomError, DomResult, DomTree, Node, NodeData, NodeId};

impl DomTree {
    /// Attach an open shadow root to `host`. An element hosts at most one.
    pub fn attach_shadow(&mut self, host: NodeId) -> DomResult<NodeId> {
        let elem = self.get(host)
            .ok_or(DomError::NotFound(host))?
            .as_element()
            .ok_or(DomError::InvalidNodeType(host))?;
        if elem.shadow_root.is_valid() {
            return Err(DomError::ShadowRootExists(host));
        }

        let shadow = self.push(Node::shadow_root(host));
        if let Some(elem) = self.get_mut(host).and_then(Node::as_element_mut) {
            elem.shadow_root = shadow;
        }
        tracing::trace!(%host, %shadow, "attached shadow root");
        Ok(shadow)
    }

    /// Shadow root hosted by `host`
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.get(host)?.as_element()?.shadow_root.option()
    }

    /// Host of a shadow root node
    pub fn shadow_host(&self, shadow: NodeId) -> Option<NodeId> {
        match self.get(shadow)?.data {
            NodeData::ShadowRoot { host } => Some(host),
            _ => None,
        }
    }

    /// Parent in the composed tree: the light parent, or the host when
    /// `node` is a shadow root.
    pub fn composed_parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).or_else(|| self.shadow_host(node))
    }

    /// Event path from `target` up to the document, crossing shadow roots
    pub fn propagation_path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.get(target).map(|_| target);
        while let Some(id) = current {
            path.push(id);
            current = self.composed_parent(id);
        }
        path
    }

    /// Whether `node` is reachable from the document node
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.propagation_path(node).last() == Some(&self.root())
    }

    /// Descendants in the composed tree, excluding `node` itself. A host's
    /// shadow subtree is visited before its light children.
    pub fn composed_descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if id != node {
                out.push(id);
            }
            let mut next = self.child_ids(id);
            if let Some(shadow) = self.shadow_root(id) {
                next.insert(0, shadow);
            }
            stack.extend(next.into_iter().rev());
        }
        out
    }

    /// `<slot>` elements inside a shadow root, in document order
    pub fn slots(&self, shadow: NodeId) -> Vec<NodeId> {
        self.descendants(shadow)
            .into_iter()
            .filter(|&id| self.tag_name(id) == Some("slot"))
            .collect()
    }

    /// The slot of `host`'s shadow root that a light child of `host` is
    /// assigned to: the slot whose `name` matches the child's `slot`
    /// attribute, or the default (unnamed) slot.
    pub fn assigned_slot(&self, host: NodeId, child: NodeId) -> Option<NodeId> {
        let shadow = self.shadow_root(host)?;
        let wanted = self.attribute(child, "slot").unwrap_or("");
        self.slots(shadow)
            .into_iter()
            .find(|&slot| self.attribute(slot, "name").unwrap_or("") == wanted)
    }
}
