//! Interpolation
//!
//! `{{name}}` placeholders in a component's shadow content (and light DOM)
//! are filled from the controller chain. Each target keeps the markup it had
//! before the first render; every re-render starts from that snapshot, so no
//! earlier value is left behind.
//!
//! A target whose children include elements is rendered through the text
//! node carrying its placeholder. Its element children (slots, anything with
//! listeners) are never rebuilt.

use weft_dom::NodeId;

use crate::Value;
use crate::binding::push_unique;
use crate::runtime::Runtime;

/// Elements whose text is never interpolated
const OPAQUE_ELEMENTS: &[&str] = &["style", "script"];

/// Rendered in place of a property no controller owns
const UNDEFINED: &str = "undefined";

/// A `{{name}}` occurrence. `start..end` spans the braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub start: usize,
    pub end: usize,
    pub name: &'a str,
}

/// First placeholder in `text`. The braces must close on the same line.
pub fn find_placeholder(text: &str) -> Option<Placeholder<'_>> {
    let mut from = 0;
    while let Some(offset) = text[from..].find("{{") {
        let open = from + offset;
        let inner_start = open + 2;
        let close = inner_start + text[inner_start..].find("}}")?;
        let inner = &text[inner_start..close];
        if !inner.contains('\n') {
            return Some(Placeholder {
                start: open,
                end: close + 2,
                name: inner.trim(),
            });
        }
        from = inner_start;
    }
    None
}

/// Pre-render snapshot of a target
#[derive(Debug, Clone)]
pub(crate) struct Golden {
    pub markup: String,
    /// Component whose controller chain fills the target
    pub interpolator: NodeId,
    /// Child text node rendered in place of the whole target
    pub anchor: Option<Anchor>,
}

#[derive(Debug, Clone)]
pub(crate) struct Anchor {
    pub node: NodeId,
    pub text: String,
}

impl Runtime {
    /// Snapshot taken before `node` was first interpolated
    pub fn golden(&self, node: NodeId) -> Option<&str> {
        self.goldens.get(&node).map(|g| g.markup.as_str())
    }

    /// Interpolation targets of `host`: its shadow content first, then its
    /// light DOM. Nested component hosts are left to their own components.
    pub fn find_targets(&self, host: NodeId) -> Vec<NodeId> {
        let mut targets = Vec::new();
        if let Some(shadow) = self.tree().shadow_root(host) {
            self.discover(shadow, &mut targets);
        }
        self.discover(host, &mut targets);
        targets
    }

    /// Depth-first search for the deepest nodes carrying placeholders.
    /// Returns whether anything under `node` matched.
    fn discover(&self, node: NodeId, out: &mut Vec<NodeId>) -> bool {
        if self.is_opaque(node) || !has_placeholder(&self.visible_text(node)) {
            return false;
        }

        let mut matched = false;
        for child in self.tree().child_ids(node) {
            if self.tree().tag_name(child).is_some() && !self.is_component_host(child) {
                matched |= self.discover(child, out);
            }
        }

        // Re-rendering a subtree that holds a component would rebuild that
        // component's host, so such nodes only get their own text nodes.
        if matched || self.contains_component_host(node) {
            for child in self.tree().child_ids(node) {
                if self.tree().get(child).and_then(|n| n.as_text()).is_some_and(has_placeholder) {
                    push_unique(out, child);
                }
            }
        } else {
            push_unique(out, node);
        }
        true
    }

    /// Text under `node`, skipping opaque elements and nested component hosts
    fn visible_text(&self, node: NodeId) -> String {
        let mut text = String::new();
        for child in self.tree().child_ids(node) {
            if let Some(data) = self.tree().get(child).and_then(|n| n.as_text()) {
                text.push_str(data);
            } else if !self.is_opaque(child) && !self.is_component_host(child) {
                text.push_str(&self.visible_text(child));
            }
        }
        text
    }

    fn is_opaque(&self, node: NodeId) -> bool {
        self.tree().tag_name(node).is_some_and(|tag| OPAQUE_ELEMENTS.contains(&tag))
    }

    fn contains_component_host(&self, node: NodeId) -> bool {
        self.tree().descendants(node).into_iter().any(|d| self.is_component_host(d))
    }

    /// Snapshot and render every target of `host`
    pub(crate) fn interpolate(&mut self, host: NodeId) {
        for target in self.find_targets(host) {
            if !self.goldens.contains_key(&target) {
                let markup = match self.tree().get(target).and_then(|n| n.as_text()) {
                    Some(text) => text.to_string(),
                    None => weft_html::get_inner_html(self.tree(), target),
                };
                let anchor = self.text_anchor(target);
                self.goldens.insert(target, Golden { markup, interpolator: host, anchor });
            }
            self.render_target(target);
        }
    }

    /// First placeholder-bearing text child of an element that also has
    /// element children
    fn text_anchor(&self, target: NodeId) -> Option<Anchor> {
        let children = self.tree().child_ids(target);
        if !children.iter().any(|&c| self.tree().tag_name(c).is_some()) {
            return None;
        }
        children.into_iter().find_map(|node| {
            let text = self.tree().get(node)?.as_text()?;
            has_placeholder(text).then(|| Anchor { node, text: text.to_string() })
        })
    }

    /// Restore `target`'s snapshot and fill its first placeholder
    pub(crate) fn render_target(&mut self, target: NodeId) {
        let Some(golden) = self.goldens.get(&target).cloned() else {
            return;
        };
        let (source, node) = match &golden.anchor {
            Some(anchor) => (anchor.text.as_str(), anchor.node),
            None => (golden.markup.as_str(), target),
        };
        let Some(placeholder) = find_placeholder(source) else {
            return;
        };
        let chain = self
            .instances
            .get(&golden.interpolator)
            .and_then(|i| i.chain.clone())
            .unwrap_or_default();

        let value = self
            .resolve_placeholder(target, &chain, placeholder.name)
            .map(|v| v.to_string())
            .unwrap_or_else(|| UNDEFINED.to_string());

        let is_text = self.tree().get(node).is_some_and(|n| n.is_text());
        let rendered = if is_text { value } else { weft_html::escape_text(&value) };
        let markup = format!("{}{}{}", &source[..placeholder.start], rendered, &source[placeholder.end..]);

        let result = if is_text {
            self.tree_mut().set_text(node, &markup)
        } else {
            weft_html::set_inner_html(self.tree_mut(), node, &markup)
        };
        if let Err(err) = result {
            tracing::warn!(%target, "Failed to render interpolation: {}", err);
        }
    }

    /// Walk `chain` nearest first. Every visited controller element records
    /// `target` as a subscriber to `name`; the first one owning the property
    /// supplies the value.
    fn resolve_placeholder(&mut self, target: NodeId, chain: &[NodeId], name: &str) -> Option<Value> {
        let mut checked = Vec::new();
        for &owner in chain {
            let subscribers = self
                .dynamics
                .entry(owner)
                .or_default()
                .interpolations
                .entry(name.to_string())
                .or_default();
            push_unique(subscribers, target);

            let Some(controller) = self.controllers.get(&owner) else {
                checked.push(String::from("?"));
                continue;
            };
            if let Some(value) = controller.get(name) {
                return Some(value.clone());
            }
            checked.push(controller.class_name().to_string());
        }

        tracing::warn!(
            property = name,
            checked = ?checked,
            "Interpolation property '{}' not found in any ancestor controller",
            name
        );
        None
    }
}

fn has_placeholder(text: &str) -> bool {
    find_placeholder(text).is_some()
}
