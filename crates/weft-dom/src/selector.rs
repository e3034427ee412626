//! Simple selectors
//!
//! Compound selectors only: an optional tag followed by any number of
//! `#id`, `.class`, `[attr]` and `[attr="value"]` parts. Combinators and
//! selector lists are not supported.

use crate::{DOMTokenList, DomTree, NodeId};

/// Parsed compound selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, Option<String>)>,
}

impl Selector {
    /// Parse a compound selector; `None` on unsupported syntax
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut selector = Selector::default();
        let mut rest = input;

        let tag_len = rest.find(['#', '.', '[']).unwrap_or(rest.len());
        if tag_len > 0 {
            let tag = &rest[..tag_len];
            if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '*') {
                return None;
            }
            if tag != "*" {
                selector.tag = Some(tag.to_ascii_lowercase());
            }
            rest = &rest[tag_len..];
        }

        while let Some(first) = rest.chars().next() {
            match first {
                '#' | '.' => {
                    let body = &rest[1..];
                    let len = body.find(['#', '.', '[']).unwrap_or(body.len());
                    let name = &body[..len];
                    if name.is_empty() || name.contains(char::is_whitespace) {
                        return None;
                    }
                    if first == '#' {
                        selector.id = Some(name.to_string());
                    } else {
                        selector.classes.push(name.to_string());
                    }
                    rest = &body[len..];
                }
                '[' => {
                    let close = rest.find(']')?;
                    let inner = &rest[1..close];
                    let attr = match inner.split_once('=') {
                        Some((name, value)) => {
                            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                            (name.trim().to_ascii_lowercase(), Some(value.to_string()))
                        }
                        None => (inner.trim().to_ascii_lowercase(), None),
                    };
                    if attr.0.is_empty() {
                        return None;
                    }
                    selector.attrs.push(attr);
                    rest = &rest[close + 1..];
                }
                _ => return None,
            }
        }

        Some(selector)
    }

    /// Check whether an element matches
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(elem) = tree.get(id).and_then(|n| n.as_element()) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|tag| tag != elem.name) {
            return false;
        }
        if self.id.as_deref().is_some_and(|want| elem.get_attr("id") != Some(want)) {
            return false;
        }
        if !self.classes.is_empty() {
            let list = DOMTokenList::from_string(elem.get_attr("class").unwrap_or(""));
            if !self.classes.iter().all(|c| list.contains(c)) {
                return false;
            }
        }
        self.attrs.iter().all(|(name, value)| match (elem.get_attr(name), value) {
            (Some(actual), Some(wanted)) => actual == wanted,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }
}

impl DomTree {
    /// First light descendant of `root` matching `selector`
    pub fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        self.descendants(root)
            .into_iter()
            .find(|&id| selector.matches(self, id))
    }

    /// All light descendants of `root` matching `selector`
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(root)
            .into_iter()
            .filter(|&id| selector.matches(self, id))
            .collect()
    }
}
