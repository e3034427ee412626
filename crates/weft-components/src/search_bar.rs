//! `<search-bar>`: a text input whose current value controllers can read.

use weft_dom::{DomTree, NodeId};
use weft_runtime::{Component, ComponentClass};

pub const TAG: &str = "search-bar";

#[derive(Debug, Default)]
pub struct SearchBar;

impl SearchBar {
    pub fn class() -> ComponentClass {
        ComponentClass::of::<Self>(TAG)
    }

    fn input(tree: &DomTree, host: NodeId) -> Option<NodeId> {
        tree.query_selector(tree.shadow_root(host)?, "input")
    }

    /// Current text of the search input
    pub fn value(tree: &DomTree, host: NodeId) -> String {
        Self::input(tree, host)
            .and_then(|input| tree.attribute(input, "value"))
            .unwrap_or_default()
            .to_string()
    }

    pub fn set_value(tree: &mut DomTree, host: NodeId, value: &str) -> weft_dom::DomResult<()> {
        match Self::input(tree, host) {
            Some(input) => tree.set_attribute(input, "value", value).map(|_| ()),
            None => Err(weft_dom::DomError::NotFound(host)),
        }
    }
}

impl Component for SearchBar {}
