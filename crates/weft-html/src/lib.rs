//! weft HTML
//!
//! HTML5 parsing built on html5ever, plus innerHTML style serialization.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, escape_text, get_inner_html, get_outer_html};

use weft_dom::{Document, DomResult, DomTree, NodeId};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Parse an HTML fragment into detached nodes owned by `tree`
pub fn parse_fragment(tree: &mut DomTree, html: &str) -> Vec<NodeId> {
    HtmlParser::new().parse_fragment(tree, html)
}

/// innerHTML assignment: replace the children of `node` with `html`
pub fn set_inner_html(tree: &mut DomTree, node: NodeId, html: &str) -> DomResult<()> {
    tree.remove_children(node)?;
    for child in parse_fragment(tree, html) {
        tree.append_child(node, child)?;
    }
    Ok(())
}
