//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into the weft arena DOM.
//! Fragments go through the innerHTML algorithm with a `<body>` context, so
//! a leading `<style>` block stays first and whitespace text is kept as
//! written.

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, QualName, local_name, ns, parse_document, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use weft_dom::{Document, DomTree, NodeId};

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty(url);
        let root = document.tree().root();
        for child in dom.document.children.borrow().iter() {
            if let Some(id) = self.convert_node(child, document.tree_mut()) {
                // Converted nodes are fresh and detached.
                let _ = document.tree_mut().append_child(root, id);
            }
        }
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Parse a fragment into detached nodes allocated in `tree`
    pub fn parse_fragment(&self, tree: &mut DomTree, html: &str) -> Vec<NodeId> {
        let context = QualName::new(None, ns!(html), local_name!("body"));
        let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new(), false).one(html);

        // The parsed nodes hang off a synthetic `<html>` root.
        let mut nodes = Vec::new();
        for top in dom.document.children.borrow().iter() {
            for child in top.children.borrow().iter() {
                if let Some(id) = self.convert_node(child, tree) {
                    nodes.push(id);
                }
            }
        }
        nodes
    }

    /// Convert an RcDom node (and its subtree) into a detached weft node
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree) -> Option<NodeId> {
        match &handle.data {
            RcNodeData::Text { contents } => Some(tree.create_text(&contents.borrow())),
            RcNodeData::Comment { contents } => Some(tree.create_comment(contents)),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    // Fresh element; setting attributes cannot fail.
                    let _ = tree.set_attribute(id, &attr.name.local, &attr.value);
                }
                let is_root = &*name.local == "html";
                for child in handle.children.borrow().iter() {
                    // Whitespace the tree builder keeps between `<head>` and `<body>`
                    if is_root && is_blank_text(child) {
                        continue;
                    }
                    if let Some(child_id) = self.convert_node(child, tree) {
                        let _ = tree.append_child(id, child_id);
                    }
                }
                Some(id)
            }
            // Doctype and processing instructions carry nothing we render.
            RcNodeData::Document
            | RcNodeData::Doctype { .. }
            | RcNodeData::ProcessingInstruction { .. } => None,
        }
    }
}

fn is_blank_text(handle: &Handle) -> bool {
    matches!(&handle.data, RcNodeData::Text { contents } if contents.borrow().trim().is_empty())
}
