//! Edge case tests for weft-dom
//!
//! Tree mutation boundaries, shadow traversal and listener identity.

use std::rc::Rc;

use weft_dom::{DomError, DomTree, ListenerTable, NodeId};

// ============================================================================
// TREE MUTATION
// ============================================================================

#[test]
fn test_append_into_own_descendant_rejected() {
    let mut tree = DomTree::new();
    let outer = tree.create_element("div");
    let inner = tree.create_element("span");
    tree.append_child(outer, inner).unwrap();

    assert_eq!(
        tree.append_child(inner, outer),
        Err(DomError::HierarchyRequest { parent: inner, child: outer })
    );
}

#[test]
fn test_append_moves_existing_child() {
    let mut tree = DomTree::new();
    let a = tree.create_element("div");
    let b = tree.create_element("div");
    let child = tree.create_element("p");
    tree.append_child(a, child).unwrap();
    tree.append_child(b, child).unwrap();

    assert!(tree.child_ids(a).is_empty());
    assert_eq!(tree.child_ids(b), vec![child]);
    assert_eq!(tree.parent(child), Some(b));
}

#[test]
fn test_remove_non_child() {
    let mut tree = DomTree::new();
    let a = tree.create_element("div");
    let stray = tree.create_element("p");
    assert_eq!(tree.remove_child(a, stray), Err(DomError::NotAChild { parent: a, child: stray }));
}

#[test]
fn test_deep_clone_is_detached_and_shadowless() {
    let mut tree = DomTree::new();
    let host = tree.create_element("x-card");
    tree.append_child(tree.root(), host).unwrap();
    tree.attach_shadow(host).unwrap();
    let label = tree.create_text("hi");
    tree.append_child(host, label).unwrap();

    let copy = tree.clone_node(host, true).unwrap();
    assert_eq!(tree.parent(copy), None);
    assert_eq!(tree.shadow_root(copy), None);
    assert_eq!(tree.text_content(copy), "hi");
    assert_ne!(tree.child_ids(copy), vec![label]);
}

#[test]
fn test_set_text_on_element_rejected() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    assert_eq!(tree.set_text(div, "x"), Err(DomError::InvalidNodeType(div)));
}

// ============================================================================
// SHADOW TRAVERSAL
// ============================================================================

#[test]
fn test_detached_shadow_content_not_connected() {
    let mut tree = DomTree::new();
    let host = tree.create_element("x-card");
    let shadow = tree.attach_shadow(host).unwrap();
    let inner = tree.create_element("p");
    tree.append_child(shadow, inner).unwrap();

    assert!(!tree.is_connected(inner));
    tree.append_child(tree.root(), host).unwrap();
    assert!(tree.is_connected(inner));
}

#[test]
fn test_shadow_root_cannot_be_appended() {
    let mut tree = DomTree::new();
    let host = tree.create_element("x-card");
    let shadow = tree.attach_shadow(host).unwrap();
    let other = tree.create_element("div");
    assert!(matches!(tree.append_child(other, shadow), Err(DomError::HierarchyRequest { .. })));
}

#[test]
fn test_query_does_not_enter_shadow() {
    let mut tree = DomTree::new();
    let host = tree.create_element("x-card");
    tree.append_child(tree.root(), host).unwrap();
    let shadow = tree.attach_shadow(host).unwrap();
    let hidden = tree.create_element("button");
    tree.append_child(shadow, hidden).unwrap();

    assert_eq!(tree.query_selector(tree.root(), "button"), None);
    assert_eq!(tree.query_selector(shadow, "button"), Some(hidden));
}

// ============================================================================
// LISTENERS
// ============================================================================

type Callback = dyn Fn() -> u32;

#[test]
fn test_listener_removal_by_identity() {
    let mut table: ListenerTable<Callback> = ListenerTable::new();
    let target = NodeId::ROOT;
    let first: Rc<Callback> = Rc::new(|| 1);
    let twin: Rc<Callback> = Rc::new(|| 1);
    table.add(target, "click", first.clone());
    table.add(target, "click", twin.clone());

    assert!(table.remove(target, "click", &twin));
    assert!(!table.remove(target, "click", &twin));
    let left = table.get(target, "click");
    assert_eq!(left.len(), 1);
    assert!(Rc::ptr_eq(&left[0], &first));
}

#[test]
fn test_listeners_keyed_by_event_name() {
    let mut table: ListenerTable<Callback> = ListenerTable::new();
    let handler: Rc<Callback> = Rc::new(|| 0);
    table.add(NodeId::ROOT, "click", handler.clone());

    assert_eq!(table.count(NodeId::ROOT, "keyup"), 0);
    assert!(!table.remove(NodeId::ROOT, "keyup", &handler));
    assert_eq!(table.count(NodeId::ROOT, "click"), 1);
}
