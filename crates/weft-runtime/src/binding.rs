//! Binding engine
//!
//! Declarative attributes on a component host:
//!
//! - `[controller]="Class"` declares a controller (handled at mount)
//! - `[attr]="prop"` keeps attribute `attr` in sync with `prop`
//! - `(event)="method"` calls `method` when `event` fires on the host
//!
//! Writes made by bound methods go through a [`Proxy`], which assigns the
//! property and then pushes the new value to attribute bindings and
//! interpolation targets.

use std::collections::HashMap;
use std::rc::Rc;

use weft_dom::{DomTree, NodeId};

use crate::component::LoadState;
use crate::event::{Event, Handler};
use crate::runtime::Runtime;
use crate::Value;

/// What a host attribute declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind<'a> {
    Controller,
    /// Attribute name to keep in sync
    Property(&'a str),
    /// Event name to listen for
    Event(&'a str),
    Plain,
}

/// Classify an attribute name
pub fn classify(name: &str) -> BindingKind<'_> {
    if name.eq_ignore_ascii_case("[controller]") {
        return BindingKind::Controller;
    }
    if let Some(inner) = name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
        if !inner.is_empty() {
            return BindingKind::Property(inner);
        }
    }
    if let Some(inner) = name.strip_prefix('(').and_then(|n| n.strip_suffix(')')) {
        if !inner.is_empty() {
            return BindingKind::Event(inner);
        }
    }
    BindingKind::Plain
}

/// Binding tables kept per element
#[derive(Debug, Default, Clone)]
pub struct Dynamics {
    /// On a listening component: property -> attribute it drives
    pub attributes: HashMap<String, String>,
    /// On a controller element: property -> components with an attribute bound to it
    pub attribute_listeners: HashMap<String, Vec<NodeId>>,
    /// On a controller element: property -> interpolation targets
    pub interpolations: HashMap<String, Vec<NodeId>>,
}

pub(crate) fn push_unique(list: &mut Vec<NodeId>, node: NodeId) {
    if !list.contains(&node) {
        list.push(node);
    }
}

/// Write access to one controller on behalf of a listening component
pub struct Proxy<'a> {
    runtime: &'a mut Runtime,
    owner: NodeId,
    listener: NodeId,
}

impl<'a> Proxy<'a> {
    pub fn new(runtime: &'a mut Runtime, owner: NodeId, listener: NodeId) -> Self {
        Self { runtime, owner, listener }
    }

    /// Element owning the controller
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// Component whose binding invoked the method
    pub fn listener(&self) -> NodeId {
        self.listener
    }

    /// Read a property
    pub fn get(&self, name: &str) -> Option<Value> {
        self.runtime.controller(self.owner)?.get(name).cloned()
    }

    /// Write a property and propagate it. Always reports success.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        self.runtime.write_through(self.owner, Some(self.listener), name, value.into())
    }

    pub fn tree(&self) -> &DomTree {
        self.runtime.tree()
    }

    pub fn dispatch_event(&mut self, event: Event) -> Event {
        self.runtime.dispatch_event(event)
    }

    pub fn runtime(&mut self) -> &mut Runtime {
        &mut *self.runtime
    }
}

impl Runtime {
    /// Binding tables of an element
    pub fn dynamics(&self, element: NodeId) -> Option<&Dynamics> {
        self.dynamics.get(&element)
    }

    /// Wire `host`'s binding attributes against the controller on `owner`
    pub(crate) fn initialize_bindings(&mut self, host: NodeId, owner: Option<NodeId>) {
        let attrs = self.tree().attributes(host).to_vec();
        for attr in &attrs {
            match classify(&attr.name) {
                BindingKind::Property(name) => self.bind_property(host, owner, name, &attr.value),
                BindingKind::Event(name) => self.bind_event(host, owner, name, &attr.value),
                BindingKind::Controller | BindingKind::Plain => {}
            }
        }
        self.set_state(host, LoadState::BindingsInitialized);
    }

    fn bind_property(&mut self, host: NodeId, owner: Option<NodeId>, attribute: &str, property: &str) {
        let initial = owner
            .and_then(|o| self.controllers.get(&o))
            .and_then(|c| c.get(property))
            .cloned();
        if let Some(value) = initial {
            self.apply_attribute(host, attribute, &value, true);
        }

        self.dynamics
            .entry(host)
            .or_default()
            .attributes
            .insert(property.to_string(), attribute.to_string());
        if let Some(owner) = owner {
            let listeners = self.dynamics.entry(owner).or_default().attribute_listeners.entry(property.to_string()).or_default();
            push_unique(listeners, host);
        }
    }

    fn bind_event(&mut self, host: NodeId, owner: Option<NodeId>, event: &str, method_name: &str) {
        let Some(controller) = owner.and_then(|o| self.controllers.get(&o)) else {
            tracing::warn!(%host, event, method = method_name, "No controller in scope for event binding");
            return;
        };
        let class = controller.class_name().to_string();
        let Some(method) = controller.method(method_name) else {
            tracing::warn!(
                property = method_name,
                controller = %class,
                "Property with name '{}' not found in '{}' controller!",
                method_name,
                class
            );
            return;
        };
        let Some(owner) = owner else {
            return;
        };

        tracing::info!("Proxying event '{}' to '{}' method named '{}'", event, class, method_name);
        let handler: Rc<Handler> = Rc::new(move |rt: &mut Runtime, ev: &mut Event| {
            let mut proxy = Proxy::new(rt, owner, host);
            method(&mut proxy, ev);
        });
        if let Err(err) = self.add_disposable_listener(host, host, event, handler) {
            tracing::warn!(%host, event, "Event binding not attached: {}", err);
        }
    }

    /// Set a bound attribute. With `notify`, the component hears about it.
    fn apply_attribute(&mut self, node: NodeId, attribute: &str, value: &Value, notify: bool) {
        let new = value.to_string();
        let old = match self.tree_mut().set_attribute(node, attribute, &new) {
            Ok(old) => old,
            Err(err) => {
                tracing::warn!(%node, attribute, "{}", err);
                return;
            }
        };
        if notify && old.as_deref() != Some(new.as_str()) {
            self.with_component(node, |component, cx| {
                component.on_attribute_changed(cx, attribute, old.as_deref(), &new)
            });
        }
    }

    /// Assign a controller property and push it to every binding
    pub fn write_property(&mut self, owner: NodeId, name: &str, value: impl Into<Value>) -> bool {
        self.write_through(owner, None, name, value.into())
    }

    /// Observable setter behind [`Proxy::set`]. `listener` is the component
    /// whose binding made the write, if any.
    ///
    /// A write to a property that is already propagating is assigned at once
    /// and pushed to the bindings when the outer pass ends, without calling
    /// component hooks a second time.
    pub(crate) fn write_through(&mut self, owner: NodeId, listener: Option<NodeId>, name: &str, value: Value) -> bool {
        let Some(controller) = self.controllers.get_mut(&owner) else {
            tracing::warn!(%owner, property = name, "Write to element without a controller");
            return true;
        };
        controller.set(name, value.clone());

        let key = (owner, name.to_string());
        if !self.propagating.insert(key.clone()) {
            tracing::debug!(%owner, property = name, "Write during its own propagation; deferred");
            self.deferred.insert(key);
            return true;
        }

        self.propagate(owner, listener, name, &value, true);

        if self.deferred.remove(&key) {
            let latest = self.controllers.get(&owner).and_then(|c| c.get(name)).cloned();
            if let Some(latest) = latest {
                self.propagate(owner, listener, name, &latest, false);
            }
        }
        self.propagating.remove(&key);
        true
    }

    fn propagate(&mut self, owner: NodeId, listener: Option<NodeId>, name: &str, value: &Value, notify: bool) {
        let mut listeners: Vec<NodeId> = listener.into_iter().collect();
        if let Some(registered) = self.dynamics.get(&owner).and_then(|d| d.attribute_listeners.get(name)) {
            for &node in registered {
                push_unique(&mut listeners, node);
            }
        }
        for node in listeners {
            let attribute = self.dynamics.get(&node).and_then(|d| d.attributes.get(name)).cloned();
            if let Some(attribute) = attribute {
                self.apply_attribute(node, &attribute, value, notify);
            }
        }

        let targets = self
            .dynamics
            .get(&owner)
            .and_then(|d| d.interpolations.get(name))
            .cloned()
            .unwrap_or_default();
        for target in targets {
            self.render_target(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("[controller]"), BindingKind::Controller);
        assert_eq!(classify("[Controller]"), BindingKind::Controller);
        assert_eq!(classify("[disabled]"), BindingKind::Property("disabled"));
        assert_eq!(classify("(click)"), BindingKind::Event("click"));
        assert_eq!(classify("id"), BindingKind::Plain);
        assert_eq!(classify("[]"), BindingKind::Plain);
        assert_eq!(classify("(click"), BindingKind::Plain);
    }
}
