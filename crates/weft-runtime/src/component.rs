//! Components
//!
//! A component is a custom element backed by a template. The runtime drives
//! each instance through the load lifecycle and calls back into the
//! [`Component`] hooks; consumers only ever see a [`ComponentContext`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use weft_dom::{DomTree, NodeId};

use crate::error::{RegistryError, Result};
use crate::event::{Event, Handler};
use crate::ledger::DisposableLedger;
use crate::runtime::Runtime;
use crate::template::TemplatePaths;

/// Hooks a component may implement. All have empty defaults.
pub trait Component {
    /// Called once, after bindings and interpolation
    fn on_load(&mut self, _cx: &mut ComponentContext<'_>) {}

    /// Called whenever the host is connected to the document
    fn on_connected(&mut self, _cx: &mut ComponentContext<'_>) {}

    /// Called when the host leaves the document, before its listeners are torn down
    fn on_disconnected(&mut self, _cx: &mut ComponentContext<'_>) {}

    /// Whether to bind [`Component::on_slot_change`] on every shadow `<slot>`
    fn observes_slot_changes(&self) -> bool {
        false
    }

    fn on_slot_change(&mut self, _cx: &mut ComponentContext<'_>, _event: &Event) {}

    /// A property binding rewrote one of the host's attributes
    fn on_attribute_changed(&mut self, _cx: &mut ComponentContext<'_>, _name: &str, _old: Option<&str>, _new: &str) {}

    /// A listener registered with [`ComponentContext::listen`] fired
    fn on_event(&mut self, _cx: &mut ComponentContext<'_>, _handler: &str, _event: &mut Event) {}
}

/// Per-instance load progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoadState {
    Constructed,
    TemplateLoading,
    ShadowUpgraded,
    ControllerResolving,
    BindingsInitialized,
    Interpolated,
    Ready,
}

type Construct = dyn Fn() -> Box<dyn Component>;

/// A component class: tag, template location and constructor
#[derive(Clone)]
pub struct ComponentClass {
    tag: String,
    source: String,
    paths: Option<TemplatePaths>,
    construct: Rc<Construct>,
}

impl ComponentClass {
    /// Templates default to `components/{tag}/{tag}.html` and `.css`
    pub fn new(tag: &str, construct: impl Fn() -> Box<dyn Component> + 'static) -> Self {
        Self {
            tag: tag.to_string(),
            source: format!("components/{tag}/{tag}"),
            paths: None,
            construct: Rc::new(construct),
        }
    }

    /// Class for a `Default` component type
    pub fn of<C: Component + Default + 'static>(tag: &str) -> Self {
        Self::new(tag, || Box::new(C::default()))
    }

    /// Source path (without extension) the template paths derive from
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    /// Explicit template paths, overriding the source convention
    pub fn with_paths(mut self, paths: TemplatePaths) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn template_paths(&self) -> TemplatePaths {
        self.paths.clone().unwrap_or_else(|| TemplatePaths::from_source(&self.source))
    }

    pub(crate) fn construct(&self) -> Box<dyn Component> {
        (self.construct)()
    }
}

impl fmt::Debug for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClass")
            .field("tag", &self.tag)
            .field("source", &self.source)
            .field("paths", &self.paths)
            .finish()
    }
}

/// Tag to component class map
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    classes: HashMap<String, ComponentClass>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a custom element
    pub fn define(&mut self, class: ComponentClass) -> Result<(), RegistryError> {
        if !Self::is_valid_name(class.tag()) {
            return Err(RegistryError::InvalidName(class.tag().to_string()));
        }
        if self.classes.contains_key(class.tag()) {
            return Err(RegistryError::ComponentAlreadyDefined(class.tag().to_string()));
        }
        tracing::debug!("Defined component <{}>", class.tag());
        self.classes.insert(class.tag().to_string(), class);
        Ok(())
    }

    pub fn get(&self, tag: &str) -> Option<&ComponentClass> {
        self.classes.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.classes.contains_key(tag)
    }

    /// Validate custom element name
    fn is_valid_name(name: &str) -> bool {
        // Must contain hyphen
        if !name.contains('-') {
            return false;
        }

        // Must start with lowercase letter
        if !name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
            return false;
        }

        if name.chars().any(|c| c.is_ascii_uppercase()) {
            return false;
        }

        let reserved = ["annotation-xml", "color-profile", "font-face",
                        "font-face-src", "font-face-uri", "font-face-format",
                        "font-face-name", "missing-glyph"];
        !reserved.contains(&name)
    }
}

/// Runtime-side state of one mounted component
pub struct Instance {
    pub(crate) tag: String,
    pub(crate) state: LoadState,
    pub(crate) shadow: Option<NodeId>,
    /// Controller elements used for interpolation, nearest first
    pub(crate) chain: Option<Vec<NodeId>>,
    pub(crate) ledger: DisposableLedger,
    pub(crate) hooks: Rc<RefCell<Box<dyn Component>>>,
}

impl Instance {
    pub(crate) fn new(tag: &str, component: Box<dyn Component>) -> Self {
        Self {
            tag: tag.to_string(),
            state: LoadState::Constructed,
            shadow: None,
            chain: None,
            ledger: DisposableLedger::new(),
            hooks: Rc::new(RefCell::new(component)),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn shadow_root(&self) -> Option<NodeId> {
        self.shadow
    }

    pub fn chain(&self) -> Option<&[NodeId]> {
        self.chain.as_deref()
    }

    pub fn ledger(&self) -> &DisposableLedger {
        &self.ledger
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("tag", &self.tag)
            .field("state", &self.state)
            .field("shadow", &self.shadow)
            .field("listeners", &self.ledger.len())
            .finish_non_exhaustive()
    }
}

/// What a component hook can reach: its host and the runtime
pub struct ComponentContext<'a> {
    runtime: &'a mut Runtime,
    host: NodeId,
}

impl<'a> ComponentContext<'a> {
    pub(crate) fn new(runtime: &'a mut Runtime, host: NodeId) -> Self {
        Self { runtime, host }
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn runtime(&mut self) -> &mut Runtime {
        &mut *self.runtime
    }

    pub fn tree(&self) -> &DomTree {
        self.runtime.tree()
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        self.runtime.tree_mut()
    }

    /// Attribute of the host element
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.tree().attribute(self.host, name).map(str::to_string)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.tree().has_attribute(self.host, name)
    }

    pub fn shadow_root(&self) -> Option<NodeId> {
        self.tree().shadow_root(self.host)
    }

    /// First match inside the host's shadow root
    pub fn shadow_query(&self, selector: &str) -> Option<NodeId> {
        let shadow = self.shadow_root()?;
        self.tree().query_selector(shadow, selector)
    }

    /// First match among the host's light children
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        self.tree().query_selector(self.host, selector)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.tree_mut().set_attribute(node, name, value)?;
        Ok(())
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        Ok(self.tree_mut().add_class(node, class)?)
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        Ok(self.tree_mut().remove_class(node, class)?)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()> {
        Ok(self.tree_mut().set_style_property(node, property, value)?)
    }

    /// Listen for `event` on `element`, routing it to [`Component::on_event`]
    /// with `handler` as the handler name. The listener is disposable.
    pub fn listen(&mut self, element: NodeId, event: &str, handler: &str) -> Result<Rc<Handler>> {
        let host = self.host;
        let name = handler.to_string();
        let callback: Rc<Handler> = Rc::new(move |rt: &mut Runtime, ev: &mut Event| {
            rt.with_component(host, |component, cx| component.on_event(cx, &name, ev));
        });
        self.add_disposable_listener(element, event, callback.clone())?;
        Ok(callback)
    }

    /// Attach `handler` and record it for teardown on disconnect
    pub fn add_disposable_listener(&mut self, element: NodeId, event: &str, handler: Rc<Handler>) -> Result<()> {
        self.runtime.add_disposable_listener(self.host, element, event, handler)
    }

    /// Detach exactly this handler
    pub fn remove_disposable_listener(&mut self, element: NodeId, event: &str, handler: &Rc<Handler>) -> bool {
        self.runtime.remove_disposable_listener(self.host, element, event, handler)
    }

    pub fn dispatch_event(&mut self, event: Event) -> Event {
        self.runtime.dispatch_event(event)
    }
}
