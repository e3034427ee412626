//! Runtime state
//!
//! One `Runtime` owns the document, both registries, every mounted
//! component and controller, and the binding tables that connect them. All
//! of it is single-threaded; the async lifecycle in [`crate::lifecycle`]
//! borrows it only between awaits.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use weft_dom::{Document, DomTree, ListenerTable, NodeId};

use crate::binding::Dynamics;
use crate::component::{ComponentContext, ComponentRegistry, Component, Instance, LoadState};
use crate::config::RuntimeConfig;
use crate::controller::{Controller, ControllerRegistry};
use crate::error::{Result, RuntimeError};
use crate::event::{Event, Handler};
use crate::interpolate::Golden;
use crate::ledger::DisposableLedger;
use crate::scope::Scope;
use crate::template::{LoadRequest, TemplateCache, TemplateSource};

/// The component runtime
pub struct Runtime {
    pub(crate) document: Document,
    pub(crate) components: ComponentRegistry,
    pub(crate) controller_classes: ControllerRegistry,
    pub(crate) source: Rc<dyn TemplateSource>,
    pub(crate) config: RuntimeConfig,
    pub(crate) templates: Rc<RefCell<TemplateCache>>,
    pub(crate) instances: HashMap<NodeId, Instance>,
    pub(crate) controllers: HashMap<NodeId, Controller>,
    /// Scope recorded for component hosts and controller elements
    pub(crate) scopes: HashMap<NodeId, Scope>,
    pub(crate) dynamics: HashMap<NodeId, Dynamics>,
    pub(crate) goldens: HashMap<NodeId, Golden>,
    pub(crate) listeners: ListenerTable<Handler>,
    /// (owner, property) writes currently propagating
    pub(crate) propagating: HashSet<(NodeId, String)>,
    /// Propagating pairs written again mid-pass
    pub(crate) deferred: HashSet<(NodeId, String)>,
}

impl Runtime {
    pub fn new(
        document: Document,
        components: ComponentRegistry,
        controller_classes: ControllerRegistry,
        source: Rc<dyn TemplateSource>,
    ) -> Self {
        Self {
            document,
            components,
            controller_classes,
            source,
            config: RuntimeConfig::default(),
            templates: Rc::new(RefCell::new(TemplateCache::new())),
            instances: HashMap::new(),
            controllers: HashMap::new(),
            scopes: HashMap::new(),
            dynamics: HashMap::new(),
            goldens: HashMap::new(),
            listeners: ListenerTable::new(),
            propagating: HashSet::new(),
            deferred: HashSet::new(),
        }
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tree(&self) -> &DomTree {
        &self.document.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.document.tree
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn instance(&self, host: NodeId) -> Option<&Instance> {
        self.instances.get(&host)
    }

    pub fn load_state(&self, host: NodeId) -> Option<LoadState> {
        self.instances.get(&host).map(Instance::state)
    }

    /// Mounted component hosts, in no particular order
    pub fn hosts(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.instances.keys().copied()
    }

    pub fn ledger(&self, host: NodeId) -> Option<&DisposableLedger> {
        self.instances.get(&host).map(Instance::ledger)
    }

    pub fn template_cache(&self) -> std::cell::Ref<'_, TemplateCache> {
        self.templates.borrow()
    }

    // ------------------------------------------------------------------
    // Controllers
    // ------------------------------------------------------------------

    pub fn controller(&self, element: NodeId) -> Option<&Controller> {
        self.controllers.get(&element)
    }

    pub fn has_controller(&self, element: NodeId) -> bool {
        self.controllers.contains_key(&element)
    }

    /// Attach a controller to `element`. Once attached it is never replaced.
    pub fn attach_controller(&mut self, element: NodeId, controller: Controller) -> Result<()> {
        if self.controllers.contains_key(&element) {
            return Err(RuntimeError::ControllerAlreadyAttached(element));
        }
        tracing::debug!(%element, class = controller.class_name(), "Attached controller");
        self.controllers.insert(element, controller);
        Ok(())
    }

    /// Instantiate the class named by `element`'s `[controller]` attribute.
    /// Unknown classes are logged and leave the element without a controller.
    pub(crate) fn instantiate_declared_controller(&mut self, element: NodeId) {
        let Some(class) = declared_controller(self.tree(), element) else {
            return;
        };
        if self.controllers.contains_key(&element) {
            return;
        }
        match self.controller_classes.instantiate(&class) {
            Some(controller) => {
                // Checked above; cannot already be attached.
                let _ = self.attach_controller(element, controller);
            }
            None => tracing::warn!(%element, "{}", RuntimeError::UnknownController(class)),
        }
    }

    // ------------------------------------------------------------------
    // Mounting
    // ------------------------------------------------------------------

    /// Scope in effect at `element` (its own frame included)
    pub fn scope_of(&self, element: NodeId) -> Scope {
        let mut current = Some(element);
        while let Some(node) = current {
            if let Some(scope) = self.scopes.get(&node) {
                return scope.clone();
            }
            current = self.tree().composed_parent(node);
        }
        Scope::root()
    }

    /// Connect the descendants of `root` under `scope`. Returns the hosts of
    /// newly constructed components, whose lifecycles still need driving.
    pub(crate) fn connect_children(&mut self, root: NodeId, scope: &Scope) -> Vec<NodeId> {
        let mut hosts = Vec::new();
        for child in self.tree().child_ids(root) {
            self.connect_node(child, scope, &mut hosts);
        }
        hosts
    }

    fn connect_node(&mut self, node: NodeId, scope: &Scope, hosts: &mut Vec<NodeId>) {
        let Some(tag) = self.tree().tag_name(node).map(str::to_string) else {
            return;
        };

        let declared = declared_controller(self.tree(), node);
        let scope = match &declared {
            Some(class) => scope.enter(node, class),
            None => scope.clone(),
        };

        let constructed = match self.components.get(&tag) {
            Some(_) if self.instances.contains_key(&node) => false,
            Some(class) => {
                let instance = Instance::new(&tag, class.construct());
                self.instances.insert(node, instance);
                tracing::debug!(host = %node, "Constructed <{}>", tag);
                true
            }
            None => false,
        };

        let is_host = self.instances.contains_key(&node);
        if is_host || declared.is_some() {
            self.scopes.insert(node, scope.clone());
        }
        // Plain elements get their controller now; hosts after their upgrade.
        if !is_host && declared.is_some() {
            self.instantiate_declared_controller(node);
        }
        if constructed {
            hosts.push(node);
        }
        if is_host {
            self.with_component(node, |component, cx| component.on_connected(cx));
        }

        for child in self.tree().child_ids(node) {
            self.connect_node(child, &scope, hosts);
        }
    }

    /// Append `child` to `parent`, firing `slotchange` on the slot it lands
    /// in and connecting any components it carries.
    pub(crate) fn insert_child(&mut self, parent: NodeId, child: NodeId) -> Result<Vec<NodeId>> {
        self.tree_mut().append_child(parent, child)?;

        if let Some(slot) = self.tree().assigned_slot(parent, child) {
            self.dispatch_event(Event::new("slotchange", slot));
        }

        if !self.tree().is_connected(child) {
            return Ok(Vec::new());
        }
        let scope = self.scope_of(parent);
        let mut hosts = Vec::new();
        self.connect_node(child, &scope, &mut hosts);
        Ok(hosts)
    }

    /// Remove `child` from `parent`. Every component in the removed subtree
    /// gets `on_disconnected` and then loses its disposable listeners.
    ///
    /// Controllers, scopes, binding tables and golden snapshots of the
    /// subtree are kept, so a reconnected component stays bound. Like the
    /// arena nodes themselves, they live as long as the runtime.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.tree_mut().remove_child(parent, child)?;

        let mut nodes = vec![child];
        nodes.extend(self.tree().composed_descendants(child));
        for node in nodes {
            if self.instances.contains_key(&node) {
                self.with_component(node, |component, cx| component.on_disconnected(cx));
                self.teardown(node);
            }
        }
        Ok(())
    }

    /// Drop every disposable listener `host` registered
    pub fn teardown(&mut self, host: NodeId) {
        let drained = match self.instances.get_mut(&host) {
            Some(instance) => instance.ledger.drain(),
            None => return,
        };
        tracing::debug!(%host, count = drained.len(), "Removing disposable listeners");
        for entry in drained {
            self.listeners.remove(entry.element, &entry.event, &entry.handler);
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle support
    // ------------------------------------------------------------------

    pub(crate) fn set_state(&mut self, host: NodeId, state: LoadState) {
        if let Some(instance) = self.instances.get_mut(&host) {
            tracing::debug!(%host, from = ?instance.state, to = ?state, "<{}>", instance.tag);
            instance.state = state;
        }
    }

    pub(crate) fn set_chain(&mut self, host: NodeId, chain: Vec<NodeId>) {
        if let Some(instance) = self.instances.get_mut(&host) {
            instance.chain.get_or_insert(chain);
        }
    }

    pub(crate) fn load_request(&self, host: NodeId) -> Result<LoadRequest> {
        let instance = self.instances.get(&host).ok_or(RuntimeError::NotAComponent(host))?;
        let class = self.components.get(&instance.tag).ok_or(RuntimeError::NotAComponent(host))?;
        Ok(LoadRequest {
            class: instance.tag.clone(),
            paths: class.template_paths().under_root(&self.config.template_root),
            source: self.source.clone(),
            policy: self.config.template_retry.clone(),
        })
    }

    pub(crate) fn is_component_host(&self, node: NodeId) -> bool {
        self.tree().tag_name(node).is_some_and(|tag| self.components.contains(tag))
    }

    /// Run a hook on `host`'s component. A component whose hook is already
    /// running is not re-entered.
    pub(crate) fn with_component<R>(
        &mut self,
        host: NodeId,
        f: impl FnOnce(&mut dyn Component, &mut ComponentContext<'_>) -> R,
    ) -> Option<R> {
        let hooks = self.instances.get(&host)?.hooks.clone();
        let Ok(mut component) = hooks.try_borrow_mut() else {
            tracing::warn!(%host, "Component hook re-entered; skipping");
            return None;
        };
        let mut cx = ComponentContext::new(self, host);
        Some(f(&mut **component, &mut cx))
    }

    pub(crate) fn finish_load(&mut self, host: NodeId) {
        self.set_state(host, LoadState::Ready);
        self.with_component(host, |component, cx| component.on_load(cx));
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Dispatch `event` along its composed path. Returns the event so callers
    /// can inspect `default_prevented`.
    pub fn dispatch_event(&mut self, mut event: Event) -> Event {
        let path = self.tree().propagation_path(event.target);
        tracing::trace!(name = %event.name, target = %event.target, "dispatch");

        for (depth, node) in path.into_iter().enumerate() {
            if depth > 0 && !event.bubbles {
                break;
            }
            event.current_target = node;
            for handler in self.listeners.get(node, &event.name) {
                handler(self, &mut event);
            }
            if event.propagation_stopped() {
                break;
            }
        }
        event
    }

    /// Attach a listener owned by component `owner`
    pub fn add_disposable_listener(
        &mut self,
        owner: NodeId,
        element: NodeId,
        event: &str,
        handler: Rc<Handler>,
    ) -> Result<()> {
        let instance = self.instances.get_mut(&owner).ok_or(RuntimeError::NotAComponent(owner))?;
        instance.ledger.record(element, event, handler.clone());
        self.listeners.add(element, event, handler);
        Ok(())
    }

    /// Detach one listener owned by `owner`, matched by handler identity
    pub fn remove_disposable_listener(
        &mut self,
        owner: NodeId,
        element: NodeId,
        event: &str,
        handler: &Rc<Handler>,
    ) -> bool {
        let forgotten = self
            .instances
            .get_mut(&owner)
            .is_some_and(|instance| instance.ledger.forget(element, event, handler));
        forgotten && self.listeners.remove(element, event, handler)
    }

    pub fn listener_count(&self, element: NodeId, event: &str) -> usize {
        self.listeners.count(element, event)
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("url", &self.document.url())
            .field("instances", &self.instances.len())
            .field("controllers", &self.controllers.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

/// Class named by the last `[controller]` attribute on `element`
pub(crate) fn declared_controller(tree: &DomTree, element: NodeId) -> Option<String> {
    tree.attributes(element)
        .iter()
        .rev()
        .find(|attr| attr.name.eq_ignore_ascii_case("[controller]"))
        .map(|attr| attr.value.clone())
}
