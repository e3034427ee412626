//! Component lifecycle
//!
//! Each constructed component gets one task on a local executor that walks
//! it through the load states:
//!
//! ```text
//! Constructed -> TemplateLoading -> ShadowUpgraded -> ControllerResolving
//!             -> BindingsInitialized -> Interpolated -> Ready
//! ```
//!
//! Template loading and controller polling are the only suspension points.
//! The runtime is borrowed between them, never across one.

use std::cell::{Ref, RefCell, RefMut};
use std::future::Future;
use std::rc::Rc;

use smol::{LocalExecutor, Task};
use weft_dom::NodeId;

use crate::component::LoadState;
use crate::error::{Result, RuntimeError};
use crate::event::Event;
use crate::resolver::{ancestor_chain, resolve_nearest, still_wanted};
use crate::runtime::Runtime;
use crate::scope::Scope;
use crate::template::load_template;
use crate::Value;

type Lifecycle = (NodeId, Task<Result<()>>);

/// Shared handle driving a [`Runtime`] on a single-threaded executor
#[derive(Clone)]
pub struct RuntimeHandle {
    runtime: Rc<RefCell<Runtime>>,
    executor: Rc<LocalExecutor<'static>>,
    tasks: Rc<RefCell<Vec<Lifecycle>>>,
}

impl RuntimeHandle {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime: Rc::new(RefCell::new(runtime)),
            executor: Rc::new(LocalExecutor::new()),
            tasks: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Borrow the runtime. Do not hold the borrow across an await.
    pub fn runtime(&self) -> Ref<'_, Runtime> {
        self.runtime.borrow()
    }

    pub fn runtime_mut(&self) -> RefMut<'_, Runtime> {
        self.runtime.borrow_mut()
    }

    pub fn shared(&self) -> Rc<RefCell<Runtime>> {
        self.runtime.clone()
    }

    /// Connect the whole document and start a lifecycle for every component
    /// found. Returns the number of lifecycles started.
    pub fn mount(&self) -> usize {
        let hosts = {
            let mut rt = self.runtime.borrow_mut();
            let root = rt.tree().root();
            rt.connect_children(root, &Scope::root())
        };
        tracing::info!(components = hosts.len(), "Mounted document");
        let count = hosts.len();
        for host in hosts {
            self.spawn_lifecycle(host);
        }
        count
    }

    /// Append `child` under `parent`, starting lifecycles for any new components
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let hosts = self.runtime.borrow_mut().insert_child(parent, child)?;
        for host in hosts {
            self.spawn_lifecycle(host);
        }
        Ok(())
    }

    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.runtime.borrow_mut().remove_child(parent, child)
    }

    pub fn dispatch(&self, event: Event) -> Event {
        self.runtime.borrow_mut().dispatch_event(event)
    }

    pub fn write_property(&self, owner: NodeId, name: &str, value: impl Into<Value>) -> bool {
        self.runtime.borrow_mut().write_property(owner, name, value)
    }

    /// Run `future` to completion while driving the executor
    pub fn block_on<T>(&self, future: impl Future<Output = T>) -> T {
        smol::block_on(self.executor.run(future))
    }

    /// Wait for every started lifecycle, including ones started along the
    /// way. Returns the failures.
    pub async fn settle(&self) -> Vec<(NodeId, RuntimeError)> {
        let mut failures = Vec::new();
        loop {
            let batch = std::mem::take(&mut *self.tasks.borrow_mut());
            if batch.is_empty() {
                return failures;
            }
            for (host, task) in batch {
                if let Err(err) = task.await {
                    failures.push((host, err));
                }
            }
        }
    }

    pub fn run_until_settled(&self) -> Vec<(NodeId, RuntimeError)> {
        self.block_on(self.settle())
    }

    fn spawn_lifecycle(&self, host: NodeId) {
        let task = self.executor.spawn(run_lifecycle(self.clone(), host));
        self.tasks.borrow_mut().push((host, task));
    }
}

impl std::fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field("pending", &self.tasks.borrow().len())
            .finish_non_exhaustive()
    }
}

async fn run_lifecycle(handle: RuntimeHandle, host: NodeId) -> Result<()> {
    let result = drive(&handle, host).await;
    match &result {
        Ok(()) => tracing::debug!(%host, "Component ready"),
        Err(RuntimeError::Cancelled(_)) => tracing::debug!(%host, "Component load cancelled"),
        Err(err) => tracing::error!(%host, "{}", err),
    }
    result
}

async fn drive(handle: &RuntimeHandle, host: NodeId) -> Result<()> {
    let runtime = &*handle.runtime;

    let (request, templates) = {
        let mut rt = runtime.borrow_mut();
        rt.set_state(host, LoadState::TemplateLoading);
        (rt.load_request(host)?, rt.templates.clone())
    };
    let tag = request.class.clone();
    let template = load_template(&templates, request, || still_wanted(&runtime.borrow(), host))
        .await
        .map_err(|failure| failure.into_runtime_error(&tag, host))?;

    let children = {
        let mut rt = runtime.borrow_mut();
        let shadow = rt.upgrade(host, &template)?;
        rt.instantiate_declared_controller(host);
        let scope = rt.scope_of(host);
        rt.connect_children(shadow, &scope)
    };
    for child in children {
        handle.spawn_lifecycle(child);
    }

    runtime.borrow_mut().set_state(host, LoadState::ControllerResolving);
    let owner = match resolve_nearest(runtime, host).await {
        Ok(owner) => owner,
        Err(err @ RuntimeError::ControllerWait { .. }) => {
            tracing::warn!(%host, "{}; binding without a controller", err);
            None
        }
        Err(err) => return Err(err),
    };

    let has_targets = {
        let mut rt = runtime.borrow_mut();
        rt.initialize_bindings(host, owner);
        !rt.find_targets(host).is_empty()
    };
    if has_targets {
        let chain = ancestor_chain(runtime, host).await?;
        let mut rt = runtime.borrow_mut();
        rt.set_chain(host, chain);
        rt.interpolate(host);
    }

    let mut rt = runtime.borrow_mut();
    rt.set_state(host, LoadState::Interpolated);
    rt.finish_load(host);
    Ok(())
}
