//! weft runtime
//!
//! Custom elements backed by fetched templates. Each component is upgraded
//! into a shadow root, bound to the nearest controller through
//! `[attr]="prop"` and `(event)="method"` attributes, and has its
//! `{{prop}}` placeholders filled from the controller chain. Controller
//! writes propagate back to every binding.

mod backoff;
mod binding;
mod component;
mod config;
mod controller;
mod error;
mod event;
mod interpolate;
mod ledger;
mod lifecycle;
mod resolver;
mod runtime;
mod scope;
mod shadow;
mod template;
mod value;

pub use backoff::Backoff;
pub use binding::{BindingKind, Dynamics, Proxy, classify};
pub use component::{Component, ComponentClass, ComponentContext, ComponentRegistry, Instance, LoadState};
pub use config::{RetryPolicy, RuntimeConfig};
pub use controller::{Controller, ControllerClass, ControllerRegistry, MethodFn};
pub use error::{ConfigError, RegistryError, Result, RuntimeError, TemplateFetchError};
pub use event::{Event, Handler};
pub use interpolate::{Placeholder, find_placeholder};
pub use ledger::{Disposable, DisposableLedger};
pub use lifecycle::RuntimeHandle;
pub use resolver::{ancestor_chain, resolve_nearest, wait_for_controller};
pub use runtime::Runtime;
pub use scope::Scope;
pub use template::{InMemorySource, Template, TemplateCache, TemplatePaths, TemplateSource, fetch_template};
pub use value::Value;

pub use weft_dom::NodeId;
