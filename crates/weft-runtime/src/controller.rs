//! Controllers
//!
//! A controller is a property bag plus a method table, attached to exactly
//! one element. Descendants read it through their scope and write it through
//! a [`Proxy`](crate::Proxy) so bindings see every change.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::binding::Proxy;
use crate::error::RegistryError;
use crate::event::Event;
use crate::Value;

/// Controller method. The proxy wraps the owning controller; the event is
/// the one that triggered the binding.
pub type MethodFn = dyn Fn(&mut Proxy<'_>, &mut Event);

/// A live controller instance
#[derive(Clone)]
pub struct Controller {
    class_name: String,
    properties: HashMap<String, Value>,
    methods: HashMap<String, Rc<MethodFn>>,
}

impl Controller {
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            properties: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    pub fn with_property(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    pub fn with_method(mut self, name: &str, method: impl Fn(&mut Proxy<'_>, &mut Event) + 'static) -> Self {
        self.methods.insert(name.to_string(), Rc::new(method));
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Assign a property, returning the previous value
    pub fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        self.properties.insert(name.to_string(), value)
    }

    pub fn method(&self, name: &str) -> Option<Rc<MethodFn>> {
        self.methods.get(name).cloned()
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("Controller")
            .field("class_name", &self.class_name)
            .field("properties", &self.properties)
            .field("methods", &methods)
            .finish()
    }
}

/// A named controller constructor
#[derive(Clone)]
pub struct ControllerClass {
    name: String,
    construct: Rc<dyn Fn() -> Controller>,
}

impl ControllerClass {
    pub fn new(name: &str, construct: impl Fn() -> Controller + 'static) -> Self {
        Self {
            name: name.to_string(),
            construct: Rc::new(construct),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ControllerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerClass").field("name", &self.name).finish()
    }
}

/// Name to constructor map, filled once at startup
#[derive(Debug, Default)]
pub struct ControllerRegistry {
    classes: HashMap<String, ControllerClass>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a class under its declared name
    pub fn define(&mut self, class: ControllerClass) -> Result<(), RegistryError> {
        if self.classes.contains_key(class.name()) {
            return Err(RegistryError::ControllerAlreadyDefined(class.name().to_string()));
        }
        tracing::debug!("Defined controller {}", class.name());
        self.classes.insert(class.name().to_string(), class);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Construct a fresh instance of the class registered as `name`
    pub fn instantiate(&self, name: &str) -> Option<Controller> {
        let class = self.classes.get(name)?;
        let mut controller = (class.construct)();
        controller.class_name = class.name.clone();
        Some(controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> ControllerClass {
        ControllerClass::new("CounterController", || {
            Controller::new("CounterController").with_property("count", 0)
        })
    }

    #[test]
    fn test_define_rejects_duplicates() {
        let mut registry = ControllerRegistry::new();
        assert!(registry.define(counter()).is_ok());
        assert_eq!(
            registry.define(counter()),
            Err(RegistryError::ControllerAlreadyDefined("CounterController".into()))
        );
    }

    #[test]
    fn test_instances_are_independent() {
        let mut registry = ControllerRegistry::new();
        registry.define(counter()).unwrap();

        let mut a = registry.instantiate("CounterController").unwrap();
        let b = registry.instantiate("CounterController").unwrap();
        a.set("count", Value::from(5));

        assert_eq!(a.get("count"), Some(&Value::from(5)));
        assert_eq!(b.get("count"), Some(&Value::from(0)));
        assert!(registry.instantiate("Missing").is_none());
    }

    #[test]
    fn test_class_name_follows_registration() {
        let mut registry = ControllerRegistry::new();
        registry.define(ControllerClass::new("Named", || Controller::new("Other"))).unwrap();
        assert_eq!(registry.instantiate("Named").unwrap().class_name(), "Named");
    }
}
