//! Base types for plain (unwrapped) objects.

use crate::capability::{validate_method_name, validate_type_name, Method};
use crate::composer::LayerComposer;
use crate::detect::Link;
use crate::object::Object;
use laminate_core::Result;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// A named base type with its own methods and an optional superclass.
///
/// Every class owns the [`LayerComposer`] used to wrap its instances, so
/// wrapper types synthesized for a class live exactly as long as the class.
pub struct Class {
    name: String,
    superclass: Option<Arc<Class>>,
    methods: BTreeMap<String, Method>,
    reachable: BTreeSet<String>,
    link: Arc<Link>,
    composer: LayerComposer,
}

impl Class {
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            superclass: None,
            methods: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn superclass(&self) -> Option<&Arc<Class>> { self.superclass.as_ref() }

    /// Every method reachable on instances, including inherited ones.
    pub fn methods(&self) -> &BTreeSet<String> { &self.reachable }

    /// Resolve a method, searching this class before its superclasses.
    pub fn resolve(&self, name: &str) -> Option<&Method> {
        let mut class = Some(self);
        while let Some(c) = class {
            if let Some(method) = c.methods.get(name) {
                return Some(method);
            }
            class = c.superclass.as_deref();
        }
        None
    }

    /// Name of the class in the hierarchy that defines `name`.
    pub fn origin_of(&self, name: &str) -> Option<&str> {
        self.link.defined.get(name).map(|s| s.as_str())
    }

    /// True if `self` is `other` or inherits from it.
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        let mut class = Some(self);
        while let Some(c) = class {
            if std::ptr::eq(c, other) {
                return true;
            }
            class = c.superclass.as_deref();
        }
        false
    }

    pub(crate) fn link(&self) -> &Arc<Link> { &self.link }

    pub fn composer(&self) -> &LayerComposer { &self.composer }

    /// Create an instance carrying the given fields.
    pub fn instantiate(self: &Arc<Self>, fields: Map<String, Value>) -> Object {
        Object::base(self.clone(), fields)
    }

    pub fn new_object(self: &Arc<Self>) -> Object {
        self.instantiate(Map::new())
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|s| s.name()))
            .field("methods", &self.reachable)
            .finish()
    }
}

pub struct ClassBuilder {
    name: String,
    superclass: Option<Arc<Class>>,
    methods: BTreeMap<String, Method>,
}

impl ClassBuilder {
    pub fn extends(mut self, superclass: &Arc<Class>) -> Self {
        self.superclass = Some(superclass.clone());
        self
    }

    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Object, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(f));
        self
    }

    pub fn build(self) -> Result<Arc<Class>> {
        validate_type_name("class", &self.name)?;
        for name in self.methods.keys() {
            validate_method_name(&self.name, name)?;
        }

        let mut link = match &self.superclass {
            Some(parent) => Link::clone(&parent.link),
            None => Link::new(self.name.clone()),
        };
        link.label = self.name.clone();
        for name in self.methods.keys() {
            link.define(name.clone(), self.name.clone());
        }
        let reachable = link.defined.keys().cloned().collect();

        Ok(Arc::new(Class {
            name: self.name,
            superclass: self.superclass,
            methods: self.methods,
            reachable,
            link: Arc::new(link),
            composer: LayerComposer::new(),
        }))
    }
}
