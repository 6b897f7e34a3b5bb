//! Objects and their runtime types.
//!
//! An [`Object`] is either a plain instance of a [`Class`] or a wrapper
//! around another object (its ancestor). Wrappers form an explicit chain:
//! each one holds its ancestor, the modules applied at that step, and the
//! shared [`WrapperDescriptor`] that drives dispatch.

use crate::capability::{CapabilityModule, CapabilitySet};
use crate::class::Class;
use crate::composer::LayerComposer;
use crate::detect::Link;
use crate::factory::WrapperDescriptor;
use laminate_core::{Error, LayerOptions, Result};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// The runtime type of an object. Compared by identity.
#[derive(Clone)]
pub enum TypeRef {
    Class(Arc<Class>),
    Wrapper(Arc<WrapperDescriptor>),
}

impl TypeRef {
    pub fn name(&self) -> &str {
        match self {
            Self::Class(c) => c.name(),
            Self::Wrapper(d) => d.name(),
        }
    }

    /// Every method name reachable on instances of this type.
    pub fn methods(&self) -> &BTreeSet<String> {
        match self {
            Self::Class(c) => c.methods(),
            Self::Wrapper(d) => d.methods(),
        }
    }

    /// Head of this type's ancestor chain; walk it with [`Link::chain`].
    pub(crate) fn link(&self) -> &Arc<Link> {
        match self {
            Self::Class(c) => c.link(),
            Self::Wrapper(d) => d.link(),
        }
    }

    pub fn composer(&self) -> &LayerComposer {
        match self {
            Self::Class(c) => c.composer(),
            Self::Wrapper(d) => d.composer(),
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Class(a), Self::Class(b)) => Arc::ptr_eq(a, b),
            (Self::Wrapper(a), Self::Wrapper(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for TypeRef {}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.name())
    }
}

/// Handle to a plain or wrapped object. Cloning shares the same object.
#[derive(Clone)]
pub struct Object(Arc<Repr>);

enum Repr {
    Base(Instance),
    Wrapped(WrapperInstance),
}

struct Instance {
    class: Arc<Class>,
    fields: Map<String, Value>,
}

struct WrapperInstance {
    ancestor: Object,
    capabilities: CapabilitySet,
    descriptor: Arc<WrapperDescriptor>,
}

impl Object {
    pub(crate) fn base(class: Arc<Class>, fields: Map<String, Value>) -> Self {
        Self(Arc::new(Repr::Base(Instance { class, fields })))
    }

    pub(crate) fn wrap(
        ancestor: Object,
        capabilities: CapabilitySet,
        descriptor: Arc<WrapperDescriptor>,
    ) -> Self {
        Self(Arc::new(Repr::Wrapped(WrapperInstance {
            ancestor,
            capabilities,
            descriptor,
        })))
    }

    /// Invoke `method` with `args`.
    ///
    /// On a wrapper: a method from the wrapper's own modules runs with the
    /// wrapper as receiver; a forwarded name is passed to the ancestor with
    /// the same arguments and its result (or error) returned as is; anything
    /// else fails with [`Error::NoMethod`].
    pub fn call(&self, method: &str, args: Value) -> Result<Value> {
        let mut target = self;
        loop {
            match &*target.0 {
                Repr::Base(instance) => {
                    return match instance.class.resolve(method) {
                        Some(f) => f(target, args),
                        None => Err(Error::no_method(instance.class.name(), method)),
                    };
                }
                Repr::Wrapped(wrapper) => {
                    if let Some(f) = wrapper.descriptor.local_method(method) {
                        return f(target, args);
                    }
                    if !wrapper.descriptor.forwards(method) {
                        return Err(Error::no_method(wrapper.descriptor.name(), method));
                    }
                    target = &wrapper.ancestor;
                }
            }
        }
    }

    /// Invoke a method that takes no arguments.
    pub fn invoke(&self, method: &str) -> Result<Value> {
        self.call(method, Value::Null)
    }

    pub fn responds_to(&self, method: &str) -> bool {
        self.methods().contains(method)
    }

    pub fn methods(&self) -> &BTreeSet<String> {
        match &*self.0 {
            Repr::Base(instance) => instance.class.methods(),
            Repr::Wrapped(wrapper) => wrapper.descriptor.methods(),
        }
    }

    pub fn type_ref(&self) -> TypeRef {
        match &*self.0 {
            Repr::Base(instance) => TypeRef::Class(instance.class.clone()),
            Repr::Wrapped(wrapper) => TypeRef::Wrapper(wrapper.descriptor.clone()),
        }
    }

    pub fn type_name(&self) -> &str {
        match &*self.0 {
            Repr::Base(instance) => instance.class.name(),
            Repr::Wrapped(wrapper) => wrapper.descriptor.name(),
        }
    }

    /// Plain objects are instances of their class and its superclasses;
    /// wrappers are instances of exactly their synthesized type.
    pub fn is_a(&self, ty: &TypeRef) -> bool {
        match (&*self.0, ty) {
            (Repr::Base(instance), TypeRef::Class(class)) => instance.class.is_subclass_of(class),
            (Repr::Wrapped(wrapper), TypeRef::Wrapper(descriptor)) => {
                Arc::ptr_eq(&wrapper.descriptor, descriptor)
            }
            _ => false,
        }
    }

    /// Instance field of the plain object at the root of the chain.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.instance().fields.get(name)
    }

    /// The object this wrapper was built around. `None` for plain objects.
    pub fn ancestor(&self) -> Option<&Object> {
        match &*self.0 {
            Repr::Base(_) => None,
            Repr::Wrapped(wrapper) => Some(&wrapper.ancestor),
        }
    }

    /// This object followed by each ancestor, ending at the plain object.
    pub fn chain(&self) -> impl Iterator<Item = &Object> {
        std::iter::successors(Some(self), |o| o.ancestor())
    }

    /// The plain object at the root of the chain.
    pub fn root(&self) -> &Object {
        let mut object = self;
        while let Some(ancestor) = object.ancestor() {
            object = ancestor;
        }
        object
    }

    /// The class of the plain object at the root of the chain.
    pub fn class(&self) -> &Arc<Class> {
        &self.instance().class
    }

    fn instance(&self) -> &Instance {
        let mut object = self;
        loop {
            match &*object.0 {
                Repr::Base(instance) => return instance,
                Repr::Wrapped(wrapper) => object = &wrapper.ancestor,
            }
        }
    }

    pub fn capabilities(&self) -> Option<&CapabilitySet> {
        match &*self.0 {
            Repr::Base(_) => None,
            Repr::Wrapped(wrapper) => Some(&wrapper.capabilities),
        }
    }

    /// Modules applied at this step of the chain. Empty for plain objects.
    pub fn applied_modules(&self) -> &[Arc<CapabilityModule>] {
        self.capabilities().map(|c| c.modules()).unwrap_or(&[])
    }

    pub fn descriptor(&self) -> Option<&Arc<WrapperDescriptor>> {
        match &*self.0 {
            Repr::Base(_) => None,
            Repr::Wrapped(wrapper) => Some(&wrapper.descriptor),
        }
    }

    pub fn is_wrapped(&self) -> bool { self.ancestor().is_some() }

    /// True if both handles refer to the same object.
    pub fn ptr_eq(&self, other: &Object) -> bool { Arc::ptr_eq(&self.0, &other.0) }

    pub fn with_layer(&self, module: &Arc<CapabilityModule>, options: &LayerOptions) -> Result<Object> {
        self.type_ref().composer().with_layer(self, module, options)
    }

    pub fn with_layers(&self, modules: &[Arc<CapabilityModule>], options: &LayerOptions) -> Result<Object> {
        self.type_ref().composer().with_layers(self, modules, options)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            Repr::Base(instance) => f
                .debug_struct("Object")
                .field("type", &instance.class.name())
                .field("fields", &instance.fields)
                .finish(),
            Repr::Wrapped(wrapper) => f
                .debug_struct("Object")
                .field("type", &wrapper.descriptor.name())
                .field("ancestor", &wrapper.ancestor)
                .finish(),
        }
    }
}
