//! Capability modules — named, self-contained bundles of methods.
//!
//! A module knows only its own method names and implementations. It has no
//! dependency on the object it will later be mixed into; the receiver is
//! supplied at call time.

use crate::object::Object;
use laminate_core::{is_reserved, Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// A method implementation. The first argument is the receiver: the wrapper
/// instance for capability methods, the base instance for class methods.
pub type Method = Arc<dyn Fn(&Object, Value) -> Result<Value> + Send + Sync>;

/// Stable identity of a module, independent of its contents.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ModuleId(Uuid);

impl ModuleId {
    fn new() -> Self { Self(Uuid::new_v4()) }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct CapabilityModule {
    id: ModuleId,
    name: String,
    methods: BTreeMap<String, Method>,
}

impl CapabilityModule {
    pub fn builder(name: impl Into<String>) -> CapabilityModuleBuilder {
        CapabilityModuleBuilder {
            name: name.into(),
            methods: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ModuleId { self.id }

    /// Full name, e.g. `TestLayers::Runner`.
    pub fn name(&self) -> &str { &self.name }

    /// Last path segment of the name, e.g. `Runner`.
    pub fn short_name(&self) -> &str { short_name(&self.name) }

    /// Names this module declares itself, in sorted order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize { self.methods.len() }

    pub fn is_empty(&self) -> bool { self.methods.is_empty() }
}

impl fmt::Debug for CapabilityModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityModule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub struct CapabilityModuleBuilder {
    name: String,
    methods: BTreeMap<String, Method>,
}

impl CapabilityModuleBuilder {
    /// Define a method. Defining the same name twice keeps the later body.
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Object, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(f));
        self
    }

    pub fn build(self) -> Result<Arc<CapabilityModule>> {
        validate_type_name("module", &self.name)?;
        for name in self.methods.keys() {
            validate_method_name(&self.name, name)?;
        }
        Ok(Arc::new(CapabilityModule {
            id: ModuleId::new(),
            name: self.name,
            methods: self.methods,
        }))
    }
}

/// An ordered sequence of modules applied together as one layer.
///
/// Equality and hashing follow the ordered module identities, not the
/// module contents, so two sets built from the same modules in the same
/// order are the same cache key.
#[derive(Clone)]
pub struct CapabilitySet(Arc<[Arc<CapabilityModule>]>);

impl CapabilitySet {
    pub fn new(modules: &[Arc<CapabilityModule>]) -> Self {
        Self(modules.iter().cloned().collect())
    }

    pub fn modules(&self) -> &[Arc<CapabilityModule>] { &self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn ids(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.0.iter().map(|m| m.id())
    }

    /// Method name → (implementation, defining module). Later modules
    /// shadow earlier ones.
    pub fn dispatch_table(&self) -> BTreeMap<String, (Method, Arc<CapabilityModule>)> {
        let mut table = BTreeMap::new();
        for module in self.0.iter() {
            for (name, method) in &module.methods {
                table.insert(name.clone(), (method.clone(), module.clone()));
            }
        }
        table
    }

    /// `With` followed by the module short names joined with `And`.
    pub fn combined_name(&self) -> String {
        let names = self.0.iter().map(|m| m.short_name()).collect::<Vec<_>>();
        format!("With{}", names.join("And"))
    }
}

impl PartialEq for CapabilitySet {
    fn eq(&self, other: &Self) -> bool {
        self.ids().eq(other.ids())
    }
}

impl Eq for CapabilitySet {}

impl Hash for CapabilitySet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for id in self.ids() {
            id.hash(state);
        }
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter().map(|m| m.name())).finish()
    }
}

pub(crate) fn short_name(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

pub(crate) fn validate_type_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument(format!("{kind} name must not be empty")));
    }
    if name.split("::").any(|segment| segment.trim().is_empty()) {
        return Err(Error::invalid_argument(format!("{kind} name `{name}' has an empty path segment")));
    }
    Ok(())
}

pub(crate) fn validate_method_name(owner: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument(format!("{owner} defines a method with an empty name")));
    }
    if is_reserved(name) {
        return Err(Error::invalid_argument(format!(
            "{owner} may not define `{name}', it is reserved by the layer framework"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn module(name: &str, methods: &[&'static str]) -> Arc<CapabilityModule> {
        methods
            .iter()
            .fold(CapabilityModule::builder(name), |b, &m| b.method(m, move |_, _| Ok(json!(m))))
            .build()
            .unwrap()
    }

    #[test]
    fn short_name_strips_path() {
        assert_eq!(module("TestLayers::Runner", &["run"]).short_name(), "Runner");
        assert_eq!(module("Sprinter", &[]).short_name(), "Sprinter");
    }

    #[test]
    fn set_equality_is_by_identity_and_order() {
        let a = module("A", &["f"]);
        let b = module("B", &["g"]);
        let lookalike = module("A", &["f"]);
        assert_eq!(CapabilitySet::new(&[a.clone(), b.clone()]), CapabilitySet::new(&[a.clone(), b.clone()]));
        assert_ne!(CapabilitySet::new(&[a.clone(), b.clone()]), CapabilitySet::new(&[b, a.clone()]));
        assert_ne!(CapabilitySet::new(&[a]), CapabilitySet::new(&[lookalike]));
    }

    #[test]
    fn dispatch_table_last_definer_wins() {
        let first = module("First", &["f", "only_first"]);
        let second = module("Second", &["f"]);
        let table = CapabilitySet::new(&[first, second]).dispatch_table();
        assert_eq!(table["f"].1.name(), "Second");
        assert_eq!(table["only_first"].1.name(), "First");
    }

    #[test]
    fn combined_name_joins_short_names() {
        let set = CapabilitySet::new(&[module("T::Runner", &[]), module("T::Sprinter", &[])]);
        assert_eq!(set.combined_name(), "WithRunnerAndSprinter");
    }

    #[test]
    fn empty_path_segment_rejected() {
        let err = CapabilityModule::builder("Broken::").build().unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
