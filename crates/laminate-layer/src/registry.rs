//! Module registry — look up capability modules by name.
//!
//! Lets layers be named in configuration or on the command line instead of
//! being passed around as values. Names resolve by full name first, then by
//! short name when exactly one registered module has it.

use crate::capability::CapabilityModule;
use crate::object::Object;
use laminate_core::{Error, LayerOptions, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub struct ModuleRegistry {
    modules: HashMap<String, Arc<CapabilityModule>>,
}

impl Default for ModuleRegistry {
    fn default() -> Self { Self::new() }
}

impl ModuleRegistry {
    pub fn new() -> Self { Self { modules: HashMap::new() } }

    /// Register a module. Replaces any existing module with the same name.
    pub fn register(&mut self, module: Arc<CapabilityModule>) {
        debug!("Registered capability module {} ({} methods)", module.name(), module.len());
        self.modules.insert(module.name().to_string(), module);
    }

    /// Remove a module by full name.
    pub fn remove(&mut self, name: &str) -> bool {
        self.modules.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<Arc<CapabilityModule>> {
        if let Some(module) = self.modules.get(name) {
            return Some(module.clone());
        }
        let mut matches = self.modules.values().filter(|m| m.short_name() == name);
        match (matches.next(), matches.next()) {
            (Some(module), None) => Some(module.clone()),
            _ => None,
        }
    }

    /// Resolve every name, failing on the first one that is not registered.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Arc<CapabilityModule>>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name).ok_or_else(|| {
                    Error::invalid_argument(format!("`{name}' is not a registered capability module"))
                })
            })
            .collect()
    }

    pub fn with_layer(&self, target: &Object, name: &str, options: &LayerOptions) -> Result<Object> {
        self.with_layers(target, &[name], options)
    }

    pub fn with_layers<S: AsRef<str>>(
        &self,
        target: &Object,
        names: &[S],
        options: &LayerOptions,
    ) -> Result<Object> {
        let modules = self.resolve(names)?;
        target.with_layers(&modules, options)
    }

    /// Registered module names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.modules.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize { self.modules.len() }

    pub fn is_empty(&self) -> bool { self.modules.is_empty() }
}
