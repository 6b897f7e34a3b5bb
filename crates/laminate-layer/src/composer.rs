//! Layer composition entry point.

use crate::cache::WrapperCache;
use crate::capability::{CapabilityModule, CapabilitySet};
use crate::factory::WrapperFactory;
use crate::object::Object;
use laminate_core::{Error, LayerOptions, Result};
use std::fmt;
use std::sync::Arc;

/// Wraps instances of one type with capability layers.
///
/// Each [`Class`](crate::Class) and each synthesized
/// [`WrapperDescriptor`](crate::WrapperDescriptor) owns a composer, and with
/// it the cache of wrapper types built on top of that type.
pub struct LayerComposer {
    cache: WrapperCache,
}

impl LayerComposer {
    pub(crate) fn new() -> Self { Self { cache: WrapperCache::new() } }

    pub fn cache(&self) -> &WrapperCache { &self.cache }

    pub fn with_layer(
        &self,
        target: &Object,
        module: &Arc<CapabilityModule>,
        options: &LayerOptions,
    ) -> Result<Object> {
        self.with_layers(target, std::slice::from_ref(module), options)
    }

    /// Wrap `target` in a new object exposing `modules` on top of everything
    /// `target` already responds to. `target` itself is left untouched.
    pub fn with_layers(
        &self,
        target: &Object,
        modules: &[Arc<CapabilityModule>],
        options: &LayerOptions,
    ) -> Result<Object> {
        let base = target.type_ref();
        if !std::ptr::eq(base.composer(), self) {
            return Err(Error::invalid_argument(format!(
                "{} is not layered by this composer",
                base.name()
            )));
        }

        let capabilities = CapabilitySet::new(modules);
        let descriptor = self.cache.get_or_create(&capabilities, options.allow_overrides, || {
            WrapperFactory::synthesize(&base, &capabilities, options.allow_overrides)
        })?;

        Ok(Object::wrap(target.clone(), capabilities, descriptor))
    }
}

impl fmt::Debug for LayerComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerComposer")
            .field("cached", &self.cache.names())
            .finish()
    }
}
