//! Wrapper type synthesis.
//!
//! A [`WrapperDescriptor`] is the runtime "type" of a wrapper: a dispatch
//! table built once from the incoming modules plus the set of names that are
//! forwarded to the ancestor. Descriptors are immutable and shared by every
//! instance wrapped with the same combination.

use crate::capability::{CapabilityModule, CapabilitySet, Method};
use crate::composer::LayerComposer;
use crate::detect::{CollisionDetector, Link};
use crate::object::TypeRef;
use laminate_core::{is_reserved, Collision, Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct WrapperDescriptor {
    base_name: String,
    capabilities: CapabilitySet,
    local: BTreeMap<String, (Method, Arc<CapabilityModule>)>,
    forwarded: BTreeSet<String>,
    reachable: BTreeSet<String>,
    combined_name: String,
    qualified_name: String,
    link: Arc<Link>,
    shadowed: Vec<Collision>,
    composer: LayerComposer,
}

impl WrapperDescriptor {
    /// Name of the type this wrapper was synthesized for.
    pub fn base_name(&self) -> &str { &self.base_name }

    /// Names delegated unchanged to the ancestor.
    pub fn forwarded(&self) -> &BTreeSet<String> { &self.forwarded }

    /// Every name callable on instances: local plus forwarded.
    pub fn methods(&self) -> &BTreeSet<String> { &self.reachable }

    /// e.g. `WithRunnerAndSprinter`.
    pub fn combined_name(&self) -> &str { &self.combined_name }

    /// e.g. `Person::WithRunnerAndSprinter`.
    pub fn name(&self) -> &str { &self.qualified_name }

    /// Names this wrapper overrides on its ancestor. Only non-empty for
    /// wrappers synthesized with overrides allowed.
    pub fn shadowed(&self) -> &[Collision] { &self.shadowed }

    pub fn local_method(&self, name: &str) -> Option<&Method> {
        self.local.get(name).map(|(method, _)| method)
    }

    /// The module whose implementation `name` resolves to on this wrapper.
    pub fn defined_by(&self, name: &str) -> Option<&Arc<CapabilityModule>> {
        self.local.get(name).map(|(_, module)| module)
    }

    pub fn forwards(&self, name: &str) -> bool { self.forwarded.contains(name) }

    pub(crate) fn link(&self) -> &Arc<Link> { &self.link }

    pub fn composer(&self) -> &LayerComposer { &self.composer }

    /// Reject reuse of an overriding wrapper by a caller that did not opt in.
    pub(crate) fn permits(&self, allow_overrides: bool) -> Result<()> {
        if allow_overrides || self.shadowed.is_empty() {
            return Ok(());
        }
        Err(Error::Collision { collisions: self.shadowed.clone() })
    }
}

impl fmt::Debug for WrapperDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperDescriptor")
            .field("name", &self.qualified_name)
            .field("capabilities", &self.capabilities)
            .field("local", &self.local.keys().collect::<Vec<_>>())
            .field("forwarded", &self.forwarded)
            .finish()
    }
}

pub struct WrapperFactory;

impl WrapperFactory {
    /// Build the descriptor for wrapping `base` with `capabilities`.
    ///
    /// Fails with [`Error::Collision`] when an incoming name is already
    /// reachable on `base` and overrides are not allowed. Pure apart from
    /// logging; caching is the caller's job.
    pub fn synthesize(
        base: &TypeRef,
        capabilities: &CapabilitySet,
        allow_overrides: bool,
    ) -> Result<WrapperDescriptor> {
        let local = capabilities.dispatch_table();
        let incoming: BTreeSet<String> = local.keys().cloned().collect();

        let collisions = CollisionDetector::detect(base.link().chain(), &incoming);
        if !collisions.is_empty() {
            if !allow_overrides {
                return Err(Error::Collision { collisions });
            }
            warn!(
                "{} overrides {} method(s) on {}",
                capabilities.combined_name(),
                collisions.len(),
                base.name()
            );
        }

        let forwarded: BTreeSet<String> = base
            .methods()
            .iter()
            .filter(|name| !is_reserved(name) && !incoming.contains(*name))
            .cloned()
            .collect();
        let reachable = forwarded.union(&incoming).cloned().collect();

        let combined_name = capabilities.combined_name();
        let qualified_name = format!("{}::{}", base.name(), combined_name);

        let mut link = Link::on(qualified_name.clone(), base.link());
        for (name, (_, module)) in &local {
            link.define(name.clone(), module.name());
        }

        debug!(
            "Synthesized {} ({} local, {} forwarded)",
            qualified_name,
            local.len(),
            forwarded.len()
        );

        Ok(WrapperDescriptor {
            base_name: base.name().to_string(),
            capabilities: capabilities.clone(),
            local,
            forwarded,
            reachable,
            combined_name,
            qualified_name,
            link: Arc::new(link),
            shadowed: collisions,
            composer: LayerComposer::new(),
        })
    }
}
