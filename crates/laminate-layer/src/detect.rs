//! Collision detection across an object's ancestor chain.

use laminate_core::Collision;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// One layer of an ancestor chain and the method names it contributes.
///
/// Links are persistent: a wrapper's link points at its base's link, so
/// every type in a chain shares the tail below it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Type name of the layer (class name or wrapper name).
    pub label: String,
    /// Method name → name of the module or class defining it.
    pub defined: BTreeMap<String, String>,
    next: Option<Arc<Link>>,
}

impl Link {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            defined: BTreeMap::new(),
            next: None,
        }
    }

    /// A link stacked on top of `base`.
    pub fn on(label: impl Into<String>, base: &Arc<Link>) -> Self {
        Self {
            next: Some(base.clone()),
            ..Self::new(label)
        }
    }

    pub fn define(&mut self, method: impl Into<String>, origin: impl Into<String>) {
        self.defined.insert(method.into(), origin.into());
    }

    /// The link this one was stacked on.
    pub fn next(&self) -> Option<&Arc<Link>> { self.next.as_ref() }

    /// This link followed by every link beneath it.
    pub fn chain(&self) -> impl Iterator<Item = &Link> {
        std::iter::successors(Some(self), |link| link.next.as_deref())
    }
}

pub struct CollisionDetector;

impl CollisionDetector {
    /// Find every incoming name already defined somewhere along `chain`.
    ///
    /// `chain` runs from the immediate object outward to the ultimate base.
    /// A name defined by several links is reported once, attributed to the
    /// first link that defines it.
    pub fn detect<'a>(
        chain: impl IntoIterator<Item = &'a Link>,
        incoming: &BTreeSet<String>,
    ) -> Vec<Collision> {
        let mut seen = BTreeSet::new();
        let mut collisions = Vec::new();

        for link in chain {
            for (method, origin) in &link.defined {
                if incoming.contains(method) && seen.insert(method.as_str()) {
                    collisions.push(Collision::new(method.clone(), origin.clone()));
                }
            }
        }

        collisions
    }
}
