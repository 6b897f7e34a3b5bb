//! Shared types for Laminate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Names owned by the composition framework itself. Neither capability
/// modules nor classes may define them, and they never take part in
/// collision detection or forwarding.
pub const RESERVED_METHODS: &[&str] = &["with_layer", "with_layers"];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_METHODS.contains(&name)
}

/// A method name that an incoming layer shares with something already
/// reachable on the target object.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Collision {
    /// The contested method name.
    pub method: String,
    /// Name of the module or class that already defines it.
    pub defined_by: String,
}

impl Collision {
    pub fn new(method: impl Into<String>, defined_by: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            defined_by: defined_by.into(),
        }
    }
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({})", self.method, self.defined_by)
    }
}
