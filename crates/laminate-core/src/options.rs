//! Per-application layer options.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options recognised by `with_layer` / `with_layers`.
///
/// Unknown keys are rejected when options are parsed from configuration,
/// surfacing as [`Error::UnsupportedConfiguration`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayerOptions {
    /// Permit incoming methods to shadow names already reachable on the target.
    pub allow_overrides: bool,
}

impl LayerOptions {
    pub fn new() -> Self { Self::default() }

    pub fn allow_overrides() -> Self { Self { allow_overrides: true } }

    /// Parse options from a loosely typed JSON object. `null` yields defaults.
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| Error::unsupported(format!("layer options: {e}")))
    }
}
