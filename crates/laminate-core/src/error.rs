//! Error types for Laminate

use crate::types::Collision;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{}", render_collisions(.collisions))]
    Collision { collisions: Vec<Collision> },

    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    #[error("undefined method `{method}' for {type_name}")]
    NoMethod { type_name: String, method: String },

    #[error("method error: {method} - {message}")]
    Method { method: String, message: String },

    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedConfiguration(reason.into())
    }

    pub fn no_method(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self::NoMethod {
            type_name: type_name.into(),
            method: method.into(),
        }
    }

    pub fn method(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Method {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Colliding method names, in the order they were found.
    pub fn collisions(&self) -> &[Collision] {
        match self {
            Self::Collision { collisions } => collisions,
            _ => &[],
        }
    }

    pub fn is_invalid_argument(&self) -> bool { matches!(self, Self::InvalidArgument(_)) }
    pub fn is_collision(&self) -> bool { matches!(self, Self::Collision { .. }) }
    pub fn is_unsupported(&self) -> bool { matches!(self, Self::UnsupportedConfiguration(_)) }
    pub fn is_no_method(&self) -> bool { matches!(self, Self::NoMethod { .. }) }
}

fn render_collisions(collisions: &[Collision]) -> String {
    let noun = if collisions.len() == 1 { "layer" } else { "layers" };
    let lines = collisions
        .iter()
        .map(|c| format!("  `#{}' is already defined by {}", c.method, c.defined_by))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Unable to add {noun} (pass `allow_overrides: true` if intentional):\n{lines}")
}
