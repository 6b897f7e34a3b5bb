//! Laminate Core - Types, options, and error handling

pub mod error;
pub mod options;
pub mod types;

pub use error::{Error, Result};
pub use options::LayerOptions;
pub use types::*;
