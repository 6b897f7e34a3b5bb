//! Laminate - capability layers for runtime objects
//!
//! The engine lives in `laminate-layer`; this crate holds the demo
//! configuration and the `Game` walkthrough shared by the binary and tests.

pub mod config;
pub mod demo;

pub use laminate_layer::*;
