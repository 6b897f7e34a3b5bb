//! Laminate Layer - runtime composition of capability modules onto objects
//!
//! An [`Object`] is wrapped with one or more [`CapabilityModule`]s via
//! [`Object::with_layer`] / [`Object::with_layers`]. Each unique combination of
//! object type and ordered module set is synthesized once into a
//! [`WrapperDescriptor`] and cached by the [`LayerComposer`] of that type.

pub mod cache;
pub mod capability;
pub mod class;
pub mod composer;
pub mod detect;
pub mod factory;
pub mod object;
pub mod registry;

pub use cache::WrapperCache;
pub use capability::{CapabilityModule, CapabilityModuleBuilder, CapabilitySet, Method, ModuleId};
pub use class::{Class, ClassBuilder};
pub use composer::LayerComposer;
pub use detect::{CollisionDetector, Link};
pub use factory::{WrapperDescriptor, WrapperFactory};
pub use object::{Object, TypeRef};
pub use registry::ModuleRegistry;

pub use laminate_core::{Collision, Error, LayerOptions, Result};
