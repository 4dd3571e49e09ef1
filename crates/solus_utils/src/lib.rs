//! One shared instance per type.
//!
//! [`GlobalInstance`](global_instance::GlobalInstance) is the slot itself,
//! usable directly in a `static`. [`Singleton`] attaches a slot to a type and
//! is normally derived. [`InstanceRegistry`](registry::InstanceRegistry) keeps
//! the same one-per-type rule inside a value that can be passed around.

extern crate self as solus_utils;

pub mod global_instance;
pub mod registry;
pub mod singleton;

pub use singleton::Singleton;
pub use solus_utils_derive::Singleton;
