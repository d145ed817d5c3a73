//! Provider-side domain types.
//!
//! - [`family::ProviderFamily`] - closed set of backend categories with a fixed priority order
//! - [`capabilities::CapabilityDescriptor`] - immutable per-model metadata
//! - [`category::ModelCategory`] - what kind of work a caller wants a model for

pub mod capabilities;
pub mod category;
pub mod family;

pub use capabilities::{CapabilityDescriptor, TemperatureConstraint};
pub use category::ModelCategory;
pub use family::ProviderFamily;
