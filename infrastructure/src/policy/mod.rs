//! Model restriction policies

mod env_restriction;

pub use env_restriction::EnvRestrictionPolicy;
