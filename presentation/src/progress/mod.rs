//! Progress reporting during a consultation

pub mod reporter;
