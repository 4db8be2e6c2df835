//! Serving module - form validation and model invocation for predictions

pub mod features;
pub mod service;

pub use features::*;
pub use service::*;
