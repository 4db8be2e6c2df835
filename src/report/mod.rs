//! Report module - summarizing processing results

pub mod summary;

pub use summary::*;
