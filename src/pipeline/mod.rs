//! Pipeline module - configuration, cleaning, encoding, skew correction and balancing

pub mod cleaning;
pub mod config;
pub mod encoding;
pub mod error;
pub mod loader;
pub mod processor;
pub mod skew;
pub mod smote;

pub use cleaning::*;
pub use config::*;
pub use encoding::*;
pub use error::*;
pub use loader::*;
pub use processor::*;
pub use skew::*;
pub use smote::{Resampled, Smote, DEFAULT_K_NEIGHBORS, DEFAULT_SEED};
