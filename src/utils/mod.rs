//! Terminal output and logging helpers

mod logging;
mod progress;
mod styling;

pub use logging::*;
pub use progress::*;
pub use styling::*;
