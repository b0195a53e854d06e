//! Bookshelf application library
//!
//! Project modules, utilities, and the shared server entrypoint.

pub mod app;
pub mod modules;
pub mod utils;

/// Re-export commonly used types
pub use app::{build_registry, run};
pub use modules::*;
