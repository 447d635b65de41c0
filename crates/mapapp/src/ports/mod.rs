//! Ports (Interfaces)
//!
//! Abstract interfaces that plugins implement to extend the host.

pub mod plugin;
pub mod search;

// Re-exports
pub use plugin::*;
pub use search::*;
