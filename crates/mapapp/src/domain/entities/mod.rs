//! Domain Entities
//!
//! Objects exchanged between the host and its search providers.

mod feature;
mod geometry;
mod info_view;

pub use feature::*;
pub use geometry::*;
pub use info_view::*;
