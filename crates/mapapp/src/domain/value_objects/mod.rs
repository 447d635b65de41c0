//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod extent;
mod i18n;
mod projection;

pub use extent::*;
pub use i18n::*;
pub use projection::*;
