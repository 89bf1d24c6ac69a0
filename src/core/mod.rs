//! Core types - plain values shared across the codebase.

mod error;
mod location;

pub use error::RoutingError;
pub use location::{CurrentLocation, RoutingContext};

