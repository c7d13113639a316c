//! Utils Module - Shared Helpers

pub mod cache;
pub mod constants;

pub use cache::*;
pub use constants::*;
