//! Entity helpers.
//!
//! - [`ids`]: Entity ID checks and name sanitizing

pub mod ids;
