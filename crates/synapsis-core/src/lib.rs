//! Synapsis Core: query utilities, errors, and entity helpers.
//!
//! This crate has no internal Synapsis dependencies. Everything else in the
//! workspace builds on it.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`query`]: `find`, `select`, `first`, `last`, `map`, `unique` over
//!   borrowed sequences
//! - [`types`]: Known platform object types
//! - [`util`]: Entity ID and name helpers

pub mod error;
pub mod query;
pub mod types;
pub mod util;

pub use error::{Error, Result};
pub use query::{Maybe, Query, QueryArg};
pub use types::ConcreteType;
pub use util::ids::{SanitizedName, id_of, is_synapse_id, sanitize_entity_name};
