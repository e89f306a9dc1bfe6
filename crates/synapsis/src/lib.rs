//! Synapsis umbrella crate.
//!
//! Re-exports the Synapsis libraries. The permission model is behind the
//! default `acl` feature; the CLI library behind `cli`.

#![doc = include_str!("../README.md")]

pub use synapsis_core as core;
pub use synapsis_core::{Error, Maybe, Query, Result};

#[cfg(feature = "acl")]
pub use synapsis_acl as acl;

#[cfg(feature = "acl")]
pub use synapsis_acl::{Permission, PermissionCode};

#[cfg(feature = "cli")]
pub use synapsis_cli as cli;
