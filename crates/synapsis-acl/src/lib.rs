//! # synapsis-acl
//!
//! Permission values and catalogs for Synapsis.
//!
//! - [`Permission`]: a named set of access types, equal by set
//! - Entity and team catalogs, with [`Permission::find_by`] and
//!   [`Permission::get`] lookups
//! - [`PermissionClient`] and [`TeamPermissionClient`]: the platform calls
//!   the entity and team permission helpers need

pub mod client;
pub mod error;
pub mod permission;
pub mod registry;

mod proptests;

pub use client::{
    PermissionClient, ResourceAccess, TeamAcl, TeamPermissionClient, entity_permission,
    set_entity_permission, set_team_permission, team_permission,
};
pub use error::{Error, Result};
pub use permission::{AccessTypeSet, Permission, PermissionRef};
pub use registry::PermissionCode;
