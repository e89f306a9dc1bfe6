//! Reading and writing entity and team permissions through a platform
//! client.
//!
//! The platform SDK owns the wire protocol. [`PermissionClient`] and
//! [`TeamPermissionClient`] are the narrow slices of it these helpers need;
//! the helpers normalize whatever comes back, or goes out, through the
//! permission catalog.
//!
//! Unknown permissions are rejected with [`Error::NotFound`] before anything
//! is written, so a typo never revokes access.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use synapsis_core::Maybe;
use synapsis_core::util::ids::is_synapse_id;

use crate::error::{Error, Result};
use crate::permission::{Permission, PermissionRef};

/// Access to an entity's ACL on the platform.
pub trait PermissionClient {
    /// Error returned by the client.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the access types `principal` holds on `entity`.
    fn get_permissions(
        &self,
        entity: &str,
        principal: &str,
    ) -> std::result::Result<Vec<String>, Self::Error>;

    /// Replaces the access types `principal` holds on `entity`.
    fn set_permissions(
        &self,
        entity: &str,
        principal: &str,
        access_types: &[String],
    ) -> std::result::Result<(), Self::Error>;
}

fn check_entity(entity: &str) -> Result<&str> {
    let entity = entity.trim();
    if is_synapse_id(entity) {
        Ok(entity)
    } else {
        Err(Error::usage(format!("'{entity}' is not an entity ID")))
    }
}

/// Returns the catalog permission `principal` holds on `entity`.
///
/// Access-type sets that match no catalog entry are reported as
/// `NO_PERMISSION`.
pub fn entity_permission<C: PermissionClient>(
    client: &C,
    entity: &str,
    principal: &str,
) -> Result<&'static Permission> {
    let entity = check_entity(entity)?;
    let access_types = client
        .get_permissions(entity, principal)
        .map_err(|e| Error::client(format!("get_permissions {entity} {principal}"), e))?;
    debug!("{principal} on {entity}: {access_types:?}");

    let permission = Permission::get(&access_types, Maybe::Set(Permission::no_permission()))?;
    Ok(permission.unwrap_or(Permission::no_permission()))
}

/// Grants `principal` exactly `permission` on `entity`.
///
/// `permission` is normalized through the catalog first; `None` revokes
/// everything. An unknown code or access-type set is [`Error::NotFound`]
/// and nothing is written. Returns the permission that was written.
pub fn set_entity_permission<'a, C: PermissionClient>(
    client: &C,
    entity: &str,
    principal: &str,
    permission: Option<impl Into<PermissionRef<'a>>>,
) -> Result<&'static Permission> {
    let entity = check_entity(entity)?;
    let permission = normalize_request(permission)?;

    client
        .set_permissions(entity, principal, permission.access_types())
        .map_err(|e| Error::client(format!("set_permissions {entity} {principal}"), e))?;
    info!("Set {permission} for {principal} on {entity}");
    Ok(permission)
}

/// One principal's entry in a team ACL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAccess {
    /// User or group ID.
    pub principal_id: String,
    /// Access types granted to the principal.
    pub access_type: Vec<String>,
}

/// A team's access control list, in the platform's wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAcl {
    /// Team ID.
    pub id: String,
    /// Per-principal entries.
    #[serde(default)]
    pub resource_access: Vec<ResourceAccess>,
}

impl TeamAcl {
    fn position(&self, principal: &str) -> Option<usize> {
        self.resource_access
            .iter()
            .position(|access| access.principal_id == principal)
    }
}

/// Access to a team's ACL on the platform.
pub trait TeamPermissionClient {
    /// Error returned by the client.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches the ACL of `team`.
    fn get_team_acl(&self, team: &str) -> std::result::Result<TeamAcl, Self::Error>;

    /// Replaces a team's ACL with `acl`.
    fn put_team_acl(&self, acl: &TeamAcl) -> std::result::Result<(), Self::Error>;
}

fn check_principal(principal: &str) -> Result<&str> {
    let principal = principal.trim();
    if principal.is_empty() {
        Err(Error::usage("principal ID is required"))
    } else {
        Ok(principal)
    }
}

fn normalize_request<'a>(
    permission: Option<impl Into<PermissionRef<'a>>>,
) -> Result<&'static Permission> {
    let Some(value) = permission else {
        return Ok(Permission::no_permission());
    };
    Ok(Permission::get(value, Maybe::Unset)?.unwrap_or(Permission::no_permission()))
}

fn current_team_permission(acl: &TeamAcl, index: Option<usize>) -> Result<&'static Permission> {
    let Some(access) = index.and_then(|i| acl.resource_access.get(i)) else {
        return Ok(Permission::no_permission());
    };
    let permission = Permission::get(
        access.access_type.as_slice(),
        Maybe::Set(Permission::no_permission()),
    )?;
    Ok(permission.unwrap_or(Permission::no_permission()))
}

/// Returns the catalog permission `principal` holds on `team`.
///
/// A principal without an entry, or with access types that match no
/// catalog entry, holds `NO_PERMISSION`.
pub fn team_permission<C: TeamPermissionClient>(
    client: &C,
    team: &str,
    principal: &str,
) -> Result<&'static Permission> {
    let principal = check_principal(principal)?;
    let team = team.trim();
    let acl = client
        .get_team_acl(team)
        .map_err(|e| Error::client(format!("get_team_acl {team}"), e))?;
    current_team_permission(&acl, acl.position(principal))
}

/// Grants `principal` exactly `permission` on `team`.
///
/// `None` revokes. The ACL is rewritten only when the permission changes:
/// the principal's entry is removed for `NO_PERMISSION`, updated in place
/// when it exists, and appended otherwise. Returns the ACL that was
/// written, or `None` when nothing needed to change.
pub fn set_team_permission<'a, C: TeamPermissionClient>(
    client: &C,
    team: &str,
    principal: &str,
    permission: Option<impl Into<PermissionRef<'a>>>,
) -> Result<Option<TeamAcl>> {
    let principal = check_principal(principal)?;
    let team = team.trim();
    let permission = normalize_request(permission)?;

    let mut acl = client
        .get_team_acl(team)
        .map_err(|e| Error::client(format!("get_team_acl {team}"), e))?;
    let index = acl.position(principal);
    let current = current_team_permission(&acl, index)?;

    if permission == current {
        debug!("{principal} already holds {current} on team {team}");
        return Ok(None);
    }

    match (permission.is_none(), index) {
        (true, Some(i)) => {
            acl.resource_access.remove(i);
        }
        (true, None) => return Ok(None),
        (false, Some(i)) => {
            if let Some(access) = acl.resource_access.get_mut(i) {
                access.access_type = permission.access_types().to_vec();
            }
        }
        (false, None) => acl.resource_access.push(ResourceAccess {
            principal_id: principal.to_string(),
            access_type: permission.access_types().to_vec(),
        }),
    }

    client
        .put_team_acl(&acl)
        .map_err(|e| Error::client(format!("put_team_acl {team}"), e))?;
    info!("Set {permission} for {principal} on team {team}");
    Ok(Some(acl))
}
