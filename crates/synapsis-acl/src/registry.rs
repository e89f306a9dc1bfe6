//! Well-known permission catalogs and lookups.
//!
//! Two fixed catalogs exist: entity permissions and team permissions, each
//! in ascending privilege order. [`Permission::all`] is their union with
//! the shared `NO_PERMISSION` collapsed. Tables are built on first use and
//! never change afterwards.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use log::{debug, warn};
use synapsis_core::query::{Maybe, Query, dedup, find};

use crate::error::{Error, Result};
use crate::permission::{Permission, PermissionRef, normalize};

/// Code of a catalog permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionCode {
    /// `NO_PERMISSION`
    NoPermission,
    /// `CAN_VIEW`
    CanView,
    /// `CAN_DOWNLOAD`
    CanDownload,
    /// `CAN_EDIT`
    CanEdit,
    /// `CAN_EDIT_AND_DELETE`
    CanEditAndDelete,
    /// `ADMIN`
    Admin,
    /// `TEAM_MANAGER`
    TeamManager,
}

impl PermissionCode {
    /// Every catalog code.
    pub const ALL: [PermissionCode; 7] = [
        PermissionCode::NoPermission,
        PermissionCode::CanView,
        PermissionCode::CanDownload,
        PermissionCode::CanEdit,
        PermissionCode::CanEditAndDelete,
        PermissionCode::Admin,
        PermissionCode::TeamManager,
    ];

    const ENTITY: [PermissionCode; 6] = [
        PermissionCode::NoPermission,
        PermissionCode::CanView,
        PermissionCode::CanDownload,
        PermissionCode::CanEdit,
        PermissionCode::CanEditAndDelete,
        PermissionCode::Admin,
    ];

    const TEAM: [PermissionCode; 2] = [PermissionCode::NoPermission, PermissionCode::TeamManager];

    /// The wire form of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionCode::NoPermission => "NO_PERMISSION",
            PermissionCode::CanView => "CAN_VIEW",
            PermissionCode::CanDownload => "CAN_DOWNLOAD",
            PermissionCode::CanEdit => "CAN_EDIT",
            PermissionCode::CanEditAndDelete => "CAN_EDIT_AND_DELETE",
            PermissionCode::Admin => "ADMIN",
            PermissionCode::TeamManager => "TEAM_MANAGER",
        }
    }

    /// The catalog permission for this code.
    pub fn permission(self) -> &'static Permission {
        &CATALOG[self as usize]
    }

    fn build(self) -> Permission {
        let (name, access_types): (&str, &[&str]) = match self {
            PermissionCode::NoPermission => ("No Permission", &[]),
            PermissionCode::CanView => ("Can View", &["READ"]),
            PermissionCode::CanDownload => ("Can Download", &["DOWNLOAD", "READ"]),
            PermissionCode::CanEdit => ("Can Edit", &["DOWNLOAD", "UPDATE", "CREATE", "READ"]),
            PermissionCode::CanEditAndDelete => (
                "Can Edit and Delete",
                &["DOWNLOAD", "UPDATE", "CREATE", "DELETE", "READ"],
            ),
            PermissionCode::Admin => (
                "Administrator",
                &[
                    "UPDATE",
                    "DELETE",
                    "CHANGE_PERMISSIONS",
                    "CHANGE_SETTINGS",
                    "CREATE",
                    "DOWNLOAD",
                    "READ",
                    "MODERATE",
                ],
            ),
            PermissionCode::TeamManager => (
                "Team Manager",
                &[
                    "SEND_MESSAGE",
                    "READ",
                    "UPDATE",
                    "TEAM_MEMBERSHIP_UPDATE",
                    "DELETE",
                ],
            ),
        };
        Permission::new(self.as_str(), name, access_types.iter().copied())
    }
}

impl fmt::Display for PermissionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PermissionCode::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::not_found(format!("unknown permission code '{s}'")))
    }
}

static CATALOG: LazyLock<[Permission; 7]> =
    LazyLock::new(|| PermissionCode::ALL.map(PermissionCode::build));

static ENTITY_PERMISSIONS: LazyLock<Vec<&'static Permission>> = LazyLock::new(|| {
    PermissionCode::ENTITY
        .iter()
        .map(|code| code.permission())
        .collect()
});

static TEAM_PERMISSIONS: LazyLock<Vec<&'static Permission>> = LazyLock::new(|| {
    PermissionCode::TEAM
        .iter()
        .map(|code| code.permission())
        .collect()
});

static ALL_PERMISSIONS: LazyLock<Vec<&'static Permission>> = LazyLock::new(|| {
    dedup(
        ENTITY_PERMISSIONS
            .iter()
            .chain(TEAM_PERMISSIONS.iter())
            .copied(),
    )
});

/// Resolves a code to its catalog permission, case-insensitively.
pub(crate) fn by_code(code: &str) -> Option<&'static Permission> {
    Permission::get(PermissionRef::Code(code), Maybe::Null)
        .ok()
        .flatten()
}

impl Permission {
    /// Entity permissions, lowest privilege first.
    pub fn entity_permissions() -> &'static [&'static Permission] {
        &ENTITY_PERMISSIONS
    }

    /// Team permissions, lowest privilege first.
    pub fn team_permissions() -> &'static [&'static Permission] {
        &TEAM_PERMISSIONS
    }

    /// Every catalog permission, entity permissions first.
    pub fn all() -> &'static [&'static Permission] {
        &ALL_PERMISSIONS
    }

    /// `NO_PERMISSION`: no access types.
    pub fn no_permission() -> &'static Permission {
        PermissionCode::NoPermission.permission()
    }

    /// `CAN_VIEW`
    pub fn can_view() -> &'static Permission {
        PermissionCode::CanView.permission()
    }

    /// `CAN_DOWNLOAD`
    pub fn can_download() -> &'static Permission {
        PermissionCode::CanDownload.permission()
    }

    /// `CAN_EDIT`
    pub fn can_edit() -> &'static Permission {
        PermissionCode::CanEdit.permission()
    }

    /// `CAN_EDIT_AND_DELETE`
    pub fn can_edit_and_delete() -> &'static Permission {
        PermissionCode::CanEditAndDelete.permission()
    }

    /// `ADMIN`
    pub fn admin() -> &'static Permission {
        PermissionCode::Admin.permission()
    }

    /// `TEAM_MANAGER`
    pub fn team_manager() -> &'static Permission {
        PermissionCode::TeamManager.permission()
    }

    /// Returns whether this is the catalog permission for `code`.
    pub fn is(&self, code: PermissionCode) -> bool {
        self == code.permission()
    }

    /// Finds the catalog permission matching every supplied constraint.
    ///
    /// `code` and `access_types` are both matched case-insensitively, and
    /// surrounding whitespace on `code` is ignored. At
    /// least one is required. A miss returns `Ok(None)`, or
    /// [`Error::NotFound`] when `raises` is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use synapsis_acl::Permission;
    ///
    /// let edit = Permission::find_by(Some("can_edit"), None, false).unwrap();
    /// assert_eq!(edit, Some(Permission::can_edit()));
    ///
    /// assert_eq!(Permission::find_by(Some("NOPE"), None, false).unwrap(), None);
    /// assert!(Permission::find_by(Some("NOPE"), None, true).is_err());
    /// assert!(Permission::find_by(None, None, false).is_err());
    /// ```
    pub fn find_by(
        code: Option<&str>,
        access_types: Option<&[&str]>,
        raises: bool,
    ) -> Result<Option<&'static Permission>> {
        if code.is_none() && access_types.is_none() {
            return Err(Error::usage("code or access_types are required."));
        }

        let wanted_code = code.map(|c| c.trim().to_uppercase());
        let wanted_set = access_types.map(normalize);
        let query = Query::new().func(|p: &&Permission| {
            wanted_code.as_deref().is_none_or(|c| p.code() == c)
                && wanted_set
                    .as_ref()
                    .is_none_or(|set| p.access_type_set() == *set)
        });
        let found = find(Self::all(), &query)?.copied();

        match found {
            Some(permission) => Ok(Some(permission)),
            None if raises => Err(Error::not_found(format!(
                "Could not find permission with code: {code:?}, access types: {access_types:?}"
            ))),
            None => {
                debug!("No permission with code {code:?} and access types {access_types:?}");
                Ok(None)
            }
        }
    }

    /// Resolves `value` to its canonical catalog permission.
    ///
    /// `value` may be a permission or an access-type collection, matched by
    /// access-type set, or a code. On a miss, an unset `default` is
    /// [`Error::NotFound`], a null one gives `Ok(None)`, and a set one is
    /// returned in place of the match.
    ///
    /// # Examples
    ///
    /// ```
    /// use synapsis_acl::Permission;
    /// use synapsis_core::Maybe;
    ///
    /// let p = Permission::get(["read", "download"], Maybe::Unset).unwrap();
    /// assert_eq!(p, Some(Permission::can_download()));
    ///
    /// assert!(Permission::get("NOPE", Maybe::Unset).is_err());
    /// assert_eq!(Permission::get("NOPE", Maybe::Null).unwrap(), None);
    /// ```
    pub fn get<'a>(
        value: impl Into<PermissionRef<'a>>,
        default: Maybe<&'static Permission>,
    ) -> Result<Option<&'static Permission>> {
        let value = value.into();
        let found = match &value {
            PermissionRef::Code(code) => {
                let query = Query::new().key("code").value(code.trim().to_uppercase());
                find(Self::all(), &query)?.copied()
            }
            PermissionRef::Permission(_) | PermissionRef::AccessTypes(_) => {
                match value.access_type_set() {
                    Some(set) => {
                        let query =
                            Query::new().func(move |p: &&Permission| p.access_type_set() == set);
                        find(Self::all(), &query)?.copied()
                    }
                    None => None,
                }
            }
        };

        match (found, default) {
            (Some(permission), _) => Ok(Some(permission)),
            (None, Maybe::Set(fallback)) => {
                warn!("No permission matches {value}, using {fallback}");
                Ok(Some(fallback))
            }
            (None, Maybe::Null) => Ok(None),
            (None, Maybe::Unset) => Err(Error::not_found(format!(
                "Could not find permission with: {value}"
            ))),
        }
    }
}
