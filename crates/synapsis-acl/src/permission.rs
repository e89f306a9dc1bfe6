//! Permission value type.
//!
//! A [`Permission`] is a named set of access types. Two permissions are the
//! same permission when their access-type sets match, compared
//! case-insensitively; code and display name do not take part.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::{Error, Result};

/// Normalized form of an access-type collection: upper-cased and unique.
pub type AccessTypeSet = BTreeSet<String>;

/// Normalizes an access-type collection for comparison.
pub fn normalize<I, S>(access_types: I) -> AccessTypeSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    access_types
        .into_iter()
        .map(|a| a.as_ref().to_uppercase())
        .collect()
}

/// An immutable named set of access rights.
///
/// # Examples
///
/// ```
/// use synapsis_acl::Permission;
///
/// let x = Permission::new("X", "X", ["READ", "DOWNLOAD"]);
/// let y = Permission::new("Y", "Y", ["download", "read"]);
/// assert!(x.equals(&y));
/// assert_eq!(x, y);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Permission {
    code: String,
    name: String,
    access_types: Vec<String>,
}

impl Permission {
    /// Creates a permission. Access types are stored sorted and without
    /// duplicates, case preserved.
    pub fn new<I, S>(code: impl Into<String>, name: impl Into<String>, access_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut access_types: Vec<String> = access_types.into_iter().map(Into::into).collect();
        access_types.sort();
        access_types.dedup();
        Self {
            code: code.into(),
            name: name.into(),
            access_types,
        }
    }

    /// The permission code, e.g. `CAN_EDIT`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The display name, e.g. `Can Edit`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The access types, sorted.
    pub fn access_types(&self) -> &[String] {
        &self.access_types
    }

    /// The access types, normalized for comparison.
    pub fn access_type_set(&self) -> AccessTypeSet {
        normalize(&self.access_types)
    }

    /// Returns `true` when the permission grants nothing.
    pub fn is_none(&self) -> bool {
        self.access_types.is_empty()
    }

    /// Returns whether `other` names the same permission.
    ///
    /// `other` may be a permission, an access-type collection, or a code.
    /// Codes are resolved through the catalog; an unknown code is never
    /// equal.
    pub fn equals<'a>(&self, other: impl Into<PermissionRef<'a>>) -> bool {
        other
            .into()
            .access_type_set()
            .is_some_and(|set| set == self.access_type_set())
    }

    /// Returns whether `a` and `b` name the same permission.
    ///
    /// A missing side, or a code the catalog does not know, is never equal.
    ///
    /// ```
    /// use synapsis_acl::Permission;
    ///
    /// assert!(Permission::are_equal(Some("can_view"), Some(["READ"])));
    /// assert!(!Permission::are_equal(None::<&str>, Some(["READ"])));
    /// ```
    pub fn are_equal<'a, 'b>(
        a: Option<impl Into<PermissionRef<'a>>>,
        b: Option<impl Into<PermissionRef<'b>>>,
    ) -> bool {
        let (Some(a), Some(b)) = (a, b) else {
            return false;
        };
        match (a.into().access_type_set(), b.into().access_type_set()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Ranks two permissions inside their permission family.
    ///
    /// Entity permissions rank `NO_PERMISSION < CAN_VIEW < CAN_DOWNLOAD <
    /// CAN_EDIT < CAN_EDIT_AND_DELETE < ADMIN`; team permissions rank
    /// `NO_PERMISSION < TEAM_MANAGER`. Equal permissions are always
    /// `Equal`. Anything else is [`Error::Incomparable`].
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use synapsis_acl::Permission;
    ///
    /// let view = Permission::can_view();
    /// let admin = Permission::admin();
    /// assert_eq!(view.try_cmp(admin).unwrap(), Ordering::Less);
    /// assert!(admin.try_cmp(Permission::team_manager()).is_err());
    /// ```
    pub fn try_cmp(&self, other: &Permission) -> Result<Ordering> {
        if self == other {
            return Ok(Ordering::Equal);
        }
        for family in [Self::entity_permissions(), Self::team_permissions()] {
            let rank = |p: &Permission| family.iter().position(|f| *f == p);
            if let (Some(a), Some(b)) = (rank(self), rank(other)) {
                return Ok(a.cmp(&b));
            }
        }
        Err(Error::incomparable(&self.code, &other.code))
    }
}

impl PartialEq for Permission {
    fn eq(&self, other: &Self) -> bool {
        self.access_type_set() == other.access_type_set()
    }
}

impl Eq for Permission {}

impl Hash for Permission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.access_type_set().hash(state);
    }
}

impl PartialOrd for Permission {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Anything a permission can be looked up or compared by.
#[derive(Debug, Clone)]
pub enum PermissionRef<'a> {
    /// A permission value.
    Permission(&'a Permission),
    /// A permission code, matched case-insensitively.
    Code(&'a str),
    /// An access-type collection, matched as a case-insensitive set.
    AccessTypes(Vec<&'a str>),
}

impl PermissionRef<'_> {
    /// The access-type set this reference stands for, if it resolves.
    pub fn access_type_set(&self) -> Option<AccessTypeSet> {
        match self {
            PermissionRef::Permission(p) => Some(p.access_type_set()),
            PermissionRef::AccessTypes(types) => Some(normalize(types)),
            PermissionRef::Code(code) => crate::registry::by_code(code).map(Permission::access_type_set),
        }
    }
}

impl fmt::Display for PermissionRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionRef::Permission(p) => write!(f, "{p}"),
            PermissionRef::Code(code) => f.write_str(code),
            PermissionRef::AccessTypes(types) => write!(f, "[{}]", types.join(", ")),
        }
    }
}

impl<'a> From<&'a Permission> for PermissionRef<'a> {
    fn from(p: &'a Permission) -> Self {
        PermissionRef::Permission(p)
    }
}

impl<'a> From<&'a str> for PermissionRef<'a> {
    fn from(code: &'a str) -> Self {
        PermissionRef::Code(code)
    }
}

impl<'a> From<&'a String> for PermissionRef<'a> {
    fn from(code: &'a String) -> Self {
        PermissionRef::Code(code)
    }
}

impl<'a> From<&'a [String]> for PermissionRef<'a> {
    fn from(types: &'a [String]) -> Self {
        PermissionRef::AccessTypes(types.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for PermissionRef<'a> {
    fn from(types: &'a Vec<String>) -> Self {
        Self::from(types.as_slice())
    }
}

impl<'a> From<&'a [&'a str]> for PermissionRef<'a> {
    fn from(types: &'a [&'a str]) -> Self {
        PermissionRef::AccessTypes(types.to_vec())
    }
}

impl<'a> From<Vec<&'a str>> for PermissionRef<'a> {
    fn from(types: Vec<&'a str>) -> Self {
        PermissionRef::AccessTypes(types)
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for PermissionRef<'a> {
    fn from(types: [&'a str; N]) -> Self {
        PermissionRef::AccessTypes(types.to_vec())
    }
}
