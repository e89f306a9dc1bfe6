//! Tri-state optional argument.

/// An argument that may be absent, explicitly null, or present.
///
/// `Option` collapses "not supplied" and "supplied as null" into one case.
/// Query values and lookup defaults need both: comparing a field against
/// null is a real request, and a lookup with no default must fail where a
/// lookup with a null default returns nothing.
///
/// # Examples
///
/// ```
/// use synapsis_core::Maybe;
///
/// let unset: Maybe<i32> = Maybe::default();
/// assert!(unset.is_unset());
///
/// let null: Maybe<i32> = None.into();
/// assert!(null.is_null());
///
/// assert_eq!(Maybe::Set(3).or(Maybe::Set(4)), Maybe::Set(3));
/// assert_eq!(Maybe::Unset.or(Maybe::Set(4)), Maybe::Set(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Maybe<T> {
    /// The argument was not supplied.
    #[default]
    Unset,
    /// The argument was supplied as null.
    Null,
    /// The argument was supplied with a value.
    Set(T),
}

impl<T> Maybe<T> {
    /// Returns `true` when the argument was not supplied.
    pub fn is_unset(&self) -> bool {
        matches!(self, Maybe::Unset)
    }

    /// Returns `true` when the argument was supplied as null.
    pub fn is_null(&self) -> bool {
        matches!(self, Maybe::Null)
    }

    /// Returns `true` when the argument carries a value.
    pub fn is_set(&self) -> bool {
        matches!(self, Maybe::Set(_))
    }

    /// Borrows the contents.
    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Unset => Maybe::Unset,
            Maybe::Null => Maybe::Null,
            Maybe::Set(value) => Maybe::Set(value),
        }
    }

    /// Keeps `self` unless it is unset, in which case `other` is used.
    ///
    /// Null counts as supplied and is kept.
    pub fn or(self, other: Maybe<T>) -> Maybe<T> {
        match self {
            Maybe::Unset => other,
            supplied => supplied,
        }
    }

    /// Collapses to an `Option`, treating unset and null alike.
    pub fn into_option(self) -> Option<T> {
        match self {
            Maybe::Set(value) => Some(value),
            Maybe::Unset | Maybe::Null => None,
        }
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Maybe::Set(value),
            None => Maybe::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        let m: Maybe<String> = Maybe::default();
        assert!(m.is_unset());
        assert!(!m.is_null());
        assert!(!m.is_set());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Maybe::from(Some(1)), Maybe::Set(1));
        assert_eq!(Maybe::<i32>::from(None), Maybe::Null);
    }

    #[test]
    fn test_or_keeps_null() {
        assert_eq!(Maybe::Null.or(Maybe::Set(1)), Maybe::Null);
        assert_eq!(Maybe::<i32>::Unset.or(Maybe::Null), Maybe::Null);
    }

    #[test]
    fn test_into_option() {
        assert_eq!(Maybe::Set("a").into_option(), Some("a"));
        assert_eq!(Maybe::<&str>::Null.into_option(), None);
        assert_eq!(Maybe::<&str>::Unset.into_option(), None);
    }

    #[test]
    fn test_as_ref() {
        let m = Maybe::Set(String::from("x"));
        assert_eq!(m.as_ref(), Maybe::Set(&String::from("x")));
    }
}
