//! Predicate and transform resolution.
//!
//! A [`Query`] collects the loose arguments a caller may supply (a function,
//! a key, a value to match, a default) and resolves them into one reusable
//! [`Predicate`] or [`Transform`].
//!
//! # Example
//!
//! ```
//! use serde_json::{Value, json};
//! use synapsis_core::query::Query;
//!
//! let items = vec![json!({"id": 1}), json!({"id": 2})];
//! let query: Query<'_, Value> = Query::new().key("id").value(2);
//! let predicate = query.predicate().unwrap().unwrap();
//!
//! assert!(!predicate.test(&items[0]).unwrap());
//! assert!(predicate.test(&items[1]).unwrap());
//! ```

use std::fmt;

use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::fields::{field, is_truthy, to_value, values_equal};
use super::maybe::Maybe;
use crate::error::{Error, Result};

type ItemFn<'q, T> = Box<dyn Fn(&T) -> Value + 'q>;
type FieldFn<'q> = Box<dyn Fn(&Value) -> Value + 'q>;
type Accessor<'p, T> = Box<dyn Fn(&T) -> Result<Value> + 'p>;
type Test<'p, T> = Box<dyn Fn(&T) -> Result<bool> + 'p>;

/// A caller-supplied function.
pub enum Func<'q, T> {
    /// Receives the item itself.
    Item(ItemFn<'q, T>),
    /// Receives a JSON value: the keyed field when a key is given, the
    /// whole item's JSON view otherwise.
    Field(FieldFn<'q>),
}

impl<'q, T> Func<'q, T> {
    /// Wraps a function over items.
    pub fn item<F, R>(f: F) -> Self
    where
        F: Fn(&T) -> R + 'q,
        R: Into<Value>,
    {
        Func::Item(Box::new(move |item: &T| f(item).into()))
    }

    /// Wraps a function over JSON values.
    pub fn field<F, R>(f: F) -> Self
    where
        F: Fn(&Value) -> R + 'q,
        R: Into<Value>,
    {
        Func::Field(Box::new(move |value: &Value| f(value).into()))
    }
}

impl<T> fmt::Debug for Func<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Func::Item(_) => f.write_str("Func::Item(..)"),
            Func::Field(_) => f.write_str("Func::Field(..)"),
        }
    }
}

/// A positional argument, in the order a caller would list them.
#[derive(Debug)]
pub enum QueryArg<'q, T> {
    /// A callable; the first one seen becomes the query function.
    Func(Func<'q, T>),
    /// A non-callable; the first one seen becomes the default.
    Default(&'q T),
}

/// Query configuration resolved into a predicate or transform.
///
/// Resolution precedence, highest first:
///
/// 1. `key` and `value`: `func(field(item, key)) == value`, or
///    `field(item, key) == value` without a function.
/// 2. `key` only: truthiness of `func(field(item, key))` or of the field.
/// 3. `value` only: `func(item) == value`, or the item's JSON view
///    compared to `value` without a function.
/// 4. function only: truthiness of `func(item)`.
/// 5. nothing: no predicate; the calling operation picks its fallback.
///
/// With a key, the function must be a [`Func::Field`]; an item function
/// is a usage error. Named setters ([`Query::func`], [`Query::default`], ...)
/// always take precedence over positional ones ([`Query::arg`]), whatever
/// order they are called in. A value of [`Maybe::Null`] compares against
/// JSON null; it is not the same as leaving the value unset.
pub struct Query<'q, T> {
    func: Option<Func<'q, T>>,
    key: Option<String>,
    value: Maybe<Value>,
    default: Maybe<&'q T>,
}

impl<'q, T> Query<'q, T> {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self {
            func: None,
            key: None,
            value: Maybe::Unset,
            default: Maybe::Unset,
        }
    }

    /// Builds a query from positional arguments.
    ///
    /// The first callable becomes the function and the first non-callable
    /// becomes the default; later ones are ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = QueryArg<'q, T>>,
    {
        args.into_iter().fold(Self::new(), Self::arg)
    }

    /// Applies one positional argument unless its slot is already filled.
    pub fn arg(mut self, arg: QueryArg<'q, T>) -> Self {
        match arg {
            QueryArg::Func(func) if self.func.is_none() => self.func = Some(func),
            QueryArg::Default(item) if self.default.is_unset() => self.default = Maybe::Set(item),
            _ => {}
        }
        self
    }

    /// Sets a function over items.
    pub fn func<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> R + 'q,
        R: Into<Value>,
    {
        self.func = Some(Func::item(f));
        self
    }

    /// Sets a function over the keyed field (or the item's JSON view).
    pub fn field_func<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> R + 'q,
        R: Into<Value>,
    {
        self.func = Some(Func::field(f));
        self
    }

    /// Sets the key to read from each item.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the value to match.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Maybe::Set(value.into());
        self
    }

    /// Matches against null explicitly.
    pub fn value_null(mut self) -> Self {
        self.value = Maybe::Null;
        self
    }

    /// Sets the item returned when nothing matches.
    pub fn default(mut self, item: &'q T) -> Self {
        self.default = Maybe::Set(item);
        self
    }

    /// Returns the configured key, if any.
    pub fn key_name(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the configured value.
    pub fn match_value(&self) -> &Maybe<Value> {
        &self.value
    }

    /// Returns the default item, if one was supplied.
    pub fn default_item(&self) -> Option<&'q T> {
        self.default.into_option()
    }

    /// Returns whether a function was supplied.
    pub fn has_func(&self) -> bool {
        self.func.is_some()
    }
}

impl<T> Default for Query<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Query<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("func", &self.func)
            .field("key", &self.key)
            .field("value", &self.value)
            .field("default", &self.default.is_set())
            .finish()
    }
}

impl<T: Serialize> Query<'_, T> {
    /// Resolves the value each item is tested or mapped through.
    fn accessor(&self) -> Result<Option<Accessor<'_, T>>> {
        let read = match (&self.key, &self.func) {
            (Some(key), Some(Func::Item(_))) => {
                return Err(Error::usage(format!(
                    "key '{key}' needs a field function; an item function cannot receive the field"
                )));
            }
            (Some(key), Some(Func::Field(f))) => {
                Box::new(move |item: &T| Ok(f(&field(item, key)?))) as Accessor<'_, T>
            }
            (Some(key), None) => Box::new(move |item: &T| field(item, key)) as Accessor<'_, T>,
            (None, Some(Func::Item(f))) => Box::new(move |item: &T| Ok(f(item))) as Accessor<'_, T>,
            (None, Some(Func::Field(f))) => {
                Box::new(move |item: &T| Ok(f(&to_value(item)?))) as Accessor<'_, T>
            }
            (None, None) => return Ok(None),
        };
        Ok(Some(read))
    }

    /// Resolves this query into a predicate.
    ///
    /// Returns `Ok(None)` when neither a function, key, nor value was given.
    pub fn predicate(&self) -> Result<Option<Predicate<'_, T>>> {
        let read = self.accessor()?;
        let expected = match &self.value {
            Maybe::Unset => None,
            Maybe::Null => Some(Value::Null),
            Maybe::Set(value) => Some(value.clone()),
        };

        let test = match (read, expected) {
            (Some(read), Some(expected)) => {
                Box::new(move |item: &T| Ok(values_equal(&read(item)?, &expected))) as Test<'_, T>
            }
            (Some(read), None) => {
                Box::new(move |item: &T| Ok(is_truthy(&read(item)?))) as Test<'_, T>
            }
            (None, Some(expected)) => {
                Box::new(move |item: &T| Ok(values_equal(&to_value(item)?, &expected))) as Test<'_, T>
            }
            (None, None) => return Ok(None),
        };

        debug!("Resolved predicate from {self:?}");
        Ok(Some(Predicate { test }))
    }

    /// Resolves this query into a transform.
    ///
    /// Returns `Ok(None)` when neither a function nor a key was given. A
    /// value is a usage error here: transforms do not match anything.
    pub fn transform(&self) -> Result<Option<Transform<'_, T>>> {
        if !self.value.is_unset() {
            return Err(Error::usage("value only applies to predicates, not transforms"));
        }
        Ok(self.accessor()?.map(|apply| Transform { apply }))
    }
}

/// A resolved, reusable item test.
pub struct Predicate<'p, T> {
    test: Test<'p, T>,
}

impl<T> Predicate<'_, T> {
    /// Tests one item.
    ///
    /// Fails when the item lacks the queried key.
    pub fn test(&self, item: &T) -> Result<bool> {
        (self.test)(item)
    }
}

impl<T> fmt::Debug for Predicate<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// A resolved, reusable item transform.
pub struct Transform<'p, T> {
    apply: Accessor<'p, T>,
}

impl<T> Transform<'_, T> {
    /// Transforms one item.
    pub fn apply(&self, item: &T) -> Result<Value> {
        (self.apply)(item)
    }
}

impl<T> fmt::Debug for Transform<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}
