//! Sequence query operations.
//!
//! Every operation borrows its input and returns references into it. A
//! [`Query`] supplies the predicate or transform; see its docs for how the
//! arguments combine.

use serde::Serialize;
use serde_json::Value;

use super::fields::{is_truthy, to_value, values_equal};
use super::predicate::{Predicate, Query};
use crate::error::{Error, Result};

/// Scans `items` for the first hit.
///
/// `fallback` decides items when the query has no predicate.
fn scan<'a, T, I>(
    items: I,
    predicate: Option<&Predicate<'_, T>>,
    fallback: fn(&T) -> Result<bool>,
) -> Result<Option<&'a T>>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    for item in items {
        let hit = match predicate {
            Some(p) => p.test(item)?,
            None => fallback(item)?,
        };
        if hit {
            return Ok(Some(item));
        }
    }
    Ok(None)
}

fn truthy<T: Serialize>(item: &T) -> Result<bool> {
    Ok(is_truthy(&to_value(item)?))
}

fn always<T>(_: &T) -> Result<bool> {
    Ok(true)
}

/// Returns the first item passing the query, or the query default.
///
/// Without a predicate, the first truthy item is returned.
///
/// # Examples
///
/// ```
/// use synapsis_core::query::{Query, find};
///
/// let items = [1, 2, 3];
/// assert_eq!(find(&items, &Query::new().func(|i: &i32| *i == 2)).unwrap(), Some(&2));
///
/// let nope = -1;
/// let query = Query::new().func(|i: &i32| *i == 4).default(&nope);
/// assert_eq!(find(&items, &query).unwrap(), Some(&-1));
/// ```
pub fn find<'a, T, I>(items: I, query: &Query<'a, T>) -> Result<Option<&'a T>>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let predicate = query.predicate()?;
    let found = scan(items, predicate.as_ref(), truthy::<T>)?;
    Ok(found.or_else(|| query.default_item()))
}

/// Returns every item passing the query, in input order.
///
/// Without a predicate, the truthy items are returned. The query default is
/// never used; no match gives an empty list.
pub fn select<'a, T, I>(items: I, query: &Query<'_, T>) -> Result<Vec<&'a T>>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let predicate = query.predicate()?;
    let mut selected = Vec::new();
    for item in items {
        let keep = match &predicate {
            Some(p) => p.test(item)?,
            None => truthy(item)?,
        };
        if keep {
            selected.push(item);
        }
    }
    Ok(selected)
}

/// Returns the first item, or the first item passing the query.
///
/// An empty input or no match gives the query default.
pub fn first<'a, T, I>(items: I, query: &Query<'a, T>) -> Result<Option<&'a T>>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let predicate = query.predicate()?;
    let found = scan(items, predicate.as_ref(), always::<T>)?;
    Ok(found.or_else(|| query.default_item()))
}

/// Returns the last item, or the last item passing the query.
///
/// Equivalent to [`first`] over the reversed input.
pub fn last<'a, T, I>(items: I, query: &Query<'a, T>) -> Result<Option<&'a T>>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
    I::IntoIter: DoubleEndedIterator,
{
    first(items.into_iter().rev(), query)
}

/// Transforms every item through the query's key and/or function.
///
/// With only a key, the field is extracted; with a key and a field
/// function, the function receives the field. A query with neither is a
/// usage error.
///
/// # Examples
///
/// ```
/// use serde_json::{Value, json};
/// use synapsis_core::query::{Query, map};
///
/// let items = vec![json!({"id": 1}), json!({"id": 2})];
/// let query: Query<'_, Value> = Query::new().key("id");
/// assert_eq!(map(&items, &query).unwrap(), vec![json!(1), json!(2)]);
/// ```
pub fn map<'a, T, I>(items: I, query: &Query<'_, T>) -> Result<Vec<Value>>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let transform = query
        .transform()?
        .ok_or_else(|| Error::usage("map requires a function or a key"))?;
    items
        .into_iter()
        .map(|item| transform.apply(item))
        .collect()
}

/// Applies `f` across parallel sequences, stopping at the shortest.
///
/// `f` receives one item from each sequence, in sequence order. No
/// sequences gives an empty result.
///
/// # Examples
///
/// ```
/// use synapsis_core::query::map_zip;
///
/// let a = [0, 1, 2, 3];
/// let b = [0, 5, 6, 7];
/// let products = map_zip(&[&a[..], &b[..]], |row: &[&i32]| row[0] * row[1]);
/// assert_eq!(products, vec![0, 5, 12, 21]);
/// ```
pub fn map_zip<'a, T, U, F>(sequences: &[&'a [T]], f: F) -> Vec<U>
where
    F: Fn(&[&'a T]) -> U,
{
    let len = sequences.iter().map(|s| s.len()).min().unwrap_or(0);
    let mut row = Vec::with_capacity(sequences.len());
    (0..len)
        .map(|i| {
            row.clear();
            row.extend(sequences.iter().map(|&s| &s[i]));
            f(&row)
        })
        .collect()
}

/// Returns items in first-seen order, dropping later duplicates.
///
/// With a key or function, items are compared by the transformed value;
/// otherwise by equality of the items themselves.
pub fn unique<'a, T, I>(items: I, query: &Query<'_, T>) -> Result<Vec<&'a T>>
where
    T: Serialize + PartialEq + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let Some(transform) = query.transform()? else {
        return Ok(dedup(items));
    };

    let mut seen: Vec<Value> = Vec::new();
    let mut kept = Vec::new();
    for item in items {
        let marker = transform.apply(item)?;
        if !seen.iter().any(|s| values_equal(s, &marker)) {
            seen.push(marker);
            kept.push(item);
        }
    }
    Ok(kept)
}

/// Returns items in first-seen order, dropping later equal items.
pub fn dedup<'a, T, I>(items: I) -> Vec<&'a T>
where
    T: PartialEq + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut kept: Vec<&'a T> = Vec::new();
    for item in items {
        if !kept.contains(&item) {
            kept.push(item);
        }
    }
    kept
}
