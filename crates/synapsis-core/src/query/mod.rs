//! Generic query utilities over borrowed sequences.
//!
//! # Modules
//!
//! - [`maybe`]: Tri-state optional argument
//! - [`fields`]: Field access and truthiness over an item's JSON view
//! - [`predicate`]: Argument resolution into predicates and transforms
//! - [`ops`]: `find`, `select`, `first`, `last`, `map`, `unique`

pub mod fields;
pub mod maybe;
pub mod ops;
pub mod predicate;

mod proptests;

pub use fields::{field, is_truthy, to_value, values_equal};
pub use maybe::Maybe;
pub use ops::{dedup, find, first, last, map, map_zip, select, unique};
pub use predicate::{Func, Predicate, Query, QueryArg, Transform};
