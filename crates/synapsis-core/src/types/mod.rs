//! Platform object types.

pub mod concrete_type;

pub use concrete_type::ConcreteType;
