//! Property-based tests for the query operations.
