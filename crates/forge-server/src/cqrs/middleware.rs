//! CQRS marker traits
//!
//! Every operation type declares which side of the command/query split it
//! belongs to. Write operations go through commands; reads go through
//! queries and must not modify state.

/// Marker for write operations (create, update, delete).
pub trait Command {}

/// Marker for read operations.
pub trait Query {}
