//! Row structs for the action tables.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row.

pub mod download;
pub mod like;
