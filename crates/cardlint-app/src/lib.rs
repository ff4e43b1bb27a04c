//! File-level vCard validation for the `cardlint` binary.

pub mod error;
pub mod validate;
