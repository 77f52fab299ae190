//! CLI command implementations.

pub mod indicators;
pub mod validate;
