//! Schema migrations
//!
//! Embedded SQL applied in order, each step in its own transaction and
//! recorded with its SHA256 in `schema_version`.

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
