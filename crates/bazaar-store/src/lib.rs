//! Bazaar Store - SQLite persistence for the marketplace
//!
//! Provides:
//! - Connection setup and embedded, checksummed migrations
//! - `SqliteRepo`, implementing every collaborator trait of `bazaar-core`
//! - Atomic image-diff application: inserts and deletes commit together

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteRepo;
