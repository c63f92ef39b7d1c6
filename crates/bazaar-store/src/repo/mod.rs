//! Repository layer for persisting domain models to SQLite

pub mod hydration;
pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
