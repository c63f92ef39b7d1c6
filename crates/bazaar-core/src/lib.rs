//! Bazaar Core - marketplace domain kernel
//!
//! This crate provides:
//! - `WatchedList`, a reconciling collection that computes the minimal
//!   insert/delete script between two states of a one-to-many relation
//! - The product aggregate and its image relation (`ProductImageList`)
//! - Dense day-bucket aggregation for view metrics
//! - Collaborator traits for storage, with an in-memory implementation
//! - Use cases: edit/create product, status changes, view registration, metrics
//! - The error facility (`BazaarError`, `ExError`) and logging facility

pub mod errors;
pub mod logging_facility;
pub mod metrics;
pub mod model;
pub mod ops;
pub mod ports;
pub mod use_cases;
pub mod watched_list;

// Re-export commonly used types
pub use bazaar_core_types::{RequestId, UniqueEntityId};
pub use errors::{BazaarError, ExError, ExErrorKind, ExResult, Result};
pub use metrics::{build_day_buckets, DayBucket};
pub use model::{Product, ProductImage, ProductImageList, ProductStatus};
pub use ops::Store;
pub use watched_list::WatchedList;

// Used by the logging macros
#[doc(hidden)]
pub use bazaar_core_types as __core_types;
#[doc(hidden)]
pub use tracing as __tracing;
