//! Use cases over the collaborator traits
//!
//! Each public function logs its start, end and failure through the
//! logging facility and returns the canonical `ExError`. Checks run in a
//! fixed order so callers see the same error for the same input regardless
//! of storage backend.

pub mod change_product_status;
pub mod create_product;
pub mod edit_product;
pub mod register_view;
pub mod view_metrics;

pub use change_product_status::{change_product_status, ChangeProductStatusRequest};
pub use create_product::{create_product, CreateProductRequest};
pub use edit_product::{edit_product, EditProductRequest, EditProductResponse};
pub use register_view::{register_view, RegisterViewRequest};
pub use view_metrics::{
    fetch_views_per_day_in_month, get_available_products_amount_in_month,
    get_product_views_amount_in_week, get_sold_products_amount_in_month,
    get_views_amount_in_month,
};

use bazaar_core_types::UniqueEntityId;

use crate::errors::{BazaarError, ExError};

/// Tag a domain error with the operation that raised it
pub(crate) fn fail(op: &str, err: BazaarError) -> ExError {
    ExError::from(err).with_op(op)
}

/// Drop repeated ids, keeping the first occurrence
pub(crate) fn distinct_ids(ids: Vec<UniqueEntityId>) -> Vec<UniqueEntityId> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

pub(crate) fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
