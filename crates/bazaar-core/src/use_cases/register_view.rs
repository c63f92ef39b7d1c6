use bazaar_core_types::UniqueEntityId;
use chrono::{DateTime, Utc};

use super::{elapsed_ms, fail};
use crate::errors::{BazaarError, ExResult};
use crate::model::View;
use crate::ports::{ProductRepository, SellerRepository, ViewRepository};
use crate::{log_op_end, log_op_error, log_op_start};

const OP: &str = "register_view";

#[derive(Debug, Clone)]
pub struct RegisterViewRequest {
    pub product_id: UniqueEntityId,
    /// Seller looking at the product
    pub viewer_id: UniqueEntityId,
    pub viewed_at: DateTime<Utc>,
}

/// Record that a seller viewed another seller's product
///
/// # Errors
///
/// * `NotFound` - product or viewer is missing
/// * `Forbidden` - the viewer owns the product
/// * `AlreadyExists` - the viewer already viewed this product
pub fn register_view<R>(repo: &mut R, request: RegisterViewRequest) -> ExResult<View>
where
    R: ProductRepository + SellerRepository + ViewRepository,
{
    log_op_start!(
        OP,
        product_id = request.product_id.as_str(),
        viewer_id = request.viewer_id.as_str()
    );
    let start = std::time::Instant::now();

    let view = register_view_impl(repo, request).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start));

    Ok(view)
}

fn register_view_impl<R>(repo: &mut R, request: RegisterViewRequest) -> ExResult<View>
where
    R: ProductRepository + SellerRepository + ViewRepository,
{
    let product = repo.find_product(&request.product_id)?.ok_or_else(|| {
        fail(
            OP,
            BazaarError::ProductNotFound {
                product_id: request.product_id.to_string(),
            },
        )
    })?;

    if repo.find_seller(&request.viewer_id)?.is_none() {
        return Err(fail(
            OP,
            BazaarError::ViewerNotFound {
                viewer_id: request.viewer_id.to_string(),
            },
        ));
    }

    if product.is_owned_by(&request.viewer_id) {
        return Err(fail(
            OP,
            BazaarError::ViewOwnProduct {
                product_id: product.id.to_string(),
                viewer_id: request.viewer_id.to_string(),
            },
        ));
    }

    if repo
        .find_by_viewer_and_product(&request.viewer_id, &product.id)?
        .is_some()
    {
        return Err(fail(
            OP,
            BazaarError::DuplicateView {
                product_id: product.id.to_string(),
                viewer_id: request.viewer_id.to_string(),
            },
        ));
    }

    let view = View::new(request.viewer_id, product.id, request.viewed_at);
    repo.create_view(&view)?;

    Ok(view)
}
