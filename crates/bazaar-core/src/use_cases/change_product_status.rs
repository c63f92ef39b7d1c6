use bazaar_core_types::UniqueEntityId;

use super::{elapsed_ms, fail};
use crate::errors::{BazaarError, ExResult};
use crate::model::{Product, ProductStatus};
use crate::ports::{ProductRepository, SellerRepository};
use crate::{log_op_end, log_op_error, log_op_start};

const OP: &str = "change_product_status";

#[derive(Debug, Clone)]
pub struct ChangeProductStatusRequest {
    pub product_id: UniqueEntityId,
    pub seller_id: UniqueEntityId,
    pub status: ProductStatus,
}

/// Move a product to `status`
///
/// Sold products cannot be cancelled and cancelled products cannot be sold.
/// Every other transition, including to the current status, is allowed.
/// Images are not touched.
///
/// # Errors
///
/// * `NotFound` - seller or product is missing, checked in that order
/// * `Forbidden` - the seller does not own the product
/// * `InvalidTransition` - the transition is not allowed
pub fn change_product_status<R>(
    repo: &mut R,
    request: ChangeProductStatusRequest,
) -> ExResult<Product>
where
    R: ProductRepository + SellerRepository,
{
    log_op_start!(
        OP,
        product_id = request.product_id.as_str(),
        status = request.status.as_str()
    );
    let start = std::time::Instant::now();

    let product = change_product_status_impl(repo, request).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start));

    Ok(product)
}

fn change_product_status_impl<R>(
    repo: &mut R,
    request: ChangeProductStatusRequest,
) -> ExResult<Product>
where
    R: ProductRepository + SellerRepository,
{
    if repo.find_seller(&request.seller_id)?.is_none() {
        return Err(fail(
            OP,
            BazaarError::SellerNotFound {
                seller_id: request.seller_id.to_string(),
            },
        ));
    }

    let product = repo.find_product(&request.product_id)?.ok_or_else(|| {
        fail(
            OP,
            BazaarError::ProductNotFound {
                product_id: request.product_id.to_string(),
            },
        )
    })?;

    if !product.is_owned_by(&request.seller_id) {
        return Err(fail(
            OP,
            BazaarError::UpdateAnotherSellerProduct {
                product_id: product.id.to_string(),
                seller_id: request.seller_id.to_string(),
            },
        ));
    }

    match (product.status, request.status) {
        (ProductStatus::Sold, ProductStatus::Cancelled) => {
            return Err(fail(
                OP,
                BazaarError::CancelSoldProduct {
                    product_id: product.id.to_string(),
                },
            ));
        }
        (ProductStatus::Cancelled, ProductStatus::Sold) => {
            return Err(fail(
                OP,
                BazaarError::SellCancelledProduct {
                    product_id: product.id.to_string(),
                },
            ));
        }
        _ => {}
    }

    let product = product.with_status(request.status);
    repo.save_product(&product)?;

    Ok(product)
}
