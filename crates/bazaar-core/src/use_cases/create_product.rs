use bazaar_core_types::UniqueEntityId;

use super::{distinct_ids, elapsed_ms, fail};
use crate::errors::{BazaarError, ExResult};
use crate::model::{Product, ProductDetails, ProductImage, ProductImageList};
use crate::ports::{AttachmentRepository, CategoryRepository, ProductRepository, SellerRepository};
use crate::{log_op_end, log_op_error, log_op_start};

const OP: &str = "create_product";

#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    pub seller_id: UniqueEntityId,
    pub title: String,
    pub category_id: UniqueEntityId,
    pub description: String,
    pub price_in_cents: i64,
    pub attachment_ids: Vec<UniqueEntityId>,
}

/// Create an available product with one image per attachment
///
/// # Errors
///
/// * `NotFound` - seller, category or any attachment is missing
/// * `InvalidTitle` / `InvalidPrice` - the details are invalid
/// * `Persistence` - the repository failed
pub fn create_product<R>(repo: &mut R, request: CreateProductRequest) -> ExResult<Product>
where
    R: ProductRepository + SellerRepository + CategoryRepository + AttachmentRepository,
{
    log_op_start!(OP, seller_id = request.seller_id.as_str());
    let start = std::time::Instant::now();

    let product = create_product_impl(repo, request).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        OP,
        duration_ms = elapsed_ms(start),
        product_id = product.id.as_str(),
        new_count = product.images().len()
    );

    Ok(product)
}

fn create_product_impl<R>(repo: &mut R, request: CreateProductRequest) -> ExResult<Product>
where
    R: ProductRepository + SellerRepository + CategoryRepository + AttachmentRepository,
{
    if repo.find_seller(&request.seller_id)?.is_none() {
        return Err(fail(
            OP,
            BazaarError::SellerNotFound {
                seller_id: request.seller_id.to_string(),
            },
        ));
    }

    if repo.find_category(&request.category_id)?.is_none() {
        return Err(fail(
            OP,
            BazaarError::CategoryNotFound {
                category_id: request.category_id.to_string(),
            },
        ));
    }

    let lookup = repo.find_many_between_ids(&distinct_ids(request.attachment_ids))?;
    if !lookup.is_complete() {
        return Err(fail(
            OP,
            BazaarError::attachments_not_found(&lookup.not_found_ids),
        ));
    }

    let details = ProductDetails {
        title: request.title,
        category_id: request.category_id,
        description: request.description,
        price_in_cents: request.price_in_cents,
    };
    let product = Product::new(request.seller_id, details).map_err(|e| fail(OP, e))?;

    let images = lookup
        .found
        .into_iter()
        .map(|attachment| ProductImage::new(product.id.clone(), attachment.id))
        .collect();
    let images = ProductImageList::try_new(images).map_err(|e| fail(OP, e))?;
    let product = product.with_images(images);

    repo.create_product(&product)?;

    Ok(product)
}
