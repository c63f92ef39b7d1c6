//! Edit a product and reconcile its image relation
//!
//! The persisted images are loaded separately from the product, wrapped in a
//! `ProductImageList`, and replaced with the images for the requested
//! attachments. Images whose attachment is already shown keep their id and
//! creation time; only attachments not shown yet get a fresh image. The
//! repository then inserts the new images and deletes the removed ones in a
//! single atomic save.

use bazaar_core_types::UniqueEntityId;

use super::{distinct_ids, elapsed_ms, fail};
use crate::errors::{BazaarError, ExResult};
use crate::model::{Product, ProductDetails, ProductImage, ProductImageList};
use crate::ports::{AttachmentRepository, CategoryRepository, ProductRepository, SellerRepository};
use crate::{log_op_end, log_op_error, log_op_start};

const OP: &str = "edit_product";

#[derive(Debug, Clone)]
pub struct EditProductRequest {
    pub product_id: UniqueEntityId,
    /// Seller performing the edit; must own the product
    pub seller_id: UniqueEntityId,
    pub title: String,
    pub category_id: UniqueEntityId,
    pub description: String,
    pub price_in_cents: i64,
    /// Desired image attachments, in display order
    ///
    /// An empty list leaves the current images untouched.
    pub attachment_ids: Vec<UniqueEntityId>,
}

/// The saved product and the image diff that was applied
#[derive(Debug, Clone)]
pub struct EditProductResponse {
    pub product: Product,
    pub new_images: Vec<ProductImage>,
    pub removed_images: Vec<ProductImage>,
}

/// Edit a product's details and images
///
/// # Errors
///
/// In check order:
/// * `NotFound` - product, seller, category or any attachment is missing;
///   for attachments the error lists every unresolved id
/// * `Forbidden` - the seller does not own the product
/// * `InvalidTransition` - the product is sold
/// * `InvalidTitle` / `InvalidPrice` - the new details are invalid
/// * `Persistence` - the repository failed; nothing was written
pub fn edit_product<R>(repo: &mut R, request: EditProductRequest) -> ExResult<EditProductResponse>
where
    R: ProductRepository + SellerRepository + CategoryRepository + AttachmentRepository,
{
    log_op_start!(
        OP,
        product_id = request.product_id.as_str(),
        seller_id = request.seller_id.as_str()
    );
    let start = std::time::Instant::now();

    let response = edit_product_impl(repo, request).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        OP,
        duration_ms = elapsed_ms(start),
        new_count = response.new_images.len(),
        removed_count = response.removed_images.len()
    );

    Ok(response)
}

fn edit_product_impl<R>(repo: &mut R, request: EditProductRequest) -> ExResult<EditProductResponse>
where
    R: ProductRepository + SellerRepository + CategoryRepository + AttachmentRepository,
{
    let product = repo.find_product(&request.product_id)?.ok_or_else(|| {
        fail(
            OP,
            BazaarError::ProductNotFound {
                product_id: request.product_id.to_string(),
            },
        )
    })?;

    if repo.find_seller(&request.seller_id)?.is_none() {
        return Err(fail(
            OP,
            BazaarError::SellerNotFound {
                seller_id: request.seller_id.to_string(),
            },
        ));
    }

    if !product.is_owned_by(&request.seller_id) {
        return Err(fail(
            OP,
            BazaarError::UpdateAnotherSellerProduct {
                product_id: product.id.to_string(),
                seller_id: request.seller_id.to_string(),
            },
        ));
    }

    if product.is_sold() {
        return Err(fail(
            OP,
            BazaarError::UpdateSoldProduct {
                product_id: product.id.to_string(),
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

    let persisted = repo.find_product_images(&product.id)?;
    let mut images = ProductImageList::try_new(persisted).map_err(|e| fail(OP, e))?;

    if !lookup.found.is_empty() {
        let targets: Vec<ProductImage> = lookup
            .found
            .iter()
            .map(|attachment| {
                images
                    .find_by_attachment(&attachment.id)
                    .cloned()
                    .unwrap_or_else(|| ProductImage::new(product.id.clone(), attachment.id.clone()))
            })
            .collect();
        images.replace_all(targets);
    }

    let details = ProductDetails {
        title: request.title,
        category_id: request.category_id,
        description: request.description,
        price_in_cents: request.price_in_cents,
    };
    let product = product
        .with_details(details)
        .map_err(|e| fail(OP, e))?
        .with_images(images);

    repo.save_product(&product)?;

    Ok(EditProductResponse {
        new_images: product.images().new_items(),
        removed_images: product.images().removed_items(),
        product,
    })
}
