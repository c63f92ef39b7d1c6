//! Collaborator traits consumed by the use cases
//!
//! Storage technology lives behind these traits. `ops::Store` implements
//! them in memory; the SQLite repository in `bazaar-store` implements them
//! against a database. Every method returns the canonical `ExError`.

use std::collections::BTreeMap;

use bazaar_core_types::UniqueEntityId;
use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::ExResult;
use crate::model::{
    Attachment, AttachmentLookup, Category, Product, ProductImage, ProductStatus, Seller, View,
};

pub trait ProductRepository {
    /// Load a product's columns; the returned image list is always empty
    fn find_product(&self, id: &UniqueEntityId) -> ExResult<Option<Product>>;

    /// Currently persisted images of a product, oldest first
    fn find_product_images(&self, product_id: &UniqueEntityId) -> ExResult<Vec<ProductImage>>;

    /// Insert a new product together with every current image
    fn create_product(&mut self, product: &Product) -> ExResult<()>;

    /// Update product columns and apply the image diff as one atomic unit
    ///
    /// Inserts `images().new_items()`, deletes `images().removed_items()`,
    /// and leaves every other persisted image untouched.
    fn save_product(&mut self, product: &Product) -> ExResult<()>;

    /// Insert `new_images` and delete `removed_ids` atomically
    fn apply_image_diff(
        &mut self,
        product_id: &UniqueEntityId,
        new_images: &[ProductImage],
        removed_ids: &[UniqueEntityId],
    ) -> ExResult<()>;

    /// Products of `seller_id` in `status` created within `[start, end]`
    fn count_products_by_status_between(
        &self,
        seller_id: &UniqueEntityId,
        status: ProductStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ExResult<u64>;
}

pub trait AttachmentRepository {
    fn create_attachment(&mut self, attachment: &Attachment) -> ExResult<()>;

    /// Resolve caller-supplied ids, splitting them into found and missing
    fn find_many_between_ids(&self, ids: &[UniqueEntityId]) -> ExResult<AttachmentLookup>;
}

pub trait SellerRepository {
    fn create_seller(&mut self, seller: &Seller) -> ExResult<()>;

    fn find_seller(&self, id: &UniqueEntityId) -> ExResult<Option<Seller>>;
}

pub trait CategoryRepository {
    fn create_category(&mut self, category: &Category) -> ExResult<()>;

    fn find_category(&self, id: &UniqueEntityId) -> ExResult<Option<Category>>;
}

pub trait ViewRepository {
    fn create_view(&mut self, view: &View) -> ExResult<()>;

    fn find_by_viewer_and_product(
        &self,
        viewer_id: &UniqueEntityId,
        product_id: &UniqueEntityId,
    ) -> ExResult<Option<View>>;

    /// Views of one product created within `[start, end]`
    fn count_views_by_product_between(
        &self,
        product_id: &UniqueEntityId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ExResult<u64>;

    /// Views of every product owned by `seller_id` created within `[start, end]`
    fn count_views_by_seller_between(
        &self,
        seller_id: &UniqueEntityId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ExResult<u64>;

    /// Same population as [`Self::count_views_by_seller_between`], counted per UTC day
    ///
    /// Days without views are absent from the map.
    fn count_views_by_seller_grouped_by_day(
        &self,
        seller_id: &UniqueEntityId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ExResult<BTreeMap<NaiveDate, u64>>;
}
