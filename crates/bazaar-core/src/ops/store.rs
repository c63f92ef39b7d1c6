use std::collections::{BTreeMap, HashMap};

use bazaar_core_types::UniqueEntityId;
use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::{ExError, ExErrorKind, ExResult};
use crate::metrics::group_by_day;
use crate::model::{
    Attachment, AttachmentLookup, Category, Product, ProductImage, ProductImageList, ProductStatus,
    Seller, View,
};
use crate::ports::{
    AttachmentRepository, CategoryRepository, ProductRepository, SellerRepository, ViewRepository,
};

/// In-memory store implementing every collaborator trait
///
/// HashMap-based, not thread-safe, designed for single-threaded use and
/// tests. Multi-row writes are staged on a copy of the affected map and
/// swapped in only when every row succeeded, so a failed write leaves the
/// store exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) sellers: HashMap<UniqueEntityId, Seller>,
    pub(crate) categories: HashMap<UniqueEntityId, Category>,
    pub(crate) attachments: HashMap<UniqueEntityId, Attachment>,
    /// Products are stored without their image list
    pub(crate) products: HashMap<UniqueEntityId, Product>,
    pub(crate) product_images: HashMap<UniqueEntityId, ProductImage>,
    pub(crate) views: HashMap<UniqueEntityId, View>,
}

fn already_exists(op: &str, id: &UniqueEntityId) -> ExError {
    ExError::new(ExErrorKind::AlreadyExists)
        .with_op(op)
        .with_entity_id(id.as_str())
        .with_message("Record already exists")
}

fn missing(op: &str, what: &str, id: &UniqueEntityId) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(op)
        .with_entity_id(id.as_str())
        .with_message(format!("{} not found", what))
}

fn within(ts: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    start <= ts && ts <= end
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of image rows across all products
    pub fn image_count(&self) -> usize {
        self.product_images.len()
    }

    /// Image rows as they would be after applying a diff
    ///
    /// Deletes run before inserts. Deleting an id that is absent or owned by
    /// another product is a no-op; inserting an id that already exists fails.
    fn stage_images(
        &self,
        op: &str,
        product_id: &UniqueEntityId,
        new_images: &[ProductImage],
        removed_ids: &[UniqueEntityId],
    ) -> ExResult<HashMap<UniqueEntityId, ProductImage>> {
        let mut images = self.product_images.clone();

        for id in removed_ids {
            if images
                .get(id)
                .is_some_and(|image| &image.product_id == product_id)
            {
                images.remove(id);
            }
        }

        for image in new_images {
            if &image.product_id != product_id {
                return Err(ExError::new(ExErrorKind::InvalidInput)
                    .with_op(op)
                    .with_entity_id(image.id.as_str())
                    .with_message(format!(
                        "Image belongs to product {}, not {}",
                        image.product_id, product_id
                    )));
            }
            if !self.attachments.contains_key(&image.image_id) {
                return Err(missing(op, "Attachment", &image.image_id));
            }
            if images.contains_key(&image.id) {
                return Err(already_exists(op, &image.id));
            }
            images.insert(image.id.clone(), image.clone());
        }

        Ok(images)
    }

    fn views_of_seller(&self, seller_id: &UniqueEntityId) -> impl Iterator<Item = &View> {
        let seller_id = seller_id.clone();
        self.views.values().filter(move |view| {
            self.products
                .get(&view.product_id)
                .is_some_and(|product| product.seller_id == seller_id)
        })
    }
}

impl ProductRepository for Store {
    fn find_product(&self, id: &UniqueEntityId) -> ExResult<Option<Product>> {
        Ok(self.products.get(id).cloned())
    }

    fn find_product_images(&self, product_id: &UniqueEntityId) -> ExResult<Vec<ProductImage>> {
        let mut images: Vec<ProductImage> = self
            .product_images
            .values()
            .filter(|image| &image.product_id == product_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(images)
    }

    fn create_product(&mut self, product: &Product) -> ExResult<()> {
        const OP: &str = "create_product";

        if self.products.contains_key(&product.id) {
            return Err(already_exists(OP, &product.id));
        }
        if !self.sellers.contains_key(&product.seller_id) {
            return Err(missing(OP, "Seller", &product.seller_id));
        }
        if !self.categories.contains_key(&product.category_id) {
            return Err(missing(OP, "Category", &product.category_id));
        }

        let images = self.stage_images(OP, &product.id, product.images().current_items(), &[])?;

        self.products.insert(
            product.id.clone(),
            product.clone().with_images(ProductImageList::empty()),
        );
        self.product_images = images;
        Ok(())
    }

    fn save_product(&mut self, product: &Product) -> ExResult<()> {
        const OP: &str = "save_product";

        if !self.products.contains_key(&product.id) {
            return Err(missing(OP, "Product", &product.id));
        }
        if !self.categories.contains_key(&product.category_id) {
            return Err(missing(OP, "Category", &product.category_id));
        }

        let removed_ids: Vec<UniqueEntityId> = product
            .images()
            .removed_items()
            .into_iter()
            .map(|image| image.id)
            .collect();
        let images = self.stage_images(OP, &product.id, &product.images().new_items(), &removed_ids)?;

        self.products.insert(
            product.id.clone(),
            product.clone().with_images(ProductImageList::empty()),
        );
        self.product_images = images;
        Ok(())
    }

    fn apply_image_diff(
        &mut self,
        product_id: &UniqueEntityId,
        new_images: &[ProductImage],
        removed_ids: &[UniqueEntityId],
    ) -> ExResult<()> {
        const OP: &str = "apply_image_diff";

        if !self.products.contains_key(product_id) {
            return Err(missing(OP, "Product", product_id));
        }
        self.product_images = self.stage_images(OP, product_id, new_images, removed_ids)?;
        Ok(())
    }

    fn count_products_by_status_between(
        &self,
        seller_id: &UniqueEntityId,
        status: ProductStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ExResult<u64> {
        let count = self
            .products
            .values()
            .filter(|p| &p.seller_id == seller_id && p.status == status)
            .filter(|p| within(p.created_at, start, end))
            .count();
        Ok(count as u64)
    }
}

impl AttachmentRepository for Store {
    fn create_attachment(&mut self, attachment: &Attachment) -> ExResult<()> {
        if self.attachments.contains_key(&attachment.id) {
            return Err(already_exists("create_attachment", &attachment.id));
        }
        self.attachments
            .insert(attachment.id.clone(), attachment.clone());
        Ok(())
    }

    fn find_many_between_ids(&self, ids: &[UniqueEntityId]) -> ExResult<AttachmentLookup> {
        let mut lookup = AttachmentLookup::default();
        for id in ids {
            match self.attachments.get(id) {
                Some(attachment) => lookup.found.push(attachment.clone()),
                None => lookup.not_found_ids.push(id.clone()),
            }
        }
        Ok(lookup)
    }
}

impl SellerRepository for Store {
    fn create_seller(&mut self, seller: &Seller) -> ExResult<()> {
        if self.sellers.contains_key(&seller.id) {
            return Err(already_exists("create_seller", &seller.id));
        }
        self.sellers.insert(seller.id.clone(), seller.clone());
        Ok(())
    }

    fn find_seller(&self, id: &UniqueEntityId) -> ExResult<Option<Seller>> {
        Ok(self.sellers.get(id).cloned())
    }
}

impl CategoryRepository for Store {
    fn create_category(&mut self, category: &Category) -> ExResult<()> {
        if self.categories.contains_key(&category.id) {
            return Err(already_exists("create_category", &category.id));
        }
        self.categories.insert(category.id.clone(), category.clone());
        Ok(())
    }

    fn find_category(&self, id: &UniqueEntityId) -> ExResult<Option<Category>> {
        Ok(self.categories.get(id).cloned())
    }
}

impl ViewRepository for Store {
    fn create_view(&mut self, view: &View) -> ExResult<()> {
        const OP: &str = "create_view";

        if self.views.contains_key(&view.id) {
            return Err(already_exists(OP, &view.id));
        }
        if !self.products.contains_key(&view.product_id) {
            return Err(missing(OP, "Product", &view.product_id));
        }
        if !self.sellers.contains_key(&view.viewer_id) {
            return Err(missing(OP, "Seller", &view.viewer_id));
        }
        self.views.insert(view.id.clone(), view.clone());
        Ok(())
    }

    fn find_by_viewer_and_product(
        &self,
        viewer_id: &UniqueEntityId,
        product_id: &UniqueEntityId,
    ) -> ExResult<Option<View>> {
        Ok(self
            .views
            .values()
            .find(|v| &v.viewer_id == viewer_id && &v.product_id == product_id)
            .cloned())
    }

    fn count_views_by_product_between(
        &self,
        product_id: &UniqueEntityId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ExResult<u64> {
        let count = self
            .views
            .values()
            .filter(|v| &v.product_id == product_id && within(v.created_at, start, end))
            .count();
        Ok(count as u64)
    }

    fn count_views_by_seller_between(
        &self,
        seller_id: &UniqueEntityId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ExResult<u64> {
        let count = self
            .views_of_seller(seller_id)
            .filter(|v| within(v.created_at, start, end))
            .count();
        Ok(count as u64)
    }

    fn count_views_by_seller_grouped_by_day(
        &self,
        seller_id: &UniqueEntityId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ExResult<BTreeMap<NaiveDate, u64>> {
        Ok(group_by_day(
            self.views_of_seller(seller_id)
                .filter(|v| within(v.created_at, start, end))
                .map(|v| v.created_at),
        ))
    }
}
