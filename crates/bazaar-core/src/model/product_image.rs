use bazaar_core_types::UniqueEntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::watched_list::WatchedList;

/// Link between a product and one uploaded attachment
///
/// Identity is `id`. Two images pointing at the same attachment with
/// different ids are different members of the relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: UniqueEntityId,
    pub product_id: UniqueEntityId,
    /// Attachment this image displays
    pub image_id: UniqueEntityId,
    pub created_at: DateTime<Utc>,
}

impl ProductImage {
    /// Mint a new image for `product_id` showing `image_id`
    pub fn new(product_id: UniqueEntityId, image_id: UniqueEntityId) -> Self {
        Self {
            id: UniqueEntityId::new(),
            product_id,
            image_id,
            created_at: Utc::now(),
        }
    }
}

fn image_identity(image: &ProductImage) -> UniqueEntityId {
    image.id.clone()
}

/// A product's image relation
///
/// `WatchedList` keyed by `ProductImage::id`. Only `Product` holds one of
/// these for a given aggregate; use cases build it from persisted rows and
/// hand it back through `Product::with_images`.
#[derive(Debug, Clone)]
pub struct ProductImageList(WatchedList<ProductImage, UniqueEntityId>);

impl ProductImageList {
    /// Build from the persisted members of the relation
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentity` if two images share an id.
    pub fn try_new(images: Vec<ProductImage>) -> Result<Self> {
        WatchedList::try_new(images, image_identity).map(Self)
    }

    pub fn empty() -> Self {
        Self(WatchedList::empty(image_identity))
    }

    pub fn current_items(&self) -> &[ProductImage] {
        self.0.current_items()
    }

    pub fn initial_items(&self) -> &[ProductImage] {
        self.0.initial_items()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, image: &ProductImage) -> bool {
        self.0.contains(image)
    }

    pub fn add(&mut self, image: ProductImage) {
        self.0.add(image);
    }

    pub fn remove(&mut self, image: &ProductImage) {
        self.0.remove(image);
    }

    pub fn replace_all(&mut self, images: Vec<ProductImage>) {
        self.0.replace_all(images);
    }

    pub fn new_items(&self) -> Vec<ProductImage> {
        self.0.new_items()
    }

    pub fn removed_items(&self) -> Vec<ProductImage> {
        self.0.removed_items()
    }

    pub fn has_changes(&self) -> bool {
        self.0.has_changes()
    }

    /// The persisted image that already shows `attachment_id`, if any
    pub fn find_by_attachment(&self, attachment_id: &UniqueEntityId) -> Option<&ProductImage> {
        self.0
            .initial_items()
            .iter()
            .find(|image| &image.image_id == attachment_id)
    }
}

impl Default for ProductImageList {
    fn default() -> Self {
        Self::empty()
    }
}
