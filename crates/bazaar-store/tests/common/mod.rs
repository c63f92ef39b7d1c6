use std::collections::BTreeSet;

use bazaar_core::model::{Attachment, Category, ProductDetails, Seller, View};
use bazaar_core::ports::{
    AttachmentRepository, CategoryRepository, ProductRepository, SellerRepository, ViewRepository,
};
use bazaar_core::{Product, ProductImage, ProductImageList, UniqueEntityId};
use bazaar_store::SqliteRepo;
use chrono::{DateTime, Utc};

/// Seed a migrated repository with two sellers, a category and `n` attachments
#[allow(dead_code)]
pub struct Seeded {
    pub seller: Seller,
    pub other_seller: Seller,
    pub category: Category,
    pub attachments: Vec<Attachment>,
}

#[allow(dead_code)]
impl Seeded {
    pub fn seed(repo: &mut SqliteRepo, attachment_count: usize) -> Self {
        let seller = Seller::new("Ada", "ada@example.com");
        let other_seller = Seller::new("Brian", "brian@example.com");
        repo.create_seller(&seller).unwrap();
        repo.create_seller(&other_seller).unwrap();

        let category = Category::new("Home Appliances");
        repo.create_category(&category).unwrap();

        let attachments: Vec<Attachment> = (0..attachment_count)
            .map(|i| Attachment::new(format!("uploads/image-{}.png", i)))
            .collect();
        for attachment in &attachments {
            repo.create_attachment(attachment).unwrap();
        }

        Self {
            seller,
            other_seller,
            category,
            attachments,
        }
    }

    pub fn attachment_id(&self, index: usize) -> UniqueEntityId {
        self.attachments[index].id.clone()
    }

    pub fn details(&self, title: &str) -> ProductDetails {
        ProductDetails {
            title: title.to_string(),
            category_id: self.category.id.clone(),
            description: "Barely used".to_string(),
            price_in_cents: 2500,
        }
    }

    /// Persist a product owned by `seller` showing the given attachments
    pub fn product(&self, repo: &mut SqliteRepo, attachment_indexes: &[usize]) -> Product {
        let product = Product::new(self.seller.id.clone(), self.details("Lamp")).unwrap();
        let images = attachment_indexes
            .iter()
            .map(|&i| ProductImage::new(product.id.clone(), self.attachment_id(i)))
            .collect();
        let product = product.with_images(ProductImageList::try_new(images).unwrap());
        repo.create_product(&product).unwrap();
        product
    }

    pub fn attachment_set(&self, attachment_indexes: &[usize]) -> BTreeSet<UniqueEntityId> {
        attachment_indexes
            .iter()
            .map(|&i| self.attachment_id(i))
            .collect()
    }

    /// Store a view of `product` by a freshly registered seller
    pub fn view_at(&self, repo: &mut SqliteRepo, product: &Product, at: DateTime<Utc>) {
        let viewer_id = UniqueEntityId::new();
        let viewer = Seller {
            id: viewer_id.clone(),
            name: "viewer".to_string(),
            email: format!("{}@example.com", viewer_id),
        };
        repo.create_seller(&viewer).unwrap();
        repo.create_view(&View::new(viewer_id, product.id.clone(), at))
            .unwrap();
    }
}

/// Attachment ids currently persisted for a product
#[allow(dead_code)]
pub fn persisted_attachment_ids(
    repo: &SqliteRepo,
    product_id: &UniqueEntityId,
) -> BTreeSet<UniqueEntityId> {
    repo.find_product_images(product_id)
        .unwrap()
        .into_iter()
        .map(|image| image.image_id)
        .collect()
}
