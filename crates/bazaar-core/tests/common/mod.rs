use std::collections::BTreeSet;

use bazaar_core::model::{Attachment, Category, ProductDetails, Seller};
use bazaar_core::ports::{
    AttachmentRepository, CategoryRepository, ProductRepository, SellerRepository,
};
use bazaar_core::use_cases::EditProductRequest;
use bazaar_core::{Product, ProductImage, ProductImageList, Store, UniqueEntityId};

/// A store seeded with two sellers, one category and a set of attachments
#[allow(dead_code)]
pub struct Fixture {
    pub store: Store,
    pub seller: Seller,
    pub other_seller: Seller,
    pub category: Category,
    pub attachments: Vec<Attachment>,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new(attachment_count: usize) -> Self {
        let mut store = Store::new();

        let seller = Seller::new("Ada", "ada@example.com");
        let other_seller = Seller::new("Brian", "brian@example.com");
        store.create_seller(&seller).unwrap();
        store.create_seller(&other_seller).unwrap();

        let category = Category::new("Home Appliances");
        store.create_category(&category).unwrap();

        let attachments: Vec<Attachment> = (0..attachment_count)
            .map(|i| Attachment::new(format!("uploads/image-{}.png", i)))
            .collect();
        for attachment in &attachments {
            store.create_attachment(attachment).unwrap();
        }

        Self {
            store,
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
    pub fn seed_product(&mut self, attachment_indexes: &[usize]) -> Product {
        let product = Product::new(self.seller.id.clone(), self.details("Lamp")).unwrap();
        let images = attachment_indexes
            .iter()
            .map(|&i| ProductImage::new(product.id.clone(), self.attachment_id(i)))
            .collect();
        let product = product.with_images(ProductImageList::try_new(images).unwrap());
        self.store.create_product(&product).unwrap();
        product
    }

    /// An edit request by the owner that keeps the details and shows `attachment_indexes`
    pub fn edit_request(&self, product: &Product, attachment_indexes: &[usize]) -> EditProductRequest {
        EditProductRequest {
            product_id: product.id.clone(),
            seller_id: self.seller.id.clone(),
            title: product.title.clone(),
            category_id: product.category_id.clone(),
            description: product.description.clone(),
            price_in_cents: product.price_in_cents,
            attachment_ids: attachment_indexes
                .iter()
                .map(|&i| self.attachment_id(i))
                .collect(),
        }
    }

    /// Attachment ids currently shown by the product
    pub fn persisted_attachment_ids(&self, product_id: &UniqueEntityId) -> BTreeSet<UniqueEntityId> {
        self.store
            .find_product_images(product_id)
            .unwrap()
            .into_iter()
            .map(|image| image.image_id)
            .collect()
    }

    /// Attachment ids for the given fixture indexes, as a set
    pub fn attachment_set(&self, attachment_indexes: &[usize]) -> BTreeSet<UniqueEntityId> {
        attachment_indexes
            .iter()
            .map(|&i| self.attachment_id(i))
            .collect()
    }
}
