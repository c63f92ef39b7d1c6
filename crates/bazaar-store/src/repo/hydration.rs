//! Hydration layer - turns SQLite rows back into domain values
//!
//! Row closures only read raw columns; conversion that can fail (status
//! text, timestamps) happens here so it can report a store error instead of
//! a rusqlite one.

use bazaar_core::model::{
    Attachment, Category, Product, ProductDetails, ProductImage, ProductStatus, Seller, View,
};
use bazaar_core::UniqueEntityId;
use chrono::{DateTime, Utc};
use rusqlite::Row;

use crate::errors::{corrupt_row, Result};

pub const PRODUCT_COLUMNS: &str =
    "id, seller_id, category_id, title, description, price_in_cents, status, created_at";
pub const IMAGE_COLUMNS: &str = "id, product_id, attachment_id, created_at";
pub const VIEW_COLUMNS: &str = "id, viewer_id, product_id, created_at";

/// Milliseconds since the Unix epoch, the stored form of every timestamp
pub fn to_millis(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

pub fn from_millis(table: &str, id: &str, ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| corrupt_row(table, id, &format!("timestamp {} out of range", ms)))
}

pub struct ProductRow {
    id: String,
    seller_id: String,
    category_id: String,
    title: String,
    description: String,
    price_in_cents: i64,
    status: String,
    created_at: i64,
}

impl ProductRow {
    pub fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            seller_id: row.get(1)?,
            category_id: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            price_in_cents: row.get(5)?,
            status: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    pub fn into_product(self) -> Result<Product> {
        let status: ProductStatus = self
            .status
            .parse()
            .map_err(|_| corrupt_row("products", &self.id, &format!("status {}", self.status)))?;
        let created_at = from_millis("products", &self.id, self.created_at)?;

        Ok(Product::restore(
            UniqueEntityId::from(self.id),
            UniqueEntityId::from(self.seller_id),
            ProductDetails {
                title: self.title,
                category_id: UniqueEntityId::from(self.category_id),
                description: self.description,
                price_in_cents: self.price_in_cents,
            },
            status,
            created_at,
        ))
    }
}

pub struct ImageRow {
    id: String,
    product_id: String,
    attachment_id: String,
    created_at: i64,
}

impl ImageRow {
    pub fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            product_id: row.get(1)?,
            attachment_id: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    pub fn into_image(self) -> Result<ProductImage> {
        let created_at = from_millis("product_images", &self.id, self.created_at)?;
        Ok(ProductImage {
            id: UniqueEntityId::from(self.id),
            product_id: UniqueEntityId::from(self.product_id),
            image_id: UniqueEntityId::from(self.attachment_id),
            created_at,
        })
    }
}

pub struct ViewRow {
    id: String,
    viewer_id: String,
    product_id: String,
    created_at: i64,
}

impl ViewRow {
    pub fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            viewer_id: row.get(1)?,
            product_id: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    pub fn into_view(self) -> Result<View> {
        let created_at = from_millis("views", &self.id, self.created_at)?;
        Ok(View {
            id: UniqueEntityId::from(self.id),
            viewer_id: UniqueEntityId::from(self.viewer_id),
            product_id: UniqueEntityId::from(self.product_id),
            created_at,
        })
    }
}

pub fn read_seller(row: &Row<'_>) -> rusqlite::Result<Seller> {
    Ok(Seller {
        id: UniqueEntityId::from(row.get::<_, String>(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
    })
}

pub fn read_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: UniqueEntityId::from(row.get::<_, String>(0)?),
        title: row.get(1)?,
        slug: row.get(2)?,
    })
}

pub fn read_attachment(row: &Row<'_>) -> rusqlite::Result<Attachment> {
    Ok(Attachment {
        id: UniqueEntityId::from(row.get::<_, String>(0)?),
        key: row.get(1)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_millis_round_trip() {
        let ts = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();
        assert_eq!(from_millis("t", "id", to_millis(ts)).unwrap(), ts);
    }

    #[test]
    fn test_unknown_status_is_corrupt_row() {
        let row = ProductRow {
            id: "p-1".to_string(),
            seller_id: "s-1".to_string(),
            category_id: "c-1".to_string(),
            title: "Lamp".to_string(),
            description: String::new(),
            price_in_cents: 0,
            status: "archived".to_string(),
            created_at: 0,
        };

        let err = row.into_product().unwrap_err();
        assert_eq!(err.entity_id(), Some("p-1"));
        assert_eq!(err.op(), Some("hydrate"));
    }
}
