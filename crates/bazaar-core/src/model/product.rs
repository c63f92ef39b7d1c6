use std::fmt;
use std::str::FromStr;

use bazaar_core_types::UniqueEntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product_image::ProductImageList;
use crate::errors::{BazaarError, Result};

/// Lifecycle state of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Available,
    Cancelled,
    Sold,
}

impl ProductStatus {
    /// Lowercase form used in storage and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Available => "available",
            ProductStatus::Cancelled => "cancelled",
            ProductStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = BazaarError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "available" => Ok(ProductStatus::Available),
            "cancelled" => Ok(ProductStatus::Cancelled),
            "sold" => Ok(ProductStatus::Sold),
            other => Err(BazaarError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Seller-editable fields of a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub title: String,
    pub category_id: UniqueEntityId,
    pub description: String,
    pub price_in_cents: i64,
}

impl ProductDetails {
    /// Check title and price
    ///
    /// # Errors
    ///
    /// * `InvalidTitle` - title is empty or whitespace-only
    /// * `InvalidPrice` - price is negative
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(BazaarError::InvalidTitle {
                reason: "Title cannot be empty or whitespace-only".to_string(),
            });
        }
        if self.price_in_cents < 0 {
            return Err(BazaarError::InvalidPrice {
                price_in_cents: self.price_in_cents,
            });
        }
        Ok(())
    }
}

/// Product - the aggregate owning the image relation
///
/// The image list is private. A loaded product starts with an empty list;
/// callers that need the persisted images build a `ProductImageList` from
/// the repository and attach it with [`Product::with_images`].
#[derive(Debug, Clone)]
pub struct Product {
    pub id: UniqueEntityId,
    pub seller_id: UniqueEntityId,
    pub title: String,
    pub category_id: UniqueEntityId,
    pub description: String,
    pub price_in_cents: i64,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    images: ProductImageList,
}

impl Product {
    /// Create a new available product with a fresh id
    ///
    /// # Errors
    ///
    /// Returns `InvalidTitle` or `InvalidPrice` if `details` fail validation.
    pub fn new(seller_id: UniqueEntityId, details: ProductDetails) -> Result<Self> {
        details.validate()?;
        Ok(Self::restore(
            UniqueEntityId::new(),
            seller_id,
            details,
            ProductStatus::Available,
            Utc::now(),
        ))
    }

    /// Rebuild a product from stored columns, without images
    pub fn restore(
        id: UniqueEntityId,
        seller_id: UniqueEntityId,
        details: ProductDetails,
        status: ProductStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            seller_id,
            title: details.title,
            category_id: details.category_id,
            description: details.description,
            price_in_cents: details.price_in_cents,
            status,
            created_at,
            images: ProductImageList::empty(),
        }
    }

    pub fn images(&self) -> &ProductImageList {
        &self.images
    }

    /// Replace the image relation, returning the updated product
    pub fn with_images(mut self, images: ProductImageList) -> Self {
        self.images = images;
        self
    }

    /// Replace the seller-editable fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidTitle` or `InvalidPrice` if `details` fail validation.
    pub fn with_details(mut self, details: ProductDetails) -> Result<Self> {
        details.validate()?;
        self.title = details.title;
        self.category_id = details.category_id;
        self.description = details.description;
        self.price_in_cents = details.price_in_cents;
        Ok(self)
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_owned_by(&self, seller_id: &UniqueEntityId) -> bool {
        &self.seller_id == seller_id
    }

    pub fn is_sold(&self) -> bool {
        self.status == ProductStatus::Sold
    }

    pub fn details(&self) -> ProductDetails {
        ProductDetails {
            title: self.title.clone(),
            category_id: self.category_id.clone(),
            description: self.description.clone(),
            price_in_cents: self.price_in_cents,
        }
    }
}
