//! SQLite repository implementation
//!
//! Implements the `bazaar-core` collaborator traits against a single
//! connection. Every multi-statement write runs in one transaction: either
//! all of its rows land or none do.

use std::collections::BTreeMap;
use std::path::Path;

use bazaar_core::errors::{ExError, ExErrorKind};
use bazaar_core::model::{
    Attachment, AttachmentLookup, Category, Product, ProductImage, ProductStatus, Seller, View,
};
use bazaar_core::ports::{
    AttachmentRepository, CategoryRepository, ProductRepository, SellerRepository, ViewRepository,
};
use bazaar_core::UniqueEntityId;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use crate::db;
use crate::errors::{corrupt_row, sqlite_in, Result};
use crate::migrations::apply_migrations;
use crate::repo::hydration::{
    read_attachment, read_category, read_seller, to_millis, ImageRow, ProductRow, ViewRow,
    IMAGE_COLUMNS, PRODUCT_COLUMNS, VIEW_COLUMNS,
};

/// SQLite-backed repository for every marketplace record
pub struct SqliteRepo {
    conn: Connection,
}

fn count_to_u64(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

impl SqliteRepo {
    /// Wrap a connection that is already configured and migrated
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open the database at `path`, configure it and apply pending migrations
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self::new(conn))
    }

    /// Fresh migrated in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self::new(conn))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn insert_product_tx(tx: &Transaction, product: &Product) -> Result<()> {
        tx.execute(
            "INSERT INTO products (id, seller_id, category_id, title, description, price_in_cents, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                product.id.as_str(),
                product.seller_id.as_str(),
                product.category_id.as_str(),
                product.title,
                product.description,
                product.price_in_cents,
                product.status.as_str(),
                to_millis(product.created_at),
            ],
        )
        .map_err(sqlite_in("create_product"))?;
        Ok(())
    }

    /// Update product columns; fails with `NotFound` if the row is missing
    fn update_product_tx(tx: &Transaction, product: &Product) -> Result<()> {
        let updated = tx
            .execute(
                "UPDATE products
                 SET category_id = ?2, title = ?3, description = ?4, price_in_cents = ?5, status = ?6
                 WHERE id = ?1",
                params![
                    product.id.as_str(),
                    product.category_id.as_str(),
                    product.title,
                    product.description,
                    product.price_in_cents,
                    product.status.as_str(),
                ],
            )
            .map_err(sqlite_in("save_product"))?;

        if updated == 0 {
            return Err(ExError::new(ExErrorKind::NotFound)
                .with_op("save_product")
                .with_entity_id(product.id.as_str())
                .with_message("Product not found"));
        }
        Ok(())
    }

    fn product_exists_tx(tx: &Transaction, product_id: &UniqueEntityId) -> Result<bool> {
        let found = tx
            .query_row(
                "SELECT 1 FROM products WHERE id = ?1",
                [product_id.as_str()],
                |_| Ok(()),
            )
            .optional()
            .map_err(sqlite_in("apply_image_diff"))?;
        Ok(found.is_some())
    }

    /// Delete then insert, so an image can never collide with one being removed
    fn apply_image_diff_tx(
        tx: &Transaction,
        product_id: &UniqueEntityId,
        new_images: &[ProductImage],
        removed_ids: &[UniqueEntityId],
    ) -> Result<()> {
        {
            let mut delete = tx
                .prepare("DELETE FROM product_images WHERE id = ?1 AND product_id = ?2")
                .map_err(sqlite_in("apply_image_diff"))?;
            for id in removed_ids {
                delete
                    .execute(params![id.as_str(), product_id.as_str()])
                    .map_err(sqlite_in("apply_image_diff"))?;
            }
        }

        let mut insert = tx
            .prepare(
                "INSERT INTO product_images (id, product_id, attachment_id, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(sqlite_in("apply_image_diff"))?;
        for image in new_images {
            if &image.product_id != product_id {
                return Err(ExError::new(ExErrorKind::InvalidInput)
                    .with_op("apply_image_diff")
                    .with_entity_id(image.id.as_str())
                    .with_message(format!(
                        "Image belongs to product {}, not {}",
                        image.product_id, product_id
                    )));
            }
            insert
                .execute(params![
                    image.id.as_str(),
                    product_id.as_str(),
                    image.image_id.as_str(),
                    to_millis(image.created_at),
                ])
                .map_err(sqlite_in("apply_image_diff"))?;
        }

        tracing::debug!(
            product_id = product_id.as_str(),
            new_count = new_images.len(),
            removed_count = removed_ids.len(),
            "applied image diff"
        );
        Ok(())
    }
}

impl ProductRepository for SqliteRepo {
    fn find_product(&self, id: &UniqueEntityId) -> Result<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, [id.as_str()], ProductRow::read)
            .optional()
            .map_err(sqlite_in("find_product"))?;
        row.map(ProductRow::into_product).transpose()
    }

    fn find_product_images(&self, product_id: &UniqueEntityId) -> Result<Vec<ProductImage>> {
        let sql = format!(
            "SELECT {} FROM product_images WHERE product_id = ?1 ORDER BY created_at, id",
            IMAGE_COLUMNS
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(sqlite_in("find_product_images"))?;
        let rows = stmt
            .query_map([product_id.as_str()], ImageRow::read)
            .map_err(sqlite_in("find_product_images"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(sqlite_in("find_product_images"))?;
        rows.into_iter().map(ImageRow::into_image).collect()
    }

    fn create_product(&mut self, product: &Product) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(sqlite_in("create_product"))?;
        Self::insert_product_tx(&tx, product)?;
        Self::apply_image_diff_tx(&tx, &product.id, product.images().current_items(), &[])?;
        tx.commit().map_err(sqlite_in("create_product"))?;
        Ok(())
    }

    fn save_product(&mut self, product: &Product) -> Result<()> {
        let removed_ids: Vec<UniqueEntityId> = product
            .images()
            .removed_items()
            .into_iter()
            .map(|image| image.id)
            .collect();

        let tx = self
            .conn
            .transaction()
            .map_err(sqlite_in("save_product"))?;
        Self::update_product_tx(&tx, product)?;
        Self::apply_image_diff_tx(&tx, &product.id, &product.images().new_items(), &removed_ids)?;
        tx.commit().map_err(sqlite_in("save_product"))?;
        Ok(())
    }

    fn apply_image_diff(
        &mut self,
        product_id: &UniqueEntityId,
        new_images: &[ProductImage],
        removed_ids: &[UniqueEntityId],
    ) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(sqlite_in("apply_image_diff"))?;
        if !Self::product_exists_tx(&tx, product_id)? {
            return Err(ExError::new(ExErrorKind::NotFound)
                .with_op("apply_image_diff")
                .with_entity_id(product_id.as_str())
                .with_message("Product not found"));
        }
        Self::apply_image_diff_tx(&tx, product_id, new_images, removed_ids)?;
        tx.commit().map_err(sqlite_in("apply_image_diff"))?;
        Ok(())
    }

    fn count_products_by_status_between(
        &self,
        seller_id: &UniqueEntityId,
        status: ProductStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        let n: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM products
                 WHERE seller_id = ?1 AND status = ?2 AND created_at BETWEEN ?3 AND ?4",
                params![
                    seller_id.as_str(),
                    status.as_str(),
                    to_millis(start),
                    to_millis(end)
                ],
                |row| row.get(0),
            )
            .map_err(sqlite_in("count_products_by_status"))?;
        Ok(count_to_u64(n))
    }
}

impl AttachmentRepository for SqliteRepo {
    fn create_attachment(&mut self, attachment: &Attachment) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO attachments (id, key) VALUES (?1, ?2)",
                params![attachment.id.as_str(), attachment.key],
            )
            .map_err(sqlite_in("create_attachment"))?;
        Ok(())
    }

    fn find_many_between_ids(&self, ids: &[UniqueEntityId]) -> Result<AttachmentLookup> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, key FROM attachments WHERE id = ?1")
            .map_err(sqlite_in("find_attachments"))?;

        let mut lookup = AttachmentLookup::default();
        for id in ids {
            let found = stmt
                .query_row([id.as_str()], read_attachment)
                .optional()
                .map_err(sqlite_in("find_attachments"))?;
            match found {
                Some(attachment) => lookup.found.push(attachment),
                None => lookup.not_found_ids.push(id.clone()),
            }
        }
        Ok(lookup)
    }
}

impl SellerRepository for SqliteRepo {
    fn create_seller(&mut self, seller: &Seller) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO sellers (id, name, email) VALUES (?1, ?2, ?3)",
                params![seller.id.as_str(), seller.name, seller.email],
            )
            .map_err(sqlite_in("create_seller"))?;
        Ok(())
    }

    fn find_seller(&self, id: &UniqueEntityId) -> Result<Option<Seller>> {
        self.conn
            .query_row(
                "SELECT id, name, email FROM sellers WHERE id = ?1",
                [id.as_str()],
                read_seller,
            )
            .optional()
            .map_err(sqlite_in("find_seller"))
    }
}

impl CategoryRepository for SqliteRepo {
    fn create_category(&mut self, category: &Category) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO categories (id, title, slug) VALUES (?1, ?2, ?3)",
                params![category.id.as_str(), category.title, category.slug],
            )
            .map_err(sqlite_in("create_category"))?;
        Ok(())
    }

    fn find_category(&self, id: &UniqueEntityId) -> Result<Option<Category>> {
        self.conn
            .query_row(
                "SELECT id, title, slug FROM categories WHERE id = ?1",
                [id.as_str()],
                read_category,
            )
            .optional()
            .map_err(sqlite_in("find_category"))
    }
}

impl ViewRepository for SqliteRepo {
    fn create_view(&mut self, view: &View) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO views (id, viewer_id, product_id, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    view.id.as_str(),
                    view.viewer_id.as_str(),
                    view.product_id.as_str(),
                    to_millis(view.created_at),
                ],
            )
            .map_err(sqlite_in("create_view"))?;
        Ok(())
    }

    fn find_by_viewer_and_product(
        &self,
        viewer_id: &UniqueEntityId,
        product_id: &UniqueEntityId,
    ) -> Result<Option<View>> {
        let sql = format!(
            "SELECT {} FROM views WHERE viewer_id = ?1 AND product_id = ?2",
            VIEW_COLUMNS
        );
        let row = self
            .conn
            .query_row(
                &sql,
                params![viewer_id.as_str(), product_id.as_str()],
                ViewRow::read,
            )
            .optional()
            .map_err(sqlite_in("find_view"))?;
        row.map(ViewRow::into_view).transpose()
    }

    fn count_views_by_product_between(
        &self,
        product_id: &UniqueEntityId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        let n: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM views WHERE product_id = ?1 AND created_at BETWEEN ?2 AND ?3",
                params![product_id.as_str(), to_millis(start), to_millis(end)],
                |row| row.get(0),
            )
            .map_err(sqlite_in("count_views_by_product"))?;
        Ok(count_to_u64(n))
    }

    fn count_views_by_seller_between(
        &self,
        seller_id: &UniqueEntityId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        let n: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM views v
                 JOIN products p ON p.id = v.product_id
                 WHERE p.seller_id = ?1 AND v.created_at BETWEEN ?2 AND ?3",
                params![seller_id.as_str(), to_millis(start), to_millis(end)],
                |row| row.get(0),
            )
            .map_err(sqlite_in("count_views_by_seller"))?;
        Ok(count_to_u64(n))
    }

    fn count_views_by_seller_grouped_by_day(
        &self,
        seller_id: &UniqueEntityId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BTreeMap<NaiveDate, u64>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT date(v.created_at / 1000, 'unixepoch') AS day, COUNT(*)
                 FROM views v
                 JOIN products p ON p.id = v.product_id
                 WHERE p.seller_id = ?1 AND v.created_at BETWEEN ?2 AND ?3
                 GROUP BY day",
            )
            .map_err(sqlite_in("count_views_by_day"))?;
        let rows = stmt
            .query_map(
                params![seller_id.as_str(), to_millis(start), to_millis(end)],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .map_err(sqlite_in("count_views_by_day"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(sqlite_in("count_views_by_day"))?;

        let mut grouped = BTreeMap::new();
        for (day, n) in rows {
            let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
                .map_err(|e| corrupt_row("views", &day, &e.to_string()))?;
            grouped.insert(date, count_to_u64(n));
        }
        Ok(grouped)
    }
}
