//! Use cases running against the SQLite repository
//!
//! ## Scenarios Covered
//!
//! 1. Editing a product swaps images and keeps unchanged rows
//! 2. Unknown attachments abort the edit before anything is written
//! 3. The monthly views series is dense over stored views
//! 4. Metrics for an unknown seller fail as NotFound

mod common;

use bazaar_core::errors::ExErrorKind;
use bazaar_core::ports::ProductRepository;
use bazaar_core::use_cases::{
    edit_product, fetch_views_per_day_in_month, get_views_amount_in_month, EditProductRequest,
};
use bazaar_core::{Product, UniqueEntityId};
use bazaar_store::SqliteRepo;
use chrono::{Duration, TimeZone, Utc};
use common::{persisted_attachment_ids, Seeded};

fn request(seeded: &Seeded, product: &Product, attachment_ids: Vec<UniqueEntityId>) -> EditProductRequest {
    EditProductRequest {
        product_id: product.id.clone(),
        seller_id: seeded.seller.id.clone(),
        title: "Desk lamp".to_string(),
        category_id: seeded.category.id.clone(),
        description: product.description.clone(),
        price_in_cents: 1800,
        attachment_ids,
    }
}

#[test]
fn test_edit_product_swaps_images_in_sqlite() {
    // GIVEN a product showing attachments 0 and 1
    let mut repo = SqliteRepo::open_in_memory().unwrap();
    let seeded = Seeded::seed(&mut repo, 3);
    let product = seeded.product(&mut repo, &[0, 1]);
    let before = repo.find_product_images(&product.id).unwrap();
    let kept = before
        .iter()
        .find(|image| image.image_id == seeded.attachment_id(0))
        .cloned()
        .unwrap();

    // WHEN the owner edits it to show 0 and 2
    let req = request(
        &seeded,
        &product,
        vec![seeded.attachment_id(0), seeded.attachment_id(2)],
    );
    let response = edit_product(&mut repo, req).unwrap();

    // THEN one image is added, one removed, and image 0 keeps its identity
    assert_eq!(response.new_images.len(), 1);
    assert_eq!(response.removed_images.len(), 1);
    assert_eq!(response.new_images[0].image_id, seeded.attachment_id(2));
    assert_eq!(response.removed_images[0].image_id, seeded.attachment_id(1));

    let after = repo.find_product_images(&product.id).unwrap();
    assert_eq!(
        persisted_attachment_ids(&repo, &product.id),
        seeded.attachment_set(&[0, 2])
    );
    assert!(after.iter().any(|image| image.id == kept.id));

    let reloaded = repo.find_product(&product.id).unwrap().unwrap();
    assert_eq!(reloaded.title, "Desk lamp");
    assert_eq!(reloaded.price_in_cents, 1800);
}

#[test]
fn test_edit_product_unknown_attachment_writes_nothing() {
    let mut repo = SqliteRepo::open_in_memory().unwrap();
    let seeded = Seeded::seed(&mut repo, 2);
    let product = seeded.product(&mut repo, &[0]);

    let req = request(
        &seeded,
        &product,
        vec![seeded.attachment_id(1), UniqueEntityId::from("missing")],
    );
    let err = edit_product(&mut repo, req).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.ids(), Some(&["missing".to_string()][..]));
    let reloaded = repo.find_product(&product.id).unwrap().unwrap();
    assert_eq!(reloaded.title, "Lamp");
    assert_eq!(
        persisted_attachment_ids(&repo, &product.id),
        seeded.attachment_set(&[0])
    );
}

#[test]
fn test_views_per_day_over_sqlite() {
    // GIVEN views today, yesterday and 40 days ago
    let mut repo = SqliteRepo::open_in_memory().unwrap();
    let seeded = Seeded::seed(&mut repo, 0);
    let product = seeded.product(&mut repo, &[]);
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 14, 0, 0).unwrap();

    seeded.view_at(&mut repo, &product, now - Duration::hours(1));
    seeded.view_at(&mut repo, &product, now - Duration::days(1));
    seeded.view_at(&mut repo, &product, now - Duration::days(40));

    // WHEN the seller's monthly series and total are fetched
    let buckets = fetch_views_per_day_in_month(&repo, &seeded.seller.id, now).unwrap();
    let total = get_views_amount_in_month(&repo, &seeded.seller.id, now).unwrap();

    // THEN the series is dense and newest first
    assert_eq!(buckets.len(), 30);
    assert_eq!(buckets[0].date, Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap());
    assert_eq!(buckets[0].amount, 1);
    assert_eq!(buckets[1].amount, 1);
    assert_eq!(buckets.iter().map(|b| b.amount).sum::<u64>(), 2);
    assert_eq!(total, 2);
}

#[test]
fn test_metrics_for_unknown_seller_over_sqlite() {
    let repo = SqliteRepo::open_in_memory().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 14, 0, 0).unwrap();

    let err = get_views_amount_in_month(&repo, &UniqueEntityId::from("missing"), now).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity_id(), Some("missing"));
}
