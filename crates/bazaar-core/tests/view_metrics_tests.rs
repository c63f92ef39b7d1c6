//! View metrics over the in-memory store
//!
//! ## Scenarios Covered
//!
//! 1. Dense 30-day series with gaps filled
//! 2. Month and week windows are inclusive of both ends
//! 3. Product counts by status within the month
//! 4. Unknown sellers and products are rejected as NotFound

mod common;

use bazaar_core::model::{ProductStatus, Seller, View};
use bazaar_core::ports::{ProductRepository, SellerRepository, ViewRepository};
use bazaar_core::use_cases::{
    fetch_views_per_day_in_month, get_available_products_amount_in_month,
    get_product_views_amount_in_week, get_sold_products_amount_in_month,
    get_views_amount_in_month,
};
use bazaar_core::Product;
use chrono::{DateTime, Duration, TimeZone, Utc};
use common::Fixture;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 14, 0, 0).unwrap()
}

/// Store a view by a fresh viewer at `at`
fn view_at(fx: &mut Fixture, product: &Product, at: DateTime<Utc>) {
    let viewer = Seller::new("viewer", "viewer@example.com");
    fx.store.create_seller(&viewer).unwrap();
    fx.store
        .create_view(&View::new(viewer.id, product.id.clone(), at))
        .unwrap();
}

#[test]
fn test_views_per_day_fills_gaps() {
    // GIVEN two views today and one three days ago
    let mut fx = Fixture::new(0);
    let product = fx.seed_product(&[]);
    view_at(&mut fx, &product, now() - Duration::hours(1));
    view_at(&mut fx, &product, now() - Duration::hours(2));
    view_at(&mut fx, &product, now() - Duration::days(3));

    // WHEN the monthly series is fetched
    let buckets = fetch_views_per_day_in_month(&fx.store, &fx.seller.id, now()).unwrap();

    // THEN there are 30 buckets, newest first, with the gaps zeroed
    assert_eq!(buckets.len(), 30);
    assert_eq!(buckets[0].date, Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap());
    assert_eq!(buckets[0].amount, 2);
    assert_eq!(buckets[1].amount, 0);
    assert_eq!(buckets[3].amount, 1);
    assert_eq!(buckets.iter().map(|b| b.amount).sum::<u64>(), 3);
}

#[test]
fn test_views_per_day_for_seller_without_views() {
    let fx = Fixture::new(0);

    let buckets = fetch_views_per_day_in_month(&fx.store, &fx.seller.id, now()).unwrap();

    assert_eq!(buckets.len(), 30);
    assert!(buckets.iter().all(|b| b.amount == 0));
}

#[test]
fn test_views_of_other_sellers_not_counted() {
    let mut fx = Fixture::new(0);
    let product = fx.seed_product(&[]);
    view_at(&mut fx, &product, now());

    let total = get_views_amount_in_month(&fx.store, &fx.other_seller.id, now()).unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_month_window_bounds() {
    let mut fx = Fixture::new(0);
    let product = fx.seed_product(&[]);
    view_at(&mut fx, &product, now() - Duration::days(30));
    view_at(&mut fx, &product, now() - Duration::days(30) - Duration::seconds(1));
    view_at(&mut fx, &product, now());

    let total = get_views_amount_in_month(&fx.store, &fx.seller.id, now()).unwrap();
    assert_eq!(total, 2);
}

#[test]
fn test_week_window_for_product() {
    let mut fx = Fixture::new(0);
    let product = fx.seed_product(&[]);
    view_at(&mut fx, &product, now() - Duration::days(6));
    view_at(&mut fx, &product, now() - Duration::days(8));

    let total = get_product_views_amount_in_week(&fx.store, &product.id, now()).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_products_by_status_in_month() {
    // GIVEN one available product, one sold product, one old sold product
    let mut fx = Fixture::new(0);
    let recent = now() - Duration::days(2);

    let available = Product::restore(
        bazaar_core::UniqueEntityId::new(),
        fx.seller.id.clone(),
        fx.details("Chair"),
        ProductStatus::Available,
        recent,
    );
    let sold = Product::restore(
        bazaar_core::UniqueEntityId::new(),
        fx.seller.id.clone(),
        fx.details("Table"),
        ProductStatus::Sold,
        recent,
    );
    let old_sold = Product::restore(
        bazaar_core::UniqueEntityId::new(),
        fx.seller.id.clone(),
        fx.details("Sofa"),
        ProductStatus::Sold,
        now() - Duration::days(45),
    );
    for product in [&available, &sold, &old_sold] {
        fx.store.create_product(product).unwrap();
    }

    // THEN only products created within the month are counted
    assert_eq!(
        get_available_products_amount_in_month(&fx.store, &fx.seller.id, now()).unwrap(),
        1
    );
    assert_eq!(
        get_sold_products_amount_in_month(&fx.store, &fx.seller.id, now()).unwrap(),
        1
    );
}

#[test]
fn test_seller_metrics_reject_unknown_seller() {
    // GIVEN a store without the requested seller
    let fx = Fixture::new(0);
    let ghost = bazaar_core::UniqueEntityId::from("ghost");

    // WHEN any seller metric is requested
    let errors = [
        fetch_views_per_day_in_month(&fx.store, &ghost, now()).map(|_| ()),
        get_views_amount_in_month(&fx.store, &ghost, now()).map(|_| ()),
        get_available_products_amount_in_month(&fx.store, &ghost, now()).map(|_| ()),
        get_sold_products_amount_in_month(&fx.store, &ghost, now()).map(|_| ()),
    ];

    // THEN each fails with NotFound naming the seller
    for result in errors {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), bazaar_core::ExErrorKind::NotFound);
        assert_eq!(err.entity_id(), Some("ghost"));
    }
}

#[test]
fn test_week_metric_rejects_unknown_product() {
    let fx = Fixture::new(0);

    let err = get_product_views_amount_in_week(
        &fx.store,
        &bazaar_core::UniqueEntityId::from("ghost"),
        now(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), bazaar_core::ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("get_product_views_amount_in_week"));
    assert_eq!(err.entity_id(), Some("ghost"));
}
