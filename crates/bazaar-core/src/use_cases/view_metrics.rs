//! Seller dashboard metrics
//!
//! Every window ends at the caller-supplied `now`. Counting windows start
//! exactly 30 or 7 days earlier; the per-day series starts at the midnight
//! of its oldest bucket so every bucket covers a whole day.

use bazaar_core_types::UniqueEntityId;
use chrono::{DateTime, Days, Utc};

use super::{elapsed_ms, fail};
use crate::errors::{BazaarError, ExResult};
use crate::metrics::{
    build_day_buckets, window_start, DayBucket, MONTH_WINDOW_DAYS, WEEK_WINDOW_DAYS,
};
use crate::model::ProductStatus;
use crate::ports::{ProductRepository, SellerRepository, ViewRepository};
use crate::{log_op_end, log_op_error, log_op_start};

/// `now` minus `days`, clamped to the earliest representable instant
fn days_before(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn ensure_seller<R: SellerRepository>(
    repo: &R,
    op: &str,
    seller_id: &UniqueEntityId,
) -> ExResult<()> {
    match repo.find_seller(seller_id)? {
        Some(_) => Ok(()),
        None => Err(fail(
            op,
            BazaarError::SellerNotFound {
                seller_id: seller_id.to_string(),
            },
        )),
    }
}

/// Run `f`, logging start/end/error around it
fn observed<T>(
    op: &str,
    subject_id: &UniqueEntityId,
    f: impl FnOnce() -> ExResult<T>,
) -> ExResult<T> {
    log_op_start!(op, subject_id = subject_id.as_str());
    let start = std::time::Instant::now();

    let value = f().map_err(|e| {
        let e = e.with_op(op);
        log_op_error!(op, e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(op, duration_ms = elapsed_ms(start));
    Ok(value)
}

/// Views of the seller's products per day over the last 30 days, newest first
///
/// Returns 30 buckets.
///
/// # Errors
///
/// * `NotFound` - the seller is missing
pub fn fetch_views_per_day_in_month<R>(
    repo: &R,
    seller_id: &UniqueEntityId,
    now: DateTime<Utc>,
) -> ExResult<Vec<DayBucket>>
where
    R: SellerRepository + ViewRepository,
{
    const OP: &str = "fetch_views_per_day_in_month";
    observed(OP, seller_id, || {
        ensure_seller(repo, OP, seller_id)?;
        let grouped = repo.count_views_by_seller_grouped_by_day(
            seller_id,
            window_start(now, MONTH_WINDOW_DAYS),
            now,
        )?;
        Ok(build_day_buckets(now, MONTH_WINDOW_DAYS, &grouped))
    })
}

/// Views of the seller's products within `[now - 30 days, now]`
///
/// # Errors
///
/// * `NotFound` - the seller is missing
pub fn get_views_amount_in_month<R>(
    repo: &R,
    seller_id: &UniqueEntityId,
    now: DateTime<Utc>,
) -> ExResult<u64>
where
    R: SellerRepository + ViewRepository,
{
    const OP: &str = "get_views_amount_in_month";
    observed(OP, seller_id, || {
        ensure_seller(repo, OP, seller_id)?;
        repo.count_views_by_seller_between(seller_id, days_before(now, MONTH_WINDOW_DAYS), now)
    })
}

/// Views of one product within `[now - 7 days, now]`
///
/// # Errors
///
/// * `NotFound` - the product is missing
pub fn get_product_views_amount_in_week<R>(
    repo: &R,
    product_id: &UniqueEntityId,
    now: DateTime<Utc>,
) -> ExResult<u64>
where
    R: ProductRepository + ViewRepository,
{
    const OP: &str = "get_product_views_amount_in_week";
    observed(OP, product_id, || {
        if repo.find_product(product_id)?.is_none() {
            return Err(fail(
                OP,
                BazaarError::ProductNotFound {
                    product_id: product_id.to_string(),
                },
            ));
        }
        repo.count_views_by_product_between(product_id, days_before(now, WEEK_WINDOW_DAYS), now)
    })
}

/// Available products the seller created within `[now - 30 days, now]`
///
/// # Errors
///
/// * `NotFound` - the seller is missing
pub fn get_available_products_amount_in_month<R>(
    repo: &R,
    seller_id: &UniqueEntityId,
    now: DateTime<Utc>,
) -> ExResult<u64>
where
    R: SellerRepository + ProductRepository,
{
    const OP: &str = "get_available_products_amount_in_month";
    observed(OP, seller_id, || {
        ensure_seller(repo, OP, seller_id)?;
        repo.count_products_by_status_between(
            seller_id,
            ProductStatus::Available,
            days_before(now, MONTH_WINDOW_DAYS),
            now,
        )
    })
}

/// Sold products the seller created within `[now - 30 days, now]`
///
/// # Errors
///
/// * `NotFound` - the seller is missing
pub fn get_sold_products_amount_in_month<R>(
    repo: &R,
    seller_id: &UniqueEntityId,
    now: DateTime<Utc>,
) -> ExResult<u64>
where
    R: SellerRepository + ProductRepository,
{
    const OP: &str = "get_sold_products_amount_in_month";
    observed(OP, seller_id, || {
        ensure_seller(repo, OP, seller_id)?;
        repo.count_products_by_status_between(
            seller_id,
            ProductStatus::Sold,
            days_before(now, MONTH_WINDOW_DAYS),
            now,
        )
    })
}
