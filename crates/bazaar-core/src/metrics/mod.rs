//! View metrics support
//!
//! Pure helpers for turning grouped event counts into dense per-day series.

pub mod day_buckets;

pub use day_buckets::{build_day_buckets, group_by_day, start_of_day, window_start, DayBucket};

/// Length of the "month" window used by seller dashboards
pub const MONTH_WINDOW_DAYS: u32 = 30;

/// Length of the "week" window used by product view counts
pub const WEEK_WINDOW_DAYS: u32 = 7;
