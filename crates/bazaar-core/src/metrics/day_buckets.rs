//! Dense day-bucket aggregation
//!
//! Event counts arrive sparse: only days that saw events have an entry.
//! [`build_day_buckets`] fills the gaps so a window of `N` days always
//! yields exactly `N` buckets.
//!
//! Buckets are emitted newest-first: index 0 is the day containing `now`,
//! index `N - 1` is the oldest day in the window. All day boundaries are
//! UTC midnights.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Event count for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    /// Midnight UTC at the start of the day
    pub date: DateTime<Utc>,
    pub amount: u64,
}

/// Midnight UTC at the start of `date`
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Start of the oldest day covered by a window of `window_days` ending at `now`
///
/// A zero-length window starts at the beginning of today. A window reaching
/// past the earliest representable date starts at that date.
pub fn window_start(now: DateTime<Utc>, window_days: u32) -> DateTime<Utc> {
    let back = u64::from(window_days.saturating_sub(1));
    let first = now
        .date_naive()
        .checked_sub_days(Days::new(back))
        .unwrap_or(NaiveDate::MIN);
    start_of_day(first)
}

/// Build one bucket per day in the trailing window, newest first
///
/// Days missing from `grouped` get `amount = 0`. Entries of `grouped`
/// outside the window are ignored. Emission stops at the earliest
/// representable date.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use chrono::{TimeZone, Utc};
/// use bazaar_core::metrics::build_day_buckets;
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 10, 15, 30, 0).unwrap();
/// let mut grouped = BTreeMap::new();
/// grouped.insert(now.date_naive(), 2);
///
/// let buckets = build_day_buckets(now, 2, &grouped);
/// assert_eq!(buckets.len(), 2);
/// assert_eq!(buckets[0].amount, 2);
/// assert_eq!(buckets[1].amount, 0);
/// ```
pub fn build_day_buckets(
    now: DateTime<Utc>,
    window_days: u32,
    grouped: &BTreeMap<NaiveDate, u64>,
) -> Vec<DayBucket> {
    let today = now.date_naive();
    (0..window_days)
        .map_while(|i| today.checked_sub_days(Days::new(u64::from(i))))
        .map(|day| DayBucket {
            date: start_of_day(day),
            amount: grouped.get(&day).copied().unwrap_or(0),
        })
        .collect()
}

/// Count raw event timestamps per UTC calendar day
pub fn group_by_day<I>(timestamps: I) -> BTreeMap<NaiveDate, u64>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut grouped = BTreeMap::new();
    for ts in timestamps {
        *grouped.entry(ts.date_naive()).or_insert(0) += 1;
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_two_day_window_newest_first() {
        let now = at(2024, 3, 10, 18);
        let mut grouped = BTreeMap::new();
        grouped.insert(now.date_naive(), 2);

        let buckets = build_day_buckets(now, 2, &grouped);

        assert_eq!(
            buckets,
            vec![
                DayBucket {
                    date: at(2024, 3, 10, 0),
                    amount: 2
                },
                DayBucket {
                    date: at(2024, 3, 9, 0),
                    amount: 0
                },
            ]
        );
    }

    #[test]
    fn test_zero_window_is_empty() {
        let buckets = build_day_buckets(at(2024, 3, 10, 0), 0, &BTreeMap::new());
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let now = at(2024, 3, 1, 9);
        let buckets = build_day_buckets(now, 3, &BTreeMap::new());

        let days: Vec<_> = buckets.iter().map(|b| b.date.date_naive()).collect();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
            ]
        );
    }

    #[test]
    fn test_counts_outside_window_ignored() {
        let now = at(2024, 3, 10, 12);
        let mut grouped = BTreeMap::new();
        grouped.insert(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 40);

        let total: u64 = build_day_buckets(now, 30, &grouped)
            .iter()
            .map(|b| b.amount)
            .sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn test_group_by_day_truncates_time() {
        let grouped = group_by_day(vec![
            at(2024, 3, 10, 1),
            at(2024, 3, 10, 23),
            at(2024, 3, 9, 12),
        ]);

        assert_eq!(grouped.get(&NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()), Some(&2));
        assert_eq!(grouped.get(&NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()), Some(&1));
    }

    #[test]
    fn test_window_start_is_oldest_midnight() {
        let now = at(2024, 3, 10, 17);
        assert_eq!(window_start(now, 30), at(2024, 2, 10, 0));
        assert_eq!(window_start(now, 1), at(2024, 3, 10, 0));
        assert_eq!(window_start(now, 0), at(2024, 3, 10, 0));
    }

    #[test]
    fn test_buckets_stop_at_earliest_date() {
        let buckets = build_day_buckets(DateTime::<Utc>::MIN_UTC, 2, &BTreeMap::new());

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date, start_of_day(NaiveDate::MIN));
    }

    #[test]
    fn test_window_start_clamps_to_earliest_date() {
        let earliest = start_of_day(NaiveDate::MIN);
        assert_eq!(window_start(at(2024, 3, 10, 17), 200_000_000), earliest);
        assert_eq!(window_start(DateTime::<Utc>::MIN_UTC, 30), earliest);
    }
}
