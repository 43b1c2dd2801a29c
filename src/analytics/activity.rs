//! Daily activity buckets for the recent-days chart

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::model::{Id, Transaction};

/// Days compared at the end of the window
const RECENT_DAYS: usize = 3;
/// Days compared at the start of the window
const PREVIOUS_DAYS: usize = 4;

/// One calendar day of completed activity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    /// `May 07`
    pub label: String,
    pub sent: f64,
    pub received: f64,
    pub net: f64,
}

impl DayBucket {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            label: date.format("%b %d").to_string(),
            sent: 0.0,
            received: 0.0,
            net: 0.0,
        }
    }

    pub fn volume(&self) -> f64 {
        self.sent + self.received
    }
}

/// Totals and trend over a bucket window
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityTotals {
    pub total_sent: f64,
    pub total_received: f64,
    pub net_flow: f64,
    /// Last three days vs the first four, in percent
    pub trend_percent: f64,
}

impl ActivityTotals {
    pub fn from_buckets(buckets: &[DayBucket]) -> Self {
        let total_sent: f64 = buckets.iter().map(|b| b.sent).sum();
        let total_received: f64 = buckets.iter().map(|b| b.received).sum();

        let recent: f64 = buckets
            .iter()
            .rev()
            .take(RECENT_DAYS)
            .map(DayBucket::volume)
            .sum();
        let previous: f64 = buckets
            .iter()
            .take(PREVIOUS_DAYS)
            .map(DayBucket::volume)
            .sum();

        Self {
            total_sent,
            total_received,
            net_flow: total_received - total_sent,
            trend_percent: if previous > 0.0 {
                (recent - previous) / previous * 100.0
            } else {
                0.0
            },
        }
    }
}

/// `days` zero-filled buckets ending at `today`, oldest first.
///
/// Only completed transactions touching the viewer are counted.
pub fn daily_activity(
    transactions: &[Transaction],
    viewer: Id,
    days: usize,
    today: NaiveDate,
) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = (0..days)
        .rev()
        .map(|offset| DayBucket::empty(today - Duration::days(offset as i64)))
        .collect();

    let index: HashMap<NaiveDate, usize> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| (b.date, i))
        .collect();

    for t in transactions.iter().filter(|t| t.is_completed()) {
        let Some(&i) = index.get(&t.timestamp.date_naive()) else {
            continue;
        };
        let bucket = &mut buckets[i];
        if t.sender_id == viewer {
            bucket.sent += t.amount;
        } else if t.recipient_id == viewer {
            bucket.received += t.amount;
        }
        bucket.net = bucket.received - bucket.sent;
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_window_is_zero_filled_and_ordered() {
        let buckets = daily_activity(&[], 1, 7, today());
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].date, NaiveDate::from_ymd_opt(2024, 5, 4).unwrap());
        assert_eq!(buckets[6].date, today());
        assert_eq!(buckets[6].label, "May 10");
        assert!(buckets.iter().all(|b| b.volume() == 0.0));
    }

    #[test]
    fn test_bucketing_by_day_and_direction() {
        let list = vec![
            tx(1, 1, 2, 50.0, at(2024, 5, 10, 8)),
            tx(2, 2, 1, 20.0, at(2024, 5, 10, 18)),
            tx(3, 1, 2, 5.0, at(2024, 5, 8, 12)),
            // outside the window
            tx(4, 1, 2, 999.0, at(2024, 4, 1, 12)),
            // not involving the viewer
            tx(5, 3, 4, 77.0, at(2024, 5, 9, 12)),
            with_status(tx(6, 1, 2, 300.0, at(2024, 5, 9, 12)), "failed"),
        ];
        let buckets = daily_activity(&list, 1, 7, today());

        assert_eq!(buckets[6].sent, 50.0);
        assert_eq!(buckets[6].received, 20.0);
        assert_eq!(buckets[6].net, -30.0);
        assert_eq!(buckets[4].sent, 5.0);
        assert_eq!(buckets[5].volume(), 0.0);

        let totals = ActivityTotals::from_buckets(&buckets);
        assert_eq!(totals.total_sent, 55.0);
        assert_eq!(totals.total_received, 20.0);
        assert_eq!(totals.net_flow, -35.0);
        // previous four days are empty
        assert_eq!(totals.trend_percent, 0.0);
    }

    #[test]
    fn test_activity_trend() {
        let list = vec![
            tx(1, 1, 2, 10.0, at(2024, 5, 4, 9)),
            tx(2, 1, 2, 30.0, at(2024, 5, 10, 9)),
        ];
        let totals = ActivityTotals::from_buckets(&daily_activity(&list, 1, 7, today()));
        assert!((totals.trend_percent - 200.0).abs() < 1e-9);
    }
}
