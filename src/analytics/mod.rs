//! Transaction Analytics
//!
//! Pure folds over an already-fetched transaction list: totals, trends,
//! chart series and spending insights for one viewing user.
//!
//! Inputs are never assumed to be sorted. Every order-sensitive step works
//! on a newest-first copy, so results do not depend on how the server
//! ordered its response.

pub mod activity;
pub mod insights;
pub mod series;
pub mod summary;

pub use activity::{daily_activity, ActivityTotals, DayBucket};
pub use insights::Insights;
pub use series::{distribution, monthly_series, MonthBucket, Slice};
pub use summary::TransactionSummary;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Id, Transaction};

/// Number of trailing months kept in the monthly series
pub const MONTHS_KEPT: usize = 6;

/// Window size for the recent-vs-previous trend
pub const TREND_WINDOW: usize = 10;

/// Stable newest-first ordering; equal timestamps keep input order
pub fn newest_first(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}

/// Everything the analytics views render, computed in one pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub summary: TransactionSummary,
    pub monthly: Vec<MonthBucket>,
    pub distribution: [Slice; 2],
    pub daily: Vec<DayBucket>,
    pub activity: ActivityTotals,
    pub insights: Insights,
}

impl AnalyticsReport {
    pub fn build(
        transactions: &[Transaction],
        viewer: Id,
        now: DateTime<Utc>,
        activity_days: usize,
    ) -> Self {
        let summary = TransactionSummary::compute(transactions, viewer);
        let daily = daily_activity(transactions, viewer, activity_days, now.date_naive());

        Self {
            monthly: monthly_series(transactions, viewer),
            distribution: distribution(&summary),
            activity: ActivityTotals::from_buckets(&daily),
            insights: Insights::compute(transactions),
            daily,
            summary,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};

    use crate::model::{Id, Transaction, TransactionStatus};

    pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    pub fn tx(id: Id, sender: Id, recipient: Id, amount: f64, ts: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            sender_id: sender,
            recipient_id: recipient,
            amount,
            status: TransactionStatus::Completed,
            timestamp: ts,
            description: None,
            kind: None,
        }
    }

    pub fn with_status(mut t: Transaction, status: &str) -> Transaction {
        t.status = TransactionStatus::parse_lenient(status);
        t
    }
}
