//! Chart series: monthly sent/received and the sent-vs-received split

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use super::{TransactionSummary, MONTHS_KEPT};
use crate::model::{Id, Transaction};

/// Sent and received volume for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    /// `Jan 24`
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub sent: f64,
    pub received: f64,
}

/// One wedge of the proportion chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: &'static str,
    pub value: f64,
    /// Share of the total in 0..=1; 0 when the total is 0
    pub fraction: f64,
}

/// Completed volume per month, oldest first, trailing six active months.
///
/// Anything the viewer did not send is counted as received.
pub fn monthly_series(transactions: &[Transaction], viewer: Id) -> Vec<MonthBucket> {
    let mut months: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();

    for t in transactions.iter().filter(|t| t.is_completed()) {
        let key = (t.timestamp.year(), t.timestamp.month());
        let entry = months.entry(key).or_insert((0.0, 0.0));
        if t.sender_id == viewer {
            entry.0 += t.amount;
        } else {
            entry.1 += t.amount;
        }
    }

    let skip = months.len().saturating_sub(MONTHS_KEPT);
    months
        .into_iter()
        .skip(skip)
        .map(|((year, month), (sent, received))| MonthBucket {
            label: month_label(year, month),
            year,
            month,
            sent,
            received,
        })
        .collect()
}

/// Sent vs received proportions
pub fn distribution(summary: &TransactionSummary) -> [Slice; 2] {
    let total = summary.total_sent + summary.total_received;
    let fraction = |value: f64| if total > 0.0 { value / total } else { 0.0 };

    [
        Slice {
            label: "Sent",
            value: summary.total_sent,
            fraction: fraction(summary.total_sent),
        },
        Slice {
            label: "Received",
            value: summary.total_received,
            fraction: fraction(summary.total_received),
        },
    ]
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %y").to_string())
        .unwrap_or_else(|| format!("{:02}/{}", month, year))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_monthly_series_is_chronological() {
        let list = vec![
            tx(1, 1, 2, 30.0, at(2024, 3, 5, 9)),
            tx(2, 2, 1, 20.0, at(2024, 1, 5, 9)),
            tx(3, 1, 2, 10.0, at(2024, 1, 20, 9)),
        ];
        let series = monthly_series(&list, 1);
        let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 24", "Mar 24"]);
        assert_eq!(series[0].sent, 10.0);
        assert_eq!(series[0].received, 20.0);
        assert_eq!(series[1].sent, 30.0);
    }

    #[test]
    fn test_monthly_series_keeps_last_six_months() {
        let list: Vec<Transaction> = (1..=8u32)
            .map(|m| tx(m as Id, 1, 2, m as f64, at(2023, m, 1, 9)))
            .collect();
        let series = monthly_series(&list, 1);
        assert_eq!(series.len(), 6);
        assert_eq!(series.first().unwrap().label, "Mar 23");
        assert_eq!(series.last().unwrap().label, "Aug 23");
    }

    #[test]
    fn test_monthly_series_skips_incomplete() {
        let list = vec![with_status(tx(1, 1, 2, 30.0, at(2024, 3, 5, 9)), "pending")];
        assert!(monthly_series(&list, 1).is_empty());
    }

    #[test]
    fn test_distribution_fractions() {
        let list = vec![
            tx(1, 1, 2, 75.0, at(2024, 5, 2, 9)),
            tx(2, 2, 1, 25.0, at(2024, 5, 1, 9)),
        ];
        let slices = distribution(&TransactionSummary::compute(&list, 1));
        assert_eq!(slices[0].label, "Sent");
        assert_eq!(slices[0].fraction, 0.75);
        assert_eq!(slices[1].fraction, 0.25);

        let empty = distribution(&TransactionSummary::default());
        assert_eq!(empty[0].fraction, 0.0);
        assert_eq!(empty[1].fraction, 0.0);
    }
}
