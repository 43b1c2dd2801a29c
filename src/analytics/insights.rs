//! Spending insights
//!
//! Computed over every transaction regardless of status. Weekday and hour
//! come from the newest transaction.

use chrono::Timelike;
use serde::Serialize;
use std::collections::HashSet;

use super::newest_first;
use crate::model::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// 0 when empty
    pub largest: f64,
    /// Full weekday name, e.g. `Tuesday`
    pub most_active_weekday: Option<String>,
    /// 0..=23
    pub peak_hour: Option<u32>,
    pub average_per_week: f64,
    /// Distinct calendar dates with any transaction
    pub active_days: usize,
    /// `2.5/day`, or `0/day` when there is nothing to show
    pub frequency_label: String,
}

impl Insights {
    pub fn compute(transactions: &[Transaction]) -> Self {
        let sorted = newest_first(transactions);
        let newest = sorted.first();

        let largest = transactions
            .iter()
            .map(|t| t.amount)
            .fold(0.0_f64, f64::max);

        let total: f64 = transactions.iter().map(|t| t.amount).sum();
        let weeks = transactions.len().div_ceil(7).max(1);

        let active_days = transactions
            .iter()
            .map(|t| t.timestamp.date_naive())
            .collect::<HashSet<_>>()
            .len();

        let frequency_label = if transactions.is_empty() {
            "0/day".to_string()
        } else {
            format!(
                "{:.1}/day",
                transactions.len() as f64 / active_days.max(1) as f64
            )
        };

        Self {
            largest,
            most_active_weekday: newest.map(|t| t.timestamp.format("%A").to_string()),
            peak_hour: newest.map(|t| t.timestamp.hour()),
            average_per_week: total / weeks as f64,
            active_days,
            frequency_label,
        }
    }

    /// `14:00`, or `N/A`
    pub fn peak_hour_label(&self) -> String {
        self.peak_hour
            .map(|h| format!("{}:00", h))
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn weekday_label(&self) -> &str {
        self.most_active_weekday.as_deref().unwrap_or("N/A")
    }
}
