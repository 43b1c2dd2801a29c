//! List Filters
//!
//! Local, non-persisted view filters over fetched lists. Every filter is a
//! pure function: the input slice is never modified and `All` variants
//! return it unchanged.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{Direction, Id, Notification, NotificationCategory, Transaction, TransactionStatus};

/// Trailing time window relative to "now"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    All,
    Today,
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 6] = [
        TimeRange::All,
        TimeRange::Today,
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Quarter,
        TimeRange::Year,
    ];

    /// Earliest timestamp kept, or `None` for no bound
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::All => None,
            TimeRange::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|start| start.and_utc()),
            TimeRange::Week => Some(now - chrono::Duration::days(7)),
            TimeRange::Month => now.checked_sub_months(Months::new(1)),
            TimeRange::Quarter => now.checked_sub_months(Months::new(3)),
            TimeRange::Year => now.checked_sub_months(Months::new(12)),
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.cutoff(now).map_or(true, |cutoff| ts >= cutoff)
    }

    /// Transactions at or after the cutoff, in input order
    pub fn apply(&self, transactions: &[Transaction], now: DateTime<Utc>) -> Vec<Transaction> {
        match self.cutoff(now) {
            None => transactions.to_vec(),
            Some(cutoff) => transactions
                .iter()
                .filter(|t| t.timestamp >= cutoff)
                .cloned()
                .collect(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::All => "All time",
            TimeRange::Today => "Today",
            TimeRange::Week => "Last 7 days",
            TimeRange::Month => "Last month",
            TimeRange::Quarter => "Last 3 months",
            TimeRange::Year => "Last year",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::All => "all",
            TimeRange::Today => "today",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Quarter => "quarter",
            TimeRange::Year => "year",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(TimeRange::All),
            "today" | "1d" => Ok(TimeRange::Today),
            "week" | "7d" => Ok(TimeRange::Week),
            "month" | "30d" => Ok(TimeRange::Month),
            "quarter" | "90d" => Ok(TimeRange::Quarter),
            "year" | "1y" => Ok(TimeRange::Year),
            other => Err(format!(
                "Invalid range: {}. Use: all, today, week, month, quarter, year",
                other
            )),
        }
    }
}

/// Sent / received selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Sent,
    Received,
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(TypeFilter::All),
            "sent" | "debit" => Ok(TypeFilter::Sent),
            "received" | "credit" => Ok(TypeFilter::Received),
            other => Err(format!("Invalid type: {}. Use: all, sent, received", other)),
        }
    }
}

/// Search text plus type and status selectors for the transactions view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub search: String,
    pub kind: TypeFilter,
    pub status: Option<TransactionStatus>,
}

impl TransactionFilter {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn kind(mut self, kind: TypeFilter) -> Self {
        self.kind = kind;
        self
    }

    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.kind == TypeFilter::All && self.status.is_none()
    }

    pub fn matches(&self, t: &Transaction, viewer: Id) -> bool {
        let kind_ok = match self.kind {
            TypeFilter::All => true,
            TypeFilter::Sent => t.direction_for(viewer) == Some(Direction::Debit),
            TypeFilter::Received => t.direction_for(viewer) == Some(Direction::Credit),
        };

        let status_ok = self
            .status
            .as_ref()
            .map_or(true, |s| s.keyword() == t.status.keyword());

        kind_ok && status_ok && self.matches_search(t)
    }

    fn matches_search(&self, t: &Transaction) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        t.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
            || format!("{:.2}", t.amount).contains(&needle)
            || t.id.to_string().contains(&needle)
    }

    pub fn apply(&self, transactions: &[Transaction], viewer: Id) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t, viewer))
            .cloned()
            .collect()
    }
}

/// Notification view selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Read,
    Category(NotificationCategory),
}

impl NotificationFilter {
    pub fn matches(&self, n: &Notification) -> bool {
        match self {
            NotificationFilter::All => true,
            NotificationFilter::Unread => !n.read,
            NotificationFilter::Read => n.read,
            NotificationFilter::Category(c) => n.effective_category() == *c,
        }
    }

    pub fn apply<'a>(&self, notifications: &'a [Notification]) -> Vec<&'a Notification> {
        notifications.iter().filter(|n| self.matches(n)).collect()
    }
}

impl FromStr for NotificationFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(NotificationFilter::All),
            "unread" => Ok(NotificationFilter::Unread),
            "read" => Ok(NotificationFilter::Read),
            other => other.parse().map(NotificationFilter::Category),
        }
    }
}

/// Client-side pagination; `page` is zero-based.
///
/// Returns the page slice and the total page count (at least 1).
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> (&[T], usize) {
    let size = size.max(1);
    let total_pages = items.len().div_ceil(size).max(1);
    let start = page.saturating_mul(size).min(items.len());
    let end = (start + size).min(items.len());
    (&items[start..end], total_pages)
}
