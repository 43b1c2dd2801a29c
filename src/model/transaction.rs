//! Transactions
//!
//! Directed transfers between two users. The client never mutates them;
//! it only re-labels each one relative to the viewing user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::Id;

/// A transfer of funds between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Id,
    pub sender_id: Id,
    pub recipient_id: Id,
    pub amount: f64,
    pub status: TransactionStatus,
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Server-side label, when the endpoint provides one
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Which way money moved, seen from one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "DEBIT",
            Direction::Credit => "CREDIT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Transaction {
    /// Debit when `viewer` sent it, credit when `viewer` received it
    pub fn direction_for(&self, viewer: Id) -> Option<Direction> {
        if self.sender_id == viewer {
            Some(Direction::Debit)
        } else if self.recipient_id == viewer {
            Some(Direction::Credit)
        } else {
            None
        }
    }

    /// Display label relative to `viewer`, falling back to the server label
    pub fn label_for(&self, viewer: Id) -> String {
        match self.direction_for(viewer) {
            Some(direction) => direction.as_str().to_string(),
            None => self
                .kind
                .clone()
                .unwrap_or_else(|| "TRANSFER".to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Counterparty id from the viewer's perspective
    pub fn counterparty(&self, viewer: Id) -> Id {
        if self.sender_id == viewer {
            self.recipient_id
        } else {
            self.sender_id
        }
    }
}

/// Lifecycle status of a transaction.
///
/// Older backend builds stored failures as `FAILED: <reason>`; the reason
/// is kept so it can be shown and written back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed { reason: Option<String> },
    Other(String),
}

impl TransactionStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, TransactionStatus::Failed { .. })
    }

    /// Short status keyword without any failure reason
    pub fn keyword(&self) -> &str {
        match self {
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Failed { .. } => "FAILED",
            TransactionStatus::Other(s) => s.as_str(),
        }
    }

    /// Parse any wire spelling; unknown values become `Other`
    pub fn parse_lenient(s: &str) -> Self {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();

        match upper.as_str() {
            "COMPLETED" | "SUCCESS" => TransactionStatus::Completed,
            "PENDING" => TransactionStatus::Pending,
            "FAILED" => TransactionStatus::Failed { reason: None },
            _ if upper.starts_with("FAILED:") => {
                let reason = trimmed["FAILED:".len()..].trim();
                TransactionStatus::Failed {
                    reason: (!reason.is_empty()).then(|| reason.to_string()),
                }
            }
            _ => TransactionStatus::Other(trimmed.to_string()),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Failed { reason: Some(reason) } => write!(f, "FAILED: {}", reason),
            other => f.write_str(other.keyword()),
        }
    }
}

impl Serialize for TransactionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransactionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

/// Body for `POST /transactions` and `POST /transactions/send`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMoneyRequest {
    pub sender_id: Id,
    pub recipient_id: Id,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
