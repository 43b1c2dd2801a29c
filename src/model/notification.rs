//! Notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Id;

/// A user-facing message about account activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Id,
    pub user_id: Id,
    pub message: String,
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<NotificationCategory>,
}

impl Notification {
    /// Explicit category, or one inferred from the message text
    pub fn effective_category(&self) -> NotificationCategory {
        self.category
            .unwrap_or_else(|| NotificationCategory::infer(&self.message))
    }
}

/// Unknown category strings are treated as absent
fn lenient_category<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NotificationCategory>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Transaction,
    Request,
    System,
}

impl NotificationCategory {
    pub const ALL: [NotificationCategory; 3] = [
        NotificationCategory::Transaction,
        NotificationCategory::Request,
        NotificationCategory::System,
    ];

    /// Guess the category from message wording
    pub fn infer(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("request") {
            NotificationCategory::Request
        } else if ["sent", "received", "payment", "transaction", "credited", "debited"]
            .iter()
            .any(|word| lower.contains(word))
        {
            NotificationCategory::Transaction
        } else {
            NotificationCategory::System
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Transaction => "transaction",
            NotificationCategory::Request => "request",
            NotificationCategory::System => "system",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transaction" | "transactions" => Ok(NotificationCategory::Transaction),
            "request" | "requests" => Ok(NotificationCategory::Request),
            "system" => Ok(NotificationCategory::System),
            other => Err(format!("unknown notification category: {}", other)),
        }
    }
}
