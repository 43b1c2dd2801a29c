//! Wire Model
//!
//! Records exchanged with the payments REST API. Field names follow the
//! backend's camelCase JSON; timestamps are normalized to UTC.

pub mod notification;
pub mod request;
pub mod transaction;
pub mod user;
pub mod wallet;

pub use notification::{Notification, NotificationCategory};
pub use request::{CreateMoneyRequest, MoneyRequest, RequestStatus};
pub use transaction::{Direction, SendMoneyRequest, Transaction, TransactionStatus};
pub use user::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest,
    User, UserAnalytics,
};
pub use wallet::{AmountRequest, CreateWalletRequest, Wallet, DEFAULT_CURRENCY};

use serde::{Deserialize, Serialize};

/// Identifier type used by every backend entity
pub type Id = i64;

/// Spring-style paginated response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

/// Lenient timestamp (de)serialization.
///
/// The backend emits `LocalDateTime` values without an offset
/// (`2024-01-05T10:00:00.123`); other endpoints send RFC 3339. Both are
/// accepted, offset-less values are taken as UTC, and output is always
/// RFC 3339.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(naive.and_utc());
            }
        }
        chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Millis(i64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => {
                parse(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", s)))
            }
            Raw::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {}", ms))),
        }
    }

    /// Same rules for optional fields
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            ts: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            Ok(raw.as_deref().and_then(super::parse))
        }
    }
}

/// List endpoints answer either with a bare array or with the list
/// wrapped under a resource key (`{"notifications": [...]}`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Notifications { notifications: Vec<T> },
    Requests { requests: Vec<T> },
    Transactions { transactions: Vec<T> },
    Paged(Page<T>),
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items)
            | ListEnvelope::Notifications { notifications: items }
            | ListEnvelope::Requests { requests: items }
            | ListEnvelope::Transactions { transactions: items } => items,
            ListEnvelope::Paged(page) => page.content,
        }
    }
}

/// Single-entity endpoints may wrap the record as `{"message", "request": {...}}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemEnvelope<T> {
    Request { request: T },
    Wallet { wallet: T },
    Bare(T),
}

impl<T> ItemEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            ItemEnvelope::Request { request: item }
            | ItemEnvelope::Wallet { wallet: item }
            | ItemEnvelope::Bare(item) => item,
        }
    }
}
