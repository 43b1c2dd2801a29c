//! Money Requests
//!
//! An ask for funds from one user to another. Only pending requests can be
//! approved or rejected by the recipient, or cancelled by the requester.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyRequest {
    pub id: Id,
    pub requester_id: Id,
    pub recipient_id: Id,
    pub amount: f64,
    #[serde(default)]
    pub message: String,
    pub status: RequestStatus,
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
}

impl MoneyRequest {
    /// Addressed to `user` (they are asked to pay)
    pub fn is_incoming_for(&self, user: Id) -> bool {
        self.recipient_id == user
    }

    /// Created by `user`
    pub fn is_outgoing_for(&self, user: Id) -> bool {
        self.requester_id == user
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// `user` may approve or reject
    pub fn can_respond(&self, user: Id) -> bool {
        self.is_pending() && self.is_incoming_for(user)
    }

    /// `user` may withdraw it
    pub fn can_cancel(&self, user: Id) -> bool {
        self.is_pending() && self.is_outgoing_for(user)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(RequestStatus::Pending),
            "APPROVED" | "ACCEPTED" => Ok(RequestStatus::Approved),
            "REJECTED" | "DECLINED" | "CANCELLED" => Ok(RequestStatus::Rejected),
            other => Err(format!("unknown request status: {}", other)),
        }
    }
}

impl Serialize for RequestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Body for `POST /requests/create`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMoneyRequest {
    pub requester_id: Id,
    pub recipient_id: Id,
    pub amount: f64,
    pub message: String,
}
