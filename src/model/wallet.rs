//! Wallets
//!
//! One balance record per user. The client creates a wallet lazily when
//! the lookup answers 404.

use serde::{Deserialize, Serialize};

use super::Id;

/// Currency assigned to wallets created by the client
pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub user_id: Id,
    pub balance: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Body for `POST /wallets`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub user_id: Id,
    pub balance: f64,
    pub currency: String,
}

impl CreateWalletRequest {
    /// Empty wallet in the default currency
    pub fn empty(user_id: Id) -> Self {
        Self {
            user_id,
            balance: 0.0,
            currency: default_currency(),
        }
    }
}

/// Body for `POST /wallets/add` and `POST /wallets/credit`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountRequest {
    pub user_id: Id,
    pub amount: f64,
}
