//! Placeholder Data
//!
//! Seeded demo records shown only when the caller explicitly opts into
//! placeholder content for a failed fetch. Output depends on nothing but
//! the seed, the viewer, the count and the supplied `now`.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{
    Id, MoneyRequest, Notification, NotificationCategory, RequestStatus, Transaction,
    TransactionStatus, User, Wallet, DEFAULT_CURRENCY,
};

/// Placeholder records span this many days back from `now`
pub const SPAN_DAYS: i64 = 30;

const DESCRIPTIONS: [&str; 8] = [
    "Dinner split",
    "Rent share",
    "Coffee",
    "Concert tickets",
    "Groceries",
    "Birthday gift",
    "Taxi",
    "Utilities",
];

const NAMES: [&str; 6] = [
    "Alex Morgan",
    "Priya Sharma",
    "Sam Lee",
    "Jordan Diaz",
    "Mei Chen",
    "Noah Patel",
];

/// Deterministic generator for demo records
pub struct Placeholder {
    rng: StdRng,
    now: DateTime<Utc>,
}

impl Placeholder {
    pub fn new(seed: u64, now: DateTime<Utc>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now,
        }
    }

    fn amount(&mut self, min: u32, max: u32) -> f64 {
        let cents = self.rng.gen_range(min * 100..=max * 100);
        cents as f64 / 100.0
    }

    fn timestamp(&mut self) -> DateTime<Utc> {
        let minutes = self.rng.gen_range(0..SPAN_DAYS * 24 * 60);
        self.now - Duration::minutes(minutes)
    }

    fn counterparty(&mut self, viewer: Id) -> Id {
        let offset = self.rng.gen_range(1..=NAMES.len() as Id);
        viewer + offset
    }

    pub fn user(&mut self, id: Id) -> User {
        let name = NAMES[self.rng.gen_range(0..NAMES.len())];
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            profile_picture: None,
            join_date: Some(self.now - Duration::days(self.rng.gen_range(60..720))),
        }
    }

    pub fn wallet(&mut self, user_id: Id) -> Wallet {
        Wallet {
            id: Some(user_id),
            user_id,
            balance: self.amount(100, 5000),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Newest first, mostly completed
    pub fn transactions(&mut self, viewer: Id, count: usize) -> Vec<Transaction> {
        let mut list: Vec<Transaction> = (0..count)
            .map(|i| {
                let other = self.counterparty(viewer);
                let outgoing = self.rng.gen_bool(0.5);
                let status = match self.rng.gen_range(0..10) {
                    0 => TransactionStatus::Pending,
                    1 => TransactionStatus::Failed { reason: None },
                    _ => TransactionStatus::Completed,
                };
                let (sender_id, recipient_id) = if outgoing {
                    (viewer, other)
                } else {
                    (other, viewer)
                };

                Transaction {
                    id: 10_000 + i as Id,
                    sender_id,
                    recipient_id,
                    amount: self.amount(5, 500),
                    status,
                    timestamp: self.timestamp(),
                    description: Some(
                        DESCRIPTIONS[self.rng.gen_range(0..DESCRIPTIONS.len())].to_string(),
                    ),
                    kind: None,
                }
            })
            .collect();

        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        list
    }

    pub fn notifications(&mut self, viewer: Id, count: usize) -> Vec<Notification> {
        let mut list: Vec<Notification> = (0..count)
            .map(|i| {
                let name = NAMES[self.rng.gen_range(0..NAMES.len())];
                let amount = self.amount(5, 300);
                let category = NotificationCategory::ALL[self.rng.gen_range(0..3)];
                let message = match category {
                    NotificationCategory::Transaction => {
                        format!("You received ${:.2} from {}", amount, name)
                    }
                    NotificationCategory::Request => {
                        format!("{} sent you a money request for ${:.2}", name, amount)
                    }
                    NotificationCategory::System => "Your account settings were updated".to_string(),
                };

                Notification {
                    id: 20_000 + i as Id,
                    user_id: viewer,
                    message,
                    timestamp: self.timestamp(),
                    read: self.rng.gen_bool(0.4),
                    category: Some(category),
                }
            })
            .collect();

        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        list
    }

    pub fn requests(&mut self, viewer: Id, count: usize) -> Vec<MoneyRequest> {
        let mut list: Vec<MoneyRequest> = (0..count)
            .map(|i| {
                let other = self.counterparty(viewer);
                let incoming = self.rng.gen_bool(0.5);
                let status = match self.rng.gen_range(0..4) {
                    0 => RequestStatus::Approved,
                    1 => RequestStatus::Rejected,
                    _ => RequestStatus::Pending,
                };
                let (requester_id, recipient_id) = if incoming {
                    (other, viewer)
                } else {
                    (viewer, other)
                };

                MoneyRequest {
                    id: 30_000 + i as Id,
                    requester_id,
                    recipient_id,
                    amount: self.amount(5, 250),
                    message: DESCRIPTIONS[self.rng.gen_range(0..DESCRIPTIONS.len())].to_string(),
                    status,
                    timestamp: self.timestamp(),
                    requester_name: None,
                    recipient_name: None,
                }
            })
            .collect();

        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_same_seed_same_output() {
        let a = Placeholder::new(42, now()).transactions(1, 25);
        let b = Placeholder::new(42, now()).transactions(1, 25);
        assert_eq!(a, b);

        let c = Placeholder::new(43, now()).transactions(1, 25);
        assert_ne!(a, c);
    }

    #[test]
    fn test_transactions_shape() {
        let list = Placeholder::new(7, now()).transactions(1, 40);
        assert_eq!(list.len(), 40);
        for t in &list {
            assert!(t.sender_id == 1 || t.recipient_id == 1);
            assert_ne!(t.sender_id, t.recipient_id);
            assert!(t.amount >= 5.0 && t.amount <= 500.0);
            assert_eq!((t.amount * 100.0).round() / 100.0, t.amount);
            assert!(t.timestamp <= now());
            assert!(t.timestamp > now() - Duration::days(SPAN_DAYS));
        }
        assert!(list.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn test_notifications_and_requests_belong_to_viewer() {
        let mut gen = Placeholder::new(3, now());
        assert!(gen.notifications(5, 10).iter().all(|n| n.user_id == 5));
        assert!(gen
            .requests(5, 10)
            .iter()
            .all(|r| r.requester_id == 5 || r.recipient_id == 5));
    }

    #[test]
    fn test_user_and_wallet() {
        let mut gen = Placeholder::new(1, now());
        let user = gen.user(9);
        assert_eq!(user.id, 9);
        assert!(user.email.ends_with("@example.com"));
        let wallet = gen.wallet(9);
        assert_eq!(wallet.currency, "INR");
        assert!(wallet.balance >= 100.0);
    }
}
