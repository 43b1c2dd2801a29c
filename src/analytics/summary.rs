//! Summary metrics over completed transactions

use serde::Serialize;

use super::{newest_first, TREND_WINDOW};
use crate::model::{Id, Transaction, TransactionStatus};

/// Headline numbers for one viewer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub total_count: usize,
    pub completed_count: usize,
    pub sent_count: usize,
    pub received_count: usize,
    pub pending_count: usize,
    pub failed_count: usize,
    pub total_sent: f64,
    pub total_received: f64,
    /// Always `total_received - total_sent`
    pub net_flow: f64,
    /// 0 when nothing completed
    pub average_amount: f64,
    /// Completed share of all transactions, in percent
    pub success_rate: f64,
    /// Newest 10 completed vs the 10 before them, in percent
    pub trend_percent: f64,
}

impl TransactionSummary {
    pub fn compute(transactions: &[Transaction], viewer: Id) -> Self {
        let sorted = newest_first(transactions);
        let completed: Vec<&Transaction> =
            sorted.iter().copied().filter(|t| t.is_completed()).collect();

        let mut summary = Self {
            total_count: transactions.len(),
            completed_count: completed.len(),
            ..Default::default()
        };

        for t in &completed {
            if t.sender_id == viewer {
                summary.sent_count += 1;
                summary.total_sent += t.amount;
            }
            if t.recipient_id == viewer {
                summary.received_count += 1;
                summary.total_received += t.amount;
            }
        }

        for t in transactions {
            match t.status {
                TransactionStatus::Pending => summary.pending_count += 1,
                TransactionStatus::Failed { .. } => summary.failed_count += 1,
                _ => {}
            }
        }

        summary.net_flow = summary.total_received - summary.total_sent;

        if !completed.is_empty() {
            summary.average_amount =
                (summary.total_sent + summary.total_received) / completed.len() as f64;
        }

        if !transactions.is_empty() {
            summary.success_rate = completed.len() as f64 / transactions.len() as f64 * 100.0;
        }

        summary.trend_percent = trend(&completed);
        summary
    }

    /// Net flow is non-negative (rendered green with a plus sign)
    pub fn is_net_positive(&self) -> bool {
        self.net_flow >= 0.0
    }
}

fn trend(completed_newest_first: &[&Transaction]) -> f64 {
    let recent: Vec<&&Transaction> = completed_newest_first.iter().take(TREND_WINDOW).collect();
    let older: Vec<&&Transaction> = completed_newest_first
        .iter()
        .skip(TREND_WINDOW)
        .take(TREND_WINDOW)
        .collect();

    let recent_avg = recent.iter().map(|t| t.amount).sum::<f64>() / recent.len().max(1) as f64;
    let older_avg = older.iter().map(|t| t.amount).sum::<f64>() / older.len().max(1) as f64;

    if older_avg > 0.0 {
        (recent_avg - older_avg) / older_avg * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_sent_received_net_flow() {
        let list = vec![
            tx(1, 1, 2, 100.0, at(2024, 5, 2, 9)),
            tx(2, 2, 1, 40.0, at(2024, 5, 1, 9)),
        ];
        let s = TransactionSummary::compute(&list, 1);
        assert_eq!(s.total_sent, 100.0);
        assert_eq!(s.total_received, 40.0);
        assert_eq!(s.net_flow, -60.0);
        assert_eq!(s.net_flow, s.total_received - s.total_sent);
        assert!(!s.is_net_positive());
        assert_eq!(s.average_amount, 70.0);
        assert_eq!(crate::format::signed_currency(s.net_flow), "-$60.00");
    }

    #[test]
    fn test_only_completed_transactions_count() {
        let list = vec![
            tx(1, 1, 2, 100.0, at(2024, 5, 3, 9)),
            with_status(tx(2, 1, 2, 500.0, at(2024, 5, 2, 9)), "pending"),
            with_status(tx(3, 2, 1, 70.0, at(2024, 5, 1, 9)), "FAILED: card declined"),
        ];
        let s = TransactionSummary::compute(&list, 1);
        assert_eq!(s.completed_count, 1);
        assert_eq!(s.total_sent, 100.0);
        assert_eq!(s.total_received, 0.0);
        assert_eq!(s.pending_count, 1);
        assert_eq!(s.failed_count, 1);
        assert!((s.success_rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_is_zero_without_completed() {
        let list = vec![with_status(tx(1, 1, 2, 10.0, at(2024, 5, 1, 9)), "pending")];
        let s = TransactionSummary::compute(&list, 1);
        assert_eq!(s.average_amount, 0.0);
        assert!(s.average_amount.is_finite());

        let empty = TransactionSummary::compute(&[], 1);
        assert_eq!(empty.average_amount, 0.0);
        assert_eq!(empty.success_rate, 0.0);
        assert_eq!(empty.trend_percent, 0.0);
    }

    #[test]
    fn test_trend_compares_newest_ten_with_previous_ten() {
        let mut list = Vec::new();
        for i in 0..20u32 {
            // ids 0..10 are older with amount 10, ids 10..20 newer with amount 15
            let amount = if i < 10 { 10.0 } else { 15.0 };
            list.push(tx(i as Id, 1, 2, amount, at(2024, 1, 1 + i, 9)));
        }
        let s = TransactionSummary::compute(&list, 1);
        assert!((s.trend_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_is_order_independent() {
        let mut list = Vec::new();
        for i in 0..15u32 {
            list.push(tx(i as Id, 1, 2, (i + 1) as f64, at(2024, 2, 1 + i, 9)));
        }
        let forward = TransactionSummary::compute(&list, 1);
        list.reverse();
        let backward = TransactionSummary::compute(&list, 1);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_trend_zero_when_no_previous_period() {
        let list = vec![tx(1, 1, 2, 10.0, at(2024, 5, 1, 9))];
        assert_eq!(TransactionSummary::compute(&list, 1).trend_percent, 0.0);
    }
}
