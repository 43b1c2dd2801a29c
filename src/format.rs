//! Display Formatting
//!
//! Currency, percentage and relative-time helpers shared by the CLI and
//! the dashboard.

use chrono::{DateTime, Utc};

/// `$1,234.50`; negative values render as `-$60.00`
pub fn currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Always carries a sign: `+$40.00`, `-$60.00`, `+$0.00`
pub fn signed_currency(amount: f64) -> String {
    let body = currency(amount.abs());
    if amount < 0.0 && (amount.abs() * 100.0).round() > 0.0 {
        format!("-{}", body)
    } else {
        format!("+{}", body)
    }
}

/// Percentage with one decimal, e.g. `12.5%`
pub fn percent(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.1}%", value)
}

/// "just now", "5m ago", "3h ago", "2d ago", then a calendar date
pub fn relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - ts).num_seconds();

    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else if secs < 7 * 86_400 {
        format!("{}d ago", secs / 86_400)
    } else {
        ts.format("%b %d, %Y").to_string()
    }
}

fn group_thousands(mut value: u64) -> String {
    if value < 1000 {
        return value.to_string();
    }

    let mut groups = Vec::new();
    while value >= 1000 {
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.push(value.to_string());
    groups.reverse();
    groups.join(",")
}
