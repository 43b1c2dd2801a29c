//! Input Validation
//!
//! Checks run on user input before any request is sent. Failures carry a
//! message suitable for an inline alert or toast.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Amount can have at most two decimal places")]
    TooPrecise,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("You cannot send money to yourself")]
    SelfTransfer,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").ok())
        .as_ref()
}

/// Trimmed, lowercased email
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required("Email"));
    }
    let re = email_regex().ok_or(ValidationError::InvalidEmail)?;
    if !re.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email.to_lowercase())
}

/// Positive, finite, at most two decimals
pub fn validate_amount(amount: f64) -> ValidationResult<f64> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount);
    }
    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    let cents = amount * 100.0;
    if (cents - cents.round()).abs() > 1e-6 {
        return Err(ValidationError::TooPrecise);
    }
    Ok(amount)
}

/// Parse and validate an amount typed by the user (`"1,250.00"`, `"$5"`)
pub fn parse_amount(text: &str) -> ValidationResult<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Err(ValidationError::Required("Amount"));
    }

    let amount: f64 = cleaned.parse().map_err(|_| ValidationError::InvalidAmount)?;
    validate_amount(amount)
}

pub fn validate_password(password: &str, confirm: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Registration form: name, email, password and confirmation
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> ValidationResult<(String, String)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required("Name"));
    }
    let email = validate_email(email)?;
    validate_password(password, confirm)?;
    Ok((name.to_string(), email))
}

/// Send-money form. Returns the normalized recipient email and amount.
pub fn validate_send(
    recipient: &str,
    amount: f64,
    own_email: &str,
) -> ValidationResult<(String, f64)> {
    if recipient.trim().is_empty() {
        return Err(ValidationError::Required("Recipient"));
    }
    let recipient = validate_email(recipient)?;
    if recipient.eq_ignore_ascii_case(own_email.trim()) {
        return Err(ValidationError::SelfTransfer);
    }
    Ok((recipient, validate_amount(amount)?))
}

/// Money-request form; the message is optional
pub fn validate_request(
    recipient: &str,
    amount: f64,
    own_email: &str,
    message: &str,
) -> ValidationResult<(String, f64, String)> {
    let (recipient, amount) = validate_send(recipient, amount, own_email)?;
    Ok((recipient, amount, message.trim().to_string()))
}
