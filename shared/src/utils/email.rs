//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address shape check; deliverability is the mailer's problem.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Normalize an email address for storage and lookup keys.
///
/// Addresses are compared case-insensitively throughout the system,
/// so every path must normalize before touching a repository.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check whether an email address has a valid shape
pub fn is_valid_email(email: &str) -> bool {
    let normalized = normalize_email(email);
    normalized.len() <= 254 && EMAIL_REGEX.is_match(&normalized)
}

/// Mask an email address for logging (e.g. j***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
