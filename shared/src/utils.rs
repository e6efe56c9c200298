//! # Shared Utility Functions
//!
//! Display helpers shared by every front-end of the API.
//!
//! - [`format_usd`] - Render an amount as US dollars with thousands separators
//! - [`short_id`] - Shorten a backend identifier for tables
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_usd;
//!
//! assert_eq!(format_usd(1234567.891), "$1,234,567.89");
//! ```

/// Format an amount as US dollars with two decimals and `,` grouping.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_usd;
///
/// assert_eq!(format_usd(0.0), "$0.00");
/// assert_eq!(format_usd(999.5), "$999.50");
/// assert_eq!(format_usd(-1500.0), "-$1,500.00");
/// ```
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

/// Show the last `len` characters of an identifier, prefixed with `…`.
///
/// Identifiers no longer than `len` are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use shared::utils::short_id;
///
/// assert_eq!(short_id("65f0c2a9e4b0d1a2b3c4d5e6", 6), "…c4d5e6");
/// assert_eq!(short_id("abc", 6), "abc");
/// ```
pub fn short_id(id: &str, len: usize) -> String {
    let count = id.chars().count();
    if count <= len {
        return id.to_string();
    }
    let tail: String = id.chars().skip(count - len).collect();
    format!("…{}", tail)
}
