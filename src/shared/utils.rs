//! Utility functions and helpers

use chrono::{Local, Utc};

/// Round half towards positive infinity, matching how the web client rounded amounts
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to two decimal places
pub fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Format a whole amount in rupees with en-US digit grouping
pub fn format_rupee(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}₹{}", sign, group_thousands(amount.unsigned_abs()))
}

/// Format a fractional amount in rupees, dropping trailing zero cents
pub fn format_rupee_decimal(amount: f64) -> String {
    if !amount.is_finite() {
        return "—".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;
    let fraction = match fraction {
        0 => String::new(),
        f if f % 10 == 0 => format!(".{}", f / 10),
        f => format!(".{:02}", f),
    };
    format!("{}₹{}{}", sign, whole, fraction)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Wall-clock label attached to alerts
pub fn alert_timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Time-based identifiers (`p<millis>`), strictly increasing within one generator
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        format!("p{}", self.last)
    }
}
