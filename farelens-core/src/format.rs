//! Display formatters for result rows and the trend chart.
//!
//! All output is pinned to the en-US locale so rendering is reproducible
//! across environments.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};

use crate::models::lenient_price;

pub const DEFAULT_CURRENCY: &str = "USD";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format a decimal price string as whole currency units with grouping,
/// e.g. `("1234.56", "USD")` → `$1,235`.
///
/// Non-numeric input degrades to a formatted 0 rather than erroring.
pub fn format_price(total: &str, currency: &str) -> String {
    let amount = lenient_price(total).round() as i64;
    let grouped = group_thousands(amount);
    match currency_symbol(currency) {
        Some(symbol) => format!("{symbol}{grouped}"),
        None => format!("{currency} {grouped}"),
    }
}

/// `format_price` with the default display currency.
pub fn format_price_default(total: &str) -> String {
    format_price(total, DEFAULT_CURRENCY)
}

/// Localized hour:minute in 12-hour form, e.g. `07:15 PM`.
pub fn format_time(at: &DateTime<FixedOffset>) -> String {
    let (is_pm, hour) = at.hour12();
    let meridiem = if is_pm { "PM" } else { "AM" };
    format!("{:02}:{:02} {}", hour, at.minute(), meridiem)
}

/// Abbreviated month + day, e.g. `Aug 6`.
pub fn format_date(date: &impl Datelike) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {}", month, date.day())
}

/// Abbreviated weekday name, e.g. `Wed`.
pub fn format_day_of_week(date: &impl Datelike) -> String {
    let name = match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    };
    name.to_string()
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("\u{20ac}"),
        "GBP" => Some("\u{a3}"),
        "JPY" => Some("\u{a5}"),
        _ => None,
    }
}

fn group_thousands(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
