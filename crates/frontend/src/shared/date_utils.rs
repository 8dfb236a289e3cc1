//! Utilities for date and money formatting
//!
//! Dates travel as `YYYY-MM-DD`; the screens show them as `DD-MM-YYYY`.

use chrono::{Local, NaiveDate};

/// Local calendar date of the browser
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format ISO date string to DD-MM-YYYY
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15-03-2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}-{}-{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Integer with dot-separated thousands: `1234567.4` -> `1.234.567`
pub fn format_thousands(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Chilean peso amount: "$" and dot-grouped thousands, no decimals.
/// Example: 1234567.4 -> "$1.234.567"
pub fn format_clp(amount: f64) -> String {
    let grouped = format_thousands(amount);
    match grouped.strip_prefix('-') {
        Some(positive) => format!("-${}", positive),
        None => format!("${}", grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15-03-2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15-03-2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_format_clp() {
        assert_eq!(format_clp(0.0), "$0");
        assert_eq!(format_clp(990.0), "$990");
        assert_eq!(format_clp(45990.0), "$45.990");
        assert_eq!(format_clp(1234567.4), "$1.234.567");
        assert_eq!(format_clp(-1500.0), "-$1.500");
    }
}
