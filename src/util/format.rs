use std::time::SystemTime;

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

fn currency_symbol(currency: &str) -> String {
    match currency {
        "USD" => "$".to_string(),
        "CAD" => "CA$".to_string(),
        "EUR" => "€".to_string(),
        other => format!("{other} "),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole-unit currency with thousands separators, e.g. `-$1,234`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!(
        "{sign}{}{}",
        currency_symbol(currency),
        group_thousands(rounded.abs() as u64)
    )
}

pub fn format_usd(amount: f64) -> String {
    format_currency(amount, "USD")
}

pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn format_timestamp(at: SystemTime) -> String {
    OffsetDateTime::from(at)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_grouping() {
        assert_eq!(format_usd(106_865.0), "$106,865");
        assert_eq!(format_usd(23_598.5), "$23,599");
        assert_eq!(format_usd(-1_234.4), "-$1,234");
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.0), "$999");
        assert_eq!(format_currency(1_000_000.0, "CAD"), "CA$1,000,000");
        assert_eq!(format_currency(12.0, "GBP"), "GBP 12");
    }

    #[test]
    fn non_finite_amounts_render_as_ascii_placeholder() {
        assert_eq!(format_usd(f64::NAN), "n/a");
        assert_eq!(format_currency(f64::INFINITY, "CAD"), "n/a");
        assert!(format_usd(f64::NEG_INFINITY).is_ascii());
    }

    #[test]
    fn percent_and_time() {
        assert_eq!(format_percent(0.065), "6.5%");
        assert_eq!(format_timestamp(SystemTime::UNIX_EPOCH), "1970-01-01T00:00:00Z");
    }
}
