//! Pure conversion, validation and formatting helpers

use crate::core::currency::{Currency, Direction};
use crate::core::error::ConversionError;
use crate::core::rate_store::RateSource;
use chrono::{DateTime, Local};

const BACKUP_ANNOTATION: &str = " (backup)";

/// Converts `amount` of the direction's source currency into its target currency.
///
/// The rate is already oriented for `direction`, so both directions multiply.
/// Amounts that are not finite, or that overflow once converted, are rejected.
pub fn convert(amount: f64, rate: f64, _direction: Direction) -> Result<f64, ConversionError> {
    let converted = amount * rate;
    if !amount.is_finite() || !converted.is_finite() {
        return Err(ConversionError::InvalidAmount(amount));
    }
    Ok(converted)
}

/// Parses amount text that already passed [`is_valid_amount_input`].
pub fn parse_amount(text: &str) -> Result<f64, ConversionError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConversionError::ParseFailure(text.to_string())),
    }
}

/// Renders an amount with the currency's symbol and precision.
///
/// JPY rounds half away from zero and groups thousands; USD always shows two
/// decimals. Absent or non-finite values render as an empty string.
pub fn format_amount(value: Option<f64>, currency: Currency) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return String::new();
    };

    match currency {
        Currency::Jpy => format!(
            "{}{}",
            currency.symbol(),
            // adding zero turns a rounded -0.0 into 0.0
            group_thousands(&format!("{:.0}", value.round() + 0.0))
        ),
        Currency::Usd => format!("{}{value:.2}", currency.symbol()),
    }
}

/// Checks whether `text` is acceptable as (partial) amount input.
///
/// Empty text is always accepted. JPY takes digits only; USD takes digits with
/// an optional decimal point followed by up to two digits.
pub fn is_valid_amount_input(text: &str, currency: Currency) -> bool {
    if text.is_empty() {
        return true;
    }

    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if integer.is_empty() || !all_digits(integer) {
        return false;
    }

    match (currency, fraction) {
        (_, None) => true,
        (Currency::Jpy, Some(_)) => false,
        (Currency::Usd, Some(fraction)) => fraction.len() <= 2 && all_digits(fraction),
    }
}

/// Renders the time a quote was obtained, tagging backup-sourced quotes.
pub fn format_timestamp(timestamp: &DateTime<Local>, source: RateSource) -> String {
    let formatted = timestamp.format("%Y/%m/%d %H:%M:%S").to_string();
    match source {
        RateSource::Primary => formatted,
        RateSource::Backup => format!("{formatted}{BACKUP_ANNOTATION}"),
    }
}

/// Strips the backup annotation from a rendered timestamp for display.
pub fn format_date(date: Option<&str>) -> String {
    match date {
        Some(date) if !date.is_empty() => date.replace(BACKUP_ANNOTATION, ""),
        _ => String::new(),
    }
}

/// A one-line description of the rate, e.g. `1 JPY = 0.0067 USD`.
pub fn format_rate(rate: f64, direction: Direction) -> String {
    let precision = match direction.target() {
        Currency::Usd => 4,
        Currency::Jpy => 2,
    };
    format!(
        "1 {} = {:.*} {}",
        direction.source(),
        precision,
        rate,
        direction.target()
    )
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}
