//! Error types for rate acquisition and conversion.

use crate::core::currency::Currency;

/// Failure to obtain a rate from a single source.
///
/// All variants are treated alike by the fallback logic.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("Request error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },

    #[error("Rate for {to} not found in {from} response")]
    MissingRate { from: Currency, to: Currency },
}

/// Failure to turn user input into a converted amount.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Please enter a valid number")]
    ParseFailure(String),
}
