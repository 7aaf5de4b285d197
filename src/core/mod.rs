//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod history;
pub mod log;
pub mod rate_store;

// Re-export main types for cleaner imports
pub use currency::{Currency, CurrencyRateProvider, Direction};
pub use error::{ConversionError, RateError};
pub use history::{History, HistoryEntry};
pub use rate_store::{RateQuote, RateSource, RateState, RateStore};
