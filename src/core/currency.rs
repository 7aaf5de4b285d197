//! Currency and conversion direction abstractions

use crate::core::error::RateError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Jpy,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Jpy => "JPY",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Jpy => "¥",
            Currency::Usd => "$",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Jpy => "Japanese Yen",
            Currency::Usd => "US Dollars",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which currency is converted from and which one to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "JPY_TO_USD")]
    JpyToUsd,
    #[serde(rename = "USD_TO_JPY")]
    UsdToJpy,
}

impl Direction {
    pub fn source(&self) -> Currency {
        match self {
            Direction::JpyToUsd => Currency::Jpy,
            Direction::UsdToJpy => Currency::Usd,
        }
    }

    pub fn target(&self) -> Currency {
        match self {
            Direction::JpyToUsd => Currency::Usd,
            Direction::UsdToJpy => Currency::Jpy,
        }
    }

    pub fn toggled(&self) -> Direction {
        match self {
            Direction::JpyToUsd => Direction::UsdToJpy,
            Direction::UsdToJpy => Direction::JpyToUsd,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.source(), self.target())
    }
}

/// A remote source of exchange rates.
///
/// The returned rate is the number of `to` units per one `from` unit.
#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: Currency, to: Currency) -> Result<f64, RateError>;
}
