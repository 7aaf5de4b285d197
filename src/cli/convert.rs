use super::ui;
use crate::core::convert::{convert, format_amount, is_valid_amount_input, parse_amount};
use crate::core::currency::{Currency, Direction};
use crate::core::rate_store::{FETCH_FAILED_MESSAGE, RateStore};
use anyhow::{Result, anyhow, bail};

/// A finished conversion, formatted for both currencies.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub input_text: String,
    pub output_text: String,
    pub converted: f64,
}

pub(crate) fn input_hint(currency: Currency) -> &'static str {
    match currency {
        Currency::Jpy => "whole yen only",
        Currency::Usd => "up to two decimal places",
    }
}

/// Validates, parses and converts `amount_text` at `rate`.
pub fn convert_text(amount_text: &str, rate: f64, direction: Direction) -> Result<Conversion> {
    let source = direction.source();
    if !is_valid_amount_input(amount_text, source) {
        bail!(
            "Invalid {source} amount: {amount_text} ({})",
            input_hint(source)
        );
    }

    let amount = parse_amount(amount_text)?;
    let converted = convert(amount, rate, direction)?;
    Ok(Conversion {
        input_text: format_amount(Some(amount), source),
        output_text: format_amount(Some(converted), direction.target()),
        converted,
    })
}

pub async fn run(store: &RateStore, direction: Direction, amount_text: &str) -> Result<()> {
    let state = ui::with_spinner("Fetching exchange rate...", store.get_rate(direction)).await;
    let rate = state
        .current_rate()
        .ok_or_else(|| anyhow!(state.error.as_deref().unwrap_or(FETCH_FAILED_MESSAGE).to_string()))?;

    let conversion = convert_text(amount_text, rate, direction)?;
    println!(
        "{} = {}",
        conversion.input_text,
        ui::style_text(&conversion.output_text, ui::StyleType::Value)
    );
    println!("{}", ui::render_rate_state(&state));
    Ok(())
}
