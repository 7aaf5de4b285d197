use crate::core::convert::{format_date, format_rate, format_timestamp};
use crate::core::history::History;
use crate::core::rate_store::{RateSource, RateState};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Rate,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Rate => style(text).cyan().bold(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Creates a spinner shown while a rate is being fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Awaits `future` while a spinner with `message` is displayed.
pub async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let pb = new_spinner(message);
    let output = future.await;
    pb.finish_and_clear();
    output
}

/// Describes the rate state: the rate line and its age, or the failure.
pub fn render_rate_state(state: &RateState) -> String {
    if let Some(error) = &state.error {
        return format!(
            "{}\n{}",
            style_text(error, StyleType::Error),
            style_text("Type `refresh` to try again.", StyleType::Subtle)
        );
    }

    let Some(quote) = &state.quote else {
        return style_text("Unable to load exchange rate.", StyleType::Error);
    };

    let updated = format_timestamp(&quote.last_updated, quote.source);
    let mut output = format!(
        "{}\n{}",
        style_text(&format_rate(quote.rate, quote.direction), StyleType::Rate),
        style_text(
            &format!("Updated: {}", format_date(Some(&updated))),
            StyleType::Subtle
        )
    );
    if quote.source == RateSource::Backup {
        output.push_str(&format!(
            "\n{}",
            style_text(
                "Using alternate data source. Rate may be slightly delayed.",
                StyleType::Subtle
            )
        ));
    }
    output
}

pub fn render_history(history: &History) -> String {
    if history.is_empty() {
        return style_text("No conversions yet.", StyleType::Subtle);
    }

    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Time"),
        header_cell("From"),
        header_cell("To"),
    ]);
    for entry in history.entries() {
        table.add_row(vec![
            Cell::new(entry.timestamp.format("%H:%M:%S").to_string()),
            Cell::new(&entry.input_text).set_alignment(CellAlignment::Right),
            Cell::new(&entry.output_text)
                .fg(Color::Green)
                .set_alignment(CellAlignment::Right),
        ]);
    }

    format!(
        "{}\n\n{}",
        style_text("Recent conversions", StyleType::Title),
        table
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::{Currency, Direction};
    use crate::core::rate_store::{FETCH_FAILED_MESSAGE, RateQuote};
    use chrono::Local;

    fn state(quote: Option<RateQuote>, error: Option<&str>) -> RateState {
        RateState {
            quote,
            is_loading: false,
            error: error.map(str::to_string),
            direction: Direction::JpyToUsd,
        }
    }

    fn quote(source: RateSource) -> RateQuote {
        RateQuote {
            rate: 0.0067,
            source,
            last_updated: Local::now(),
            direction: Direction::JpyToUsd,
        }
    }

    #[test]
    fn test_render_rate_state() {
        let primary = console::strip_ansi_codes(&render_rate_state(&state(
            Some(quote(RateSource::Primary)),
            None,
        )))
        .to_string();
        assert!(primary.contains("1 JPY = 0.0067 USD"));
        assert!(primary.contains("Updated: "));
        assert!(!primary.contains("(backup)"));
        assert!(!primary.contains("alternate data source"));

        let backup = console::strip_ansi_codes(&render_rate_state(&state(
            Some(quote(RateSource::Backup)),
            None,
        )))
        .to_string();
        assert!(!backup.contains("(backup)"));
        assert!(backup.contains("alternate data source"));

        let failed =
            console::strip_ansi_codes(&render_rate_state(&state(None, Some(FETCH_FAILED_MESSAGE))))
                .to_string();
        assert!(failed.contains(FETCH_FAILED_MESSAGE));
        assert!(failed.contains("refresh"));
    }

    #[test]
    fn test_render_history() {
        let mut history = History::new();
        assert!(render_history(&history).contains("No conversions yet."));

        history.record("¥1,000", "$6.70", 6.7, Currency::Jpy, Currency::Usd);
        let rendered = render_history(&history);
        assert!(rendered.contains("¥1,000"));
        assert!(rendered.contains("$6.70"));
    }
}
