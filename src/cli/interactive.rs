//! Line-oriented conversion session.
//!
//! Each line is either a command or an amount in the current source currency.
//! Amount text that fails input validation is ignored, mirroring a keystroke
//! filter that never lets invalid characters into the field.

use super::convert::{convert_text, input_hint};
use super::ui;
use crate::core::convert::is_valid_amount_input;
use crate::core::history::History;
use crate::core::rate_store::{RateState, RateStore};
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

const HELP: &str = "Enter an amount to convert, or one of:
  swap      switch conversion direction
  refresh   fetch the exchange rate again
  history   show recent conversions
  clear     forget recent conversions
  help      show this message
  quit      leave the session";

#[derive(Debug, PartialEq)]
pub enum Reply {
    Output(String),
    Ignored(String),
    Quit,
}

/// When a successful conversion goes into history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Record {
    Always,
    /// Skip it when the newest entry already shows the same result.
    IfChanged,
}

pub struct Session {
    store: RateStore,
    history: History,
    last_input: Option<String>,
}

impl Session {
    pub fn new(store: RateStore) -> Self {
        Self {
            store,
            history: History::new(),
            last_input: None,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Fetches the rate for the configured direction and describes it.
    pub async fn start(&mut self) -> String {
        let direction = self.store.snapshot().await.direction;
        let state =
            ui::with_spinner("Fetching exchange rate...", self.store.get_rate(direction)).await;
        self.banner(&state)
    }

    pub async fn handle_line(&mut self, line: &str) -> Reply {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => Reply::Ignored(String::new()),
            "quit" | "exit" | "q" => Reply::Quit,
            "help" | "?" => Reply::Output(HELP.to_string()),
            "history" | "h" => Reply::Output(ui::render_history(&self.history)),
            "clear" => {
                self.history.clear();
                Reply::Output(ui::style_text("History cleared.", ui::StyleType::Subtle))
            }
            "swap" | "s" => {
                // a new direction starts with an empty field
                self.last_input = None;
                let state = ui::with_spinner(
                    "Fetching exchange rate...",
                    self.store.toggle_direction(),
                )
                .await;
                Reply::Output(self.banner(&state))
            }
            "refresh" | "r" => {
                let state =
                    ui::with_spinner("Fetching exchange rate...", self.store.refresh()).await;
                let mut output = ui::render_rate_state(&state);
                if let Some(input) = self.last_input.clone() {
                    output.push('\n');
                    output.push_str(&self.convert_line(&input, &state, Record::IfChanged));
                }
                Reply::Output(output)
            }
            _ => self.handle_amount(line).await,
        }
    }

    async fn handle_amount(&mut self, text: &str) -> Reply {
        let state = self.store.snapshot().await;
        let source = state.direction.source();
        if !is_valid_amount_input(text, source) {
            debug!(input = text, "Rejected amount input");
            return Reply::Ignored(ui::style_text(
                &format!(
                    "Ignored `{text}`: enter a {source} amount ({}).",
                    input_hint(source)
                ),
                ui::StyleType::Subtle,
            ));
        }

        self.last_input = Some(text.to_string());
        Reply::Output(self.convert_line(text, &state, Record::Always))
    }

    fn convert_line(&mut self, text: &str, state: &RateState, record: Record) -> String {
        let Some(rate) = state.current_rate() else {
            return ui::render_rate_state(state);
        };

        match convert_text(text, rate, state.direction) {
            Ok(conversion) => {
                let repeated = self.history.newest().is_some_and(|entry| {
                    entry.input_text == conversion.input_text
                        && entry.output_text == conversion.output_text
                });
                if record == Record::Always || !repeated {
                    self.history.record(
                        &conversion.input_text,
                        &conversion.output_text,
                        conversion.converted,
                        state.direction.source(),
                        state.direction.target(),
                    );
                }
                format!(
                    "{} = {}",
                    conversion.input_text,
                    ui::style_text(&conversion.output_text, ui::StyleType::Value)
                )
            }
            Err(e) => {
                self.last_input = None;
                ui::style_text(&e.to_string(), ui::StyleType::Error)
            }
        }
    }

    fn banner(&self, state: &RateState) -> String {
        let direction = state.direction;
        format!(
            "{}\n{}",
            ui::style_text(
                &format!(
                    "{} ({}) → {} ({})",
                    direction.source().name(),
                    direction.source().symbol(),
                    direction.target().name(),
                    direction.target().symbol()
                ),
                ui::StyleType::Title
            ),
            ui::render_rate_state(state)
        )
    }
}

/// Runs a session over `reader` until it ends or the user quits.
pub async fn run_with<R, W>(store: RateStore, reader: R, mut writer: W) -> Result<History>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session::new(store);
    let banner = session.start().await;
    writer.write_all(format!("{banner}\n").as_bytes()).await?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        match session.handle_line(&line).await {
            Reply::Quit => break,
            Reply::Output(text) | Reply::Ignored(text) if !text.is_empty() => {
                writer.write_all(format!("{text}\n").as_bytes()).await?;
            }
            _ => {}
        }
        writer.flush().await?;
    }

    debug!(conversions = session.history().len(), "Session ended");
    Ok(session.history)
}

pub async fn run(store: RateStore) -> Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    println!(
        "{}",
        ui::style_text("Type `help` for commands.", ui::StyleType::Subtle)
    );
    run_with(store, stdin, tokio::io::stdout()).await?;
    Ok(())
}
