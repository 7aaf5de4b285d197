use super::ui;
use crate::core::currency::Direction;
use crate::core::rate_store::RateStore;
use anyhow::{Result, bail};

pub async fn run(store: &RateStore, direction: Direction) -> Result<()> {
    let state = ui::with_spinner("Fetching exchange rate...", store.get_rate(direction)).await;

    println!("{}", ui::render_rate_state(&state));
    if let Some(error) = state.error {
        bail!(error);
    }
    Ok(())
}
