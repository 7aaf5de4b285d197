//! Rate acquisition with primary/backup fallback and observable state.
//!
//! [`RateStore`] is the only writer of [`RateState`]. Every fetch sequence
//! queries the primary source first and the backup source only when the primary
//! fails. Failures never escape the store; they end up in [`RateState::error`].
//!
//! Each requested sequence is tagged with a generation number. A sequence that
//! resolves after a newer one was requested leaves the state untouched, so the
//! most recently requested refresh or direction change always wins.
//!
//! The state lock is never held across a request, so it is a plain
//! [`std::sync::Mutex`]. That lets `refresh` mark the state as loading before
//! it hands back the fetch future.

use crate::core::currency::{CurrencyRateProvider, Direction};
use chrono::{DateTime, Local};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch exchange rate. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    Primary,
    Backup,
}

/// A successfully obtained rate together with where and when it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub rate: f64,
    pub source: RateSource,
    pub last_updated: DateTime<Local>,
    /// Direction the rate was fetched for.
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateState {
    pub quote: Option<RateQuote>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub direction: Direction,
}

impl RateState {
    fn new(direction: Direction) -> Self {
        Self {
            quote: None,
            is_loading: false,
            error: None,
            direction,
        }
    }

    pub fn rate(&self) -> Option<f64> {
        self.quote.as_ref().map(|q| q.rate)
    }

    pub fn source(&self) -> Option<RateSource> {
        self.quote.as_ref().map(|q| q.source)
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.quote.as_ref().map(|q| q.last_updated)
    }

    /// The rate, only if it was fetched for the currently selected direction.
    ///
    /// While a direction change is loading the previous quote is still shown
    /// but must not be used for conversion.
    pub fn current_rate(&self) -> Option<f64> {
        self.quote
            .as_ref()
            .filter(|q| q.direction == self.direction)
            .map(|q| q.rate)
    }
}

/// A fetch sequence that has been registered but not run yet.
#[derive(Debug, Clone, Copy)]
struct Ticket {
    generation: u64,
    direction: Direction,
}

struct Inner {
    primary: Arc<dyn CurrencyRateProvider>,
    backup: Arc<dyn CurrencyRateProvider>,
    state: Mutex<RateState>,
    generation: AtomicU64,
    started: AtomicBool,
}

/// Owns the exchange rate state for the JPY/USD pair.
#[derive(Clone)]
pub struct RateStore {
    inner: Arc<Inner>,
}

impl RateStore {
    pub fn new(
        primary: Arc<dyn CurrencyRateProvider>,
        backup: Arc<dyn CurrencyRateProvider>,
        direction: Direction,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                primary,
                backup,
                state: Mutex::new(RateState::new(direction)),
                generation: AtomicU64::new(0),
                started: AtomicBool::new(false),
            }),
        }
    }

    pub async fn snapshot(&self) -> RateState {
        self.inner.snapshot()
    }

    /// Returns the state for `direction`, fetching when the direction is
    /// observed for the first time or differs from the current one.
    pub async fn get_rate(&self, direction: Direction) -> RateState {
        let current = self.inner.lock_state().direction;
        if current != direction || !self.inner.started.load(Ordering::SeqCst) {
            return self.set_direction(direction).await;
        }
        self.snapshot().await
    }

    /// Selects `direction`, re-fetching when it changed.
    ///
    /// The new direction and the loading flag become visible together.
    pub async fn set_direction(&self, direction: Direction) -> RateState {
        let ticket = {
            let mut state = self.inner.lock_state();
            let changed = state.direction != direction;
            state.direction = direction;
            (changed || !self.inner.started.load(Ordering::SeqCst))
                .then(|| self.inner.begin_fetch(&mut state))
        };
        match ticket {
            Some(ticket) => self.inner.fetch(ticket).await,
            None => self.snapshot().await,
        }
    }

    pub async fn toggle_direction(&self) -> RateState {
        let direction = self.inner.lock_state().direction.toggled();
        self.set_direction(direction).await
    }

    /// Re-runs the fetch sequence for the current direction.
    ///
    /// The sequence is registered as the latest one, and the state shows it as
    /// loading, as soon as `refresh` returns; the returned future does the
    /// requests.
    pub fn refresh(&self) -> impl Future<Output = RateState> + Send + use<> {
        let ticket = {
            let mut state = self.inner.lock_state();
            self.inner.begin_fetch(&mut state)
        };
        let inner = Arc::clone(&self.inner);
        async move { inner.fetch(ticket).await }
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, RateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> RateState {
        self.lock_state().clone()
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Registers a new sequence for the state's direction and marks it loading.
    ///
    /// Must be called with the state lock held so that readers never see the
    /// new generation without the loading flag.
    fn begin_fetch(&self, state: &mut RateState) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.started.store(true, Ordering::SeqCst);
        state.is_loading = true;
        state.error = None;
        Ticket {
            generation,
            direction: state.direction,
        }
    }

    async fn fetch(&self, ticket: Ticket) -> RateState {
        self.run_fetch(ticket).await;
        self.snapshot()
    }

    #[instrument(name = "RateFetch", skip(self))]
    async fn run_fetch(&self, ticket: Ticket) {
        let Ticket {
            generation,
            direction,
        } = ticket;
        if !self.is_latest(generation) {
            debug!("Fetch superseded before start");
            return;
        }

        let (from, to) = (direction.source(), direction.target());
        let outcome = match self.primary.get_rate(from, to).await {
            Ok(rate) => Ok((rate, RateSource::Primary)),
            Err(primary_err) => {
                warn!(error = %primary_err, "Primary rate source failed, trying backup");
                match self.backup.get_rate(from, to).await {
                    Ok(rate) => Ok((rate, RateSource::Backup)),
                    Err(backup_err) => {
                        warn!(error = %backup_err, "Backup rate source also failed");
                        Err(backup_err)
                    }
                }
            }
        };

        let mut state = self.lock_state();
        if !self.is_latest(generation) {
            debug!("Discarding superseded rate result");
            return;
        }

        state.is_loading = false;
        match outcome {
            Ok((rate, source)) => {
                info!(rate, ?source, %direction, "Exchange rate updated");
                state.quote = Some(RateQuote {
                    rate,
                    source,
                    last_updated: Local::now(),
                    direction,
                });
                state.error = None;
            }
            Err(_) => {
                state.quote = None;
                state.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
    }
}
