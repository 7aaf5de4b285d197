//! Tracing subscriber for the `yenconv` binary.
//!
//! Output goes to stderr so that conversion results on stdout stay pipeable.
//! Without `--verbose` nothing is logged unless `RUST_LOG` asks for it.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    filter::Targets,
    fmt,
    prelude::__tracing_subscriber_SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

const APP_TARGET: &str = env!("CARGO_CRATE_NAME");

fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    }
}

/// Our own events at the chosen level; HTTP client internals only at `info`.
fn app_targets(verbose: bool) -> Targets {
    let http_level = level_for(verbose).min(LevelFilter::INFO);
    Targets::new()
        .with_target(APP_TARGET, level_for(verbose))
        .with_target("reqwest", http_level)
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose).to_string().to_lowercase()))
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbose: bool) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(app_targets(verbose))
        .with(env_filter(verbose))
        .try_init()
}
