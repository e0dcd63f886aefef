//! Shell entry point for the Recreation Equalizer.
//!
//! Stands in for the interactive front end: it loads configuration, builds
//! the propagation engine, then answers JSON-line change notifications on
//! stdin with JSON-line results on stdout. Logs go to stderr so stdout
//! carries protocol lines only.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `equalizer-config.yaml` (or `EQUALIZER_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the regime registry and propagation engine
//! 4. Emit the initial render for the configured shell defaults
//! 5. Answer events until stdin closes

mod error;
mod session;

use std::io::{self, BufWriter};
use std::path::PathBuf;

use equalizer_core::EqualizerConfig;
use equalizer_core::config::LoggingConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ShellError;
use crate::session::{Session, write_response};

/// Environment variable naming the configuration file.
const CONFIG_PATH_ENV: &str = "EQUALIZER_CONFIG";

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "equalizer-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or stdin/stdout fail.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging)?;
    info!("equalizer-shell starting");

    // 3. Build the engine.
    let engine = config.build_engine().map_err(ShellError::from)?;
    info!(
        regimes = ?engine.registry().names().collect::<Vec<_>>(),
        gamma = engine.tuning().gamma,
        value_bound = engine.tuning().value_bound,
        "Propagation engine ready"
    );

    // 4. Initial render.
    let session = Session::new(engine);
    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());
    let initial_context = config.shell.initial_context();
    info!(
        total_area = config.shell.total_area,
        managed_area = config.shell.managed_area,
        regime = %config.shell.regime,
        integrity = config.shell.integrity,
        "Initial shell state"
    );
    write_response(&mut output, &session.initial(initial_context))?;

    // 5. Event loop.
    let handled = session.run(io::stdin().lock(), &mut output)?;
    info!(events = handled, "stdin closed, shutting down");

    Ok(())
}

/// Load configuration from `EQUALIZER_CONFIG` or `equalizer-config.yaml`.
///
/// Falls back to the built-in defaults when no file is present.
fn load_config() -> Result<EqualizerConfig, ShellError> {
    let path = std::env::var(CONFIG_PATH_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        Ok(EqualizerConfig::from_file(&path)?)
    } else {
        // Logging is not up yet; the defaults are reported once it is.
        EqualizerConfig::parse("").map_err(ShellError::from)
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) -> Result<(), ShellError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| ShellError::LogFilter {
            level: logging.level.clone(),
            message: e.to_string(),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
