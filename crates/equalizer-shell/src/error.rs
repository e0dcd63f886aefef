//! Error types for the equalizer shell binary.
//!
//! [`ShellError`] is the top-level error type that wraps all possible
//! failure modes during shell startup and the event loop.

/// Top-level error for the shell binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: equalizer_core::ConfigError,
    },

    /// Reading events or writing results failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A result could not be encoded as JSON.
    #[error("failed to encode response: {source}")]
    Encode {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// The configured log filter could not be parsed.
    #[error("invalid log level {level:?}: {message}")]
    LogFilter {
        /// The rejected filter directive.
        level: String,
        /// Description of the parse failure.
        message: String,
    },
}
