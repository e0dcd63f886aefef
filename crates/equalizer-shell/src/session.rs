//! JSON-lines protocol between a front end and the engine.
//!
//! Each input line is one [`UpdateEvent`]. Each output line is either an
//! [`UpdateOutcome`] (`{"values": [...], "reset_driver": bool}`) or an error
//! object (`{"error": "..."}`). A bad line never ends the session.

use std::io::{BufRead, Write};

use equalizer_core::{PropagationEngine, dispatch};
use equalizer_types::{ContextParameters, Trigger, UpdateEvent, UpdateOutcome};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ShellError;

/// One line written back to the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Values to render.
    Outcome(UpdateOutcome),
    /// The event could not be handled.
    Error {
        /// Human-readable reason.
        error: String,
    },
}

/// Stateless event loop around a [`PropagationEngine`].
#[derive(Debug)]
pub struct Session {
    engine: PropagationEngine,
}

impl Session {
    /// Wrap an engine.
    pub const fn new(engine: PropagationEngine) -> Self {
        Self { engine }
    }

    /// Outcome of the first render, before any input arrives.
    pub fn initial(&self, context: ContextParameters) -> Response {
        let event = UpdateEvent {
            trigger: Trigger::Initial,
            driver_value: 0.0,
            context,
        };
        self.respond(&event)
    }

    /// Handle one protocol line. Blank lines yield `None`.
    pub fn handle_line(&self, line: &str) -> Option<Response> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match serde_json::from_str::<UpdateEvent>(line) {
            Ok(event) => Some(self.respond(&event)),
            Err(e) => {
                warn!(error = %e, "malformed event line");
                Some(Response::Error {
                    error: format!("malformed event: {e}"),
                })
            }
        }
    }

    fn respond(&self, event: &UpdateEvent) -> Response {
        match dispatch(&self.engine, event) {
            Ok(outcome) => {
                debug!(trigger = ?event.trigger, values = ?outcome.values.as_array(), "event handled");
                Response::Outcome(outcome)
            }
            Err(e) => {
                warn!(error = %e, trigger = ?event.trigger, "event rejected");
                Response::Error {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Read events from `input` until EOF, writing one response per event.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError`] if reading, encoding, or writing fails.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<u64, ShellError> {
        let mut handled: u64 = 0;
        for line in input.lines() {
            let line = line?;
            if let Some(response) = self.handle_line(&line) {
                write_response(&mut output, &response)?;
                handled = handled.saturating_add(1);
            }
        }
        Ok(handled)
    }
}

/// Encode `response` as a single JSON line and flush it.
///
/// # Errors
///
/// Returns [`ShellError`] if encoding or writing fails.
pub fn write_response<W: Write>(output: &mut W, response: &Response) -> Result<(), ShellError> {
    serde_json::to_writer(&mut *output, response)?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}
