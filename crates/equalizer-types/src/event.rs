//! Change notifications from the UI shell and the answers sent back.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::context::ContextParameters;
use crate::vector::ResultVector;

/// What caused the shell to ask for a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// First render, before the user has touched anything.
    Initial,
    /// The driver slider moved.
    Driver,
    /// A contextual parameter (areas, regime, integrity) changed.
    Context,
    /// The reset button was pressed.
    Reset,
}

/// A single change notification.
///
/// The shell sends the full current state with every event; the engine
/// keeps nothing between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UpdateEvent {
    /// Event kind.
    pub trigger: Trigger,

    /// Current driver slider value.
    #[serde(default)]
    pub driver_value: f64,

    /// Current contextual parameters.
    pub context: ContextParameters,
}

impl UpdateEvent {
    /// A driver-slider change.
    pub const fn driver(driver_value: f64, context: ContextParameters) -> Self {
        Self {
            trigger: Trigger::Driver,
            driver_value,
            context,
        }
    }

    /// A reset-button press.
    pub const fn reset(context: ContextParameters) -> Self {
        Self {
            trigger: Trigger::Reset,
            driver_value: 0.0,
            context,
        }
    }
}

/// Values to render after handling an [`UpdateEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UpdateOutcome {
    /// One value per service slider.
    pub values: ResultVector,

    /// Whether the shell must also move the driver slider back to 0.
    pub reset_driver: bool,
}

impl UpdateOutcome {
    /// Outcome that renders `values` without touching the driver input.
    pub const fn render(values: ResultVector) -> Self {
        Self {
            values,
            reset_driver: false,
        }
    }

    /// All-zero outcome that also resets the driver input.
    pub const fn reset() -> Self {
        Self {
            values: ResultVector::ZERO,
            reset_driver: true,
        }
    }
}
