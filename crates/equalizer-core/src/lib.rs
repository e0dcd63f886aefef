//! Propagation engine and regime registry for the Recreation Equalizer.
//!
//! Given one Recreation value and the land-management context, the engine
//! computes how the change propagates to Timber, Climate Control, Habitat
//! Maintenance, and Water Control. Everything here is synchronous and
//! stateless; the UI shell owns all state and calls [`dispatch::dispatch`]
//! once per user interaction.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `equalizer-config.yaml` into
//!   strongly-typed structs.
//! - [`dispatch`] -- Routing of driver, context, initial, and reset events.
//! - [`error`] -- Lookup, registry, and tuning errors.
//! - [`numeric`] -- Piecewise-linear interpolation and clamping helpers.
//! - [`propagation`] -- The propagation formula and [`PropagationEngine`].
//! - [`registry`] -- Management regimes and their interaction rows.
//!
//! [`PropagationEngine`]: propagation::PropagationEngine

pub mod config;
pub mod dispatch;
pub mod error;
pub mod numeric;
pub mod propagation;
pub mod registry;

pub use config::{ConfigError, EqualizerConfig};
pub use dispatch::dispatch;
pub use error::{CoreError, RegistryError, TuningError};
pub use propagation::{EngineTuning, PropagationEngine, propagate};
pub use registry::{Intensity, RegimeProfile, RegimeRegistry};
