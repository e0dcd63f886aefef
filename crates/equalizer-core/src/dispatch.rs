//! Routing of shell change notifications.
//!
//! The shell reports one [`UpdateEvent`] per user interaction. Reset and the
//! initial render never reach the propagation formula; driver and context
//! changes always do. A driver value of 0 through the normal path produces
//! the same zero vector as a reset, but only a reset asks the shell to move
//! the driver slider back.

use equalizer_types::{ResultVector, Trigger, UpdateEvent, UpdateOutcome};
use tracing::{debug, info};

use crate::error::CoreError;
use crate::propagation::PropagationEngine;

/// Handle one change notification.
///
/// # Errors
///
/// Returns [`CoreError::UnknownRegime`] if a driver or context change names
/// a regime the engine does not know.
pub fn dispatch(engine: &PropagationEngine, event: &UpdateEvent) -> Result<UpdateOutcome, CoreError> {
    match event.trigger {
        Trigger::Reset => {
            info!("reset requested");
            Ok(UpdateOutcome::reset())
        }
        Trigger::Initial => {
            debug!("initial render");
            Ok(UpdateOutcome::render(ResultVector::ZERO))
        }
        Trigger::Driver | Trigger::Context => {
            let values = engine.propagate(event.driver_value, &event.context)?;
            Ok(UpdateOutcome::render(values))
        }
    }
}

#[cfg(test)]
mod tests {
    use equalizer_types::ContextParameters;

    use super::*;
    use crate::registry::MULTI_USE_RECREATION_FOREST;

    fn full_context() -> ContextParameters {
        ContextParameters::new(100.0, 100.0, MULTI_USE_RECREATION_FOREST, 0)
    }

    #[test]
    fn reset_returns_zeros_and_resets_driver() {
        let engine = PropagationEngine::default();
        let outcome = dispatch(&engine, &UpdateEvent::reset(full_context()));
        assert_eq!(outcome, Ok(UpdateOutcome::reset()));
    }

    #[test]
    fn reset_ignores_driver_value_and_regime() {
        let engine = PropagationEngine::default();
        let mut event = UpdateEvent::reset(ContextParameters::new(100.0, 100.0, "Nowhere", 0));
        event.driver_value = 4.5;
        let outcome = dispatch(&engine, &event);
        assert_eq!(outcome.map(|o| o.values), Ok(ResultVector::ZERO));
    }

    #[test]
    fn initial_render_is_zero_without_reset() {
        let engine = PropagationEngine::default();
        let event = UpdateEvent {
            trigger: Trigger::Initial,
            driver_value: 3.0,
            context: full_context(),
        };
        let outcome = dispatch(&engine, &event);
        assert_eq!(outcome, Ok(UpdateOutcome::render(ResultVector::ZERO)));
    }

    #[test]
    fn driver_change_propagates() {
        let engine = PropagationEngine::default();
        let outcome = dispatch(&engine, &UpdateEvent::driver(5.0, full_context()));
        assert!(outcome.is_ok_and(|o| !o.reset_driver && (o.values.driver() - 5.0).abs() < 1e-12));
    }

    #[test]
    fn zero_driver_matches_reset_values_but_not_flag() {
        let engine = PropagationEngine::default();
        let normal = dispatch(&engine, &UpdateEvent::driver(0.0, full_context()));
        assert!(normal.as_ref().is_ok_and(|o| !o.reset_driver));
        // Bitwise: the dependents must be +0.0, not -0.0, like a reset.
        let bits = normal.map(|o| o.values.into_inner().map(f64::to_bits));
        assert_eq!(bits, Ok(ResultVector::ZERO.into_inner().map(f64::to_bits)));
    }

    #[test]
    fn context_change_with_unknown_regime_fails() {
        let engine = PropagationEngine::default();
        let event = UpdateEvent {
            trigger: Trigger::Context,
            driver_value: 1.0,
            context: ContextParameters::new(100.0, 20.0, "Nowhere", 0),
        };
        assert_eq!(
            dispatch(&engine, &event),
            Err(CoreError::UnknownRegime("Nowhere".to_owned()))
        );
    }
}
