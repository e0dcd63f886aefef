//! Integration tests for the propagation engine.
//!
//! These exercise the public API end to end: building an engine from
//! configuration, dispatching shell events, and checking the invariants that
//! must hold for every input in the supported domains.

#![allow(clippy::unwrap_used)]

use equalizer_core::registry::{
    LOW_IMPACT_GATHERING_AREA, MULTI_USE_RECREATION_FOREST, URBAN_RECREATION_FOREST,
};
use equalizer_core::{CoreError, EqualizerConfig, PropagationEngine, dispatch};
use equalizer_types::{ContextParameters, ResultVector, Service, Trigger, UpdateEvent};

const REGIMES: [&str; 3] = [
    LOW_IMPACT_GATHERING_AREA,
    MULTI_USE_RECREATION_FOREST,
    URBAN_RECREATION_FOREST,
];

fn driver_values() -> impl Iterator<Item = f64> {
    (0..=50).map(|i| f64::from(i) / 10.0)
}

fn assert_close(actual: &ResultVector, expected: [f64; 5]) {
    for (a, e) in actual.as_array().iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "got {actual:?}, expected {expected:?}");
    }
}

#[test]
fn every_result_is_bounded_and_echoes_driver() {
    let engine = PropagationEngine::default();
    for regime in REGIMES {
        for managed in [0.0, 10.0, 50.0, 100.0, 400.0] {
            for integrity in -7..=7 {
                let ctx = ContextParameters::new(100.0, managed, regime, integrity);
                for driver in driver_values() {
                    let result = engine.propagate(driver, &ctx).unwrap();
                    assert!(result.is_bounded(), "{regime} {managed} {integrity} {driver}: {result:?}");
                    assert_eq!(result.driver().to_bits(), driver.to_bits());
                }
            }
        }
    }
}

#[test]
fn extreme_area_ratios_stay_bounded() {
    let engine = PropagationEngine::default();
    let areas = [(1e-300, 1e300), (f64::MIN_POSITIVE, f64::MAX), (1e300, 1e-300), (1.0, f64::MAX)];
    for regime in REGIMES {
        for (total, managed) in areas {
            for integrity in [-5, 0, 5] {
                let ctx = ContextParameters::new(total, managed, regime, integrity);
                for driver in [0.0, 0.1, 5.0] {
                    let result = engine.propagate(driver, &ctx).unwrap();
                    assert!(result.is_bounded(), "{regime} {total} {managed} {driver}: {result:?}");
                    assert_eq!(result.driver().to_bits(), driver.to_bits());
                    let json = serde_json::to_string(&result).unwrap();
                    assert!(!json.contains("null"), "{json}");
                }
            }
        }
    }
}

#[test]
fn propagation_is_deterministic() {
    let engine = PropagationEngine::default();
    let ctx = ContextParameters::new(137.0, 59.0, URBAN_RECREATION_FOREST, -2);
    for driver in driver_values() {
        let first = engine.propagate(driver, &ctx).unwrap();
        let second = engine.propagate(driver, &ctx).unwrap();
        assert_eq!(first.into_inner().map(f64::to_bits), second.into_inner().map(f64::to_bits));
    }
}

#[test]
fn degenerate_total_area_always_zero() {
    let engine = PropagationEngine::default();
    for total in [None, Some(0.0), Some(-1.0)] {
        for regime in ["Nowhere", URBAN_RECREATION_FOREST] {
            let ctx = ContextParameters {
                total_area: total,
                managed_area: Some(50.0),
                regime: regime.to_owned(),
                integrity: -5,
            };
            assert_eq!(engine.propagate(5.0, &ctx).unwrap(), ResultVector::ZERO);
        }
    }
}

#[test]
fn worked_examples() {
    let engine = PropagationEngine::default();

    let neutral = ContextParameters::new(100.0, 100.0, MULTI_USE_RECREATION_FOREST, 0);
    assert_close(&engine.propagate(5.0, &neutral).unwrap(), [-2.0, 0.5, -1.5, 1.0, 5.0]);

    let fragile = ContextParameters::new(100.0, 100.0, MULTI_USE_RECREATION_FOREST, -5);
    assert_close(&engine.propagate(5.0, &fragile).unwrap(), [-4.0, 1.0, -3.0, 2.0, 5.0]);

    let unmanaged = ContextParameters::new(100.0, 0.0, MULTI_USE_RECREATION_FOREST, 0);
    assert_close(&engine.propagate(5.0, &unmanaged).unwrap(), [0.0, 0.0, 0.0, 0.0, 5.0]);
}

#[test]
fn higher_intensity_moves_timber_further() {
    let engine = PropagationEngine::default();
    let timber: Vec<f64> = REGIMES
        .iter()
        .map(|regime| {
            let ctx = ContextParameters::new(100.0, 60.0, *regime, 0);
            engine.propagate(4.0, &ctx).unwrap().get(Service::Timber)
        })
        .collect();
    assert!(timber.windows(2).all(|w| w[0] > w[1]), "timber: {timber:?}");
}

#[test]
fn reset_event_zeroes_everything() {
    let engine = PropagationEngine::default();
    let ctx = ContextParameters::new(100.0, 100.0, URBAN_RECREATION_FOREST, -5);
    let outcome = dispatch(&engine, &UpdateEvent::reset(ctx)).unwrap();
    assert_eq!(outcome.values, ResultVector::ZERO);
    assert!(outcome.reset_driver);
}

#[test]
fn unknown_regime_surfaces_through_dispatch() {
    let engine = PropagationEngine::default();
    let event = UpdateEvent::driver(2.0, ContextParameters::new(100.0, 100.0, "Clear-Cut", 0));
    assert_eq!(
        dispatch(&engine, &event),
        Err(CoreError::UnknownRegime("Clear-Cut".to_owned()))
    );
}

#[test]
fn configured_engine_uses_custom_regimes() {
    let yaml = r#"
regimes:
  - name: "Boardwalk"
    intensity: medium
    weight: 1.0
    row: [0.0, 0.0, -0.5, 0.0, 0.0]
shell:
  regime: "Boardwalk"
"#;
    let config = EqualizerConfig::parse(yaml).unwrap();
    let engine = config.build_engine().unwrap();
    let event = UpdateEvent {
        trigger: Trigger::Context,
        driver_value: 2.0,
        context: config.shell.initial_context(),
    };
    let outcome = dispatch(&engine, &event).unwrap();
    assert_close(&outcome.values, [0.0, 0.0, -1.0, 0.0, 2.0]);

    // Default regimes are gone once regimes are configured.
    let stock = ContextParameters::new(100.0, 100.0, MULTI_USE_RECREATION_FOREST, 0);
    assert!(engine.propagate(1.0, &stock).is_err());
}

#[test]
fn outcome_serializes_for_the_shell() {
    let engine = PropagationEngine::default();
    let ctx = ContextParameters::new(100.0, 100.0, MULTI_USE_RECREATION_FOREST, 0);
    let outcome = dispatch(&engine, &UpdateEvent::driver(0.0, ctx)).unwrap();
    let json: serde_json::Value = serde_json::to_value(outcome).unwrap();
    assert_eq!(json["reset_driver"], serde_json::Value::Bool(false));
    assert_eq!(json["values"].as_array().map(Vec::len), Some(5));
}
