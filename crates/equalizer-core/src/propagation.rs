//! Propagation engine: turns one Recreation value plus land-management
//! context into values for all five services.
//!
//! For a driver value `d`, regime row `r`, and context:
//!
//! ```text
//! fraction             = managed_area / total_area
//! raw_factor           = max(fraction * regime_weight, 0)
//! impact_factor        = raw_factor ^ gamma
//! condition_multiplier = interp(integrity, [-5, 0, 5], [2.0, 1.0, 0.5])
//! result[k]            = r[k] * d * impact_factor * condition_multiplier
//! result[driver]       = d
//! result               = clamp(result, -5, 5)
//! ```
//!
//! A missing or non-positive total area short-circuits to the zero vector.
//! Factors that overflow saturate, so every slot stays a finite number.
//! Every call is pure: identical inputs produce bit-identical outputs.

use equalizer_types::{
    ContextParameters, Integrity, ResultVector, SERVICE_COUNT, Service, managed_fraction,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{CoreError, TuningError};
use crate::numeric::{clamp_all, finite_factor, interpolate, is_strictly_increasing};
use crate::registry::{RegimeProfile, RegimeRegistry};

/// Exponent of the diminishing-returns curve applied to management intensity.
pub const GAMMA: f64 = 0.6;

/// Integrity ratings at which the condition multiplier is pinned.
pub const CONDITION_BREAKPOINTS: [f64; 3] = [-5.0, 0.0, 5.0];

/// Condition multipliers at each breakpoint: fragile ecosystems amplify the
/// effect, resilient ones dampen it.
pub const CONDITION_MULTIPLIERS: [f64; 3] = [2.0, 1.0, 0.5];

/// Tunable constants of the propagation formula.
///
/// Missing fields fall back to the calibrated defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineTuning {
    /// Impact exponent.
    pub gamma: f64,

    /// Integrity breakpoints, strictly increasing.
    pub condition_breakpoints: [f64; 3],

    /// Multiplier at each breakpoint.
    pub condition_multipliers: [f64; 3],

    /// Results are clamped onto `[-value_bound, value_bound]`.
    pub value_bound: f64,
}

impl EngineTuning {
    /// Check that the constants describe a well-defined formula.
    ///
    /// # Errors
    ///
    /// Returns [`TuningError`] describing the first invalid constant.
    pub fn validate(&self) -> Result<(), TuningError> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(TuningError::InvalidGamma(self.gamma));
        }
        if !self.condition_breakpoints.iter().all(|b| b.is_finite())
            || !is_strictly_increasing(&self.condition_breakpoints)
        {
            return Err(TuningError::UnorderedBreakpoints);
        }
        if !self.condition_multipliers.iter().all(|m| m.is_finite()) {
            return Err(TuningError::NonFiniteMultiplier);
        }
        if !self.value_bound.is_finite() || self.value_bound <= 0.0 {
            return Err(TuningError::InvalidBound(self.value_bound));
        }
        Ok(())
    }

    /// Multiplier for an integrity rating.
    pub fn condition_multiplier(&self, integrity: Integrity) -> f64 {
        interpolate(
            integrity.as_f64(),
            &self.condition_breakpoints,
            &self.condition_multipliers,
        )
        .unwrap_or(1.0)
    }
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            gamma: GAMMA,
            condition_breakpoints: CONDITION_BREAKPOINTS,
            condition_multipliers: CONDITION_MULTIPLIERS,
            value_bound: ResultVector::MAX,
        }
    }
}

/// Intermediate factors of one propagation, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropagationBreakdown {
    /// Managed share of the assessment area.
    pub fraction: f64,
    /// Weight of the selected regime.
    pub regime_weight: f64,
    /// `fraction * regime_weight`, floored at 0.
    pub raw_factor: f64,
    /// `raw_factor ^ gamma`.
    pub impact_factor: f64,
    /// Integrity-driven amplification.
    pub condition_multiplier: f64,
}

/// Result of [`PropagationEngine::explain`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Propagation {
    /// Values to render.
    pub values: ResultVector,
    /// Factors used, or `None` when the area ratio was undefined.
    pub breakdown: Option<PropagationBreakdown>,
}

/// The propagation engine: a read-only registry plus tuning constants.
///
/// Holds no mutable state, so a single instance can be shared freely and
/// called re-entrantly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropagationEngine {
    registry: RegimeRegistry,
    tuning: EngineTuning,
}

impl PropagationEngine {
    /// Build an engine over a registry with the given tuning.
    ///
    /// # Errors
    ///
    /// Returns [`TuningError`] if the tuning constants are invalid.
    pub fn new(registry: RegimeRegistry, tuning: EngineTuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self { registry, tuning })
    }

    /// The regime registry.
    pub const fn registry(&self) -> &RegimeRegistry {
        &self.registry
    }

    /// The tuning constants.
    pub const fn tuning(&self) -> &EngineTuning {
        &self.tuning
    }

    /// Compute all five service values for a driver value and context.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownRegime`] if the context names a regime
    /// that is not registered and the area ratio is defined.
    pub fn propagate(
        &self,
        driver_value: f64,
        context: &ContextParameters,
    ) -> Result<ResultVector, CoreError> {
        self.explain(driver_value, context).map(|p| p.values)
    }

    /// Positional form of [`propagate`](Self::propagate).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownRegime`] as for `propagate`.
    pub fn propagate_with(
        &self,
        driver_value: f64,
        regime: &str,
        total_area: Option<f64>,
        managed_area: Option<f64>,
        integrity: i32,
    ) -> Result<ResultVector, CoreError> {
        evaluate(
            &self.registry,
            &self.tuning,
            driver_value,
            regime,
            managed_fraction(total_area, managed_area),
            Integrity::saturating(integrity),
        )
        .map(|p| p.values)
    }

    /// Like [`propagate`](Self::propagate), also returning the intermediate
    /// factors.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownRegime`] as for `propagate`.
    pub fn explain(
        &self,
        driver_value: f64,
        context: &ContextParameters,
    ) -> Result<Propagation, CoreError> {
        evaluate(
            &self.registry,
            &self.tuning,
            driver_value,
            &context.regime,
            context.managed_fraction(),
            context.integrity(),
        )
    }
}

/// Propagate with the default tuning over `registry`.
///
/// # Errors
///
/// Returns [`CoreError::UnknownRegime`] if `regime` is not registered and
/// the area ratio is defined.
pub fn propagate(
    registry: &RegimeRegistry,
    driver_value: f64,
    regime: &str,
    total_area: Option<f64>,
    managed_area: Option<f64>,
    integrity: i32,
) -> Result<ResultVector, CoreError> {
    evaluate(
        registry,
        &EngineTuning::default(),
        driver_value,
        regime,
        managed_fraction(total_area, managed_area),
        Integrity::saturating(integrity),
    )
    .map(|p| p.values)
}

fn evaluate(
    registry: &RegimeRegistry,
    tuning: &EngineTuning,
    driver_value: f64,
    regime: &str,
    fraction: Option<f64>,
    integrity: Integrity,
) -> Result<Propagation, CoreError> {
    let Some(fraction) = fraction else {
        trace!(regime, "area ratio undefined, returning zero vector");
        return Ok(Propagation {
            values: ResultVector::ZERO,
            breakdown: None,
        });
    };

    let profile = registry.lookup(regime)?;
    let driver = if driver_value.is_finite() { driver_value } else { 0.0 };

    let (values, breakdown) = compute(tuning, profile, driver, fraction, integrity);

    debug!(
        regime = profile.name,
        driver,
        integrity = integrity.value(),
        fraction = breakdown.fraction,
        impact_factor = breakdown.impact_factor,
        condition_multiplier = breakdown.condition_multiplier,
        values = ?values.as_array(),
        "propagated driver change"
    );

    Ok(Propagation {
        values,
        breakdown: Some(breakdown),
    })
}

fn compute(
    tuning: &EngineTuning,
    profile: &RegimeProfile,
    driver: f64,
    fraction: f64,
    integrity: Integrity,
) -> (ResultVector, PropagationBreakdown) {
    let regime_weight = profile.weight;
    // The area ratio can overflow for extreme areas; keep both factors finite.
    let raw_factor = finite_factor(fraction * regime_weight);
    let impact_factor = finite_factor(raw_factor.powf(tuning.gamma));
    let condition_multiplier = tuning.condition_multiplier(integrity);

    let scale = driver * impact_factor * condition_multiplier;
    let mut values: [f64; SERVICE_COUNT] = profile.row.0.map(|c| c * scale);
    if let Some(slot) = values.get_mut(Service::DRIVER_INDEX) {
        *slot = driver;
    }

    let breakdown = PropagationBreakdown {
        fraction,
        regime_weight,
        raw_factor,
        impact_factor,
        condition_multiplier,
    };
    (
        ResultVector::new(clamp_all(values, tuning.value_bound)),
        breakdown,
    )
}
