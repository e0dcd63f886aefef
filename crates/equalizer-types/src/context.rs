//! Land-management context supplied alongside every driver change.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Ecosystem integrity (resilience) rating on the `[-5, 5]` scale.
///
/// Negative values describe fragile ecosystems, positive values resilient
/// ones. Construction saturates, so an out-of-range rating behaves like the
/// nearest end of the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Integrity(i8);

impl Integrity {
    /// Most fragile rating.
    pub const MIN: Self = Self(-5);

    /// Neutral rating.
    pub const NEUTRAL: Self = Self(0);

    /// Most resilient rating.
    pub const MAX: Self = Self(5);

    /// Build a rating, clamping to `[-5, 5]`.
    pub fn saturating(value: i32) -> Self {
        let clamped = value.clamp(i32::from(Self::MIN.0), i32::from(Self::MAX.0));
        // Clamped into i8 range above.
        Self(i8::try_from(clamped).unwrap_or(0))
    }

    /// Rating as a signed integer.
    pub const fn value(self) -> i8 {
        self.0
    }

    /// Rating as a float for interpolation.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Label shown under the integrity slider.
    pub const fn label(self) -> &'static str {
        if self.0 < 0 {
            "Fragile"
        } else if self.0 > 0 {
            "Resilient"
        } else {
            "Neutral"
        }
    }
}

impl From<i32> for Integrity {
    fn from(value: i32) -> Self {
        Self::saturating(value)
    }
}

/// Contextual parameters read alongside the driver value.
///
/// Areas are optional because the shell's number inputs may be empty.
/// Nothing here persists beyond a single computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ContextParameters {
    /// Total assessment area in hectares.
    #[serde(default)]
    pub total_area: Option<f64>,

    /// Managed area in hectares. Expected to be at most `total_area`,
    /// though this is not enforced.
    #[serde(default)]
    pub managed_area: Option<f64>,

    /// Name of the selected management regime.
    pub regime: String,

    /// Ecosystem integrity rating. Out-of-range values are clamped.
    #[serde(default)]
    pub integrity: i32,
}

impl ContextParameters {
    /// Build a fully specified context.
    pub fn new(total_area: f64, managed_area: f64, regime: impl Into<String>, integrity: i32) -> Self {
        Self {
            total_area: Some(total_area),
            managed_area: Some(managed_area),
            regime: regime.into(),
            integrity,
        }
    }

    /// Integrity rating clamped onto its scale.
    pub fn integrity(&self) -> Integrity {
        Integrity::saturating(self.integrity)
    }

    /// Share of the assessment area under management.
    ///
    /// Returns `None` when the total area is missing, non-positive, or not a
    /// number: the ratio is undefined and callers fall back to zeros. A
    /// missing, zero, or non-finite managed area yields `Some(0.0)`.
    pub fn managed_fraction(&self) -> Option<f64> {
        managed_fraction(self.total_area, self.managed_area)
    }
}

/// Managed share of an assessment area, as in
/// [`ContextParameters::managed_fraction`].
///
/// The ratio may overflow to infinity for extreme but finite areas.
pub fn managed_fraction(total_area: Option<f64>, managed_area: Option<f64>) -> Option<f64> {
    let total = total_area.filter(|t| t.is_finite() && *t > 0.0)?;
    let managed = managed_area
        .filter(|m| m.is_finite() && *m != 0.0)
        .unwrap_or(0.0);
    Some(managed / total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_saturates() {
        assert_eq!(Integrity::saturating(-9), Integrity::MIN);
        assert_eq!(Integrity::saturating(12), Integrity::MAX);
        assert_eq!(Integrity::saturating(3).value(), 3);
        assert_eq!(Integrity::from(i32::MIN), Integrity::MIN);
    }

    #[test]
    fn integrity_labels() {
        assert_eq!(Integrity::saturating(-2).label(), "Fragile");
        assert_eq!(Integrity::NEUTRAL.label(), "Neutral");
        assert_eq!(Integrity::MAX.label(), "Resilient");
    }

    #[test]
    fn fraction_of_full_management() {
        let ctx = ContextParameters::new(100.0, 100.0, "Multi-Use Recreation Forest", 0);
        assert_eq!(ctx.managed_fraction().map(f64::to_bits), Some(1.0_f64.to_bits()));
    }

    #[test]
    fn fraction_undefined_without_total_area() {
        let mut ctx = ContextParameters::new(0.0, 50.0, "x", 0);
        assert!(ctx.managed_fraction().is_none());

        ctx.total_area = Some(-10.0);
        assert!(ctx.managed_fraction().is_none());

        ctx.total_area = None;
        assert!(ctx.managed_fraction().is_none());

        ctx.total_area = Some(f64::NAN);
        assert!(ctx.managed_fraction().is_none());
    }

    #[test]
    fn missing_managed_area_is_zero_fraction() {
        let mut ctx = ContextParameters::new(100.0, 0.0, "x", 0);
        assert_eq!(ctx.managed_fraction().map(f64::to_bits), Some(0.0_f64.to_bits()));

        ctx.managed_area = None;
        assert_eq!(ctx.managed_fraction().map(f64::to_bits), Some(0.0_f64.to_bits()));
    }

    #[test]
    fn extreme_areas_overflow_to_infinite_fraction() {
        let fraction = managed_fraction(Some(1e-300), Some(1e300));
        assert!(fraction.is_some_and(|f| f.is_infinite()));
    }

    #[test]
    fn context_deserializes_with_missing_fields() {
        let json = r#"{"regime":"Urban Recreation Forest","total_area":40.0}"#;
        let ctx: Result<ContextParameters, _> = serde_json::from_str(json);
        assert!(ctx.is_ok());
        let ctx = ctx.ok();
        assert_eq!(ctx.as_ref().and_then(|c| c.managed_area), None);
        assert_eq!(ctx.map(|c| c.integrity), Some(0));
    }
}
