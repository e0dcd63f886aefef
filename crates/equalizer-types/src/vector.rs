//! Fixed-size per-service vectors.
//!
//! Both the per-regime interaction coefficients and the engine output are
//! exactly one value per [`Service`], so they are modelled as `[f64; 5]`
//! newtypes rather than general matrices.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::service::{SERVICE_COUNT, Service};

/// Marginal effect of one unit of driver change on each service.
///
/// The coefficient at the driver's own index is a self-effect placeholder;
/// the engine overwrites that slot with the raw driver value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InteractionRow(pub [f64; SERVICE_COUNT]);

impl InteractionRow {
    /// Wrap a coefficient array.
    pub const fn new(coefficients: [f64; SERVICE_COUNT]) -> Self {
        Self(coefficients)
    }

    /// Coefficient for one service.
    pub const fn coefficient(&self, service: Service) -> f64 {
        self.0[service.index()]
    }

    /// Borrow the raw coefficients.
    pub const fn as_array(&self) -> &[f64; SERVICE_COUNT] {
        &self.0
    }

    /// Whether every coefficient is a finite number.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Sum of absolute coefficients. Used to sanity-check the intensity
    /// ordering of calibrated regimes.
    pub fn magnitude(&self) -> f64 {
        self.0.iter().map(|c| c.abs()).sum()
    }
}

/// Engine output: one bounded value per service, in slider order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResultVector(pub [f64; SERVICE_COUNT]);

impl ResultVector {
    /// Lower bound of every slot.
    pub const MIN: f64 = -5.0;

    /// Upper bound of every slot.
    pub const MAX: f64 = 5.0;

    /// The all-zero vector returned on reset and for degenerate areas.
    pub const ZERO: Self = Self([0.0; SERVICE_COUNT]);

    /// Wrap a value array.
    pub const fn new(values: [f64; SERVICE_COUNT]) -> Self {
        Self(values)
    }

    /// Value for one service.
    pub const fn get(&self, service: Service) -> f64 {
        self.0[service.index()]
    }

    /// Echoed driver value.
    pub const fn driver(&self) -> f64 {
        self.get(Service::DRIVER)
    }

    /// Derived values paired with their services, in slider order.
    pub fn dependents(&self) -> impl Iterator<Item = (Service, f64)> + '_ {
        Service::dependents().map(|s| (s, self.get(s)))
    }

    /// Borrow the raw values.
    pub const fn as_array(&self) -> &[f64; SERVICE_COUNT] {
        &self.0
    }

    /// Consume into the raw values.
    pub const fn into_inner(self) -> [f64; SERVICE_COUNT] {
        self.0
    }

    /// Whether every slot lies within [`Self::MIN`], [`Self::MAX`].
    pub fn is_bounded(&self) -> bool {
        self.0.iter().all(|v| (Self::MIN..=Self::MAX).contains(v))
    }
}

impl Default for ResultVector {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<ResultVector> for [f64; SERVICE_COUNT] {
    fn from(v: ResultVector) -> Self {
        v.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_vector_is_bounded() {
        assert!(ResultVector::ZERO.is_bounded());
        assert_eq!(ResultVector::default(), ResultVector::ZERO);
    }

    #[test]
    fn accessors_use_service_order() {
        let v = ResultVector::new([-2.0, 0.5, -1.5, 1.0, 5.0]);
        assert_eq!(v.get(Service::ClimateControl).to_bits(), 0.5_f64.to_bits());
        assert_eq!(v.driver().to_bits(), 5.0_f64.to_bits());

        let deps: Vec<Service> = v.dependents().map(|(s, _)| s).collect();
        assert_eq!(
            deps,
            vec![
                Service::Timber,
                Service::ClimateControl,
                Service::HabitatMaintenance,
                Service::WaterControl,
            ]
        );
    }

    #[test]
    fn out_of_range_is_not_bounded() {
        assert!(!ResultVector::new([0.0, 0.0, -5.5, 0.0, 0.0]).is_bounded());
        assert!(!ResultVector::new([0.0, 0.0, f64::NAN, 0.0, 0.0]).is_bounded());
    }

    #[test]
    fn row_finiteness_and_magnitude() {
        let row = InteractionRow::new([-0.4, 0.1, -0.3, 0.2, 0.0]);
        assert!(row.is_finite());
        assert!((row.magnitude() - 1.0).abs() < 1e-12);
        assert!(!InteractionRow::new([f64::INFINITY, 0.0, 0.0, 0.0, 0.0]).is_finite());
    }

    #[test]
    fn result_serializes_as_plain_array() {
        let json = serde_json::to_string(&ResultVector::new([1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(json.ok().as_deref(), Some("[1.0,2.0,3.0,4.0,5.0]"));
    }
}
