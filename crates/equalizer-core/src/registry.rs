//! Interaction model registry.
//!
//! Each management regime owns one [`InteractionRow`] (the marginal effect of
//! one unit of Recreation on every service) and a scalar regime weight that
//! scales the managed-area fraction. Regimes are fixed once the registry is
//! built; nothing can be added, removed, or changed afterwards.
//!
//! The three default regimes are hand-calibrated so that row magnitude and
//! weight grow with land-use intensity. Any reseeding of the data should keep
//! that ordering.

use std::collections::BTreeSet;

use equalizer_types::InteractionRow;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, RegistryError};

/// Name of the low-intensity default regime.
pub const LOW_IMPACT_GATHERING_AREA: &str = "Low-Impact Gathering Area";

/// Name of the medium-intensity default regime.
pub const MULTI_USE_RECREATION_FOREST: &str = "Multi-Use Recreation Forest";

/// Name of the high-intensity default regime.
pub const URBAN_RECREATION_FOREST: &str = "Urban Recreation Forest";

/// Land-use intensity class of a regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Light, dispersed use.
    Low,
    /// Mixed recreational and productive use.
    Medium,
    /// Heavy, concentrated use.
    High,
}

/// One management regime: its name, intensity, weight, and interaction row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeProfile {
    /// Display name and lookup key.
    pub name: String,

    /// Intensity class.
    pub intensity: Intensity,

    /// Multiplier applied to the managed-area fraction.
    pub weight: f64,

    /// Per-service interaction coefficients.
    pub row: InteractionRow,
}

impl RegimeProfile {
    /// Build a profile.
    pub fn new(name: impl Into<String>, intensity: Intensity, weight: f64, row: [f64; 5]) -> Self {
        Self {
            name: name.into(),
            intensity,
            weight,
            row: InteractionRow::new(row),
        }
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::BlankName);
        }
        if !self.row.is_finite() {
            return Err(RegistryError::NonFiniteCoefficient(self.name.clone()));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(RegistryError::InvalidWeight(self.name.clone()));
        }
        Ok(())
    }
}

/// The calibrated default regimes, lowest intensity first.
pub fn default_profiles() -> Vec<RegimeProfile> {
    vec![
        RegimeProfile::new(
            LOW_IMPACT_GATHERING_AREA,
            Intensity::Low,
            0.6,
            [-0.2, 0.1, -0.1, 0.1, 0.0],
        ),
        RegimeProfile::new(
            MULTI_USE_RECREATION_FOREST,
            Intensity::Medium,
            1.0,
            [-0.4, 0.1, -0.3, 0.2, 0.0],
        ),
        RegimeProfile::new(
            URBAN_RECREATION_FOREST,
            Intensity::High,
            1.4,
            [-0.7, 0.0, -0.4, 0.2, 0.0],
        ),
    ]
}

/// Immutable, name-keyed set of regimes in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeRegistry {
    profiles: Vec<RegimeProfile>,
}

impl RegimeRegistry {
    /// Build a registry from configured profiles.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the list is empty, a name is blank or
    /// repeated, a coefficient is not finite, or a weight is negative or not
    /// finite.
    pub fn from_profiles(profiles: Vec<RegimeProfile>) -> Result<Self, RegistryError> {
        if profiles.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = BTreeSet::new();
        for profile in &profiles {
            profile.validate()?;
            if !seen.insert(profile.name.as_str()) {
                return Err(RegistryError::Duplicate(profile.name.clone()));
            }
        }

        debug!(regime_count = profiles.len(), "regime registry built");
        Ok(Self { profiles })
    }

    /// Resolve a regime by name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownRegime`] if no regime has that name.
    pub fn lookup(&self, name: &str) -> Result<&RegimeProfile, CoreError> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| CoreError::UnknownRegime(name.to_owned()))
    }

    /// Interaction row of the named regime.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownRegime`] if no regime has that name.
    pub fn interaction_row(&self, name: &str) -> Result<InteractionRow, CoreError> {
        self.lookup(name).map(|p| p.row)
    }

    /// Weight of the named regime.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownRegime`] if no regime has that name.
    pub fn regime_weight(&self, name: &str) -> Result<f64, CoreError> {
        self.lookup(name).map(|p| p.weight)
    }

    /// Regime names in registration order, for the regime selector.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    /// All profiles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegimeProfile> {
        self.profiles.iter()
    }

    /// Number of registered regimes.
    pub const fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always false for a constructed registry; present for API symmetry.
    pub const fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for RegimeRegistry {
    fn default() -> Self {
        Self {
            profiles: default_profiles(),
        }
    }
}
