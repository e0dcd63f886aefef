//! The five ecosystem services and their display domains.
//!
//! Service order is fixed: every row, vector, and slider in the workspace is
//! indexed by [`Service::index`]. Recreation is the single driver; the other
//! four are dependents whose values are derived, never set directly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of services tracked by the equalizer.
pub const SERVICE_COUNT: usize = 5;

/// An ecosystem service shown as one slider on the equalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Service {
    /// Timber production.
    Timber,
    /// Climate regulation (carbon storage, microclimate).
    ClimateControl,
    /// Habitat maintenance for native species.
    HabitatMaintenance,
    /// Water regulation and purification.
    WaterControl,
    /// Recreational use. The driver service.
    Recreation,
}

impl Service {
    /// All services in slider order.
    pub const ALL: [Self; SERVICE_COUNT] = [
        Self::Timber,
        Self::ClimateControl,
        Self::HabitatMaintenance,
        Self::WaterControl,
        Self::Recreation,
    ];

    /// The driver service.
    pub const DRIVER: Self = Self::Recreation;

    /// Index of the driver service in every five-element vector.
    pub const DRIVER_INDEX: usize = Self::DRIVER.index();

    /// Position of this service in rows and result vectors.
    pub const fn index(self) -> usize {
        match self {
            Self::Timber => 0,
            Self::ClimateControl => 1,
            Self::HabitatMaintenance => 2,
            Self::WaterControl => 3,
            Self::Recreation => 4,
        }
    }

    /// Look a service up by its vector position.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Timber),
            1 => Some(Self::ClimateControl),
            2 => Some(Self::HabitatMaintenance),
            3 => Some(Self::WaterControl),
            4 => Some(Self::Recreation),
            _ => None,
        }
    }

    /// Whether this service is the driver.
    pub const fn is_driver(self) -> bool {
        matches!(self, Self::Recreation)
    }

    /// Human-readable label used on the slider heading.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Timber => "Timber",
            Self::ClimateControl => "Climate Control",
            Self::HabitatMaintenance => "Habitat Maintenance",
            Self::WaterControl => "Water Control",
            Self::Recreation => "Recreation",
        }
    }

    /// Slider domain for this service.
    ///
    /// The driver only represents additive recreational pressure, so its
    /// range starts at 0. Dependents can move in either direction.
    pub const fn range(self) -> ServiceRange {
        if self.is_driver() {
            ServiceRange::DRIVER
        } else {
            ServiceRange::DEPENDENT
        }
    }

    /// The four dependent services in slider order.
    pub fn dependents() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|s| !s.is_driver())
    }
}

impl core::fmt::Display for Service {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive value domain and step of one service slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ServiceRange {
    /// Lowest selectable value.
    pub min: f64,
    /// Highest selectable value.
    pub max: f64,
    /// Slider increment.
    pub step: f64,
}

impl ServiceRange {
    /// Domain of the driver slider.
    pub const DRIVER: Self = Self {
        min: 0.0,
        max: 5.0,
        step: 0.1,
    };

    /// Domain of every dependent slider.
    pub const DEPENDENT: Self = Self {
        min: -5.0,
        max: 5.0,
        step: 0.1,
    };

    /// Whether `value` lies inside this range.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}
