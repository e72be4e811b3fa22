//! Tank (storage vessel) domain model.
//!
//! # Responsibility
//! - Hold the physical parameters of one storage vessel and the identity of
//!   the substance it contains.
//! - Validate vessel plausibility bounds.
//!
//! # Invariants
//! - `tank_type` is a closed enumeration; unrecognized categories are
//!   unrepresentable in memory and surface as decode errors on read-back.
//! - `sub_id` references a `Substance` identity, but referential integrity
//!   is not enforced at this layer.

use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// Construction category of a storage vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TankType {
    /// Plain single-shell vessel.
    SingleWalled,
    /// Single shell inside an external protective jacket.
    ExternalJacket,
    /// Double-shell construction.
    DoubleWalled,
    /// Fully sealed (hermetic) vessel.
    FullySealed,
}

impl TankType {
    /// Stable storage token for this category.
    pub fn as_db(self) -> &'static str {
        match self {
            Self::SingleWalled => "single_walled",
            Self::ExternalJacket => "external_jacket",
            Self::DoubleWalled => "double_walled",
            Self::FullySealed => "fully_sealed",
        }
    }

    /// Parses a storage token back into a category.
    pub fn parse_db(value: &str) -> Option<Self> {
        match value {
            "single_walled" => Some(Self::SingleWalled),
            "external_jacket" => Some(Self::ExternalJacket),
            "double_walled" => Some(Self::DoubleWalled),
            "fully_sealed" => Some(Self::FullySealed),
            _ => None,
        }
    }
}

/// Storage vessel holding one substance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    /// Row identity; `None` until the tank has been persisted.
    pub tank_id: Option<i64>,
    pub tank_name: String,
    pub tank_type: TankType,
    /// Vessel volume, m^3. Supported range is (0.1, 50000].
    pub volume: f64,
    /// Fill degree as a fraction in [0, 1].
    pub degree_filling: f64,
    /// Operating pressure, MPa.
    pub pressure: f64,
    /// Operating temperature, degrees Celsius.
    pub temperature: f64,
    /// Enterprise/site label the vessel belongs to.
    pub component_enterprise: String,
    /// Spill footprint area, m^2. At least 1.
    pub spill_square: f64,
    /// Identity of the contained `Substance`. Not checked against the
    /// substances table; dangling references are representable.
    pub sub_id: i64,
    /// Geographic coordinate string, "lat, lon".
    pub coordinate: String,
}

impl Tank {
    /// Checks the tank against its domain invariants.
    ///
    /// The volume and fill-degree bounds are the corrected closed ranges
    /// `0.1 < volume <= 50000` and `0 <= degree_filling <= 1`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.volume > 0.1 && self.volume <= 50000.0) {
            return Err(ValidationError::VolumeOutOfRange(self.volume));
        }
        if !(0.0..=1.0).contains(&self.degree_filling) {
            return Err(ValidationError::DegreeFillingOutOfRange(
                self.degree_filling,
            ));
        }
        if self.temperature <= -273.0 {
            return Err(ValidationError::TemperatureBelowAbsoluteZero(
                self.temperature,
            ));
        }
        if self.spill_square < 1.0 {
            return Err(ValidationError::SpillSquareTooSmall(self.spill_square));
        }
        Ok(())
    }

    /// Boolean projection of `validate()` for callers that only need a gate.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
