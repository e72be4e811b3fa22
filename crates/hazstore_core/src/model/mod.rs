//! Domain model for hazardous-substance storage records.
//!
//! # Responsibility
//! - Define the canonical value records consumed by the risk-calculation
//!   collaborators (`Substance`, `Tank`).
//! - Encode physical-plausibility invariants as pure validity predicates.
//!
//! # Invariants
//! - Entities are plain data holders; they keep no back-references and no
//!   storage handles.
//! - Identity is `None` until first persistence assigns a row id.
//! - `validate()` inspects only the entity's own fields and never touches
//!   storage.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod substance;
pub mod tank;

pub use substance::Substance;
pub use tank::{Tank, TankType};

/// Domain-invariant violation detected by an entity validity predicate.
///
/// One shared taxonomy covers both entity types so the repository layer can
/// carry a single validation error kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `class_substance` outside 1..=4.
    ClassOutOfRange(i64),
    /// `sigma` not one of {4, 7}.
    InvalidSigma(i64),
    /// `energy_level` not one of {1, 2}.
    InvalidEnergyLevel(i64),
    /// `sub_type` outside 0..=7.
    SubTypeOutOfRange(i64),
    /// Lower flammability limit must be strictly below the upper limit.
    ConcentrationLimitsInverted { lower: f64, upper: f64 },
    /// Flash point must be strictly below the auto-ignition temperature.
    FlashPointAboveAutoIgnition { flash_point: f64, auto_ignition: f64 },
    /// Tank volume outside the supported (0.1, 50000] m^3 range.
    VolumeOutOfRange(f64),
    /// Fill degree outside [0, 1].
    DegreeFillingOutOfRange(f64),
    /// Temperature at or below absolute zero (-273 C).
    TemperatureBelowAbsoluteZero(f64),
    /// Spill footprint area below the 1 m^2 minimum.
    SpillSquareTooSmall(f64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClassOutOfRange(value) => {
                write!(f, "class_substance {value} outside 1..=4")
            }
            Self::InvalidSigma(value) => write!(f, "sigma {value} not in {{4, 7}}"),
            Self::InvalidEnergyLevel(value) => {
                write!(f, "energy_level {value} not in {{1, 2}}")
            }
            Self::SubTypeOutOfRange(value) => write!(f, "sub_type {value} outside 0..=7"),
            Self::ConcentrationLimitsInverted { lower, upper } => write!(
                f,
                "lower_concentration_limit {lower} not below upper_concentration_limit {upper}"
            ),
            Self::FlashPointAboveAutoIgnition {
                flash_point,
                auto_ignition,
            } => write!(
                f,
                "flash_point {flash_point} not below auto_ignition_temp {auto_ignition}"
            ),
            Self::VolumeOutOfRange(value) => {
                write!(f, "volume {value} outside supported (0.1, 50000] range")
            }
            Self::DegreeFillingOutOfRange(value) => {
                write!(f, "degree_filling {value} outside [0, 1]")
            }
            Self::TemperatureBelowAbsoluteZero(value) => {
                write!(f, "temperature {value} at or below absolute zero")
            }
            Self::SpillSquareTooSmall(value) => {
                write!(f, "spill_square {value} below minimum of 1")
            }
        }
    }
}

impl Error for ValidationError {}
