//! Substance domain model.
//!
//! # Responsibility
//! - Hold the chemical/physical profile of one hazardous material.
//! - Validate the discrete-domain and ordering invariants of that profile.
//!
//! # Invariants
//! - `id` is assigned by the store on first persist and never reused.
//! - `validate()` is pure and covers domain plausibility only; uniqueness
//!   and storage constraints are checked at the storage boundary.

use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// Chemical/physical profile of a hazardous material.
///
/// All thermal quantities are SI; temperatures are degrees Celsius.
/// `threshold_toxic_dose` and `lethal_toxic_dose` stay `None` for
/// non-toxic substances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substance {
    /// Row identity; `None` until the substance has been persisted.
    pub id: Option<i64>,
    pub sub_name: String,
    /// Liquid-phase density, kg/m^3.
    pub density_liquid: f64,
    /// Molar mass, kg/mol.
    pub molecular_weight: f64,
    pub boiling_temperature_liquid: f64,
    /// Specific heat of evaporation, J/kg.
    pub heat_evaporation_liquid: f64,
    /// Adiabatic exponent of the vapor phase.
    pub adiabatic: f64,
    /// Liquid-phase specific heat capacity, J/(kg*K).
    pub heat_capacity_liquid: f64,
    /// Hazard class, 1..=4.
    pub class_substance: i64,
    /// Specific heat of combustion, kJ/kg.
    pub heat_of_combustion: f64,
    /// Expansion-mode coefficient; 4 or 7.
    pub sigma: i64,
    /// Energy release level; 1 or 2.
    pub energy_level: i64,
    pub flash_point: f64,
    pub auto_ignition_temp: f64,
    /// Lower flammability concentration limit, % vol.
    pub lower_concentration_limit: f64,
    /// Upper flammability concentration limit, % vol.
    pub upper_concentration_limit: f64,
    pub threshold_toxic_dose: Option<f64>,
    pub lethal_toxic_dose: Option<f64>,
    /// Substance category code, 0..=7.
    pub sub_type: i64,
}

impl Substance {
    /// Checks the substance against its domain invariants.
    ///
    /// # Contract
    /// - Pure: reads own fields only, no side effects.
    /// - Referential integrity and uniqueness are out of scope here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=4).contains(&self.class_substance) {
            return Err(ValidationError::ClassOutOfRange(self.class_substance));
        }
        if self.sigma != 4 && self.sigma != 7 {
            return Err(ValidationError::InvalidSigma(self.sigma));
        }
        if self.energy_level != 1 && self.energy_level != 2 {
            return Err(ValidationError::InvalidEnergyLevel(self.energy_level));
        }
        if !(0..=7).contains(&self.sub_type) {
            return Err(ValidationError::SubTypeOutOfRange(self.sub_type));
        }
        if self.lower_concentration_limit >= self.upper_concentration_limit {
            return Err(ValidationError::ConcentrationLimitsInverted {
                lower: self.lower_concentration_limit,
                upper: self.upper_concentration_limit,
            });
        }
        if self.flash_point >= self.auto_ignition_temp {
            return Err(ValidationError::FlashPointAboveAutoIgnition {
                flash_point: self.flash_point,
                auto_ignition: self.auto_ignition_temp,
            });
        }
        Ok(())
    }

    /// Boolean projection of `validate()` for callers that only need a gate.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
