use crate::error::SimError;
use crate::physics::MU0_OVER_2PI;
use serde::{Deserialize, Serialize};

/// Fixed description of the launcher: the rail pair plus the sliding bar.
///
/// Distances in metres, mass in kilograms. Nothing here changes during a
/// run; all mutable launch state lives in `BarState`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Railgun {
    /// Clear gap D between the inner rail faces.
    pub separation: f64,
    /// Width w of each rail.
    pub width: f64,
    /// Accelerated length L from breech to muzzle.
    pub length: f64,
    /// Mass m of the bar.
    pub mass: f64,
    /// Field coupling constant k; mu0/2pi for physical hardware. Tests
    /// scale it to shorten runs.
    pub coupling: f64,
}

impl Railgun {
    /// Launcher with the physical coupling constant.
    pub fn new(separation: f64, width: f64, length: f64, mass: f64) -> Self {
        Self {
            separation,
            width,
            length,
            mass,
            coupling: MU0_OVER_2PI,
        }
    }

    /// Every field must be strictly positive and finite.
    pub fn validate(&self) -> Result<(), SimError> {
        let fields = [
            ("separation", self.separation),
            ("width", self.width),
            ("length", self.length),
            ("mass", self.mass),
            ("coupling", self.coupling),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidGeometry { name, value });
            }
        }
        Ok(())
    }
}
