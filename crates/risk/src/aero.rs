//! Typical aerodynamic constants per vehicle class

use kinematics::VehicleClass;
use serde::{Deserialize, Serialize};

/// Drag coefficient, frontal area, and nominal mass for a body class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroProfile {
    /// Drag coefficient Cd
    pub cd: f64,
    /// Frontal area (m²)
    pub frontal_area: f64,
    /// Nominal mass (kg)
    pub mass: f64,
}

impl AeroProfile {
    pub const SEDAN: AeroProfile = AeroProfile { cd: 0.30, frontal_area: 2.2, mass: 1500.0 };
    pub const SUV: AeroProfile = AeroProfile { cd: 0.35, frontal_area: 3.0, mass: 2200.0 };
    pub const TRUCK: AeroProfile = AeroProfile { cd: 0.60, frontal_area: 8.0, mass: 15000.0 };

    /// Look up the profile; unknown classes use sedan values
    pub fn for_class(class: VehicleClass) -> Self {
        match class {
            VehicleClass::Sedan | VehicleClass::Unknown => Self::SEDAN,
            VehicleClass::Suv => Self::SUV,
            VehicleClass::Truck => Self::TRUCK,
        }
    }

    /// Aerodynamic drag force at `speed` (N)
    pub fn drag_force(&self, speed: f64) -> f64 {
        0.5 * crate::params::RHO_AIR * self.cd * self.frontal_area * speed * speed
    }
}
