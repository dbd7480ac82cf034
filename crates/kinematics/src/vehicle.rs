//! Vehicle state snapshot (one per broadcast cycle)

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::params::{DEFAULT_LENGTH, DEFAULT_WIDTH, MU_DEFAULT, M_DEFAULT};

/// Vehicle body class, used only to pick aerodynamic constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    #[default]
    Sedan,
    Suv,
    Truck,
    /// Unrecognised tag; treated as a sedan
    Unknown,
}

impl VehicleClass {
    /// Classify a free-text vehicle type tag
    pub fn from_type_tag(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        if tag.contains("truck") || tag.contains("trailer") {
            VehicleClass::Truck
        } else if tag.contains("suv") || tag.contains("bus") {
            VehicleClass::Suv
        } else if tag.contains("sedan") || tag.contains("car") || tag.contains("passenger") {
            VehicleClass::Sedan
        } else {
            debug!("Unrecognised vehicle type tag '{}', using sedan defaults", tag);
            VehicleClass::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Sedan => "sedan",
            VehicleClass::Suv => "suv",
            VehicleClass::Truck => "truck",
            VehicleClass::Unknown => "unknown",
        }
    }
}

/// Turn-signal bitfield (bit 0 = right, bit 1 = left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnSignals(pub u8);

impl TurnSignals {
    pub const NONE: TurnSignals = TurnSignals(0);
    pub const RIGHT: TurnSignals = TurnSignals(0x01);
    pub const LEFT: TurnSignals = TurnSignals(0x02);

    pub fn right(&self) -> bool {
        self.0 & Self::RIGHT.0 != 0
    }

    pub fn left(&self) -> bool {
        self.0 & Self::LEFT.0 != 0
    }
}

/// Kinematic snapshot of one vehicle at one timestep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Vehicle identifier
    pub id: String,

    /// Global position (m)
    pub x: f64,
    pub y: f64,

    /// Speed magnitude (m/s)
    pub speed: f64,

    /// Longitudinal acceleration (m/s²)
    #[serde(default)]
    pub accel: f64,

    /// Heading (rad, counter-clockwise from +X)
    pub heading: f64,

    /// Yaw rate (rad/s)
    #[serde(default)]
    pub yaw_rate: f64,

    /// Body dimensions (m)
    #[serde(default = "default_length")]
    pub length: f64,
    #[serde(default = "default_width")]
    pub width: f64,

    /// Mass (kg)
    #[serde(default = "default_mass")]
    pub mass: f64,

    /// Road friction coefficient
    #[serde(default = "default_mu")]
    pub mu: f64,

    #[serde(default)]
    pub signals: TurnSignals,

    #[serde(default)]
    pub class: VehicleClass,

    /// Simulation step at which the snapshot was generated
    #[serde(default)]
    pub timestamp: u64,
}

fn default_length() -> f64 {
    DEFAULT_LENGTH
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_mass() -> f64 {
    M_DEFAULT
}

fn default_mu() -> f64 {
    MU_DEFAULT
}

impl VehicleState {
    /// Create a sedan-sized vehicle with only the required kinematic fields
    pub fn new(id: impl Into<String>, x: f64, y: f64, speed: f64, heading: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            speed,
            accel: 0.0,
            heading,
            yaw_rate: 0.0,
            length: DEFAULT_LENGTH,
            width: DEFAULT_WIDTH,
            mass: M_DEFAULT,
            mu: MU_DEFAULT,
            signals: TurnSignals::NONE,
            class: VehicleClass::Sedan,
            timestamp: 0,
        }
    }

    pub fn with_accel(mut self, accel: f64) -> Self {
        self.accel = accel;
        self
    }

    pub fn with_yaw_rate(mut self, yaw_rate: f64) -> Self {
        self.yaw_rate = yaw_rate;
        self
    }

    pub fn with_dimensions(mut self, length: f64, width: f64) -> Self {
        self.length = length;
        self.width = width;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_signals(mut self, signals: TurnSignals) -> Self {
        self.signals = signals;
        self
    }

    pub fn with_class(mut self, class: VehicleClass) -> Self {
        self.class = class;
        self
    }

    pub fn at_step(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Euclidean distance between two vehicles' reference points
    pub fn distance_to(&self, other: &VehicleState) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}
