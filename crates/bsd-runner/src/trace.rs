//! JSON-lines broadcast traces

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use bsd_engine::params::R_COMM;
use bsd_engine::VehicleState;

use crate::ReplayError;

/// A broadcast from `target` that `ego` failed to receive
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LostLink {
    pub ego: String,
    pub target: String,
}

/// Every vehicle's snapshot for one broadcast cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub step: u64,
    pub vehicles: Vec<VehicleState>,
    /// Dropped (ego, target) receptions this cycle
    #[serde(default)]
    pub lost: Vec<LostLink>,
    /// Vehicles the traffic source reported in a collision
    #[serde(default)]
    pub collisions: Vec<String>,
}

impl TraceFrame {
    /// Parse one trace line; `line` is 1-based for error reporting
    pub fn parse(line: usize, text: &str) -> Result<Self, ReplayError> {
        serde_json::from_str(text).map_err(|source| ReplayError::Parse { line, source })
    }

    /// Parse a whole trace, skipping blank lines
    pub fn parse_all(text: &str) -> Result<Vec<Self>, ReplayError> {
        text.lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .map(|(i, l)| Self::parse(i + 1, l))
            .collect()
    }

    /// Vehicles within communication range of `ego`, ego excluded
    pub fn neighbours(&self, ego: &VehicleState) -> Vec<&VehicleState> {
        self.vehicles
            .iter()
            .filter(|v| v.id != ego.id && ego.distance_to(v) <= R_COMM)
            .collect()
    }

    /// Engine input for `ego`: snapshots that arrived and the ids heard from
    pub fn inputs_for(
        &self,
        ego: &VehicleState,
    ) -> (HashMap<String, VehicleState>, HashSet<String>) {
        let dropped: HashSet<&str> = self
            .lost
            .iter()
            .filter(|l| l.ego == ego.id)
            .map(|l| l.target.as_str())
            .collect();

        let targets: HashMap<String, VehicleState> = self
            .neighbours(ego)
            .into_iter()
            .filter(|v| !dropped.contains(v.id.as_str()))
            .map(|v| (v.id.clone(), v.clone()))
            .collect();
        let received = targets.keys().cloned().collect();
        (targets, received)
    }

    /// Stamp every snapshot with this frame's step
    pub fn stamped(mut self) -> Self {
        for vehicle in &mut self.vehicles {
            vehicle.timestamp = self.step;
        }
        self
    }

    /// Keep the first snapshot for each vehicle id
    pub fn deduplicated(mut self) -> Self {
        let step = self.step;
        let mut seen = HashSet::new();
        self.vehicles.retain(|v| {
            let first = seen.insert(v.id.clone());
            if !first {
                warn!("Frame {}: duplicate vehicle {} dropped", step, v.id);
            }
            first
        });
        self
    }

    pub fn collided(&self, id: &str) -> bool {
        self.collisions.iter().any(|c| c == id)
    }
}
