//! Multi-ego trace replay

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use bsd_engine::{AlertLevel, BsdEngine, CycleResult, EngineConfig};
use ground_truth::{LabelCoverage, LabelInput, NearMissLabeler};

use crate::{ReplayError, TraceFrame};

/// One output line: engine result plus the independent near-miss label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleRecord {
    #[serde(flatten)]
    pub result: CycleResult,
    pub near_miss: bool,
}

/// Cycles spent at each alert level, per side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub left: [usize; 4],
    pub right: [usize; 4],
}

impl AlertSummary {
    pub fn record(&mut self, result: &CycleResult) {
        self.left[result.alert_left.severity() as usize] += 1;
        self.right[result.alert_right.severity() as usize] += 1;
    }

    pub fn count(&self, level: AlertLevel) -> usize {
        let i = level.severity() as usize;
        self.left[i] + self.right[i]
    }

    pub fn report(&self) {
        for level in [
            AlertLevel::Safe,
            AlertLevel::Caution,
            AlertLevel::Warning,
            AlertLevel::Critical,
        ] {
            let i = level.severity() as usize;
            info!(
                "{:>8}: left {:>6}  right {:>6}",
                level.as_str(),
                self.left[i],
                self.right[i]
            );
        }
    }
}

/// Owns one engine per ego seen in the trace
pub struct Replayer {
    config: EngineConfig,
    engines: HashMap<String, BsdEngine>,
    labeler: NearMissLabeler,
    cleanup_every: u64,
    cycles: u64,
    labels: Vec<bool>,
    summary: AlertSummary,
}

impl Replayer {
    pub fn new(config: EngineConfig, cleanup_every: u64) -> Self {
        Self {
            config,
            engines: HashMap::new(),
            labeler: NearMissLabeler::default(),
            cleanup_every: cleanup_every.max(1),
            cycles: 0,
            labels: Vec::new(),
            summary: AlertSummary::default(),
        }
    }

    /// Run one cycle for every ego in the frame. Egos are processed in
    /// parallel; each engine moves into its task and comes back with the
    /// result. Repeated vehicle ids keep only their first snapshot.
    pub async fn run_frame(&mut self, frame: TraceFrame) -> Result<Vec<CycleRecord>, ReplayError> {
        let frame = frame.stamped().deduplicated();
        let mut tasks = Vec::with_capacity(frame.vehicles.len());

        for ego in &frame.vehicles {
            let mut engine = match self.engines.remove(&ego.id) {
                Some(engine) => engine,
                None => {
                    debug!("Starting engine for ego {}", ego.id);
                    BsdEngine::new(self.config.clone())
                }
            };

            let (targets, received) = frame.inputs_for(ego);
            let neighbours: Vec<_> = frame.neighbours(ego).into_iter().cloned().collect();
            let label_input = LabelInput::from_states(ego, &neighbours, frame.collided(&ego.id));
            let ego = ego.clone();

            tasks.push((
                label_input,
                tokio::task::spawn_blocking(move || {
                    let result = engine.process(&ego, &targets, &received);
                    (engine, result)
                }),
            ));
        }

        let mut records = Vec::with_capacity(tasks.len());
        for (label_input, task) in tasks {
            let (engine, result) = task
                .await
                .map_err(|e| ReplayError::Join(e.to_string()))?;
            self.engines.insert(result.ego_id.clone(), engine);

            let near_miss = self.labeler.label(&label_input);
            self.labels.push(near_miss);
            self.summary.record(&result);
            records.push(CycleRecord { result, near_miss });
        }

        self.cycles += 1;
        if self.cycles % self.cleanup_every == 0 {
            self.cleanup();
        }

        Ok(records)
    }

    /// Sweep every engine's trackers between cycles
    pub fn cleanup(&mut self) -> usize {
        let removed: usize = self.engines.values_mut().map(|e| e.cleanup()).sum();
        if removed > 0 {
            debug!("Cycle {}: swept {} trackers", self.cycles, removed);
        }
        removed
    }

    pub fn engine(&self, ego_id: &str) -> Option<&BsdEngine> {
        self.engines.get(ego_id)
    }

    pub fn engine_count(&self) -> usize {
        self.engines.len()
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn summary(&self) -> &AlertSummary {
        &self.summary
    }

    pub fn coverage(&self) -> LabelCoverage {
        LabelCoverage::from_labels(&self.labels)
    }
}
