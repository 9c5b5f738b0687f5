use aircore::model::Measurement;
use aircore::stats::AggregateStats;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Latest published state of one refresh cycle, served to the GUI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SnapshotModel {
    pub measurements: Vec<Measurement>,
    pub stats: AggregateStats,
    /// True when any city in this cycle fell back to synthetic data;
    /// drives the non-blocking "demo mode" advisory in the GUI.
    pub demo_mode: bool,
    pub last_update: Option<String>,
}

pub type SharedSnapshot = Arc<RwLock<SnapshotModel>>;

pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(RwLock::new(SnapshotModel::default()))
}
