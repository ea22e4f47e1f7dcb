use std::fs;
use std::path::Path;

use adaptsched_core::{SchedError, SchedResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::scheduler::{Scheduler, SchedulerConfig, Timeline};

use super::driver::SimulationSummary;

/// JSON document handed to external plotting tools after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineExport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub exported_at: DateTime<Utc>,
    pub config: SchedulerConfig,
    pub summary: SimulationSummary,
    pub timeline: Timeline,
}

impl TimelineExport {
    pub fn new(summary: &SimulationSummary, scheduler: &Scheduler) -> Self {
        Self {
            run_id: summary.run_id,
            started_at: summary.started_at,
            exported_at: Utc::now(),
            config: scheduler.config().clone(),
            summary: summary.clone(),
            timeline: scheduler.timeline().clone(),
        }
    }

    pub fn to_json(&self) -> SchedResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SchedError::Serialize(e.to_string()))
    }

    /// Write pretty JSON to `path`, creating parent directories as needed.
    pub fn write_json(&self, path: &Path) -> SchedResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), entries = self.timeline.len(), "Timeline exported");
        Ok(())
    }

    pub fn read_json(path: &Path) -> SchedResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| SchedError::Serialize(e.to_string()))
    }
}
