use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Stages of one track build, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStage {
    Fusion,
    Filter,
    Export,
}

impl BuildStage {
    pub const ALL: [BuildStage; 3] = [BuildStage::Fusion, BuildStage::Filter, BuildStage::Export];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildStage::Fusion => "fusion",
            BuildStage::Filter => "filter",
            BuildStage::Export => "export",
        }
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall-clock duration of one builder stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub stage: BuildStage,
    pub elapsed_ms: f64,
}

/// Per-stage durations of one track build. A stage recorded twice keeps its
/// latest duration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn record(&mut self, stage: BuildStage, elapsed_ms: f64) {
        match self.stages.iter_mut().find(|s| s.stage == stage) {
            Some(entry) => entry.elapsed_ms = elapsed_ms,
            None => self.stages.push(StageTiming { stage, elapsed_ms }),
        }
    }

    pub fn stage_ms(&self, stage: BuildStage) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.elapsed_ms)
    }

    /// Time spent outside the recorded stages (bookkeeping between them).
    pub fn overhead_ms(&self) -> f64 {
        let staged: f64 = self.stages.iter().map(|s| s.elapsed_ms).sum();
        (self.total_ms - staged).max(0.0)
    }
}

/// Milliseconds elapsed since `start`.
#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
