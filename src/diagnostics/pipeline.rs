use crate::diagnostics::{ExportStage, FilterStage, FusionStage, TimingBreakdown};
use crate::types::TracksMap;
use serde::Serialize;

/// Result produced by
/// [`TracksBuilder::process_with_diagnostics`](crate::TracksBuilder::process_with_diagnostics).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TracksReport {
    pub tracks: TracksMap,
    pub trace: BuildTrace,
}

/// Stage-by-stage record of one build → filter → export run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTrace {
    pub timings: TimingBreakdown,
    pub fusion: FusionStage,
    pub filter: FilterStage,
    pub export: ExportStage,
}
