use serde::{Deserialize, Serialize};

/// Report of the class → track export.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStage {
    pub elapsed_ms: f64,
    pub tracks: usize,
    /// Classes skipped because their members disagree on descriptor type.
    pub rejected_mixed_descriptor: usize,
}
