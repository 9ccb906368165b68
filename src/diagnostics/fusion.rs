use serde::{Deserialize, Serialize};

/// Outcome of registering features and fusing correspondences.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionStage {
    pub elapsed_ms: f64,
    pub view_pairs: usize,
    pub correspondences: usize,
    pub features: usize,
    pub classes: usize,
}
