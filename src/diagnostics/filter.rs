use serde::{Deserialize, Serialize};

/// Keep/discard decision for one equivalence class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassVerdict {
    Keep,
    /// Fewer distinct views than the configured minimum.
    TooShort,
    /// Two members of the class come from the same view.
    ViewCollision,
}

/// Report of the class filter.
///
/// A class that is both short and colliding is counted as a collision.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStage {
    pub elapsed_ms: f64,
    pub min_length: usize,
    pub parallel: bool,
    pub classes_in: usize,
    pub kept: usize,
    pub rejected_short: usize,
    pub rejected_collision: usize,
}

impl FilterStage {
    pub fn rejected(&self) -> usize {
        self.rejected_short + self.rejected_collision
    }
}
