//! Parameters controlling the build → filter → export pipeline.

use serde::Deserialize;

/// Minimum number of distinct views a track needs to survive filtering.
pub const DEFAULT_MIN_LENGTH: usize = 2;

/// Builder-wide parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BuildParams {
    /// Classes observed in fewer distinct views are discarded.
    pub min_length: usize,
    /// Evaluate classes on the rayon pool when the `parallel` feature is on.
    pub multithread: bool,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            multithread: true,
        }
    }
}

impl BuildParams {
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_multithread(mut self, multithread: bool) -> Self {
        self.multithread = multithread;
        self
    }
}
