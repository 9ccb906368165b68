use crate::builder::BuildParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty JSON report (trace + statistics).
    pub json_out: Option<PathBuf>,
    /// Textual class dump.
    pub dump_out: Option<PathBuf>,
}

/// Configuration of the `tracks_demo` tool.
#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Matches file, see [`crate::io::load_matches_json`].
    pub input: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub build: BuildParams,
}

pub fn parse_config(contents: &str) -> Result<RuntimeConfig, String> {
    serde_json::from_str(contents).map_err(|e| format!("Failed to parse config: {e}"))
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("{e} ({})", path.display()))
}
