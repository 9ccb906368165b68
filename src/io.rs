//! JSON helpers for matches files and reports.
//!
//! - `load_matches_json`: read pairwise matches from a JSON file.
//! - `parse_matches_json`: same, from an in-memory string.
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `write_tracks_dump`: write the builder's textual class dump.
//!
//! Matches file layout:
//! ```json
//! { "pairs": [ { "view_a": 0, "view_b": 1, "matches": { "sift": [[0, 0], [1, 1]] } } ] }
//! ```
use crate::builder::TracksBuilder;
use crate::matches::{IndMatch, MatchesPerDescType, PairwiseMatches};
use crate::types::{DescriberType, FeatureIndex, ViewId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::BufWriter;
use std::path::Path;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatchesFile {
    pub pairs: Vec<PairEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PairEntry {
    pub view_a: ViewId,
    pub view_b: ViewId,
    #[serde(default)]
    pub matches: BTreeMap<DescriberType, Vec<[FeatureIndex; 2]>>,
}

impl MatchesFile {
    /// Merge entries into pairwise matches. Repeated pairs are concatenated.
    pub fn into_pairwise(self) -> PairwiseMatches {
        let mut out = PairwiseMatches::new();
        for entry in self.pairs {
            let per_desc: &mut MatchesPerDescType =
                out.entry((entry.view_a, entry.view_b)).or_default();
            for (desc, list) in entry.matches {
                per_desc
                    .entry(desc)
                    .or_default()
                    .extend(list.into_iter().map(|[i, j]| IndMatch::new(i, j)));
            }
        }
        out
    }

    pub fn from_pairwise(matches: &PairwiseMatches) -> Self {
        let pairs = matches
            .iter()
            .map(|(&(view_a, view_b), per_desc)| PairEntry {
                view_a,
                view_b,
                matches: per_desc
                    .iter()
                    .map(|(&desc, list)| (desc, list.iter().map(|m| [m.i, m.j]).collect()))
                    .collect(),
            })
            .collect();
        Self { pairs }
    }
}

pub fn parse_matches_json(contents: &str) -> Result<PairwiseMatches, String> {
    let file: MatchesFile =
        serde_json::from_str(contents).map_err(|e| format!("Failed to parse matches: {e}"))?;
    Ok(file.into_pairwise())
}

pub fn load_matches_json(path: &Path) -> Result<PairwiseMatches, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read matches {}: {e}", path.display()))?;
    parse_matches_json(&contents).map_err(|e| format!("{e} ({})", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

/// Write the diagnostic class dump of `builder` to `path`.
pub fn write_tracks_dump(path: &Path, builder: &TracksBuilder) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let file = fs::File::create(path)
        .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
    let mut out = BufWriter::new(file);
    builder
        .export_to_writer(&mut out)
        .map_err(|e| format!("Failed to write dump {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
