//! Pairwise correspondences produced by an upstream matching stage.
//!
//! - [`IndMatch`]: one correspondence between two feature indices.
//! - [`PairwiseMatches`]: all correspondences keyed by ordered view pair and
//!   descriptor type.
//! - [`FeatureCounts`]: optional per-view feature counts used to range-check
//!   match indices before fusion.

use crate::error::TracksError;
use crate::types::{DescriberType, FeatureIndex, FeatureRef, ViewId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Feature `i` of the first view corresponds to feature `j` of the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndMatch {
    pub i: FeatureIndex,
    pub j: FeatureIndex,
}

impl IndMatch {
    pub fn new(i: FeatureIndex, j: FeatureIndex) -> Self {
        Self { i, j }
    }
}

impl From<(FeatureIndex, FeatureIndex)> for IndMatch {
    fn from((i, j): (FeatureIndex, FeatureIndex)) -> Self {
        Self { i, j }
    }
}

/// Ordered view pair `(view_a, view_b)`.
pub type ViewPair = (ViewId, ViewId);

/// Correspondences of one view pair, bucketed by descriptor type.
pub type MatchesPerDescType = BTreeMap<DescriberType, Vec<IndMatch>>;

/// All correspondences of a scene.
pub type PairwiseMatches = BTreeMap<ViewPair, MatchesPerDescType>;

/// Number of detected features per view and descriptor type.
pub type FeatureCounts = BTreeMap<ViewId, BTreeMap<DescriberType, usize>>;

/// Iterate every correspondence as a pair of feature references.
pub fn correspondences(
    matches: &PairwiseMatches,
) -> impl Iterator<Item = (FeatureRef, FeatureRef)> + '_ {
    matches.iter().flat_map(|(&(view_a, view_b), per_desc)| {
        per_desc.iter().flat_map(move |(&desc, list)| {
            list.iter().map(move |m| {
                (
                    FeatureRef::new(view_a, desc, m.i),
                    FeatureRef::new(view_b, desc, m.j),
                )
            })
        })
    })
}

/// Total number of correspondences over all pairs and descriptor types.
pub fn correspondence_count(matches: &PairwiseMatches) -> usize {
    matches
        .values()
        .flat_map(|per_desc| per_desc.values())
        .map(Vec::len)
        .sum()
}

/// Structural validation of the matches.
///
/// Rejects view pairs linking a view with itself and, when `counts` is
/// provided, indices beyond the detected feature count of their view.
pub fn validate_matches(
    matches: &PairwiseMatches,
    counts: Option<&FeatureCounts>,
) -> Result<(), TracksError> {
    for (&(view_a, view_b), per_desc) in matches {
        if view_a == view_b {
            return Err(TracksError::SelfCorrespondence { view: view_a });
        }
        let Some(counts) = counts else {
            continue;
        };
        for (&desc, list) in per_desc {
            if list.is_empty() {
                continue;
            }
            let count_a = feature_count(counts, view_a, desc)?;
            let count_b = feature_count(counts, view_b, desc)?;
            for m in list {
                check_index(view_a, desc, m.i, count_a)?;
                check_index(view_b, desc, m.j, count_b)?;
            }
        }
    }
    Ok(())
}

fn feature_count(
    counts: &FeatureCounts,
    view: ViewId,
    desc_type: DescriberType,
) -> Result<usize, TracksError> {
    counts
        .get(&view)
        .and_then(|per_desc| per_desc.get(&desc_type))
        .copied()
        .ok_or(TracksError::MissingFeatureCount { view, desc_type })
}

#[inline]
fn check_index(
    view: ViewId,
    desc_type: DescriberType,
    index: FeatureIndex,
    count: usize,
) -> Result<(), TracksError> {
    if (index as usize) < count {
        Ok(())
    } else {
        Err(TracksError::FeatureIndexOutOfRange {
            view,
            desc_type,
            index,
            count,
        })
    }
}
