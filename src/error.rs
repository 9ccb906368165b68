use crate::types::{DescriberType, FeatureIndex, TrackId, ViewId};
use thiserror::Error;

/// Precondition violations reported by the builder and the track queries.
///
/// Empty outcomes (no surviving track, no common track) are never errors and
/// come back as empty containers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TracksError {
    /// A query was issued with an empty view set.
    #[error("view set must not be empty")]
    EmptyViewSet,
    /// A pair of matches links a view with itself.
    #[error("matches pair links view {view} with itself")]
    SelfCorrespondence { view: ViewId },
    /// A match references a feature beyond the detected feature count.
    #[error("feature {index} out of range in view {view} ({desc_type}, {count} features)")]
    FeatureIndexOutOfRange {
        view: ViewId,
        desc_type: DescriberType,
        index: FeatureIndex,
        count: usize,
    },
    /// Feature counts were supplied but do not cover a matched view.
    #[error("no feature count for view {view} ({desc_type})")]
    MissingFeatureCount {
        view: ViewId,
        desc_type: DescriberType,
    },
    /// The view was never registered in the track index.
    #[error("view {0} is not present in the track index")]
    UnknownView(ViewId),
    /// The track id does not exist.
    #[error("track {0} does not exist")]
    UnknownTrack(TrackId),
    /// The track does not have exactly two observations.
    #[error("track {track} has {len} views, expected 2")]
    NotTwoViewTrack { track: TrackId, len: usize },
}
