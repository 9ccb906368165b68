use crate::index::query::{tracks_length_histogram, view_ids_in_tracks_per_view};
use crate::types::{TracksMap, TracksPerView};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary of an exported track set.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStatistics {
    pub tracks: usize,
    pub views: usize,
    pub observations: usize,
    pub mean_length: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Track length → number of tracks with that length.
    pub length_histogram: BTreeMap<usize, usize>,
}

impl TrackStatistics {
    pub fn from_tracks(tracks: &TracksMap, per_view: &TracksPerView) -> Self {
        let length_histogram = tracks_length_histogram(tracks);
        let observations: usize = length_histogram.iter().map(|(len, n)| len * n).sum();
        let mean_length = if tracks.is_empty() {
            0.0
        } else {
            observations as f64 / tracks.len() as f64
        };
        Self {
            tracks: tracks.len(),
            views: view_ids_in_tracks_per_view(per_view).len(),
            observations,
            mean_length,
            max_length: length_histogram.keys().next_back().copied(),
            length_histogram,
        }
    }
}
