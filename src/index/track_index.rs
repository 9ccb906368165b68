use super::query::{self, ViewSet};
use crate::diagnostics::TrackStatistics;
use crate::error::TracksError;
use crate::matches::IndMatch;
use crate::types::{DescriberType, FeatureIndex, Track, TrackId, TracksMap, TracksPerView, ViewId};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Exported tracks together with their per-view index.
///
/// The index is derived from the tracks and is only ever rebuilt as a whole:
/// replacing the tracks recomputes it. All queries take `&self`, so a built
/// index can be shared between threads.
#[derive(Clone, Debug, Default)]
pub struct TrackIndex {
    tracks: TracksMap,
    per_view: TracksPerView,
}

impl TrackIndex {
    pub fn new(tracks: TracksMap) -> Self {
        let per_view = query::compute_tracks_per_view(&tracks);
        debug!(
            "TrackIndex::new tracks={} views={}",
            tracks.len(),
            per_view.len()
        );
        Self { tracks, per_view }
    }

    /// Swap in a new track set, rebuilding the per-view index. Returns the
    /// previous tracks.
    pub fn replace_tracks(&mut self, tracks: TracksMap) -> TracksMap {
        let rebuilt = TrackIndex::new(tracks);
        let previous = std::mem::replace(self, rebuilt);
        previous.tracks
    }

    pub fn tracks(&self) -> &TracksMap {
        &self.tracks
    }

    pub fn tracks_per_view(&self) -> &TracksPerView {
        &self.per_view
    }

    pub fn into_tracks(self) -> TracksMap {
        self.tracks
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Ascending ids of the tracks visible in `view`.
    ///
    /// Fails with [`TracksError::UnknownView`] when no track observes `view`.
    pub fn tracks_of_view(&self, view: ViewId) -> Result<&[TrackId], TracksError> {
        self.per_view
            .get(&view)
            .map(Vec::as_slice)
            .ok_or(TracksError::UnknownView(view))
    }

    pub fn common_tracks(&self, views: &ViewSet) -> Result<BTreeSet<TrackId>, TracksError> {
        query::common_tracks_in_images(views, &self.per_view)
    }

    pub fn tracks_in_images(&self, views: &ViewSet) -> Result<TracksMap, TracksError> {
        query::tracks_in_images_fast(views, &self.tracks, &self.per_view)
    }

    pub fn feature_ids_in_view(
        &self,
        track_ids: &BTreeSet<TrackId>,
        view: ViewId,
    ) -> Vec<(DescriberType, FeatureIndex)> {
        query::feature_id_in_view_per_track(&self.tracks, track_ids, view)
    }

    pub fn length_histogram(&self) -> BTreeMap<usize, usize> {
        query::tracks_length_histogram(&self.tracks)
    }

    pub fn view_ids(&self) -> BTreeSet<ViewId> {
        query::view_ids_in_tracks_per_view(&self.per_view)
    }

    pub fn to_indexed_matches(&self, track_ids: &[TrackId]) -> Result<Vec<IndMatch>, TracksError> {
        query::tracks_to_indexed_matches(&self.tracks, track_ids)
    }

    pub fn statistics(&self) -> TrackStatistics {
        TrackStatistics::from_tracks(&self.tracks, &self.per_view)
    }
}
