//! Set queries over exported tracks.
//!
//! All functions are read-only. The intersection-based queries rely on the
//! per-view id lists of [`TracksPerView`] being sorted ascending, which
//! [`compute_tracks_per_view`] guarantees.

use crate::error::TracksError;
use crate::matches::IndMatch;
use crate::types::{
    DescriberType, FeatureIndex, Track, TrackId, TracksMap, TracksPerView, ViewId,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Set of views passed to the intersection queries.
pub type ViewSet = BTreeSet<ViewId>;

/// Invert `tracks` into the ascending list of visible track ids per view.
pub fn compute_tracks_per_view(tracks: &TracksMap) -> TracksPerView {
    let mut per_view = TracksPerView::new();
    for (&track_id, track) in tracks {
        for &view in track.feat_per_view.keys() {
            per_view.entry(view).or_default().push(track_id);
        }
    }
    sort_track_ids(&mut per_view);
    per_view
}

fn sort_track_ids(per_view: &mut TracksPerView) {
    #[cfg(feature = "parallel")]
    {
        per_view
            .par_iter_mut()
            .for_each(|(_, ids)| ids.sort_unstable());
    }
    #[cfg(not(feature = "parallel"))]
    {
        per_view.values_mut().for_each(|ids| ids.sort_unstable());
    }
}

/// Ids of the tracks visible in every view of `views`.
///
/// A view absent from `per_view` has no track, so the result is empty.
pub fn common_tracks_in_images(
    views: &ViewSet,
    per_view: &TracksPerView,
) -> Result<BTreeSet<TrackId>, TracksError> {
    if views.is_empty() {
        return Err(TracksError::EmptyViewSet);
    }
    let mut lists: Vec<&[TrackId]> = Vec::with_capacity(views.len());
    for view in views {
        match per_view.get(view) {
            Some(ids) => lists.push(ids.as_slice()),
            None => return Ok(BTreeSet::new()),
        }
    }
    // Start from the shortest list to keep the running intersection small.
    lists.sort_by_key(|ids| ids.len());

    let mut common: Vec<TrackId> = lists[0].to_vec();
    for ids in &lists[1..] {
        if common.is_empty() {
            break;
        }
        common = intersect_sorted(&common, ids);
    }
    Ok(common.into_iter().collect())
}

/// Intersection of two ascending slices.
fn intersect_sorted(a: &[TrackId], b: &[TrackId]) -> Vec<TrackId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Keep `track` restricted to `views` if it observes all of them.
fn restrict_to_views(track: &Track, views: &ViewSet) -> Option<Track> {
    let mut out = Track::new(track.desc_type);
    for &view in views {
        let feat = track.feature_in(view)?;
        out.feat_per_view.insert(view, feat);
    }
    Some(out)
}

/// Tracks observed in every view of `views`, restricted to those views.
///
/// Linear scan over all tracks.
pub fn tracks_in_images(views: &ViewSet, tracks: &TracksMap) -> Result<TracksMap, TracksError> {
    if views.is_empty() {
        return Err(TracksError::EmptyViewSet);
    }
    Ok(tracks
        .iter()
        .filter_map(|(&id, track)| restrict_to_views(track, views).map(|t| (id, t)))
        .collect())
}

/// Same result as [`tracks_in_images`], looking up only the candidates found
/// by [`common_tracks_in_images`].
pub fn tracks_in_images_fast(
    views: &ViewSet,
    tracks: &TracksMap,
    per_view: &TracksPerView,
) -> Result<TracksMap, TracksError> {
    let common = common_tracks_in_images(views, per_view)?;
    Ok(common
        .into_iter()
        .filter_map(|id| {
            let track = tracks.get(&id)?;
            restrict_to_views(track, views).map(|t| (id, t))
        })
        .collect())
}

/// Ids of the tracks observing `view`, by scanning `tracks`.
pub fn image_tracks_id(tracks: &TracksMap, view: ViewId) -> BTreeSet<TrackId> {
    tracks
        .iter()
        .filter(|(_, track)| track.contains_view(view))
        .map(|(&id, _)| id)
        .collect()
}

pub fn tracks_id_set(tracks: &TracksMap) -> BTreeSet<TrackId> {
    tracks.keys().copied().collect()
}

/// Descriptor type and feature index in `view` of each listed track.
///
/// Unknown track ids and tracks not seen in `view` are skipped.
pub fn feature_id_in_view_per_track(
    tracks: &TracksMap,
    track_ids: &BTreeSet<TrackId>,
    view: ViewId,
) -> Vec<(DescriberType, FeatureIndex)> {
    track_ids
        .iter()
        .filter_map(|id| tracks.get(id))
        .filter_map(|track| track.feature_in(view).map(|f| (track.desc_type, f)))
        .collect()
}

/// Track length → number of tracks of that length.
pub fn tracks_length_histogram(tracks: &TracksMap) -> BTreeMap<usize, usize> {
    let mut histogram = BTreeMap::new();
    for track in tracks.values() {
        *histogram.entry(track.len()).or_insert(0) += 1;
    }
    histogram
}

pub fn view_ids_in_tracks_per_view(per_view: &TracksPerView) -> BTreeSet<ViewId> {
    per_view.keys().copied().collect()
}

pub fn view_ids_in_tracks(tracks: &TracksMap) -> BTreeSet<ViewId> {
    tracks
        .values()
        .flat_map(|track| track.feat_per_view.keys().copied())
        .collect()
}

/// Turn two-view tracks back into `(feature in lower view, feature in higher
/// view)` index pairs, in the order of `track_ids`.
pub fn tracks_to_indexed_matches(
    tracks: &TracksMap,
    track_ids: &[TrackId],
) -> Result<Vec<IndMatch>, TracksError> {
    track_ids
        .iter()
        .map(|&id| {
            let track = tracks.get(&id).ok_or(TracksError::UnknownTrack(id))?;
            let mut feats = track.feat_per_view.values().copied();
            match (feats.next(), feats.next(), feats.next()) {
                (Some(i), Some(j), None) => Ok(IndMatch::new(i, j)),
                _ => Err(TracksError::NotTwoViewTrack {
                    track: id,
                    len: track.len(),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(entries: &[(ViewId, FeatureIndex)]) -> Track {
        Track {
            desc_type: DescriberType::Sift,
            feat_per_view: entries.iter().copied().collect(),
        }
    }

    fn sample_tracks() -> TracksMap {
        let mut tracks = TracksMap::new();
        tracks.insert(0, track(&[(0, 0), (1, 0), (2, 2)]));
        tracks.insert(1, track(&[(0, 1), (1, 1), (2, 0)]));
        tracks.insert(2, track(&[(1, 7), (3, 4)]));
        tracks
    }

    fn views(list: &[ViewId]) -> ViewSet {
        list.iter().copied().collect()
    }

    #[test]
    fn per_view_lists_are_sorted() {
        let per_view = compute_tracks_per_view(&sample_tracks());
        assert_eq!(per_view[&0], vec![0, 1]);
        assert_eq!(per_view[&1], vec![0, 1, 2]);
        assert_eq!(per_view[&3], vec![2]);
        assert!(per_view.values().all(|ids| ids.windows(2).all(|w| w[0] < w[1])));
    }

    #[test]
    fn common_tracks_intersects_views() {
        let per_view = compute_tracks_per_view(&sample_tracks());
        let common = common_tracks_in_images(&views(&[0, 1]), &per_view).unwrap();
        assert_eq!(common, BTreeSet::from([0, 1]));
        let single = common_tracks_in_images(&views(&[3]), &per_view).unwrap();
        assert_eq!(single, BTreeSet::from([2]));
        let disjoint = common_tracks_in_images(&views(&[0, 3]), &per_view).unwrap();
        assert!(disjoint.is_empty());
        let missing = common_tracks_in_images(&views(&[1, 42]), &per_view).unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn empty_view_set_is_rejected() {
        let tracks = sample_tracks();
        let per_view = compute_tracks_per_view(&tracks);
        let empty = ViewSet::new();
        assert_eq!(
            common_tracks_in_images(&empty, &per_view),
            Err(TracksError::EmptyViewSet)
        );
        assert_eq!(
            tracks_in_images(&empty, &tracks),
            Err(TracksError::EmptyViewSet)
        );
        assert_eq!(
            tracks_in_images_fast(&empty, &tracks, &per_view),
            Err(TracksError::EmptyViewSet)
        );
    }

    #[test]
    fn tracks_in_images_restricts_entries() {
        let tracks = sample_tracks();
        let per_view = compute_tracks_per_view(&tracks);
        let slow = tracks_in_images(&views(&[1, 2]), &tracks).unwrap();
        assert_eq!(slow.len(), 2);
        assert_eq!(slow[&0], track(&[(1, 0), (2, 2)]));
        assert_eq!(slow[&1], track(&[(1, 1), (2, 0)]));
        let fast = tracks_in_images_fast(&views(&[1, 2]), &tracks, &per_view).unwrap();
        assert_eq!(slow, fast);
    }

    #[test]
    fn histogram_and_view_sets() {
        let tracks = sample_tracks();
        let per_view = compute_tracks_per_view(&tracks);
        let histogram = tracks_length_histogram(&tracks);
        assert_eq!(histogram, BTreeMap::from([(2, 1), (3, 2)]));
        assert_eq!(view_ids_in_tracks(&tracks), views(&[0, 1, 2, 3]));
        assert_eq!(view_ids_in_tracks_per_view(&per_view), views(&[0, 1, 2, 3]));
        assert_eq!(image_tracks_id(&tracks, 2), BTreeSet::from([0, 1]));
        assert_eq!(tracks_id_set(&tracks), BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn feature_ids_skip_unknown_tracks() {
        let tracks = sample_tracks();
        let ids = BTreeSet::from([0, 2, 99]);
        let feats = feature_id_in_view_per_track(&tracks, &ids, 1);
        assert_eq!(
            feats,
            vec![(DescriberType::Sift, 0), (DescriberType::Sift, 7)]
        );
        assert_eq!(feature_id_in_view_per_track(&tracks, &ids, 3).len(), 1);
    }

    #[test]
    fn two_view_tracks_convert_to_matches() {
        let tracks = sample_tracks();
        assert_eq!(
            tracks_to_indexed_matches(&tracks, &[2]),
            Ok(vec![IndMatch::new(7, 4)])
        );
        assert_eq!(
            tracks_to_indexed_matches(&tracks, &[0]),
            Err(TracksError::NotTwoViewTrack { track: 0, len: 3 })
        );
        assert_eq!(
            tracks_to_indexed_matches(&tracks, &[5]),
            Err(TracksError::UnknownTrack(5))
        );
    }
}
