mod common;

use common::synthetic_matches::{add_matches, flipped, synthetic_scene};
use feature_tracks::index::query::{
    common_tracks_in_images, compute_tracks_per_view, tracks_in_images, tracks_in_images_fast,
};
use feature_tracks::{
    BuildParams, DescriberType, FeatureIndex, TrackId, TracksBuilder, TracksMap, ViewId, ViewSet,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

fn build(matches: &feature_tracks::PairwiseMatches, params: BuildParams) -> TracksMap {
    TracksBuilder::new(params).process(matches).unwrap()
}

fn random_view_sets(seed: u64, num_views: u32, count: usize) -> Vec<ViewSet> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sets = Vec::with_capacity(count);
    for _ in 0..count {
        let mut views: Vec<ViewId> = (0..num_views).collect();
        views.shuffle(&mut rng);
        let k = rng.random_range(1..=4usize.min(num_views as usize));
        sets.push(views[..k].iter().copied().collect());
    }
    sets
}

#[test]
fn recovers_synthetic_points_exactly() {
    let _ = env_logger::builder().is_test(true).try_init();
    let scene = synthetic_scene(7, 8, 300, 5, DescriberType::Sift);
    let tracks = build(&scene.matches, BuildParams::default());

    let mut expected: Vec<&BTreeMap<ViewId, FeatureIndex>> = scene.points.iter().collect();
    expected.sort_by_key(|obs| obs.iter().next().map(|(&v, &f)| (v, f)));

    assert_eq!(tracks.len(), expected.len());
    for (id, obs) in expected.into_iter().enumerate() {
        assert_eq!(&tracks[&id].feat_per_view, obs, "track {id}");
        assert_eq!(tracks[&id].desc_type, DescriberType::Sift);
    }
}

#[test]
fn surviving_tracks_respect_invariants() {
    for (seed, min_length) in [(1u64, 2usize), (2, 3), (3, 4)] {
        let mut scene = synthetic_scene(seed, 6, 200, 6, DescriberType::Akaze);
        // Cross-link a few points through the same view to create collisions.
        let mut rng = StdRng::seed_from_u64(seed + 100);
        for _ in 0..15 {
            let a = &scene.points[rng.random_range(0..scene.points.len())];
            let b = &scene.points[rng.random_range(0..scene.points.len())];
            let (&va, &fa) = a.iter().next().unwrap();
            let (&vb, &fb) = b.iter().next_back().unwrap();
            if va != vb {
                add_matches(&mut scene.matches, (va, vb), DescriberType::Akaze, &[(fa, fb)]);
            }
        }

        let mut builder = TracksBuilder::new(BuildParams::default().with_min_length(min_length));
        let report = builder.process_with_diagnostics(&scene.matches).unwrap();
        let filter = &report.trace.filter;
        assert_eq!(filter.kept + filter.rejected(), filter.classes_in);
        assert_eq!(report.tracks.len(), filter.kept);

        for track in report.tracks.values() {
            assert!(track.len() >= min_length);
        }
        // Every surviving class has exactly one member per view.
        for class in builder.classes() {
            let views: BTreeSet<ViewId> = class.iter().map(|f| f.view_id).collect();
            assert_eq!(views.len(), class.len());
        }
    }
}

#[test]
fn partition_ignores_match_order_and_orientation() {
    let scene = synthetic_scene(11, 7, 250, 4, DescriberType::Sift);
    let forward = build(&scene.matches, BuildParams::default());
    let backward = build(&flipped(&scene.matches), BuildParams::default());
    assert_eq!(forward, backward);
}

#[test]
fn serial_filter_matches_parallel_filter() {
    let scene = synthetic_scene(5, 6, 300, 6, DescriberType::Sift);
    let serial = build(&scene.matches, BuildParams::default().with_multithread(false).with_min_length(3));
    let parallel = build(&scene.matches, BuildParams::default().with_multithread(true).with_min_length(3));
    assert_eq!(serial, parallel);
}

#[test]
fn common_tracks_equal_intersection_of_view_lists() {
    let scene = synthetic_scene(21, 6, 400, 5, DescriberType::Sift);
    let tracks = build(&scene.matches, BuildParams::default());
    let per_view = compute_tracks_per_view(&tracks);

    for views in random_view_sets(99, 8, 60) {
        let mut expected: Option<BTreeSet<TrackId>> = None;
        for view in &views {
            let ids: BTreeSet<TrackId> = per_view
                .get(view)
                .map(|ids| ids.iter().copied().collect())
                .unwrap_or_default();
            expected = Some(match expected {
                None => ids,
                Some(acc) => acc.intersection(&ids).copied().collect(),
            });
        }
        let got = common_tracks_in_images(&views, &per_view).unwrap();
        assert_eq!(got, expected.unwrap_or_default(), "views {views:?}");
    }
}

#[test]
fn fast_and_linear_queries_agree() {
    let scene = synthetic_scene(33, 6, 400, 6, DescriberType::Sift);
    let tracks = build(&scene.matches, BuildParams::default());
    let per_view = compute_tracks_per_view(&tracks);

    for views in random_view_sets(4, 7, 60) {
        let slow = tracks_in_images(&views, &tracks).unwrap();
        let fast = tracks_in_images_fast(&views, &tracks, &per_view).unwrap();
        assert_eq!(slow, fast, "views {views:?}");
        for track in fast.values() {
            assert_eq!(track.feat_per_view.keys().copied().collect::<ViewSet>(), views);
        }
    }
}

#[test]
fn disjoint_views_share_no_track() {
    let mut matches = feature_tracks::PairwiseMatches::new();
    add_matches(&mut matches, (0, 1), DescriberType::Sift, &[(0, 0), (1, 1)]);
    add_matches(&mut matches, (2, 3), DescriberType::Sift, &[(0, 0)]);
    let tracks = build(&matches, BuildParams::default());
    let per_view = compute_tracks_per_view(&tracks);

    assert!(common_tracks_in_images(&ViewSet::from([0, 2]), &per_view)
        .unwrap()
        .is_empty());
    assert_eq!(
        common_tracks_in_images(&ViewSet::from([3]), &per_view).unwrap(),
        BTreeSet::from([2])
    );
}
