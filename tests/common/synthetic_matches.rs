use feature_tracks::{DescriberType, FeatureIndex, IndMatch, PairwiseMatches, ViewId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// Scene points observed in random view subsets, with the pairwise matches
/// that connect each point's observations.
pub struct SyntheticScene {
    pub matches: PairwiseMatches,
    /// Observations of each scene point, in generation order.
    pub points: Vec<BTreeMap<ViewId, FeatureIndex>>,
}

pub fn add_matches(
    matches: &mut PairwiseMatches,
    pair: (ViewId, ViewId),
    desc: DescriberType,
    list: &[(FeatureIndex, FeatureIndex)],
) {
    matches
        .entry(pair)
        .or_default()
        .entry(desc)
        .or_default()
        .extend(list.iter().copied().map(IndMatch::from));
}

/// Generate `num_points` points over `num_views` views. Each point is seen in
/// 2..=`max_views` distinct views with a fresh feature index per view, and
/// its observations are linked by a random spanning tree plus a few
/// redundant edges. Pair orientation is random.
pub fn synthetic_scene(
    seed: u64,
    num_views: u32,
    num_points: usize,
    max_views: usize,
    desc: DescriberType,
) -> SyntheticScene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut next_feature: Vec<FeatureIndex> = vec![0; num_views as usize];
    let mut matches = PairwiseMatches::new();
    let mut points = Vec::with_capacity(num_points);
    let max_views = max_views.clamp(2, num_views as usize);

    for _ in 0..num_points {
        let mut views: Vec<ViewId> = (0..num_views).collect();
        views.shuffle(&mut rng);
        let k = rng.random_range(2..=max_views);
        let observations: Vec<(ViewId, FeatureIndex)> = views[..k]
            .iter()
            .map(|&v| {
                let f = next_feature[v as usize];
                next_feature[v as usize] += 1;
                (v, f)
            })
            .collect();

        let mut edges: Vec<(usize, usize)> = (1..k).map(|i| (rng.random_range(0..i), i)).collect();
        if k > 2 && rng.random_bool(0.3) {
            edges.push((0, k - 1));
        }
        for (a, b) in edges {
            let (va, fa) = observations[a];
            let (vb, fb) = observations[b];
            if rng.random_bool(0.5) {
                add_matches(&mut matches, (va, vb), desc, &[(fa, fb)]);
            } else {
                add_matches(&mut matches, (vb, va), desc, &[(fb, fa)]);
            }
        }
        points.push(observations.into_iter().collect());
    }

    SyntheticScene { matches, points }
}

/// The same correspondences with every pair flipped and every list reversed.
pub fn flipped(matches: &PairwiseMatches) -> PairwiseMatches {
    let mut out = PairwiseMatches::new();
    for (&(a, b), per_desc) in matches {
        for (&desc, list) in per_desc {
            let swapped: Vec<(FeatureIndex, FeatureIndex)> =
                list.iter().rev().map(|m| (m.j, m.i)).collect();
            add_matches(&mut out, (b, a), desc, &swapped);
        }
    }
    out
}
