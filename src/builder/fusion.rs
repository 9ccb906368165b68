//! Registration and transitive fusion of correspondences.

use crate::matches::{correspondence_count, correspondences, PairwiseMatches};
use crate::registry::{FeatureRegistry, Handle};
use crate::types::FeatureRef;
use crate::union_find::DisjointSet;

pub(crate) struct Fusion {
    pub registry: FeatureRegistry,
    pub forest: DisjointSet,
    pub classes: Vec<Vec<Handle>>,
}

/// Register every matched feature, union each correspondence and return the
/// partition in canonical order.
pub(crate) fn fuse_matches(matches: &PairwiseMatches) -> Fusion {
    let correspondences_total = correspondence_count(matches);
    let mut registry = FeatureRegistry::with_capacity(2 * correspondences_total);
    let mut links: Vec<(Handle, Handle)> = Vec::with_capacity(correspondences_total);
    for (a, b) in correspondences(matches) {
        links.push((registry.register(a), registry.register(b)));
    }

    let mut forest = DisjointSet::new(registry.len());
    for (ha, hb) in links {
        forest.union(ha, hb);
    }

    let mut classes = forest.classes();
    canonicalize_classes(&mut classes, registry.refs());

    Fusion {
        registry,
        forest,
        classes,
    }
}

/// Sort members of each class by feature reference, then classes by their
/// smallest member. The result is independent of handle assignment order.
pub(crate) fn canonicalize_classes(classes: &mut [Vec<Handle>], refs: &[FeatureRef]) {
    for class in classes.iter_mut() {
        class.sort_unstable_by_key(|&h| refs[h]);
    }
    classes.sort_unstable_by_key(|class| class.first().map(|&h| refs[h]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::{IndMatch, MatchesPerDescType};
    use crate::types::DescriberType;

    fn add(matches: &mut PairwiseMatches, a: u32, b: u32, list: &[(u32, u32)]) {
        let per_desc: &mut MatchesPerDescType = matches.entry((a, b)).or_default();
        per_desc
            .entry(DescriberType::Sift)
            .or_default()
            .extend(list.iter().copied().map(IndMatch::from));
    }

    fn class_refs(fusion: &Fusion) -> Vec<Vec<FeatureRef>> {
        fusion
            .classes
            .iter()
            .map(|c| c.iter().map(|&h| fusion.registry.refs()[h]).collect())
            .collect()
    }

    #[test]
    fn chains_fuse_transitively() {
        let mut matches = PairwiseMatches::new();
        add(&mut matches, 0, 1, &[(0, 0)]);
        add(&mut matches, 1, 2, &[(0, 2)]);
        let fusion = fuse_matches(&matches);
        assert_eq!(fusion.registry.len(), 3);
        let classes = class_refs(&fusion);
        assert_eq!(
            classes,
            vec![vec![
                FeatureRef::new(0, DescriberType::Sift, 0),
                FeatureRef::new(1, DescriberType::Sift, 0),
                FeatureRef::new(2, DescriberType::Sift, 2),
            ]]
        );
    }

    #[test]
    fn classes_are_sorted_by_smallest_member() {
        let mut matches = PairwiseMatches::new();
        add(&mut matches, 3, 4, &[(9, 9)]);
        add(&mut matches, 0, 5, &[(1, 1)]);
        add(&mut matches, 0, 3, &[(0, 7)]);
        let classes = class_refs(&fuse_matches(&matches));
        let firsts: Vec<FeatureRef> = classes.iter().map(|c| c[0]).collect();
        let mut sorted = firsts.clone();
        sorted.sort();
        assert_eq!(firsts, sorted);
        assert_eq!(classes.len(), 3);
    }

    #[test]
    fn repeated_features_share_one_handle() {
        let mut matches = PairwiseMatches::new();
        add(&mut matches, 0, 1, &[(0, 0), (0, 0)]);
        add(&mut matches, 2, 1, &[(4, 0)]);
        add(&mut matches, 2, 0, &[(4, 0)]);
        let fusion = fuse_matches(&matches);
        assert_eq!(fusion.registry.len(), 3);
        assert_eq!(fusion.forest.len(), 3);
        assert_eq!(fusion.forest.class_count(), 1);
        assert_eq!(fusion.classes, vec![vec![0, 1, 2]]);
    }
}
