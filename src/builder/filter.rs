//! Per-class keep/discard rules.
//!
//! A class is rejected when one view contributes more than one feature
//! (an erroneous fusion chain) or when it spans fewer than `min_length`
//! distinct views. Each class is judged on its own members only, so the
//! verdicts are computed independently into a private slot per class.

use crate::diagnostics::ClassVerdict;
use crate::registry::Handle;
use crate::types::FeatureRef;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Judge one class. `members` must be sorted by feature reference so that
/// features of the same view are adjacent.
pub(crate) fn evaluate_class(
    members: &[Handle],
    refs: &[FeatureRef],
    min_length: usize,
) -> ClassVerdict {
    let mut distinct_views = 0usize;
    let mut prev_view = None;
    for &h in members {
        let view = refs[h].view_id;
        if prev_view == Some(view) {
            return ClassVerdict::ViewCollision;
        }
        prev_view = Some(view);
        distinct_views += 1;
    }
    if distinct_views < min_length {
        ClassVerdict::TooShort
    } else {
        ClassVerdict::Keep
    }
}

/// Verdict for every class, in class order.
pub(crate) fn evaluate_classes(
    classes: &[Vec<Handle>],
    refs: &[FeatureRef],
    min_length: usize,
    multithread: bool,
) -> Vec<ClassVerdict> {
    #[cfg(feature = "parallel")]
    {
        if multithread {
            return classes
                .par_iter()
                .map(|members| evaluate_class(members, refs, min_length))
                .collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = multithread;

    classes
        .iter()
        .map(|members| evaluate_class(members, refs, min_length))
        .collect()
}
