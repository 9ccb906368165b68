//! Fusion of pairwise feature matches into multi-view tracks.
//!
//! A track is the record of one scene point across the views that observe
//! it. Pairwise correspondences produced by a matching stage are fused
//! transitively with a disjoint-set forest, degenerate fusions are dropped,
//! and the survivors are exported as a [`TracksMap`] with a per-view index
//! ([`TracksPerView`]) serving intersection queries.
//!
//! ```no_run
//! use feature_tracks::prelude::*;
//! use std::collections::BTreeSet;
//!
//! # fn main() -> Result<(), TracksError> {
//! let mut matches = PairwiseMatches::new();
//! matches
//!     .entry((0, 1))
//!     .or_default()
//!     .insert(DescriberType::Sift, vec![IndMatch::new(0, 0), IndMatch::new(1, 1)]);
//! matches
//!     .entry((1, 2))
//!     .or_default()
//!     .insert(DescriberType::Sift, vec![IndMatch::new(0, 2), IndMatch::new(1, 0)]);
//!
//! let mut builder = TracksBuilder::new(BuildParams::default());
//! let index = TrackIndex::new(builder.process(&matches)?);
//! let common = index.common_tracks(&BTreeSet::from([0, 2]))?;
//! println!("tracks={} common(0,2)={}", index.len(), common.len());
//! # Ok(())
//! # }
//! ```

// Public modules (stable-ish surface)
pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod index;
pub mod matches;
pub mod types;

// Building blocks of the builder, public for tools and tests.
pub mod registry;
pub mod union_find;

// Tooling glue.
pub mod config;
pub mod io;

// --- High-level re-exports -------------------------------------------------

pub use crate::builder::{BuildParams, TracksBuilder};
pub use crate::diagnostics::{BuildTrace, TrackStatistics, TracksReport};
pub use crate::error::TracksError;
pub use crate::index::{TrackIndex, ViewSet};
pub use crate::matches::{FeatureCounts, IndMatch, MatchesPerDescType, PairwiseMatches};
pub use crate::types::{
    DescriberType, FeatureIndex, FeatureRef, KeypointId, Track, TrackId, TracksMap,
    TracksPerView, ViewId,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::{
        BuildParams, DescriberType, IndMatch, PairwiseMatches, TrackIndex, TracksBuilder,
        TracksError, TracksMap,
    };
}
