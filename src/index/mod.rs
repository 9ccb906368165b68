//! Per-view track index and the queries served from it.
//!
//! - [`query`]: free functions over [`TracksMap`](crate::TracksMap) and
//!   [`TracksPerView`](crate::TracksPerView): common tracks, restriction to
//!   view sets, histograms and id sets.
//! - [`TrackIndex`]: owns a track set plus its derived per-view lists.

pub mod query;
mod track_index;

pub use query::ViewSet;
pub use track_index::TrackIndex;
