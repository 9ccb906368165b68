//! Serialisable diagnostics produced by the track builder and the index.
//!
//! `TracksReport` is the main entry point returned by the builder, bundling
//! the exported tracks and a `BuildTrace` describing every stage the builder
//! executed. `TrackStatistics` summarises an exported track set.

pub mod export;
pub mod filter;
pub mod fusion;
pub mod pipeline;
pub mod statistics;
pub mod timing;

pub use export::ExportStage;
pub use filter::{ClassVerdict, FilterStage};
pub use fusion::FusionStage;
pub use pipeline::{BuildTrace, TracksReport};
pub use statistics::TrackStatistics;
pub use timing::{elapsed_ms, BuildStage, StageTiming, TimingBreakdown};
