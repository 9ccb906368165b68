//! Track builder driving fusion, filtering and export end-to-end.
//!
//! Typical usage:
//! ```no_run
//! use feature_tracks::{BuildParams, PairwiseMatches, TracksBuilder};
//!
//! # fn example(matches: PairwiseMatches) -> Result<(), feature_tracks::TracksError> {
//! let mut builder = TracksBuilder::new(BuildParams::default());
//! let report = builder.process_with_diagnostics(&matches)?;
//! println!(
//!     "tracks={} rejected={}",
//!     report.tracks.len(),
//!     report.trace.filter.rejected()
//! );
//! # Ok(())
//! # }
//! ```
use super::export::{export_classes, write_classes};
use super::filter::evaluate_classes;
use super::fusion::fuse_matches;
use super::params::BuildParams;
use crate::diagnostics::{
    elapsed_ms, BuildStage, BuildTrace, ClassVerdict, ExportStage, FilterStage, FusionStage,
    TimingBreakdown, TracksReport,
};
use crate::error::TracksError;
use crate::matches::{correspondence_count, validate_matches, FeatureCounts, PairwiseMatches};
use crate::registry::{FeatureRegistry, Handle};
use crate::types::{FeatureRef, TracksMap};
use crate::union_find::DisjointSet;
use log::{debug, warn};
use std::io::{self, Write};
use std::time::Instant;

/// Builds tracks from pairwise matches.
///
/// The builder keeps the registry, the disjoint-set forest and the current
/// list of equivalence classes between calls, so `build`, `filter` and the
/// export methods can be driven step by step.
#[derive(Debug, Default)]
pub struct TracksBuilder {
    params: BuildParams,
    registry: FeatureRegistry,
    forest: DisjointSet,
    classes: Vec<Vec<Handle>>,
}

impl TracksBuilder {
    pub fn new(params: BuildParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    pub fn params(&self) -> &BuildParams {
        &self.params
    }

    pub fn set_params(&mut self, params: BuildParams) {
        self.params = params;
    }

    /// Fuse all correspondences of `matches`, replacing any previous build.
    ///
    /// Fails without touching the builder when a view pair links a view with
    /// itself.
    pub fn build(&mut self, matches: &PairwiseMatches) -> Result<FusionStage, TracksError> {
        self.build_checked(matches, None)
    }

    /// Like [`build`](Self::build), additionally range-checking every match
    /// index against `counts`.
    pub fn build_with_counts(
        &mut self,
        matches: &PairwiseMatches,
        counts: &FeatureCounts,
    ) -> Result<FusionStage, TracksError> {
        self.build_checked(matches, Some(counts))
    }

    fn build_checked(
        &mut self,
        matches: &PairwiseMatches,
        counts: Option<&FeatureCounts>,
    ) -> Result<FusionStage, TracksError> {
        validate_matches(matches, counts)?;

        let start = Instant::now();
        let fusion = fuse_matches(matches);
        self.registry = fusion.registry;
        self.forest = fusion.forest;
        self.classes = fusion.classes;

        let stage = FusionStage {
            elapsed_ms: elapsed_ms(start),
            view_pairs: matches.len(),
            correspondences: correspondence_count(matches),
            features: self.registry.len(),
            classes: self.classes.len(),
        };
        debug!(
            "TracksBuilder::build pairs={} correspondences={} features={} classes={}",
            stage.view_pairs, stage.correspondences, stage.features, stage.classes
        );
        Ok(stage)
    }

    /// Drop classes that are too short or contain a view collision, using
    /// the configured parameters.
    pub fn filter(&mut self) -> FilterStage {
        self.filter_with(self.params.min_length, self.params.multithread)
    }

    /// Drop classes spanning fewer than `min_length` distinct views or
    /// holding two features of the same view. Rejected classes are removed
    /// whole; survivors keep their relative order.
    pub fn filter_with(&mut self, min_length: usize, multithread: bool) -> FilterStage {
        let start = Instant::now();
        let refs = self.registry.refs();
        let verdicts = evaluate_classes(&self.classes, refs, min_length, multithread);

        let mut stage = FilterStage {
            min_length,
            parallel: multithread && cfg!(feature = "parallel"),
            classes_in: self.classes.len(),
            ..Default::default()
        };
        let classes = std::mem::take(&mut self.classes);
        self.classes = classes
            .into_iter()
            .zip(verdicts)
            .filter_map(|(members, verdict)| match verdict {
                ClassVerdict::Keep => Some(members),
                ClassVerdict::TooShort => {
                    stage.rejected_short += 1;
                    None
                }
                ClassVerdict::ViewCollision => {
                    stage.rejected_collision += 1;
                    warn!(
                        "TracksBuilder::filter dropping class of {} features starting at ({}): one view holds two features",
                        members.len(),
                        refs[members[0]]
                    );
                    None
                }
            })
            .collect();
        stage.kept = self.classes.len();
        stage.elapsed_ms = elapsed_ms(start);

        debug!(
            "TracksBuilder::filter min_length={} kept={}/{} short={} collision={}",
            min_length, stage.kept, stage.classes_in, stage.rejected_short, stage.rejected_collision
        );
        stage
    }

    /// Export the current classes as tracks with ids `0, 1, …` in canonical
    /// class order.
    pub fn export_to_map(&self) -> TracksMap {
        self.export_with_stage().0
    }

    fn export_with_stage(&self) -> (TracksMap, ExportStage) {
        let start = Instant::now();
        let outcome = export_classes(&self.classes, self.registry.refs());
        let stage = ExportStage {
            elapsed_ms: elapsed_ms(start),
            tracks: outcome.tracks.len(),
            rejected_mixed_descriptor: outcome.rejected_mixed_descriptor,
        };
        debug!(
            "TracksBuilder::export tracks={} mixed_descriptor={}",
            stage.tracks, stage.rejected_mixed_descriptor
        );
        (outcome.tracks, stage)
    }

    /// Write the diagnostic dump of the current classes. The format is meant
    /// for humans and may change.
    pub fn export_to_writer<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_classes(out, &self.classes, self.registry.refs())
    }

    /// Number of classes currently held (before or after filtering).
    pub fn nb_tracks(&self) -> usize {
        self.classes.len()
    }

    /// Members of each current class, sorted, in canonical order.
    pub fn classes(&self) -> impl Iterator<Item = Vec<FeatureRef>> + '_ {
        let refs = self.registry.refs();
        self.classes
            .iter()
            .map(move |members| members.iter().map(|&h| refs[h]).collect())
    }

    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    pub fn union_find(&self) -> &DisjointSet {
        &self.forest
    }

    /// Build, filter and export in one call.
    pub fn process(&mut self, matches: &PairwiseMatches) -> Result<TracksMap, TracksError> {
        Ok(self.process_with_diagnostics(matches)?.tracks)
    }

    /// Build, filter and export, returning the tracks and a stage trace.
    pub fn process_with_diagnostics(
        &mut self,
        matches: &PairwiseMatches,
    ) -> Result<TracksReport, TracksError> {
        let total_start = Instant::now();
        let fusion = self.build(matches)?;
        let filter = self.filter();
        let (tracks, export) = self.export_with_stage();

        let mut timings = TimingBreakdown::with_total(elapsed_ms(total_start));
        timings.record(BuildStage::Fusion, fusion.elapsed_ms);
        timings.record(BuildStage::Filter, filter.elapsed_ms);
        timings.record(BuildStage::Export, export.elapsed_ms);

        Ok(TracksReport {
            tracks,
            trace: BuildTrace {
                timings,
                fusion,
                filter,
                export,
            },
        })
    }
}
