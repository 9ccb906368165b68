//! Track builder fusing pairwise matches into multi-view tracks.
//!
//! Overview
//! - Every matched feature `(view, descriptor type, index)` gets a dense
//!   handle from a hash-keyed registry.
//! - Correspondences are unioned in a disjoint-set forest; the resulting
//!   classes are the connected components of the correspondence graph and do
//!   not depend on the order of the matches.
//! - Classes are canonicalised (members sorted, classes ordered by their
//!   smallest member) so track ids are reproducible across builds.
//! - The filter drops classes that span too few views or that contain two
//!   features of one view. Verdicts are computed per class, in parallel when
//!   the `parallel` feature is enabled.
//! - The exporter assigns ids in class order and skips classes mixing
//!   descriptor types.
//!
//! Modules
//! - [`params`] – configuration of the builder.
//! - `pipeline` – the [`TracksBuilder`] implementation.
//! - `fusion`, `filter`, `export` – the individual stages.

mod export;
mod filter;
mod fusion;
pub mod params;
mod pipeline;

pub use params::{BuildParams, DEFAULT_MIN_LENGTH};
pub use pipeline::TracksBuilder;
