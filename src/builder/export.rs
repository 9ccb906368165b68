//! Flattening of retained classes into tracks, plus the textual dump.

use crate::registry::Handle;
use crate::types::{FeatureRef, Track, TrackId, TracksMap};
use log::warn;
use std::io::{self, Write};

pub(crate) struct ExportOutcome {
    pub tracks: TracksMap,
    pub rejected_mixed_descriptor: usize,
}

/// Build a track from one class, or `None` when its members disagree on the
/// descriptor type.
pub(crate) fn class_to_track(members: &[Handle], refs: &[FeatureRef]) -> Option<Track> {
    let first = refs[*members.first()?];
    let mut track = Track::new(first.desc_type);
    for &h in members {
        let feature = refs[h];
        if feature.desc_type != track.desc_type {
            return None;
        }
        track.feat_per_view.insert(feature.view_id, feature.feat_index);
    }
    Some(track)
}

/// Assign track ids `0, 1, …` in class order.
pub(crate) fn export_classes(classes: &[Vec<Handle>], refs: &[FeatureRef]) -> ExportOutcome {
    let mut tracks = TracksMap::new();
    let mut rejected_mixed_descriptor = 0usize;
    let mut next_id: TrackId = 0;
    for members in classes {
        match class_to_track(members, refs) {
            Some(track) => {
                tracks.insert(next_id, track);
                next_id += 1;
            }
            None => {
                rejected_mixed_descriptor += 1;
                if let Some(&h) = members.first() {
                    warn!(
                        "TracksBuilder::export skipping class starting at ({}) with mixed descriptor types",
                        refs[h]
                    );
                }
            }
        }
    }
    ExportOutcome {
        tracks,
        rejected_mixed_descriptor,
    }
}

/// Human-readable dump: ordinal, member count, then one member per line.
pub(crate) fn write_classes<W: Write>(
    out: &mut W,
    classes: &[Vec<Handle>],
    refs: &[FeatureRef],
) -> io::Result<()> {
    for (ordinal, members) in classes.iter().enumerate() {
        writeln!(out, "Class: {ordinal}")?;
        writeln!(out, "\ttrack length: {}", members.len())?;
        for &h in members {
            writeln!(out, "{}", refs[h])?;
        }
    }
    out.flush()
}
