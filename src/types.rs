//! Core identifiers and track containers shared by the builder and the index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of a view (image) in the reconstruction.
pub type ViewId = u32;
/// Index of a detected feature inside one view and descriptor type.
pub type FeatureIndex = u32;
/// Identifier of an exported track.
pub type TrackId = usize;

/// Descriptor family a feature was extracted with.
///
/// Fusion happens only within one descriptor type: a SIFT feature is never
/// merged with an AKAZE feature even when they sit at the same pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriberType {
    Unknown,
    Sift,
    SiftFloat,
    SiftUpright,
    Dspsift,
    Akaze,
    AkazeLiop,
    AkazeMldb,
    Cctag3,
    Cctag4,
    SiftOcv,
    AkazeOcv,
    Apriltag16h5,
}

impl DescriberType {
    pub const ALL: [DescriberType; 13] = [
        DescriberType::Unknown,
        DescriberType::Sift,
        DescriberType::SiftFloat,
        DescriberType::SiftUpright,
        DescriberType::Dspsift,
        DescriberType::Akaze,
        DescriberType::AkazeLiop,
        DescriberType::AkazeMldb,
        DescriberType::Cctag3,
        DescriberType::Cctag4,
        DescriberType::SiftOcv,
        DescriberType::AkazeOcv,
        DescriberType::Apriltag16h5,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DescriberType::Unknown => "unknown",
            DescriberType::Sift => "sift",
            DescriberType::SiftFloat => "sift_float",
            DescriberType::SiftUpright => "sift_upright",
            DescriberType::Dspsift => "dspsift",
            DescriberType::Akaze => "akaze",
            DescriberType::AkazeLiop => "akaze_liop",
            DescriberType::AkazeMldb => "akaze_mldb",
            DescriberType::Cctag3 => "cctag3",
            DescriberType::Cctag4 => "cctag4",
            DescriberType::SiftOcv => "sift_ocv",
            DescriberType::AkazeOcv => "akaze_ocv",
            DescriberType::Apriltag16h5 => "apriltag16h5",
        }
    }

    /// Parse a comma-separated list such as `"sift,akaze"`.
    pub fn parse_list(list: &str) -> Result<Vec<DescriberType>, String> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(DescriberType::from_str)
            .collect()
    }
}

impl fmt::Display for DescriberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DescriberType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        DescriberType::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == lowered)
            .ok_or_else(|| format!("unknown describer type '{s}'"))
    }
}

/// Identity of one detected feature in one view.
///
/// Ordering is lexicographic on `(view_id, desc_type, feat_index)` and is what
/// the builder uses to canonicalise class and track order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRef {
    pub view_id: ViewId,
    pub desc_type: DescriberType,
    pub feat_index: FeatureIndex,
}

impl FeatureRef {
    pub fn new(view_id: ViewId, desc_type: DescriberType, feat_index: FeatureIndex) -> Self {
        Self {
            view_id,
            desc_type,
            feat_index,
        }
    }

    pub fn keypoint(&self) -> KeypointId {
        KeypointId::new(self.desc_type, self.feat_index)
    }
}

impl fmt::Display for FeatureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.view_id, self.keypoint())
    }
}

/// Feature identity inside a single view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeypointId {
    pub desc_type: DescriberType,
    pub feat_index: FeatureIndex,
}

impl KeypointId {
    pub fn new(desc_type: DescriberType, feat_index: FeatureIndex) -> Self {
        Self {
            desc_type,
            feat_index,
        }
    }
}

impl fmt::Display for KeypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.desc_type, self.feat_index)
    }
}

/// A scene point observed across several views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub desc_type: DescriberType,
    /// Feature index per observing view; at most one entry per view.
    pub feat_per_view: BTreeMap<ViewId, FeatureIndex>,
}

impl Track {
    pub fn new(desc_type: DescriberType) -> Self {
        Self {
            desc_type,
            feat_per_view: BTreeMap::new(),
        }
    }

    /// Number of views observing the track.
    pub fn len(&self) -> usize {
        self.feat_per_view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feat_per_view.is_empty()
    }

    pub fn feature_in(&self, view: ViewId) -> Option<FeatureIndex> {
        self.feat_per_view.get(&view).copied()
    }

    pub fn contains_view(&self, view: ViewId) -> bool {
        self.feat_per_view.contains_key(&view)
    }
}

/// All tracks of a scene, keyed by track id.
pub type TracksMap = BTreeMap<TrackId, Track>;

/// Ascending ids of the tracks visible in each view.
pub type TracksPerView = BTreeMap<ViewId, Vec<TrackId>>;
