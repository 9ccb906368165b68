//! Dense handles for feature references.
//!
//! Every distinct [`FeatureRef`] seen while scanning the matches receives a
//! handle in `0..len()`, assigned in first-seen order. Handles index directly
//! into the disjoint-set arena.

use crate::types::FeatureRef;
use std::collections::HashMap;

/// Dense handle of a registered feature reference.
pub type Handle = usize;

#[derive(Clone, Debug, Default)]
pub struct FeatureRegistry {
    handles: HashMap<FeatureRef, Handle>,
    refs: Vec<FeatureRef>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            handles: HashMap::with_capacity(capacity),
            refs: Vec::with_capacity(capacity),
        }
    }

    /// Return the handle of `feature`, registering it on first sight.
    pub fn register(&mut self, feature: FeatureRef) -> Handle {
        let next = self.refs.len();
        let handle = *self.handles.entry(feature).or_insert(next);
        if handle == next {
            self.refs.push(feature);
        }
        handle
    }

    pub fn handle_of(&self, feature: &FeatureRef) -> Option<Handle> {
        self.handles.get(feature).copied()
    }

    pub fn feature_ref(&self, handle: Handle) -> Option<&FeatureRef> {
        self.refs.get(handle)
    }

    /// Handle → reference table, indexed by handle.
    pub fn refs(&self) -> &[FeatureRef] {
        &self.refs
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &FeatureRef)> {
        self.refs.iter().enumerate()
    }
}
