//! `ValueMap` — Per-element annotations aligned with a keyed collection
//!
//! Entry `i` of a value map describes element `i` of the collection named by
//! `product`. [`TauMatchMaps`] bundles the three maps the matcher produces.

use crate::Association;
use std::ops::Index;

/// Sentinel stored for a candidate with no associated tau.
pub const UNMATCHED: i32 = -1;

/// Annotation map aligned by position with a collection.
///
/// # Example
///
/// ```
/// use taumap::ValueMap;
///
/// let map = ValueMap::new("packedPFCandidates", vec![-1, 0, 1]);
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.get(2), Some(&1));
/// assert_eq!(map[0], -1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueMap<V> {
    product: String,
    values: Vec<V>,
}

impl<V> ValueMap<V> {
    /// Create a map over `product` from per-element values.
    pub fn new(product: impl Into<String>, values: Vec<V>) -> Self {
        Self {
            product: product.into(),
            values,
        }
    }

    /// Name of the collection this map is keyed against.
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Value for element `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&V> {
        self.values.get(index)
    }

    /// Number of entries (equals the collection size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the keyed collection was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate values in collection order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.values.iter()
    }

    /// Values as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[V] {
        &self.values
    }

    /// Consume the map, returning its values.
    #[must_use]
    pub fn into_values(self) -> Vec<V> {
        self.values
    }
}

impl<V> Index<usize> for ValueMap<V> {
    type Output = V;

    fn index(&self, index: usize) -> &V {
        &self.values[index]
    }
}

impl<'a, V> IntoIterator for &'a ValueMap<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// The three annotation maps produced for one event.
///
/// # INV: aligned lengths
///
/// All three maps have exactly one entry per candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TauMatchMaps {
    /// Index of the first tau whose signal cone holds the candidate.
    #[cfg_attr(feature = "serde", serde(rename = "isTauSignalCand"))]
    pub signal: ValueMap<i32>,

    /// Index of the first tau whose isolation cone holds the candidate.
    #[cfg_attr(feature = "serde", serde(rename = "isTauIsoCand"))]
    pub isolation: ValueMap<i32>,

    /// Index of the first tau whose leading charged hadron is the candidate.
    #[cfg_attr(feature = "serde", serde(rename = "isTauLeadChHadCand"))]
    pub lead_ch_had: ValueMap<i32>,
}

impl TauMatchMaps {
    /// The map for one association.
    #[must_use]
    pub fn get(&self, kind: Association) -> &ValueMap<i32> {
        match kind {
            Association::Signal => &self.signal,
            Association::Isolation => &self.isolation,
            Association::LeadChargedHadron => &self.lead_ch_had,
        }
    }

    /// `(label, map)` pairs in [`Association::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ValueMap<i32>)> + '_ {
        Association::ALL
            .into_iter()
            .map(move |kind| (kind.label(), self.get(kind)))
    }

    /// Number of candidates the maps cover.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signal.len()
    }

    /// Returns `true` if there were no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    /// Number of candidates with a recorded tau for `kind`.
    #[must_use]
    pub fn matched_count(&self, kind: Association) -> usize {
        self.get(kind).iter().filter(|&&v| v != UNMATCHED).count()
    }
}
