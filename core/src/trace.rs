//! Evaluation trace types for debugging association decisions.
//!
//! A [`MatchTrace`] records every (tau, association) hit for every candidate,
//! including hits after the first match and hits that the
//! [`RecordMode`](crate::RecordMode) discards.
//!
//! # Example
//!
//! ```ignore
//! let trace = matcher.evaluate_with_trace(&cands, &taus);
//! for (cand, hit) in trace.discarded() {
//!     println!("candidate {cand}: {} hit on tau {} not recorded", hit.kind, hit.tau);
//! }
//! ```

use crate::matcher::{build_maps, CandidateMatch};
use crate::{Association, TauMatchMaps};

/// One predicate success for a (tau, candidate) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssociationHit {
    /// Index of the tau.
    pub tau: usize,
    /// Which association held.
    pub kind: Association,
    /// Whether this hit was written to the output.
    pub recorded: bool,
}

/// All hits for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTrace {
    /// Index of the candidate in its collection.
    pub index: usize,
    /// Hits in (tau, association) order.
    pub hits: Vec<AssociationHit>,
    /// The recorded result (identical to `match_candidate`).
    pub result: CandidateMatch,
}

/// Trace of a full event evaluation.
///
/// # INV: `to_maps()` == `evaluate()` result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTrace {
    /// Per-candidate traces, in collection order.
    pub candidates: Vec<CandidateTrace>,
    /// Number of taus scanned per candidate.
    pub tau_count: usize,
}

impl MatchTrace {
    pub(crate) fn new(candidates: Vec<CandidateTrace>, tau_count: usize) -> Self {
        Self {
            candidates,
            tau_count,
        }
    }

    /// Hits that held but were not recorded, with their candidate index.
    pub fn discarded(&self) -> impl Iterator<Item = (usize, &AssociationHit)> + '_ {
        self.hits().filter(|(_, hit)| !hit.recorded)
    }

    /// Every hit, with its candidate index.
    pub fn hits(&self) -> impl Iterator<Item = (usize, &AssociationHit)> + '_ {
        self.candidates
            .iter()
            .flat_map(|c| c.hits.iter().map(move |hit| (c.index, hit)))
    }

    /// Total hit count for one association, recorded or not.
    #[must_use]
    pub fn hit_count(&self, kind: Association) -> usize {
        self.hits().filter(|(_, hit)| hit.kind == kind).count()
    }

    /// Rebuild the annotation maps from the recorded results.
    #[must_use]
    pub fn to_maps(&self, product: &str) -> TauMatchMaps {
        let results: Vec<CandidateMatch> = self.candidates.iter().map(|c| c.result).collect();
        build_maps(product, &results)
    }
}
