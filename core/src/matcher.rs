//! `TauMatcher` — Candidate/tau association with first-match-wins semantics
//!
//! For every candidate the matcher scans the taus in order and, per
//! association, records the index of the first tau that satisfies it.

use crate::trace::{AssociationHit, CandidateTrace, MatchTrace};
use crate::{Association, TauAssociation, TauMatchMaps, ValueMap, UNMATCHED};

/// Which associations are written to the output maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RecordMode {
    /// Record the first matching tau for all three associations.
    #[default]
    AllAssociations,

    /// Record only the signal association.
    ///
    /// Isolation and leading-charged-hadron hits are discarded, so those maps
    /// hold [`UNMATCHED`] for every candidate. This reproduces the historical
    /// producer output. The trace still reports the discarded hits.
    SignalOnly,
}

impl RecordMode {
    /// Returns `true` if hits for `kind` are written to the output.
    #[inline]
    #[must_use]
    pub fn records(self, kind: Association) -> bool {
        match self {
            Self::AllAssociations => true,
            Self::SignalOnly => kind == Association::Signal,
        }
    }
}

/// First-matching tau index per association for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CandidateMatch {
    taus: [Option<usize>; 3],
}

impl CandidateMatch {
    /// A candidate associated with no tau.
    #[must_use]
    pub fn unmatched() -> Self {
        Self::default()
    }

    /// Index of the first tau with association `kind`, if any.
    #[inline]
    #[must_use]
    pub fn tau(&self, kind: Association) -> Option<usize> {
        self.taus[kind.index()]
    }

    /// Annotation value for `kind`: the tau index, or [`UNMATCHED`].
    ///
    /// An index that does not fit in `i32` is written as [`UNMATCHED`].
    #[must_use]
    pub fn code(&self, kind: Association) -> i32 {
        self.tau(kind)
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(UNMATCHED)
    }

    /// Returns `true` if no association was recorded.
    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        self.taus.iter().all(Option::is_none)
    }

    fn set(&mut self, kind: Association, tau: usize) {
        self.taus[kind.index()] = Some(tau);
    }
}

/// Matches candidates to taus.
///
/// # Type Parameters
///
/// - `P`: the association predicate, e.g. [`ConeAssociation`](crate::ConeAssociation)
///
/// # INV: first-match-wins
///
/// Taus are scanned in collection order. Once an association is resolved for
/// a candidate, later taus are not consulted for it, even if they would match.
///
/// # INV: aligned output
///
/// Every map returned by [`evaluate`](Self::evaluate) has one entry per
/// candidate. With no taus every entry is [`UNMATCHED`].
///
/// # Example
///
/// ```
/// use taumap::prelude::*;
///
/// let cands: Vec<Candidate> = (0..3)
///     .map(|i| Candidate::new(211, 1, 10.0, 0.0, 0.0).with_key(CandidateKey(i)))
///     .collect();
/// let taus = vec![
///     Tau::new(20.0, 0.0, 0.0).with_signal(cands[1].clone()),
///     Tau::new(25.0, 0.0, 0.0)
///         .with_signal(cands[0].clone())
///         .with_signal(cands[2].clone()),
/// ];
///
/// let matcher = TauMatcher::new(ConeAssociation::new(KeyIdentity));
/// let maps = matcher.evaluate("packedPFCandidates", &cands, &taus);
/// assert_eq!(maps.signal.as_slice(), &[1, 0, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TauMatcher<P> {
    association: P,
    mode: RecordMode,
}

impl<P> TauMatcher<P> {
    /// Create a matcher recording all associations.
    #[must_use]
    pub fn new(association: P) -> Self {
        Self {
            association,
            mode: RecordMode::default(),
        }
    }

    /// Set the record mode (builder pattern).
    #[must_use]
    pub fn with_mode(mut self, mode: RecordMode) -> Self {
        self.mode = mode;
        self
    }

    /// The configured record mode.
    #[must_use]
    pub fn mode(&self) -> RecordMode {
        self.mode
    }

    /// The association predicate.
    #[must_use]
    pub fn association(&self) -> &P {
        &self.association
    }

    /// Find, per recorded association, the first tau associated with `cand`.
    ///
    /// Stops scanning as soon as every recorded association is resolved.
    pub fn match_candidate<C, T>(&self, cand: &C, taus: &[T]) -> CandidateMatch
    where
        P: TauAssociation<C, T>,
    {
        let mut result = CandidateMatch::unmatched();
        let mut pending = Association::ALL
            .iter()
            .filter(|&&kind| self.mode.records(kind))
            .count();

        for (itau, tau) in taus.iter().enumerate() {
            if pending == 0 {
                break;
            }
            for kind in Association::ALL {
                if !self.mode.records(kind) || result.tau(kind).is_some() {
                    continue;
                }
                if self.association.associated(kind, tau, cand) {
                    result.set(kind, itau);
                    pending -= 1;
                }
            }
        }

        result
    }

    /// Match every candidate and build the three annotation maps.
    ///
    /// `product` names the candidate collection the maps are keyed against.
    pub fn evaluate<C, T>(&self, product: &str, cands: &[C], taus: &[T]) -> TauMatchMaps
    where
        P: TauAssociation<C, T>,
    {
        let matches: Vec<CandidateMatch> = cands
            .iter()
            .map(|cand| self.match_candidate(cand, taus))
            .collect();
        build_maps(product, &matches)
    }

    /// Evaluate with a full trace of every association hit.
    ///
    /// Unlike [`evaluate`](Self::evaluate), every (tau, association) pair is
    /// evaluated, so the trace also shows later hits and hits discarded by
    /// [`RecordMode::SignalOnly`]. The recorded result is identical.
    pub fn evaluate_with_trace<C, T>(&self, cands: &[C], taus: &[T]) -> MatchTrace
    where
        P: TauAssociation<C, T>,
    {
        let candidates = cands
            .iter()
            .enumerate()
            .map(|(index, cand)| self.trace_candidate(index, cand, taus))
            .collect();
        MatchTrace::new(candidates, taus.len())
    }

    fn trace_candidate<C, T>(&self, index: usize, cand: &C, taus: &[T]) -> CandidateTrace
    where
        P: TauAssociation<C, T>,
    {
        let mut result = CandidateMatch::unmatched();
        let mut hits = Vec::new();

        for (itau, tau) in taus.iter().enumerate() {
            for kind in Association::ALL {
                if !self.association.associated(kind, tau, cand) {
                    continue;
                }
                let recorded = self.mode.records(kind) && result.tau(kind).is_none();
                if recorded {
                    result.set(kind, itau);
                }
                tracing::trace!(candidate = index, tau = itau, %kind, recorded, "association hit");
                hits.push(AssociationHit {
                    tau: itau,
                    kind,
                    recorded,
                });
            }
        }

        CandidateTrace {
            index,
            hits,
            result,
        }
    }
}

pub(crate) fn build_maps(product: &str, matches: &[CandidateMatch]) -> TauMatchMaps {
    let column = |kind: Association| {
        ValueMap::new(product, matches.iter().map(|m| m.code(kind)).collect())
    };
    TauMatchMaps {
        signal: column(Association::Signal),
        isolation: column(Association::Isolation),
        lead_ch_had: column(Association::LeadChargedHadron),
    }
}
