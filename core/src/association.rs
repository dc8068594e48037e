//! Association predicates between a tau and a candidate
//!
//! Three independent questions are asked of every (tau, candidate) pair:
//! is the candidate in the signal cone, in the isolation cone, or is it the
//! leading charged hadron? [`TauAssociation`] answers them; the matcher treats
//! the answer as an opaque boolean.

use crate::{Candidate, CandidateIdentity, Tau};
use std::fmt::{self, Debug};

/// The kind of tau/candidate association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Association {
    /// Candidate is a signal-cone constituent.
    Signal,
    /// Candidate is an isolation-cone constituent.
    Isolation,
    /// Candidate is the leading charged hadron.
    LeadChargedHadron,
}

impl Association {
    /// All associations, in output order.
    pub const ALL: [Association; 3] = [Self::Signal, Self::Isolation, Self::LeadChargedHadron];

    /// Name of the annotation map produced for this association.
    ///
    /// ```
    /// use taumap::Association;
    ///
    /// assert_eq!(Association::Signal.label(), "isTauSignalCand");
    /// ```
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Signal => "isTauSignalCand",
            Self::Isolation => "isTauIsoCand",
            Self::LeadChargedHadron => "isTauLeadChHadCand",
        }
    }

    /// Position of this association in [`Association::ALL`].
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Signal => 0,
            Self::Isolation => 1,
            Self::LeadChargedHadron => 2,
        }
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Answers whether a candidate is associated with a tau.
///
/// Generic over the candidate type `C` and tau type `T` so the matcher can run
/// over any pair of collections.
///
/// # Example
///
/// ```
/// use taumap::{Association, TauAssociation};
///
/// // Taus as plain lists of candidate ids.
/// #[derive(Debug)]
/// struct IdLists;
///
/// impl TauAssociation<u32, Vec<u32>> for IdLists {
///     fn associated(&self, kind: Association, tau: &Vec<u32>, cand: &u32) -> bool {
///         kind == Association::Signal && tau.contains(cand)
///     }
/// }
///
/// assert!(IdLists.associated(Association::Signal, &vec![1, 2], &2));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `TauAssociation<{C}, {T}>`",
    label = "this type cannot associate `{C}` with `{T}`",
    note = "use ConeAssociation for taumap's own Candidate and Tau types"
)]
pub trait TauAssociation<C, T>: Send + Sync + Debug {
    /// Returns `true` if `cand` has association `kind` with `tau`.
    fn associated(&self, kind: Association, tau: &T, cand: &C) -> bool;
}

/// Cone membership for [`Tau`] and [`Candidate`], parameterized by identity.
///
/// - `Signal`: some signal-cone constituent is the same as the candidate
/// - `Isolation`: some isolation-cone constituent is the same as the candidate
/// - `LeadChargedHadron`: the tau has a lead and it is the same as the candidate
#[derive(Debug, Clone, Default)]
pub struct ConeAssociation<I> {
    identity: I,
}

impl<I: CandidateIdentity> ConeAssociation<I> {
    /// Create a cone association using the given identity.
    #[must_use]
    pub fn new(identity: I) -> Self {
        Self { identity }
    }

    /// The identity used to compare constituents with candidates.
    #[must_use]
    pub fn identity(&self) -> &I {
        &self.identity
    }
}

impl<I: CandidateIdentity> TauAssociation<Candidate, Tau> for ConeAssociation<I> {
    fn associated(&self, kind: Association, tau: &Tau, cand: &Candidate) -> bool {
        match kind {
            Association::Signal => tau
                .signal_cands
                .iter()
                .any(|c| self.identity.same(c, cand)),
            Association::Isolation => tau
                .isolation_cands
                .iter()
                .any(|c| self.identity.same(c, cand)),
            Association::LeadChargedHadron => tau
                .lead_ch_had_cand
                .as_ref()
                .is_some_and(|c| self.identity.same(c, cand)),
        }
    }
}
