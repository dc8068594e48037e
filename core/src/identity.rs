//! `CandidateIdentity` — Decides whether two candidate records are the same particle
//!
//! Tau constituents are copies of collection candidates, so the matcher needs a
//! notion of "same candidate" that survives the copy.
//!
//! # Available identities
//!
//! - [`KeyIdentity`] — Collection key equality (reference semantics)
//! - [`KinematicIdentity`] — Quantum numbers plus ΔR / relative pT tolerance

use crate::candidate::delta_r;
use crate::Candidate;
use std::fmt::Debug;

/// Default ΔR tolerance for [`KinematicIdentity`].
pub const DEFAULT_MAX_DELTA_R: f64 = 1e-3;

/// Default relative pT tolerance for [`KinematicIdentity`].
pub const DEFAULT_MAX_REL_PT_DIFF: f64 = 1e-3;

/// Tests whether two candidate records describe the same particle.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one matcher can serve events
/// processed concurrently.
///
/// # Example
///
/// ```
/// use taumap::{Candidate, CandidateIdentity, CandidateKey, KeyIdentity};
///
/// let a = Candidate::new(211, 1, 10.0, 0.0, 0.0).with_key(CandidateKey(3));
/// let b = a.clone();
/// assert!(KeyIdentity.same(&a, &b));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `CandidateIdentity`",
    label = "this type cannot compare candidates",
    note = "use KeyIdentity or KinematicIdentity, or implement `same(&self, &Candidate, &Candidate) -> bool`"
)]
pub trait CandidateIdentity: Send + Sync + Debug {
    /// Returns `true` if `a` and `b` are the same particle.
    fn same(&self, a: &Candidate, b: &Candidate) -> bool;
}

#[diagnostic::do_not_recommend]
impl CandidateIdentity for Box<dyn CandidateIdentity> {
    fn same(&self, a: &Candidate, b: &Candidate) -> bool {
        (**self).same(a, b)
    }
}

/// Identity by collection key.
///
/// Two records are the same iff both carry a key and the keys are equal.
/// A record without a key is never identical to anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyIdentity;

impl CandidateIdentity for KeyIdentity {
    #[inline]
    fn same(&self, a: &Candidate, b: &Candidate) -> bool {
        match (a.key, b.key) {
            (Some(ka), Some(kb)) => ka == kb,
            _ => false,
        }
    }
}

/// Identity by quantum numbers and kinematics.
///
/// Same iff `pdg_id` and `charge` agree, the candidates are within
/// `max_delta_r`, and `|ΔpT| ≤ max_rel_pt_diff · max(pT)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicIdentity {
    /// Maximum angular separation.
    pub max_delta_r: f64,
    /// Maximum pT difference relative to the harder candidate.
    pub max_rel_pt_diff: f64,
}

impl KinematicIdentity {
    /// Create a kinematic identity with explicit tolerances.
    #[must_use]
    pub fn new(max_delta_r: f64, max_rel_pt_diff: f64) -> Self {
        Self {
            max_delta_r,
            max_rel_pt_diff,
        }
    }
}

impl Default for KinematicIdentity {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA_R, DEFAULT_MAX_REL_PT_DIFF)
    }
}

impl CandidateIdentity for KinematicIdentity {
    fn same(&self, a: &Candidate, b: &Candidate) -> bool {
        if a.pdg_id != b.pdg_id || a.charge != b.charge {
            return false;
        }
        // Positive comparisons: NaN kinematics never match.
        let close = delta_r(a, b) <= self.max_delta_r;
        if !close {
            return false;
        }
        let scale = a.pt.abs().max(b.pt.abs());
        (a.pt - b.pt).abs() <= self.max_rel_pt_diff * scale
    }
}
