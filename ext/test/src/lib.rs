//! taumap-test: Test domain for conformance testing
//!
//! Builds candidate collections and taus from compact index lists, so tests
//! can say "tau 1 has candidates 0 and 2 in its signal cone" directly.
//!
//! # Example
//!
//! ```
//! use taumap_test::prelude::*;
//!
//! let cands = candidates(3);
//! let taus = vec![
//!     TauSpec::signal(&[1]).build(&cands),
//!     TauSpec::signal(&[0, 2]).build(&cands),
//! ];
//!
//! let matcher = TauMatcher::new(ConeAssociation::new(KeyIdentity));
//! let maps = matcher.evaluate("pf", &cands, &taus);
//! assert_eq!(maps.signal.as_slice(), &[1, 0, 1]);
//! ```

use taumap::{Candidate, CandidateKey, Tau};

#[cfg(feature = "producer")]
pub mod event_fixture;
#[cfg(feature = "fixtures")]
pub mod fixture;

/// Candidate `i` of a synthetic collection.
///
/// Alternates charged pions, photons and neutral hadrons with distinct,
/// deterministic kinematics, keyed by position.
#[must_use]
pub fn candidate(i: u32) -> Candidate {
    let (pdg_id, charge) = match i % 3 {
        0 => (211, 1),
        1 => (22, 0),
        _ => (130, 0),
    };
    let x = f64::from(i);
    Candidate::new(pdg_id, charge, 1.0 + 0.5 * x, -2.0 + 0.01 * x, -3.0 + 0.02 * x)
        .with_key(CandidateKey(i))
}

/// A synthetic collection of `n` keyed candidates.
#[must_use]
pub fn candidates(n: u32) -> Vec<Candidate> {
    (0..n).map(candidate).collect()
}

/// A tau described by candidate indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "fixtures", derive(serde::Deserialize))]
pub struct TauSpec {
    /// Signal-cone candidate indices.
    #[cfg_attr(feature = "fixtures", serde(default))]
    pub signal: Vec<u32>,
    /// Isolation-cone candidate indices.
    #[cfg_attr(feature = "fixtures", serde(default))]
    pub isolation: Vec<u32>,
    /// Leading charged-hadron candidate index.
    #[cfg_attr(feature = "fixtures", serde(default))]
    pub lead: Option<u32>,
}

impl TauSpec {
    /// A tau with only a signal cone.
    #[must_use]
    pub fn signal(ids: &[u32]) -> Self {
        Self {
            signal: ids.to_vec(),
            ..Self::default()
        }
    }

    /// Add isolation-cone indices (builder pattern).
    #[must_use]
    pub fn with_isolation(mut self, ids: &[u32]) -> Self {
        self.isolation.extend_from_slice(ids);
        self
    }

    /// Set the leading charged hadron (builder pattern).
    #[must_use]
    pub fn with_lead(mut self, id: u32) -> Self {
        self.lead = Some(id);
        self
    }

    /// Build the tau, copying constituents out of `cands`.
    ///
    /// An index outside `cands` refers to a candidate that is not in the
    /// collection; it gets a synthetic candidate carrying that key.
    #[must_use]
    pub fn build(&self, cands: &[Candidate]) -> Tau {
        let pick = |i: u32| {
            cands
                .get(i as usize)
                .cloned()
                .unwrap_or_else(|| candidate(i))
        };
        let mut tau = Tau::new(20.0, 0.0, 0.0);
        tau.signal_cands = self.signal.iter().copied().map(pick).collect();
        tau.isolation_cands = self.isolation.iter().copied().map(pick).collect();
        tau.lead_ch_had_cand = self.lead.map(pick);
        tau
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{candidate, candidates, TauSpec};
    pub use taumap::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_are_keyed_by_position() {
        let c = candidates(4);
        for (i, cand) in c.iter().enumerate() {
            assert_eq!(cand.key.map(CandidateKey::index), Some(i));
        }
    }

    #[test]
    fn candidates_are_distinct() {
        let c = candidates(6);
        for i in 0..c.len() {
            for j in (i + 1)..c.len() {
                assert_ne!(c[i], c[j]);
            }
        }
    }

    #[test]
    fn tau_spec_copies_constituents() {
        let c = candidates(3);
        let tau = TauSpec::signal(&[0, 2])
            .with_isolation(&[1])
            .with_lead(0)
            .build(&c);
        assert_eq!(tau.signal_cands, vec![c[0].clone(), c[2].clone()]);
        assert_eq!(tau.isolation_cands, vec![c[1].clone()]);
        assert_eq!(tau.lead_ch_had_cand, Some(c[0].clone()));
    }

    #[test]
    fn out_of_range_index_gets_synthetic_candidate() {
        let tau = TauSpec::signal(&[9]).build(&candidates(2));
        assert_eq!(tau.signal_cands[0].key, Some(CandidateKey(9)));
    }
}
