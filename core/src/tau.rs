//! `Tau` — Reconstructed hadronic tau with its cone constituents

use crate::Candidate;

/// A reconstructed tau.
///
/// Holds copies of the candidates it was built from: the signal cone, the
/// isolation cone, and the designated leading charged hadron. The matcher
/// never mutates a tau.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tau {
    /// Visible transverse momentum [GeV].
    #[cfg_attr(feature = "serde", serde(default))]
    pub pt: f64,

    /// Pseudorapidity.
    #[cfg_attr(feature = "serde", serde(default))]
    pub eta: f64,

    /// Azimuthal angle [rad].
    #[cfg_attr(feature = "serde", serde(default))]
    pub phi: f64,

    /// Signal-cone constituents.
    #[cfg_attr(feature = "serde", serde(default))]
    pub signal_cands: Vec<Candidate>,

    /// Isolation-cone constituents.
    #[cfg_attr(feature = "serde", serde(default))]
    pub isolation_cands: Vec<Candidate>,

    /// Leading charged-hadron candidate, if the tau has one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lead_ch_had_cand: Option<Candidate>,
}

impl Tau {
    /// Create a tau with the given visible kinematics and no constituents.
    #[must_use]
    pub fn new(pt: f64, eta: f64, phi: f64) -> Self {
        Self {
            pt,
            eta,
            phi,
            ..Self::default()
        }
    }

    /// Add a signal-cone constituent (builder pattern).
    #[must_use]
    pub fn with_signal(mut self, cand: Candidate) -> Self {
        self.signal_cands.push(cand);
        self
    }

    /// Add an isolation-cone constituent (builder pattern).
    #[must_use]
    pub fn with_isolation(mut self, cand: Candidate) -> Self {
        self.isolation_cands.push(cand);
        self
    }

    /// Set the leading charged hadron (builder pattern).
    #[must_use]
    pub fn with_lead_ch_had(mut self, cand: Candidate) -> Self {
        self.lead_ch_had_cand = Some(cand);
        self
    }

    /// Total number of constituent references (signal + isolation + lead).
    #[must_use]
    pub fn constituent_count(&self) -> usize {
        self.signal_cands.len()
            + self.isolation_cands.len()
            + usize::from(self.lead_ch_had_cand.is_some())
    }
}
