//! `Candidate` — Reconstructed particle-flow candidates
//!
//! A candidate is the unit being annotated. The matcher only needs its identity
//! (the collection key) and, for kinematic identity, its four-momentum and
//! quantum numbers.

use std::f64::consts::{PI, TAU};
use std::fmt;

/// Position of a candidate inside the event's candidate collection.
///
/// Tau constituents are copies that carry the key of the collection element
/// they reference, so key equality is reference equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CandidateKey(pub u32);

impl CandidateKey {
    /// Returns the key as a collection index.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CandidateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A reconstructed particle-flow candidate.
///
/// # Example
///
/// ```
/// use taumap::{Candidate, CandidateKey};
///
/// let pion = Candidate::new(211, 1, 12.5, 0.3, -1.2).with_key(CandidateKey(4));
/// assert_eq!(pion.key, Some(CandidateKey(4)));
/// assert!(pion.is_charged());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Key into the candidate collection, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key: Option<CandidateKey>,

    /// PDG particle id (signed).
    pub pdg_id: i32,

    /// Electric charge in units of e.
    pub charge: i32,

    /// Transverse momentum [GeV].
    pub pt: f64,

    /// Pseudorapidity.
    pub eta: f64,

    /// Azimuthal angle [rad].
    pub phi: f64,

    /// Invariant mass [GeV].
    #[cfg_attr(feature = "serde", serde(default))]
    pub mass: f64,
}

impl Candidate {
    /// Create a massless candidate without a collection key.
    #[must_use]
    pub fn new(pdg_id: i32, charge: i32, pt: f64, eta: f64, phi: f64) -> Self {
        Self {
            key: None,
            pdg_id,
            charge,
            pt,
            eta,
            phi,
            mass: 0.0,
        }
    }

    /// Set the collection key (builder pattern).
    #[must_use]
    pub fn with_key(mut self, key: CandidateKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Set the invariant mass (builder pattern).
    #[must_use]
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Returns `true` if the candidate carries electric charge.
    #[inline]
    #[must_use]
    pub fn is_charged(&self) -> bool {
        self.charge != 0
    }
}

/// Azimuthal separation wrapped into `(-π, π]`.
///
/// Non-finite input yields NaN.
#[must_use]
pub fn delta_phi(phi1: f64, phi2: f64) -> f64 {
    let dphi = (phi1 - phi2 + PI).rem_euclid(TAU) - PI;
    if dphi <= -PI {
        dphi + TAU
    } else {
        dphi
    }
}

/// Angular separation `sqrt(Δη² + Δφ²)` between two candidates.
#[must_use]
pub fn delta_r(a: &Candidate, b: &Candidate) -> f64 {
    let deta = a.eta - b.eta;
    let dphi = delta_phi(a.phi, b.phi);
    deta.hypot(dphi)
}
