//! taumap - Per-candidate tau association maps
//!
//! For every particle-flow candidate in an event, find the first reconstructed
//! tau whose signal cone holds it, whose isolation cone holds it, and whose
//! leading charged hadron it is. The answers are three integer maps aligned
//! with the candidate collection (`-1` = no tau).
//!
//! # Architecture
//!
//! - [`Candidate`], [`Tau`] — The data model
//! - [`CandidateIdentity`] — When two candidate records are the same particle
//! - [`TauAssociation<C, T>`] — The three association predicates (opaque to the matcher)
//! - [`TauMatcher<P>`] — First-match-wins scan, pure and total
//! - [`ValueMap`], [`TauMatchMaps`] — The aligned output maps
//! - [`TauMapProducer`] — Event binding layer (feature = `"producer"`)
//!
//! # Key Design Insights
//!
//! 1. **The matcher is a pure function**: two borrowed slices in, three maps out.
//!    No state survives between events.
//!
//! 2. **First-match-wins per association**: each association is resolved
//!    independently by the lowest-index tau satisfying it.
//!
//! 3. **Explicit record mode**: [`RecordMode::SignalOnly`] reproduces the
//!    historical output where only the signal map is ever filled.
//!
//! # Example
//!
//! ```
//! use taumap::prelude::*;
//!
//! let cands: Vec<Candidate> = (0..3)
//!     .map(|i| Candidate::new(211, 1, 10.0, 0.0, 0.0).with_key(CandidateKey(i)))
//!     .collect();
//!
//! let taus = vec![Tau::new(30.0, 0.0, 0.0)
//!     .with_signal(cands[2].clone())
//!     .with_isolation(cands[0].clone())
//!     .with_lead_ch_had(cands[2].clone())];
//!
//! let matcher = TauMatcher::new(ConeAssociation::new(KeyIdentity));
//! let maps = matcher.evaluate("packedPFCandidates", &cands, &taus);
//!
//! assert_eq!(maps.signal.as_slice(), &[-1, -1, 0]);
//! assert_eq!(maps.isolation.as_slice(), &[0, -1, -1]);
//! assert_eq!(maps.lead_ch_had.as_slice(), &[-1, -1, 0]);
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod association;
mod candidate;
mod identity;
mod matcher;
mod tau;
mod trace;
mod value_map;

#[cfg(feature = "producer")]
mod config;
#[cfg(feature = "producer")]
mod event;
#[cfg(feature = "producer")]
mod producer;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use association::{Association, ConeAssociation, TauAssociation};
pub use candidate::{delta_phi, delta_r, Candidate, CandidateKey};
pub use identity::{
    CandidateIdentity, KeyIdentity, KinematicIdentity, DEFAULT_MAX_DELTA_R,
    DEFAULT_MAX_REL_PT_DIFF,
};
pub use matcher::{CandidateMatch, RecordMode, TauMatcher};
pub use tau::Tau;
pub use value_map::{TauMatchMaps, ValueMap, UNMATCHED};

// Trace types
pub use trace::{AssociationHit, CandidateTrace, MatchTrace};

// Producer (feature-gated)
#[cfg(feature = "producer")]
pub use config::{ConfigError, IdentityConfig, InputTag, ParameterDescription, ProducerConfig};
#[cfg(feature = "producer")]
pub use event::{Event, EventId, Product, ProductError};
#[cfg(feature = "producer")]
pub use producer::TauMapProducer;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use taumap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Association, Candidate, CandidateIdentity, CandidateKey, CandidateMatch,
        ConeAssociation, KeyIdentity, KinematicIdentity, MatchTrace, RecordMode, Tau,
        TauAssociation, TauMatchMaps, TauMatcher, ValueMap, UNMATCHED,
    };

    #[cfg(feature = "producer")]
    pub use crate::{
        Event, EventId, IdentityConfig, InputTag, ProducerConfig, ProductError, TauMapProducer,
    };
}
