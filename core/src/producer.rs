//! `TauMapProducer` — Binds the matcher to event products
//!
//! Reads the configured candidate and tau collections from an [`Event`], runs
//! the [`TauMatcher`], and labels the resulting maps with the candidate tag.
//! Holds no per-event state, so one producer can serve events concurrently.

use crate::{
    Association, CandidateIdentity, ConeAssociation, Event, MatchTrace, ProducerConfig,
    ProductError, TauMatchMaps, TauMatcher,
};

/// Produces the `isTauSignalCand`, `isTauIsoCand` and `isTauLeadChHadCand` maps.
///
/// # Example
///
/// ```
/// use taumap::prelude::*;
///
/// let config = ProducerConfig::new(InputTag::new("pf"), InputTag::new("taus"));
/// let producer = TauMapProducer::new(config);
///
/// let pion = Candidate::new(211, 1, 20.0, 0.0, 0.0);
/// let event = Event::new(EventId::default())
///     .with_candidates(&InputTag::new("pf"), vec![pion.clone()])
///     .with_taus(
///         &InputTag::new("taus"),
///         vec![Tau::new(20.0, 0.0, 0.0).with_signal(pion.with_key(CandidateKey(0)))],
///     );
///
/// let maps = producer.produce(&event).unwrap();
/// assert_eq!(maps.signal.as_slice(), &[0]);
/// ```
#[derive(Debug)]
pub struct TauMapProducer {
    config: ProducerConfig,
    matcher: TauMatcher<ConeAssociation<Box<dyn CandidateIdentity>>>,
}

impl TauMapProducer {
    /// Build a producer from a validated config.
    #[must_use]
    pub fn new(config: ProducerConfig) -> Self {
        let matcher = TauMatcher::new(ConeAssociation::new(config.identity.build()))
            .with_mode(config.record_mode);
        Self { config, matcher }
    }

    /// The producer's configuration.
    #[must_use]
    pub fn config(&self) -> &ProducerConfig {
        &self.config
    }

    /// Compute the three annotation maps for one event.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError`] if either configured collection is absent or
    /// holds the wrong kind of product.
    pub fn produce(&self, event: &Event) -> Result<TauMatchMaps, ProductError> {
        let cands = event.candidates(&self.config.packed_pf_candidates)?;
        let taus = event.taus(&self.config.pat_taus)?;

        if cands.is_empty() && !taus.is_empty() {
            tracing::warn!(
                run = event.id.run,
                event = event.id.event,
                taus = taus.len(),
                "event has taus but no candidates"
            );
        }

        let product = self.config.packed_pf_candidates.to_string();
        let maps = self.matcher.evaluate(&product, cands, taus);

        tracing::debug!(
            run = event.id.run,
            lumi = event.id.lumi,
            event = event.id.event,
            candidates = cands.len(),
            taus = taus.len(),
            signal = maps.matched_count(Association::Signal),
            isolation = maps.matched_count(Association::Isolation),
            lead_ch_had = maps.matched_count(Association::LeadChargedHadron),
            "produced tau maps"
        );

        Ok(maps)
    }

    /// Like [`produce`](Self::produce), but returns the full association trace.
    ///
    /// # Errors
    ///
    /// Same as [`produce`](Self::produce).
    pub fn produce_with_trace(&self, event: &Event) -> Result<MatchTrace, ProductError> {
        let cands = event.candidates(&self.config.packed_pf_candidates)?;
        let taus = event.taus(&self.config.pat_taus)?;
        Ok(self.matcher.evaluate_with_trace(cands, taus))
    }
}
