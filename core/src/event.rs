//! Event products: the per-event collections the producer reads.
//!
//! Products are stored under the display form of their [`InputTag`]. An event
//! owns its collections; the producer only borrows them for one call.

use crate::config::{is_json, ConfigError};
use crate::{Candidate, CandidateKey, InputTag, Tau};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Errors from fetching a product out of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    /// No product is stored under the tag.
    #[error("required product \"{tag}\" not found in event")]
    NotFound { tag: String },

    /// The product under the tag is the other kind of collection.
    #[error("product \"{tag}\" holds {found}, expected {expected}")]
    WrongKind {
        tag: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Two candidates of one collection share a key.
    #[error("duplicate candidate key {key} in product \"{tag}\"")]
    DuplicateKey { tag: String, key: CandidateKey },
}

/// Run / luminosity-block / event number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct EventId {
    /// Run number.
    #[serde(default)]
    pub run: u32,
    /// Luminosity block within the run.
    #[serde(default)]
    pub lumi: u32,
    /// Event number within the run.
    #[serde(default)]
    pub event: u64,
}

/// A collection stored in an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Product {
    /// Particle-flow candidates.
    Candidates(Vec<Candidate>),
    /// Reconstructed taus.
    Taus(Vec<Tau>),
}

impl Product {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Candidates(_) => "candidates",
            Self::Taus(_) => "taus",
        }
    }

    /// Give keyless candidates their collection position as key.
    ///
    /// Every candidate is keyed on return. Returns the first key held by more
    /// than one candidate, e.g. an explicit key that equals a keyless
    /// candidate's position.
    fn assign_keys(&mut self) -> Result<(), CandidateKey> {
        let Self::Candidates(cands) = self else {
            return Ok(());
        };
        let mut seen = HashSet::with_capacity(cands.len());
        let mut duplicate = None;
        for (i, cand) in cands.iter_mut().enumerate() {
            if cand.key.is_none() {
                cand.key = u32::try_from(i).ok().map(CandidateKey);
            }
            if let Some(key) = cand.key {
                if !seen.insert(key) {
                    duplicate.get_or_insert(key);
                }
            }
        }
        duplicate.map_or(Ok(()), Err)
    }
}

/// One event's products.
///
/// # Example
///
/// ```
/// use taumap::{Candidate, Event, EventId, InputTag};
///
/// let tag = InputTag::new("packedPFCandidates");
/// let event = Event::new(EventId::default())
///     .with_candidates(&tag, vec![Candidate::new(211, 1, 10.0, 0.0, 0.0)]);
///
/// let cands = event.candidates(&tag).unwrap();
/// assert_eq!(cands[0].key.map(|k| k.index()), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "EventData")]
pub struct Event {
    #[serde(flatten)]
    pub id: EventId,
    products: BTreeMap<String, Product>,
}

/// Wire form of [`Event`]; keys are assigned and checked on conversion.
#[derive(Deserialize)]
struct EventData {
    #[serde(flatten)]
    id: EventId,
    #[serde(default)]
    products: BTreeMap<String, Product>,
}

impl TryFrom<EventData> for Event {
    type Error = ProductError;

    fn try_from(data: EventData) -> Result<Self, Self::Error> {
        let mut products = data.products;
        for (tag, product) in &mut products {
            product
                .assign_keys()
                .map_err(|key| ProductError::DuplicateKey {
                    tag: tag.clone(),
                    key,
                })?;
        }
        Ok(Self {
            id: data.id,
            products,
        })
    }
}

impl Event {
    /// An event with no products.
    #[must_use]
    pub fn new(id: EventId) -> Self {
        Self {
            id,
            products: BTreeMap::new(),
        }
    }

    /// Store a candidate collection (builder pattern).
    #[must_use]
    pub fn with_candidates(mut self, tag: &InputTag, cands: Vec<Candidate>) -> Self {
        self.insert(tag, Product::Candidates(cands));
        self
    }

    /// Store a tau collection (builder pattern).
    #[must_use]
    pub fn with_taus(mut self, tag: &InputTag, taus: Vec<Tau>) -> Self {
        self.insert(tag, Product::Taus(taus));
        self
    }

    /// Store a product, replacing any product under the same tag.
    ///
    /// Keyless candidates get their position as key. Duplicate keys are not
    /// rejected here, only logged; loading from JSON or YAML rejects them.
    pub fn insert(&mut self, tag: &InputTag, mut product: Product) {
        if let Err(key) = product.assign_keys() {
            tracing::warn!(%tag, %key, "duplicate candidate key in product");
        }
        self.products.insert(tag.to_string(), product);
    }

    /// Tags of all stored products.
    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.products.keys().map(String::as_str)
    }

    /// Borrow the candidate collection stored under `tag`.
    ///
    /// # Errors
    ///
    /// [`ProductError::NotFound`] if absent, [`ProductError::WrongKind`] if it holds taus.
    pub fn candidates(&self, tag: &InputTag) -> Result<&[Candidate], ProductError> {
        match self.product(tag)? {
            Product::Candidates(c) => Ok(c),
            other => Err(wrong_kind(tag, "candidates", other)),
        }
    }

    /// Borrow the tau collection stored under `tag`.
    ///
    /// # Errors
    ///
    /// [`ProductError::NotFound`] if absent, [`ProductError::WrongKind`] if it holds candidates.
    pub fn taus(&self, tag: &InputTag) -> Result<&[Tau], ProductError> {
        match self.product(tag)? {
            Product::Taus(t) => Ok(t),
            other => Err(wrong_kind(tag, "taus", other)),
        }
    }

    fn product(&self, tag: &InputTag) -> Result<&Product, ProductError> {
        self.products
            .get(&tag.to_string())
            .ok_or_else(|| ProductError::NotFound {
                tag: tag.to_string(),
            })
    }

    /// Parse a list of events from JSON (an array).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed input.
    pub fn list_from_json_str(s: &str) -> Result<Vec<Self>, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a list of events from YAML (a sequence).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] on malformed input.
    pub fn list_from_yaml_str(s: &str) -> Result<Vec<Self>, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load an event file: `.json` as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if is_json(path) {
            Self::list_from_json_str(&content)
        } else {
            Self::list_from_yaml_str(&content)
        }
    }
}

fn wrong_kind(tag: &InputTag, expected: &'static str, found: &Product) -> ProductError {
    ProductError::WrongKind {
        tag: tag.to_string(),
        expected,
        found: found.kind_name(),
    }
}
