//! Producer configuration.
//!
//! Deserializes from JSON or YAML. The two input tags are required; everything
//! else has a default.
//!
//! ```yaml
//! packedPFCandidates: packedPFCandidates
//! patTaus: slimmedTaus::PAT
//! record_mode: all_associations   # or signal_only
//! identity:
//!   type: kinematic
//!   max_delta_r: 0.001
//!   max_rel_pt_diff: 0.001
//! ```

use crate::identity::{DEFAULT_MAX_DELTA_R, DEFAULT_MAX_REL_PT_DIFF};
use crate::{CandidateIdentity, KeyIdentity, KinematicIdentity, RecordMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors from loading or validating a [`ProducerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An input tag that is empty or has more than three parts.
    #[error("invalid input tag \"{0}\": expected label[:instance[:process]] with a non-empty label")]
    InvalidInputTag(String),

    /// A kinematic tolerance that is negative or not finite.
    #[error("invalid {name} = {value}: must be finite and non-negative")]
    InvalidTolerance { name: &'static str, value: f64 },
}

/// Names a product in the event: `label[:instance[:process]]`.
///
/// # Example
///
/// ```
/// use taumap::InputTag;
///
/// let tag: InputTag = "slimmedTaus::PAT".parse().unwrap();
/// assert_eq!(tag.label, "slimmedTaus");
/// assert_eq!(tag.instance, "");
/// assert_eq!(tag.process, "PAT");
/// assert_eq!(tag.to_string(), "slimmedTaus::PAT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InputTag {
    /// Module label.
    pub label: String,
    /// Product instance name.
    pub instance: String,
    /// Process name.
    pub process: String,
}

impl InputTag {
    /// A tag with only a module label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            instance: String::new(),
            process: String::new(),
        }
    }
}

impl fmt::Display for InputTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)?;
        if !self.instance.is_empty() || !self.process.is_empty() {
            write!(f, ":{}", self.instance)?;
        }
        if !self.process.is_empty() {
            write!(f, ":{}", self.process)?;
        }
        Ok(())
    }
}

impl FromStr for InputTag {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let label = parts.next().unwrap_or_default().trim();
        let instance = parts.next().unwrap_or_default().trim();
        let process = parts.next().unwrap_or_default().trim();
        if label.is_empty() || parts.next().is_some() {
            return Err(ConfigError::InvalidInputTag(s.to_owned()));
        }
        Ok(Self {
            label: label.to_owned(),
            instance: instance.to_owned(),
            process: process.to_owned(),
        })
    }
}

impl TryFrom<String> for InputTag {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<InputTag> for String {
    fn from(tag: InputTag) -> Self {
        tag.to_string()
    }
}

fn default_max_delta_r() -> f64 {
    DEFAULT_MAX_DELTA_R
}

fn default_max_rel_pt_diff() -> f64 {
    DEFAULT_MAX_REL_PT_DIFF
}

/// How tau constituents are compared with collection candidates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdentityConfig {
    /// Compare collection keys.
    #[default]
    Key,

    /// Compare quantum numbers and kinematics.
    Kinematic {
        #[serde(default = "default_max_delta_r")]
        max_delta_r: f64,
        #[serde(default = "default_max_rel_pt_diff")]
        max_rel_pt_diff: f64,
    },
}

impl IdentityConfig {
    /// Check tolerances are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] for a negative or non-finite tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Self::Kinematic {
            max_delta_r,
            max_rel_pt_diff,
        } = *self
        {
            check_tolerance("max_delta_r", max_delta_r)?;
            check_tolerance("max_rel_pt_diff", max_rel_pt_diff)?;
        }
        Ok(())
    }

    /// Build the runtime identity.
    #[must_use]
    pub fn build(&self) -> Box<dyn CandidateIdentity> {
        match *self {
            Self::Key => Box::new(KeyIdentity),
            Self::Kinematic {
                max_delta_r,
                max_rel_pt_diff,
            } => Box::new(KinematicIdentity::new(max_delta_r, max_rel_pt_diff)),
        }
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTolerance { name, value })
    }
}

/// Configuration for [`TauMapProducer`](crate::TauMapProducer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProducerConfig {
    /// The candidate collection the maps are keyed against.
    #[serde(rename = "packedPFCandidates")]
    pub packed_pf_candidates: InputTag,

    /// The tau collection.
    #[serde(rename = "patTaus")]
    pub pat_taus: InputTag,

    /// Which associations are written to the output.
    #[serde(default)]
    pub record_mode: RecordMode,

    /// Candidate identity used for cone membership.
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl ProducerConfig {
    /// A config with the given tags and default options.
    #[must_use]
    pub fn new(packed_pf_candidates: InputTag, pat_taus: InputTag) -> Self {
        Self {
            packed_pf_candidates,
            pat_taus,
            record_mode: RecordMode::default(),
            identity: IdentityConfig::default(),
        }
    }

    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse failure or invalid values.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse failure or invalid values.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file: `.json` as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if is_json(path) {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Validate option values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] for unusable identity tolerances.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.identity.validate()
    }

    /// Describe the accepted parameters.
    #[must_use]
    pub fn describe() -> Vec<ParameterDescription> {
        vec![
            ParameterDescription {
                name: "packedPFCandidates",
                kind: "InputTag",
                required: true,
                comment: "packed PF Candidates collection",
            },
            ParameterDescription {
                name: "patTaus",
                kind: "InputTag",
                required: true,
                comment: "tau collection",
            },
            ParameterDescription {
                name: "record_mode",
                kind: "all_associations | signal_only",
                required: false,
                comment: "signal_only keeps only isTauSignalCand; the other maps stay -1",
            },
            ParameterDescription {
                name: "identity",
                kind: "{type: key} | {type: kinematic, max_delta_r, max_rel_pt_diff}",
                required: false,
                comment: "how tau constituents are compared with collection candidates",
            },
        ]
    }
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// One accepted configuration parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterDescription {
    /// Parameter name as written in the config.
    pub name: &'static str,
    /// Value type.
    pub kind: &'static str,
    /// Whether the parameter must be present.
    pub required: bool,
    /// Human-readable description.
    pub comment: &'static str,
}

impl fmt::Display for ParameterDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let req = if self.required { "required" } else { "optional" };
        write!(f, "{} ({}, {req}): {}", self.name, self.kind, self.comment)
    }
}
