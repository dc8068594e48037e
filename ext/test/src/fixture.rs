//! Conformance test fixture runner
//!
//! Loads YAML fixtures describing candidate/tau layouts by index and checks the
//! matcher's three maps against the expected values.

use crate::{candidates, TauSpec};
use serde::Deserialize;
use taumap::prelude::*;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub record_mode: RecordMode,
    /// Number of candidates in the collection.
    pub candidates: u32,
    #[serde(default)]
    pub taus: Vec<TauSpec>,
    pub expect: ExpectedMaps,
}

/// Expected map contents. An omitted map is not checked.
#[derive(Debug, Deserialize)]
pub struct ExpectedMaps {
    #[serde(rename = "isTauSignalCand", default)]
    pub signal: Option<Vec<i32>>,
    #[serde(rename = "isTauIsoCand", default)]
    pub isolation: Option<Vec<i32>>,
    #[serde(rename = "isTauLeadChHadCand", default)]
    pub lead_ch_had: Option<Vec<i32>>,
}

impl ExpectedMaps {
    /// The expected values for one association, if given.
    pub fn get(&self, kind: Association) -> Option<&[i32]> {
        match kind {
            Association::Signal => self.signal.as_deref(),
            Association::Isolation => self.isolation.as_deref(),
            Association::LeadChargedHadron => self.lead_ch_had.as_deref(),
        }
    }
}

/// Result of checking one map
#[derive(Debug)]
pub struct MapResult {
    pub label: &'static str,
    pub passed: bool,
    pub expected: Vec<i32>,
    pub actual: Vec<i32>,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run the matcher over the fixture's event.
    pub fn evaluate(&self) -> TauMatchMaps {
        let cands = candidates(self.candidates);
        let taus: Vec<Tau> = self.taus.iter().map(|t| t.build(&cands)).collect();
        TauMatcher::new(ConeAssociation::new(KeyIdentity))
            .with_mode(self.record_mode)
            .evaluate("candidates", &cands, &taus)
    }

    /// Check every expected map and return results
    pub fn run(&self) -> Vec<MapResult> {
        let maps = self.evaluate();
        Association::ALL
            .into_iter()
            .filter_map(|kind| {
                let expected = self.expect.get(kind)?.to_vec();
                let actual = maps.get(kind).as_slice().to_vec();
                Some(MapResult {
                    label: kind.label(),
                    passed: expected == actual,
                    expected,
                    actual,
                })
            })
            .collect()
    }

    /// Run and panic on first failure
    pub fn run_and_assert(&self) {
        let maps = self.evaluate();
        for (label, map) in maps.iter() {
            assert_eq!(
                map.len(),
                self.candidates as usize,
                "Fixture '{}': {label} is not aligned with the candidates",
                self.name
            );
        }
        for result in self.run() {
            assert!(
                result.passed,
                "Fixture '{}' map '{}' failed: expected {:?}, got {:?}",
                self.name, result.label, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_run_inline_fixture() {
        let fixture = Fixture::from_yaml(
            r"
name: inline
candidates: 2
taus:
  - signal: [1]
    lead: 1
expect:
  isTauSignalCand: [-1, 0]
  isTauLeadChHadCand: [-1, 0]
",
        )
        .unwrap();
        assert_eq!(fixture.record_mode, RecordMode::AllAssociations);
        let results = fixture.run();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed));
    }

    #[test]
    fn failing_expectation_is_reported() {
        let fixture = Fixture::from_yaml(
            r"
name: wrong
candidates: 1
expect:
  isTauIsoCand: [0]
",
        )
        .unwrap();
        let results = fixture.run();
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, vec![-1]);
    }
}
