//! Producer conformance fixture runner.
//!
//! Fixtures carry a raw producer config and a list of full events, exercising
//! the production path: config → `TauMapProducer` → `produce()`.

use crate::fixture::ExpectedMaps;
use serde::Deserialize;
use taumap::prelude::*;

/// A producer conformance fixture.
///
/// `config` stays raw so fixtures can also assert that a config is rejected.
#[derive(Debug, Deserialize)]
pub struct EventFixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub config: serde_json::Value,
    #[serde(default)]
    pub expect_config_error: bool,
    #[serde(default)]
    pub events: Vec<EventCase>,
}

/// One event and its expected outcome.
#[derive(Debug, Deserialize)]
pub struct EventCase {
    pub event: Event,
    #[serde(default)]
    pub expect: Option<ExpectedMaps>,
    /// Substring of the expected `ProductError` message.
    #[serde(default)]
    pub expect_error: Option<String>,
}

impl EventFixture {
    /// Parse multiple fixtures from a YAML file with `---` separators.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Build the producer from the raw config.
    pub fn producer(&self) -> Result<TauMapProducer, String> {
        let config: ProducerConfig =
            serde_json::from_value(self.config.clone()).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(TauMapProducer::new(config))
    }

    /// Run all events and panic on first failure.
    pub fn run_and_assert(&self) {
        let producer = match (self.producer(), self.expect_config_error) {
            (Ok(_), true) => panic!("Fixture '{}': config should be rejected", self.name),
            (Err(_), true) => return,
            (Err(e), false) => panic!("Fixture '{}': config rejected: {e}", self.name),
            (Ok(p), false) => p,
        };

        for (i, case) in self.events.iter().enumerate() {
            match (producer.produce(&case.event), &case.expect_error) {
                (Ok(maps), None) => {
                    if let Some(expect) = &case.expect {
                        for kind in Association::ALL {
                            let Some(expected) = expect.get(kind) else {
                                continue;
                            };
                            assert_eq!(
                                maps.get(kind).as_slice(),
                                expected,
                                "Fixture '{}' event #{i} map '{}'",
                                self.name,
                                kind.label()
                            );
                        }
                    }
                }
                (Err(e), Some(msg)) => assert!(
                    e.to_string().contains(msg.as_str()),
                    "Fixture '{}' event #{i}: error '{e}' does not contain '{msg}'",
                    self.name
                ),
                (Ok(_), Some(msg)) => {
                    panic!("Fixture '{}' event #{i}: expected error '{msg}'", self.name)
                }
                (Err(e), None) => panic!("Fixture '{}' event #{i}: {e}", self.name),
            }
        }
    }
}
