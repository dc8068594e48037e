//! Producer conformance: raw config + full events through `TauMapProducer`
//!
//! Run with: cargo test -p taumap-test --test producer_conformance

#![cfg(feature = "producer")]

use std::fs;
use std::path::Path;
use taumap_test::event_fixture::EventFixture;

#[test]
fn test_producer_fixtures() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("producer");

    let mut paths: Vec<_> = fs::read_dir(&dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|e| e == "yaml"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "no fixtures in {}", dir.display());

    for path in paths {
        println!("Running fixture: {}", path.display());
        let yaml = fs::read_to_string(&path).expect("read yaml");
        let fixtures = EventFixture::from_yaml_multi(&yaml)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));

        for fixture in fixtures {
            println!("  Running: {}", fixture.name);
            fixture.run_and_assert();
        }
    }
}
