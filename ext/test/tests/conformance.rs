//! Conformance tests that run YAML fixtures against taumap
//!
//! Run with: cargo test -p taumap-test --test conformance

#![cfg(feature = "fixtures")]

use std::fs;
use std::path::{Path, PathBuf};
use taumap_test::fixture::Fixture;

/// Fixture directory inside this crate
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// YAML files in a directory, sorted for stable output
fn yaml_files(dir: &Path) -> Vec<PathBuf> {
    assert!(dir.exists(), "Fixtures directory does not exist: {}", dir.display());

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| {
            path.extension()
                .is_some_and(|e| e == "yaml" || e == "yml")
        })
        .collect();
    paths.sort();
    paths
}

#[test]
fn test_matcher_fixtures() {
    let files = yaml_files(&fixtures_dir().join("matcher"));
    assert!(!files.is_empty());

    for path in files {
        println!("Running fixture: {}", path.display());
        let yaml = fs::read_to_string(&path).expect("read yaml");

        // Parse potentially multiple fixtures (separated by ---)
        let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
            panic!("Failed to parse {}: {}", path.display(), e);
        });

        for fixture in fixtures {
            println!("  Running: {}", fixture.name);
            fixture.run_and_assert();
        }
    }
}
