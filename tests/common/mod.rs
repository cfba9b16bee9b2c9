#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use plansheet::{CurriculumTree, ExportBuilder, ExportConfig, Exporter, load_tree};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Deserializes a fixture through the same path the CLI uses.
pub fn tree_from(value: Value) -> Result<CurriculumTree, Box<dyn std::error::Error>> {
    Ok(load_tree(&serde_json::to_string(&value)?)?)
}

pub fn exporter() -> Result<Exporter, Box<dyn std::error::Error>> {
    exporter_with(ExportConfig::default())
}

pub fn exporter_with(config: ExportConfig) -> Result<Exporter, Box<dyn std::error::Error>> {
    Ok(ExportBuilder::new().with_config(config).build()?)
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Byte offset of `needle`, failing the test with a readable message when absent.
pub fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("expected to find {:?}", needle))
}
