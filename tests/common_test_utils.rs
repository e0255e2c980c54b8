// Shared helpers for the integration tests.
#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

/// Write a YAML config to a temp file that lives as long as the returned handle.
pub fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(yaml.as_bytes()).expect("write temp config");
    file
}

pub fn path_str(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("temp path is utf-8")
}
