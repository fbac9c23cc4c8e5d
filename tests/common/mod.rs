//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;

/// Create a temporary workspace with the given `(relative path, contents)` files.
pub fn workspace(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().expect("create temp dir");
    for (rel, contents) in files {
        write_file(tmp.path(), rel, contents);
    }
    tmp
}

pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, contents).expect("write fixture file");
}

pub fn read_file(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).expect("read fixture file")
}
