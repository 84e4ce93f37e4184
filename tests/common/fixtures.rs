//! Shared texts and helpers for integration tests.

use std::path::{Path, PathBuf};

use fitrank::Document;

pub const JOB_DESCRIPTION: &str =
    "Looking for a Python developer with experience in REST APIs and SQL databases.";
pub const ALICE: &str = "Experienced Python engineer, built REST APIs, worked with PostgreSQL.";
pub const BOB: &str = "Graphic designer skilled in Photoshop and Illustrator.";

pub fn candidates() -> Vec<Document> {
    vec![Document::new("bob", BOB), Document::new("alice", ALICE)]
}

/// Writes `contents` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}
