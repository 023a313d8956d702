//! End-to-end transformations through the public API.

mod dc_motor;
mod edits;
mod tree_sitter_rust;

use std::path::PathBuf;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}
