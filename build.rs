//! Build script to make sure the embedded deck catalog ships with the binary.
//!
//! The standard deck is compiled in via include_str!(), so a missing asset must
//! fail packaging here with a readable message instead of a bare rustc error.

use std::fs;
use std::path::Path;

fn check_asset(path: &Path) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read deck asset {:?}: {}", path, e));

    if content.trim().is_empty() {
        panic!("Deck asset {:?} is empty", path);
    }
}

fn main() {
    check_asset(Path::new("assets/deck.json"));

    // Record the profile so `primus info` can report it
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=PRIMUS_BUILD_PROFILE={}", profile);

    // Tell Cargo to rerun build.rs if the catalog changes
    println!("cargo:rerun-if-changed=assets/deck.json");
    println!("cargo:rerun-if-changed=build.rs");
}
