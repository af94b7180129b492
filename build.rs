//! Build script for PNL
//!
//! Bumps the local build counter and embeds build metadata for the status tool.

use std::fs;
use std::path::Path;

const BUILD_NUMBER_FILE: &str = "build_number.txt";

fn read_build_number(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    // Source edits only; plain `cargo build` reruns shouldn't bump the counter
    println!("cargo:rerun-if-changed=src");

    let path = Path::new(BUILD_NUMBER_FILE);
    let build = read_build_number(path) + 1;

    fs::write(path, build.to_string()).expect("Failed to write build number file");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=PNL_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=PNL_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:warning=PNL Build #{} at {}", build, timestamp);
}
