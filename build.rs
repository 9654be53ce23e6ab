// SPDX-License-Identifier: MPL-2.0

use std::process::Command;

fn main() {
    // Re-run build script if git HEAD changes
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");

    // Check if version is already set (e.g., by a distribution build)
    println!("cargo::rerun-if-env-changed=HWACCEL_VERSION");
    let version = if let Ok(v) = std::env::var("HWACCEL_VERSION") {
        v
    } else {
        get_git_version()
    };

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

fn get_git_version() -> String {
    // Try to get version from git describe
    // This will return:
    // - "v0.1.0" if HEAD is exactly at a tag
    // - "v0.1.0-5-gabcdef1" if HEAD is 5 commits after v0.1.0
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--match", "v*"])
        .output();

    let version = match output {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        _ => {
            // Fallback: try to get just the commit hash
            get_commit_hash().unwrap_or_else(|| "unknown".to_string())
        }
    };

    let version = version.strip_prefix('v').unwrap_or(&version);

    // "0.1.0-5-gabcdef1" (commits after a tag) becomes "0.1.0+abcdef1"
    let parts: Vec<&str> = version.rsplitn(3, '-').collect();
    match parts.as_slice() {
        [hash, _commits, base] if hash.starts_with('g') => format!("{}+{}", base, &hash[1..]),
        _ if version == "unknown" => env!("CARGO_PKG_VERSION").to_string(),
        _ => version.to_string(),
    }
}

fn get_commit_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}
