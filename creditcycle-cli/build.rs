//! Stamps the build revision into `creditcycle --version`.

use std::path::Path;
use std::process::Command;

const SHA_VAR: &str = "CREDITCYCLE_BUILD_SHA";

/// Short HEAD hash of the workspace checkout, if git is available.
fn git_short_head(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8(out.stdout).ok()?.trim().to_owned();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest_dir = std::env::var_os("CARGO_MANIFEST_DIR").unwrap_or_else(|| ".".into());
    let workspace = Path::new(&manifest_dir).join("..");

    // Source tarballs have no .git; packagers pass the revision in instead.
    let revision = std::env::var(SHA_VAR)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| git_short_head(&workspace))
        .unwrap_or_else(|| "unknown".to_owned());

    println!("cargo:rustc-env={SHA_VAR}={revision}");
    println!("cargo:rerun-if-env-changed={SHA_VAR}");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}
