use std::process::Command;

/// Short git SHA of the checkout, or "unknown" outside a repository.
fn git_sha(repo_root: &str) -> Option<String> {
    let out = Command::new("git")
        .args(["-C", repo_root, "rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = format!("{manifest_dir}/..");

    // Release pipelines build from tarballs; let them pin the SHA.
    let sha = std::env::var("FOLIO_BUILD_SHA")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| git_sha(&repo_root))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rerun-if-env-changed=FOLIO_BUILD_SHA");
    println!("cargo:rerun-if-changed={repo_root}/.git/HEAD");
    println!("cargo:rustc-env=FOLIO_BUILD_SHA={sha}");
}
