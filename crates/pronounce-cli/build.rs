use chrono::Local;
use std::process::Command;

fn git(args: &[&str]) -> Option<std::process::Output> {
    Command::new("git").args(args).output().ok()
}

fn main() {
    let commit = match git(&["rev-parse", "--short", "HEAD"]) {
        Some(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_string(),
        _ => "unknown".to_string(),
    };

    // Untracked files do not count as dirty
    let dirty = git(&["diff", "--quiet", "HEAD"])
        .map(|out| !out.status.success())
        .unwrap_or(false);

    let build_hash = if dirty {
        format!("{commit}-dirty-{}", Local::now().format("%Y%m%d-%H%M%S"))
    } else {
        commit
    };

    println!("cargo:rustc-env=BUILD_HASH={build_hash}");

    // .git lives at the workspace root
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");
}
