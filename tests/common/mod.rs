#![allow(dead_code)]

pub mod file;

/// Full contents of `.gitlet/refs/heads/<branch>`
pub fn branch_tip(dir: &std::path::Path, branch: &str) -> String {
    std::fs::read_to_string(dir.join(".gitlet").join("refs").join("heads").join(branch))
        .expect("Failed to read branch file")
}

pub fn head_ref(dir: &std::path::Path) -> String {
    std::fs::read_to_string(dir.join(".gitlet").join("HEAD")).expect("Failed to read HEAD")
}

/// Status output with every section spelled out
pub fn status_output(
    branches: &[&str],
    staged: &[&str],
    removed: &[&str],
    modified: &[&str],
    untracked: &[&str],
) -> String {
    let section = |title: &str, lines: &[&str]| {
        let mut out = format!("=== {title} ===\n");
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out
    };

    [
        section("Branches", branches),
        section("Staged Files", staged),
        section("Removed Files", removed),
        section("Modifications Not Staged For Commit", modified),
        section("Untracked Files", untracked),
    ]
    .concat()
}
