use std::process::Command;

/// `<パッケージバージョン>+<短縮コミット>` を GIT_VERSION に埋め込む
fn main() {
    for path in [".git/HEAD", ".git/index"] {
        println!("cargo:rerun-if-changed={path}");
    }

    let pkg = env!("CARGO_PKG_VERSION");
    let version = match short_commit() {
        Some(commit) if worktree_dirty() => format!("{pkg}+{commit}.dirty"),
        Some(commit) => format!("{pkg}+{commit}"),
        None => pkg.to_string(),
    };
    println!("cargo:rustc-env=GIT_VERSION={version}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn short_commit() -> Option<String> {
    git(&["rev-parse", "--short", "HEAD"]).filter(|s| !s.is_empty())
}

fn worktree_dirty() -> bool {
    git(&["status", "--porcelain", "--untracked-files=no"]).is_some_and(|s| !s.is_empty())
}
