//! Architectural Enforcement Integration Tests
//!
//! Source scans that keep the workspace honest:
//! - No sleep() calls in production code (frame ticks excepted)
//! - The core stays headless (no terminal crates)
//! - The terminal client talks to the service only through the core
//! - Core production code propagates errors instead of panicking
//!
//! The helpers here are shared by the tests under `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this crate
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// One offending line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File, relative to the workspace root
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// The line itself, trimmed
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.file.display(), self.line, self.text)
    }
}

/// Every `.rs` file under `dir` (relative to the workspace root)
#[must_use]
pub fn rust_sources(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    if !root.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// Lines of production code: comments stripped, test modules cut off
///
/// Test modules live at the end of each file, so everything from the first
/// `#[cfg(test)]` on is skipped.
#[must_use]
pub fn production_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .map(|(idx, line)| (idx + 1, line.split("//").next().unwrap_or(line)))
        .collect()
}

/// Scan production code under `dir` for lines matching `is_violation`
///
/// `allow` gets the file, all of its lines and the 0-based index, and can
/// excuse a match by context.
pub fn scan(
    dir: &str,
    is_violation: impl Fn(&str) -> bool,
    allow: impl Fn(&Path, &[&str], usize) -> bool,
) -> Vec<Violation> {
    let root = workspace_root();
    let mut violations = Vec::new();

    for path in rust_sources(dir) {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let all_lines: Vec<&str> = content.lines().collect();
        for (line, code) in production_lines(&content) {
            if is_violation(code) && !allow(&path, &all_lines, line - 1) {
                violations.push(Violation {
                    file: path.strip_prefix(&root).unwrap_or(&path).to_path_buf(),
                    line,
                    text: all_lines[line - 1].trim().to_string(),
                });
            }
        }
    }

    violations
}

/// Whether a nearby line mentions any of `keywords`
#[must_use]
pub fn context_mentions(lines: &[&str], idx: usize, radius: usize, keywords: &[&str]) -> bool {
    let start = idx.saturating_sub(radius);
    let end = (idx + radius + 1).min(lines.len());
    lines[start..end]
        .iter()
        .any(|line| keywords.iter().any(|k| line.to_lowercase().contains(k)))
}

/// Read a manifest relative to the workspace root
#[must_use]
pub fn manifest(path: &str) -> String {
    fs::read_to_string(workspace_root().join(path)).unwrap_or_default()
}

/// Report violations and fail
///
/// # Panics
///
/// Panics when `violations` is not empty.
pub fn assert_clean(rule: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }
    eprintln!("\n❌ {rule}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    panic!("\nFound {} violation(s): {rule}", violations.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let src = "fn a() {}\n// note .unwrap()\nlet x = y; // .unwrap()\n#[cfg(test)]\nmod tests { x.unwrap(); }\n";
        let lines = production_lines(src);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|(_, l)| !l.contains("unwrap")));
    }

    #[test]
    fn test_context_mentions() {
        let lines = ["// Frame tick", "() = tokio::time::sleep(d) => {}"];
        assert!(context_mentions(&lines, 1, 2, &["frame"]));
        assert!(!context_mentions(&lines, 1, 2, &["backoff"]));
    }

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }
}
