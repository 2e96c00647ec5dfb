//! Go file discovery following the `go` tool's directory rules.
//!
//! - Directories named `vendor` or `testdata`, and directories whose names
//!   start with `.` or `_`, are pruned from recursive walks.
//! - Files whose names start with `.` or `_` are ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{IoResultExt, UnexportError, UnexportResult};

/// Directory names never descended into.
const EXCLUDED_DIRS: &[&str] = &["vendor", "testdata"];

/// Whether a directory name is skipped by `./...` patterns.
#[inline]
fn is_ignored_dir_name(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name) || name.starts_with('.') || name.starts_with('_')
}

/// Whether a file name is a Go source file the loader should read.
#[inline]
pub fn is_go_source_name(name: &str) -> bool {
    name.ends_with(".go") && !name.starts_with('.') && !name.starts_with('_')
}

/// Lists the Go source files directly inside `dir`, sorted by name.
pub fn gather_go_files(dir: &Path) -> UnexportResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_path(dir)? {
        let entry = entry.with_path(dir)?;
        let path = entry.path();
        let is_go = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_go_source_name);
        if is_go && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Recursively collects Go source files under `root`, grouped by directory.
///
/// The root itself is always walked, even if its own name would be pruned.
/// Directories are returned in sorted order, each with sorted files.
pub fn gather_go_packages(root: &Path) -> UnexportResult<BTreeMap<PathBuf, Vec<PathBuf>>> {
    let mut packages: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();

    let walker = WalkDir::new(root).sort_by_file_name().into_iter().filter_entry(|e| {
        e.depth() == 0
            || !e.file_type().is_dir()
            || !e.file_name().to_str().is_some_and(is_ignored_dir_name)
    });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let err = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            UnexportError::io(path, err)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let is_go = entry.file_name().to_str().is_some_and(is_go_source_name);
        if !is_go {
            continue;
        }
        if let Some(parent) = entry.path().parent() {
            packages
                .entry(parent.to_path_buf())
                .or_default()
                .push(entry.path().to_path_buf());
        }
    }

    for files in packages.values_mut() {
        files.sort();
    }
    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_temp_dir(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir()
            .join("unexport_scan_test")
            .join(format!("{}_{}_{}", name, std::process::id(), id));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "package x\n").unwrap();
    }

    #[test]
    fn test_go_source_names() {
        assert!(is_go_source_name("a.go"));
        assert!(is_go_source_name("a_test.go"));
        assert!(!is_go_source_name("_a.go"));
        assert!(!is_go_source_name(".a.go"));
        assert!(!is_go_source_name("a.rs"));
    }

    #[test]
    fn test_gather_go_files_is_flat_and_sorted() {
        let dir = create_temp_dir("flat");
        touch(&dir.join("b.go"));
        touch(&dir.join("a.go"));
        touch(&dir.join("_ignored.go"));
        touch(&dir.join("notes.txt"));
        touch(&dir.join("sub/c.go"));

        let files = gather_go_files(&dir).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.go", "b.go"]);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_gather_go_packages_prunes_go_tool_dirs() {
        let dir = create_temp_dir("recursive");
        touch(&dir.join("root.go"));
        touch(&dir.join("pkg/one/one.go"));
        touch(&dir.join("pkg/two/two.go"));
        touch(&dir.join("vendor/dep/dep.go"));
        touch(&dir.join("pkg/testdata/fixture.go"));
        touch(&dir.join(".hidden/h.go"));
        touch(&dir.join("_scratch/s.go"));

        let packages = gather_go_packages(&dir).unwrap();
        let dirs: Vec<_> = packages.keys().cloned().collect();
        assert_eq!(
            dirs,
            vec![dir.clone(), dir.join("pkg/one"), dir.join("pkg/two")]
        );
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let dir = create_temp_dir("missing");
        let err = gather_go_files(&dir.join("nope")).unwrap_err();
        assert!(matches!(err, UnexportError::Io { .. }));
        fs::remove_dir_all(&dir).ok();
    }
}
