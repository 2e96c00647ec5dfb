//! Package loading: target specifiers to parsed units.
//!
//! A unit is one package directory. Its base package holds the non-test
//! files; when in-package `_test.go` files exist, a test variant holds the
//! base files plus those tests. External test packages (`package foo_test`)
//! belong to neither and are not analysed.

use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{UnexportError, UnexportResult};
use crate::parse::{read_source_file, SourceFile};
use crate::scan::{gather_go_files, gather_go_packages};

/// Suffix that turns a package name into its external test package name.
const EXTERNAL_TEST_SUFFIX: &str = "_test";

/// A parsed target specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single package directory, e.g. `pkg/foo`.
    Dir(PathBuf),
    /// Every package under a directory, e.g. `./...` or `pkg/...`.
    Recursive(PathBuf),
}

impl Target {
    pub fn parse(spec: &str) -> Self {
        if spec == "..." {
            return Self::Recursive(PathBuf::from("."));
        }
        match spec.strip_suffix("/...") {
            Some("") => Self::Recursive(PathBuf::from("/")),
            Some(root) => Self::Recursive(PathBuf::from(root)),
            None => Self::Dir(PathBuf::from(spec)),
        }
    }
}

/// One set of files analysed together.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<Arc<SourceFile>>,
    /// True for the base-plus-tests variant.
    pub is_test_variant: bool,
}

/// A package directory with its optional test variant.
#[derive(Debug, Clone)]
pub struct LoadedUnit {
    pub base: Package,
    pub test: Option<Package>,
}

impl LoadedUnit {
    /// The package whose symbols are collected: the test variant when the
    /// directory has in-package tests, the base package otherwise.
    pub fn analysis_package(&self) -> &Package {
        self.test.as_ref().unwrap_or(&self.base)
    }
}

/// Loads every unit named by `targets`. An empty list means `.`.
///
/// Units reached by several targets are loaded once, in first-seen order.
pub fn load_targets(targets: &[String]) -> UnexportResult<Vec<LoadedUnit>> {
    let default_target = [".".to_string()];
    let targets = if targets.is_empty() {
        &default_target[..]
    } else {
        targets
    };

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut units = Vec::new();

    for spec in targets {
        let dirs = match Target::parse(spec) {
            Target::Dir(dir) => {
                if !dir.is_dir() {
                    return Err(UnexportError::load(spec, "not a directory"));
                }
                let files = gather_go_files(&dir)?;
                if files.is_empty() {
                    return Err(UnexportError::load(
                        spec,
                        format!("no Go files in {}", dir.display()),
                    ));
                }
                vec![(dir, files)]
            }
            Target::Recursive(root) => {
                if !root.is_dir() {
                    return Err(UnexportError::load(spec, "not a directory"));
                }
                let packages = gather_go_packages(&root)?;
                if packages.is_empty() {
                    warn!(target_spec = %spec, "pattern matched no packages");
                }
                packages.into_iter().collect()
            }
        };

        for (dir, files) in dirs {
            let key = fs::canonicalize(&dir).unwrap_or_else(|_| dir.clone());
            if !seen.insert(key) {
                debug!(dir = %dir.display(), "package already loaded");
                continue;
            }
            units.push(load_package_files(&dir, &files)?);
        }
    }

    info!(units = units.len(), "loaded targets");
    Ok(units)
}

/// Reads, parses and assembles the given files of one directory.
pub fn load_package_files(dir: &Path, files: &[PathBuf]) -> UnexportResult<LoadedUnit> {
    let parsed = files
        .par_iter()
        .map(|path| read_source_file(path))
        .collect::<UnexportResult<Vec<_>>>()?;
    assemble_unit(dir, parsed)
}

/// Splits parsed files into base package and test variant.
pub fn assemble_unit(dir: &Path, files: Vec<SourceFile>) -> UnexportResult<LoadedUnit> {
    let mut base_files = Vec::new();
    let mut test_files = Vec::new();
    let mut base_name: Option<String> = None;
    let mut base_name_origin = PathBuf::new();

    for file in files {
        let origin = file
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("<synthetic>"));
        let name = file
            .package_name()
            .ok_or_else(|| UnexportError::parse(&origin, "missing package clause"))?
            .to_string();

        if file.has_syntax_errors() {
            warn!(file = %origin.display(), "syntax errors; collecting recoverable declarations only");
        }

        if file.is_test_file() {
            test_files.push((name, Arc::new(file)));
            continue;
        }

        match &base_name {
            Some(existing) if *existing != name => {
                return Err(UnexportError::load(
                    dir.display().to_string(),
                    format!(
                        "found packages {} ({}) and {} ({})",
                        existing,
                        base_name_origin.display(),
                        name,
                        origin.display()
                    ),
                ));
            }
            Some(_) => {}
            None => {
                base_name = Some(name);
                base_name_origin = origin;
            }
        }
        base_files.push(Arc::new(file));
    }

    let name = match base_name {
        Some(name) => name,
        None => test_only_package_name(&test_files).ok_or_else(|| {
            UnexportError::load(dir.display().to_string(), "no Go files")
        })?,
    };
    let external_name = format!("{}{}", name, EXTERNAL_TEST_SUFFIX);

    let mut in_package_tests = Vec::new();
    for (test_name, file) in test_files {
        if test_name == name {
            in_package_tests.push(file);
        } else if test_name == external_name {
            debug!(
                file = ?file.path(),
                package = %external_name,
                "skipping external test package file"
            );
        } else {
            return Err(UnexportError::load(
                dir.display().to_string(),
                format!("found packages {} and {} in test files", name, test_name),
            ));
        }
    }

    let base = Package {
        name: name.clone(),
        dir: dir.to_path_buf(),
        files: base_files,
        is_test_variant: false,
    };

    let test = if in_package_tests.is_empty() {
        None
    } else {
        let mut files = base.files.clone();
        files.extend(in_package_tests);
        Some(Package {
            name,
            dir: dir.to_path_buf(),
            files,
            is_test_variant: true,
        })
    };

    debug!(
        dir = %dir.display(),
        package = %base.name,
        files = base.files.len(),
        has_tests = test.is_some(),
        "assembled package"
    );
    Ok(LoadedUnit { base, test })
}

/// Package name of a directory that holds only test files.
fn test_only_package_name(test_files: &[(String, Arc<SourceFile>)]) -> Option<String> {
    test_files
        .iter()
        .map(|(name, _)| name)
        .find(|name| !name.ends_with(EXTERNAL_TEST_SUFFIX))
        .or_else(|| test_files.first().map(|(name, _)| name))
        .map(|name| {
            name.strip_suffix(EXTERNAL_TEST_SUFFIX)
                .unwrap_or(name)
                .to_string()
        })
}
