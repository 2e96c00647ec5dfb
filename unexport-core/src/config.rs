//! Configuration loading from unexport.toml.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{IoResultExt, UnexportError, UnexportResult};

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "unexport.toml";

/// Main configuration structure for unexport.toml.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UnexportConfig {
    /// Names to unexport. Absent or empty means every exported name.
    pub unexport: Option<Vec<String>>,
    /// Names that must never be unexported.
    pub skip: Option<Vec<String>>,
    /// Print the success summary after renaming.
    pub verbose: Option<bool>,
    /// External rename tool settings.
    pub renamer: Option<RenamerConfig>,
}

/// Rename tool configuration.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RenamerConfig {
    /// Executable to run, `gorename` when unset.
    pub program: Option<String>,
    /// Extra arguments placed before `-offset`.
    pub args: Option<Vec<String>>,
}

/// Loads configuration from `dir/unexport.toml` if it exists.
pub fn load_config(dir: &Path) -> UnexportResult<Option<UnexportConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

/// Loads configuration from an explicit file. A missing file is an error.
pub fn load_config_file(path: &Path) -> UnexportResult<UnexportConfig> {
    let content = fs::read_to_string(path).with_path(path)?;
    toml::from_str(&content)
        .map_err(|e| UnexportError::config(path, format!("Invalid {}: {}", CONFIG_FILE_NAME, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_temp_dir(name: &str) -> std::path::PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir()
            .join("unexport_config_test")
            .join(format!("{}_{}_{}", name, std::process::id(), id));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = create_temp_dir("missing");
        assert_eq!(load_config(&dir).unwrap(), None);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let dir = create_temp_dir("full");
        fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"
unexport = ["Foo", "Bar"]
skip = ["Keep"]
verbose = true

[renamer]
program = "/opt/go/bin/gorename"
args = ["-force"]
"#,
        )
        .unwrap();

        let cfg = load_config(&dir).unwrap().unwrap();
        assert_eq!(cfg.unexport, Some(vec!["Foo".to_string(), "Bar".to_string()]));
        assert_eq!(cfg.skip, Some(vec!["Keep".to_string()]));
        assert_eq!(cfg.verbose, Some(true));
        let renamer = cfg.renamer.unwrap();
        assert_eq!(renamer.program.as_deref(), Some("/opt/go/bin/gorename"));
        assert_eq!(renamer.args, Some(vec!["-force".to_string()]));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = create_temp_dir("unknown");
        fs::write(dir.join(CONFIG_FILE_NAME), "unexported = [\"Foo\"]\n").unwrap();

        let err = load_config(&dir).unwrap_err();
        assert!(matches!(err, UnexportError::Config { .. }));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = create_temp_dir("explicit");
        let err = load_config_file(&dir.join("nope.toml")).unwrap_err();
        assert!(matches!(err, UnexportError::Io { .. }));
        fs::remove_dir_all(&dir).ok();
    }
}
