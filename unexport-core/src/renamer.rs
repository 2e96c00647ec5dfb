//! The external rename tool seam.
//!
//! All correctness checking (shadowing, interfaces, clients in other
//! packages) is the renamer's job. This crate only asks it to rename the
//! identifier at an [`Address`] and reports what it said.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

use crate::error::{UnexportError, UnexportResult};

/// Default rename tool.
pub const DEFAULT_RENAMER: &str = "gorename";

/// A file and the byte offset of an identifier's first byte in it.
///
/// Displays as `file:#offset`, the renamer's `-offset` syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub file: PathBuf,
    pub offset: usize,
}

impl Address {
    pub fn new(file: impl Into<PathBuf>, offset: usize) -> Self {
        Self {
            file: file.into(),
            offset,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:#{}", self.file.display(), self.offset)
    }
}

/// What the renamer did with one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The identifier and all its references were renamed.
    Renamed,
    /// The renamer declined; the text is its diagnostic output.
    Refused(String),
}

/// Performs program-wide renames.
///
/// Calls block until the rename is done. `Err` means the tool itself could
/// not run; a refusal is `Ok(RenameOutcome::Refused(_))`.
pub trait Renamer {
    fn rename(&mut self, address: &Address, new_name: &str) -> UnexportResult<RenameOutcome>;
}

impl<R: Renamer + ?Sized> Renamer for &mut R {
    fn rename(&mut self, address: &Address, new_name: &str) -> UnexportResult<RenameOutcome> {
        (**self).rename(address, new_name)
    }
}

impl<R: Renamer + ?Sized> Renamer for Box<R> {
    fn rename(&mut self, address: &Address, new_name: &str) -> UnexportResult<RenameOutcome> {
        (**self).rename(address, new_name)
    }
}

/// Runs `gorename -offset FILE:#N -to NAME` (or a compatible program).
#[derive(Debug, Clone)]
pub struct GorenameCommand {
    program: String,
    extra_args: Vec<String>,
}

impl Default for GorenameCommand {
    fn default() -> Self {
        Self::new(DEFAULT_RENAMER)
    }
}

impl GorenameCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Arguments placed before `-offset`, e.g. `-force`.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for one request.
    pub fn args_for(&self, address: &Address, new_name: &str) -> Vec<String> {
        let mut args = self.extra_args.clone();
        args.push("-offset".to_string());
        args.push(address.to_string());
        args.push("-to".to_string());
        args.push(new_name.to_string());
        args
    }
}

impl Renamer for GorenameCommand {
    fn rename(&mut self, address: &Address, new_name: &str) -> UnexportResult<RenameOutcome> {
        let args = self.args_for(address, new_name);
        debug!(program = %self.program, args = ?args, "invoking renamer");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| UnexportError::renamer(&self.program, e))?;

        if output.status.success() {
            return Ok(RenameOutcome::Renamed);
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(RenameOutcome::Refused(combined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display() {
        let address = Address::new("pkg/a.go", 120);
        assert_eq!(address.to_string(), "pkg/a.go:#120");
    }

    #[test]
    fn test_args_for() {
        let cmd = GorenameCommand::default().with_args(["-force"]);
        assert_eq!(cmd.program(), "gorename");
        assert_eq!(
            cmd.args_for(&Address::new("a.go", 7), "foo"),
            vec!["-force", "-offset", "a.go:#7", "-to", "foo"]
        );
    }

    #[test]
    fn test_missing_program_is_error() {
        let mut cmd = GorenameCommand::new("unexport-test-no-such-renamer-binary");
        let err = cmd.rename(&Address::new("a.go", 0), "a").unwrap_err();
        assert!(matches!(err, UnexportError::Renamer { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_decides_outcome() {
        // `true` and `false` ignore their arguments.
        let mut ok = GorenameCommand::new("true");
        assert_eq!(
            ok.rename(&Address::new("a.go", 0), "a").unwrap(),
            RenameOutcome::Renamed
        );

        let mut refused = GorenameCommand::new("false");
        assert!(matches!(
            refused.rename(&Address::new("a.go", 0), "a").unwrap(),
            RenameOutcome::Refused(_)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_refusal_text_is_combined_output() {
        let mut cmd = GorenameCommand::new("sh").with_args([
            "-c",
            "echo out; echo 'would make it unexported, breaking references' >&2; exit 1",
        ]);
        match cmd.rename(&Address::new("a.go", 0), "a").unwrap() {
            RenameOutcome::Refused(text) => {
                assert!(text.starts_with("out\n"));
                assert!(text.contains("breaking references"));
            }
            other => panic!("expected refusal, got {:?}", other),
        }
    }
}
