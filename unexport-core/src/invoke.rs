//! Rename invocation for single candidates.
//!
//! The invoker turns a candidate into an [`Address`] and a new name, asks the
//! renamer, and classifies a refusal. It never retries: the renamer's answer
//! is final for that candidate.

use std::fmt;
use tracing::{debug, warn};

use crate::classify::{classify, ErrorCategory};
use crate::collect::Candidate;
use crate::error::UnexportResult;
use crate::naming::{is_exported, unexported_name};
use crate::renamer::{Address, RenameOutcome, Renamer};

/// Result of one rename attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptStatus {
    Renamed,
    Refused(ErrorCategory),
    /// Dry run: the renamer was not called.
    DryRun,
}

/// One attempted candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub address: Address,
    pub new_name: String,
    pub status: AttemptStatus,
}

/// Status text shown in parentheses after `trying to unexport NAME...`.
pub struct StatusLine<'a> {
    pub name: &'a str,
    pub attempt: &'a Attempt,
}

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attempt.status {
            AttemptStatus::Renamed => f.write_str("success"),
            AttemptStatus::Refused(category) => write!(f, "impossible: {}", category),
            AttemptStatus::DryRun => {
                write!(f, "dry-run: {} -> {}", self.name, self.attempt.new_name)
            }
        }
    }
}

/// Sends candidates to a [`Renamer`], one at a time.
#[derive(Debug)]
pub struct RenameInvoker<R> {
    renamer: R,
    dry_run: bool,
}

impl<R: Renamer> RenameInvoker<R> {
    pub fn new(renamer: R) -> Self {
        Self {
            renamer,
            dry_run: false,
        }
    }

    /// Compute attempts without calling the renamer.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn renamer(&self) -> &R {
        &self.renamer
    }

    pub fn into_renamer(self) -> R {
        self.renamer
    }

    /// Attempts to unexport one candidate.
    ///
    /// Returns `Ok(None)` without touching the renamer when the name is not
    /// exported. `Err` only when the renamer cannot be run at all.
    pub fn attempt(&mut self, candidate: &Candidate) -> UnexportResult<Option<Attempt>> {
        if !is_exported(&candidate.name) {
            return Ok(None);
        }

        let address = candidate.position.address();
        let new_name = unexported_name(&candidate.name)?;

        if self.dry_run {
            debug!(name = %candidate.name, %address, "dry run, renamer not called");
            return Ok(Some(Attempt {
                address,
                new_name,
                status: AttemptStatus::DryRun,
            }));
        }

        let status = match self.renamer.rename(&address, &new_name)? {
            RenameOutcome::Renamed => {
                debug!(name = %candidate.name, %new_name, %address, "renamed");
                AttemptStatus::Renamed
            }
            RenameOutcome::Refused(text) => {
                let category = classify(&text);
                match &category {
                    ErrorCategory::Unknown(raw) => warn!(
                        name = %candidate.name,
                        %address,
                        output = %raw.trim_end(),
                        "unrecognised renamer refusal"
                    ),
                    known => debug!(
                        name = %candidate.name,
                        %address,
                        category = known.code(),
                        "rename refused"
                    ),
                }
                AttemptStatus::Refused(category)
            }
        };

        Ok(Some(Attempt {
            address,
            new_name,
            status,
        }))
    }
}
