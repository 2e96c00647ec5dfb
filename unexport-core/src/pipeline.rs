//! The unexport pipeline and its orchestration context.
//!
//! ```rust,ignore
//! use unexport_core::prelude::*;
//!
//! let units = load_targets(&["./...".to_string()])?;
//! let mut run = Unexporter::new(Policy::from_lists("", "Keep"), GorenameCommand::default())
//!     .verbose(true);
//! run.collect_symbols(&units);
//! run.unexport_symbols(&mut std::io::stdout())?;
//! run.print_results(&mut std::io::stdout())?;
//! ```

use std::fmt;
use std::io::Write;
use tracing::info;

use crate::classify::ErrorCategory;
use crate::collect::{collect_package_symbols, Candidate};
use crate::error::UnexportResult;
use crate::invoke::{AttemptStatus, RenameInvoker, StatusLine};
use crate::load::LoadedUnit;
use crate::naming::is_exported;
use crate::policy::Policy;
use crate::renamer::Renamer;
use crate::report::RenameReport;

/// Named pipeline phases. A failure in any phase aborts the run and is
/// reported as `PHASE: ERROR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    LoadConfig,
    LoadTargets,
    CollectSymbols,
    UnexportSymbols,
    PrintResults,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadConfig => "load config",
            Self::LoadTargets => "load targets",
            Self::CollectSymbols => "collect symbols",
            Self::UnexportSymbols => "unexport symbols",
            Self::PrintResults => "print results",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Orchestration context: the policy, the invoker, the candidates that
/// survived filtering, and the report.
#[derive(Debug)]
pub struct Unexporter<R> {
    policy: Policy,
    invoker: RenameInvoker<R>,
    verbose: bool,
    symbols: Vec<Candidate>,
    report: RenameReport,
}

impl<R: Renamer> Unexporter<R> {
    pub fn new(policy: Policy, renamer: R) -> Self {
        Self {
            policy,
            invoker: RenameInvoker::new(renamer),
            verbose: false,
            symbols: Vec::new(),
            report: RenameReport::new(),
        }
    }

    /// Print attempts without calling the renamer.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.invoker = self.invoker.dry_run(enabled);
        self
    }

    /// Print the success summary in [`print_results`](Self::print_results).
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Collects candidates from every unit and keeps those the policy allows.
    ///
    /// Each unit contributes its test variant when it has one, otherwise its
    /// base package. Returns the number of candidates kept.
    pub fn collect_symbols(&mut self, units: &[LoadedUnit]) -> usize {
        let mut total = 0;
        for unit in units {
            let all = collect_package_symbols(unit.analysis_package());
            total += all.len();
            self.symbols.extend(self.policy.filter(all));
        }
        info!(
            collected = total,
            kept = self.symbols.len(),
            "collected symbols"
        );
        self.symbols.len()
    }

    /// Candidates kept by the policy, in collection order.
    pub fn symbols(&self) -> &[Candidate] {
        &self.symbols
    }

    /// Attempts every exported candidate in order, one rename at a time.
    ///
    /// Writes `trying to unexport NAME... (STATUS)` per attempt. Refusals are
    /// recorded and the loop goes on; only a renamer that cannot run or a
    /// failed write stops it.
    pub fn unexport_symbols<W: Write>(&mut self, out: &mut W) -> UnexportResult<()> {
        for candidate in &self.symbols {
            if !is_exported(&candidate.name) {
                continue;
            }

            write!(out, "trying to unexport {}... ", candidate.name)?;
            out.flush()?;

            let Some(attempt) = self.invoker.attempt(candidate)? else {
                writeln!(out)?;
                continue;
            };
            writeln!(
                out,
                "({})",
                StatusLine {
                    name: &candidate.name,
                    attempt: &attempt
                }
            )?;
            if let AttemptStatus::Refused(ErrorCategory::Unknown(raw)) = &attempt.status {
                writeln!(out, "unknown error: {}", raw.trim_end())?;
            }

            self.report.record(candidate, &attempt);
        }

        info!(
            attempted = self.report.attempted().len(),
            unexported = self.report.success_count(),
            refused = self.report.failures().len(),
            "unexport finished"
        );
        Ok(())
    }

    /// Writes the success summary when verbose.
    pub fn print_results<W: Write>(&self, out: &mut W) -> UnexportResult<()> {
        if !self.verbose {
            return Ok(());
        }
        self.report.write_plain(out)
    }

    pub fn report(&self) -> &RenameReport {
        &self.report
    }

    pub fn into_report(self) -> RenameReport {
        self.report
    }
}
