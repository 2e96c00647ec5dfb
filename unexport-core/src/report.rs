//! Run results and their output formats - plaintext and JSON.

use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Write;

use crate::classify::ErrorCategory;
use crate::collect::Candidate;
use crate::error::UnexportResult;
use crate::invoke::{Attempt, AttemptStatus};
use crate::parse::Position;

/// Key of a recorded rename: where the symbol was and what it was called.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolKey {
    pub position: Position,
    pub name: String,
}

/// A successful rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedSymbol {
    pub position: Position,
    pub from: String,
    pub to: String,
}

/// A refused rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRename {
    pub position: Position,
    pub name: String,
    pub new_name: String,
    pub category: ErrorCategory,
    pub description: &'static str,
    /// Renamer text when the refusal was not recognised.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// Everything recorded during the rename phase.
#[derive(Debug, Clone, Default)]
pub struct RenameReport {
    attempted: Vec<SymbolKey>,
    successes: BTreeMap<SymbolKey, RenamedSymbol>,
    failures: Vec<FailedRename>,
    planned: Vec<RenamedSymbol>,
}

impl RenameReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one attempt.
    pub fn record(&mut self, candidate: &Candidate, attempt: &Attempt) {
        let key = SymbolKey {
            position: candidate.position.clone(),
            name: candidate.name.clone(),
        };
        let renamed = RenamedSymbol {
            position: candidate.position.clone(),
            from: candidate.name.clone(),
            to: attempt.new_name.clone(),
        };
        self.attempted.push(key.clone());

        match &attempt.status {
            AttemptStatus::Renamed => {
                self.successes.insert(key, renamed);
            }
            AttemptStatus::DryRun => self.planned.push(renamed),
            AttemptStatus::Refused(category) => self.failures.push(FailedRename {
                position: candidate.position.clone(),
                name: candidate.name.clone(),
                new_name: attempt.new_name.clone(),
                category: category.clone(),
                description: category.description(),
                raw: category.raw_text().map(str::to_string),
            }),
        }
    }

    /// Names sent to the renamer (or planned in a dry run), in order.
    pub fn attempted(&self) -> &[SymbolKey] {
        &self.attempted
    }

    pub fn successes(&self) -> impl Iterator<Item = &RenamedSymbol> {
        self.successes.values()
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failures(&self) -> &[FailedRename] {
        &self.failures
    }

    pub fn planned(&self) -> &[RenamedSymbol] {
        &self.planned
    }

    /// Writes the success summary:
    ///
    /// ```text
    /// unexported:
    ///     pkg/a.go:3:6: Foo -> foo
    /// ```
    ///
    /// Nothing is written when there are no successes.
    pub fn write_plain<W: Write>(&self, out: &mut W) -> UnexportResult<()> {
        if self.successes.is_empty() {
            return Ok(());
        }
        writeln!(out, "unexported:")?;
        for s in self.successes.values() {
            writeln!(out, "\t{}: {} -> {}", s.position, s.from, s.to)?;
        }
        Ok(())
    }

    /// JSON document with every recorded outcome.
    pub fn to_json(&self) -> serde_json::Value {
        let attempted: Vec<_> = self
            .attempted
            .iter()
            .map(|k| json!({ "name": k.name, "position": k.position.to_string() }))
            .collect();
        let unexported: Vec<_> = self.successes.values().collect();

        json!({
            "attempted": attempted,
            "unexported": unexported,
            "failed": self.failures,
            "skipped_dry_run": self.planned,
        })
    }

    /// Writes the JSON document, pretty-printed.
    pub fn write_json<W: Write>(&self, out: &mut W) -> UnexportResult<()> {
        let text = serde_json::to_string_pretty(&self.to_json()).map_err(std::io::Error::other)?;
        writeln!(out, "{}", text)?;
        Ok(())
    }
}
