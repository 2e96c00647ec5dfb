//! unexport-core: find exported Go identifiers nobody outside their package
//! needs, and unexport them through an external renamer.
//!
//! The crate decides *which* identifiers to try and *how to report* the
//! outcome. Whether a rename is safe is entirely up to the renamer
//! (`gorename` by default), which refuses renames that would break code.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use unexport_core::prelude::*;
//!
//! let units = load_targets(&["./...".to_string()])?;
//! let mut run = Unexporter::new(Policy::default(), GorenameCommand::default());
//! run.collect_symbols(&units);
//! run.unexport_symbols(&mut std::io::stdout())?;
//! ```
//!
//! # Module Organization
//!
//! - [`scan`], [`load`]: target specifiers to package units
//! - [`parse`]: tree-sitter-go parsing and source positions
//! - [`collect`]: package-level declared names
//! - [`policy`]: unexport/skip name sets
//! - [`naming`]: exported to unexported names
//! - [`renamer`]: the external rename tool seam
//! - [`invoke`]: one rename attempt per candidate
//! - [`classify`]: renamer refusal taxonomy
//! - [`report`]: plain and JSON results
//! - [`pipeline`]: the orchestration context and phases
//! - [`config`], [`logging`], [`error`]: ambient support

pub mod classify;
pub mod collect;
pub mod config;
pub mod error;
pub mod invoke;
pub mod load;
pub mod logging;
pub mod naming;
pub mod parse;
pub mod pipeline;
pub mod policy;
pub mod prelude;
pub mod renamer;
pub mod report;
pub mod scan;

// Error types
pub use error::{IoResultExt, UnexportError, UnexportResult};

// Configuration
pub use config::{load_config, load_config_file, RenamerConfig, UnexportConfig, CONFIG_FILE_NAME};

// Logging
pub use logging::init_structured_logging;

// Loading and parsing
pub use load::{assemble_unit, load_package_files, load_targets, LoadedUnit, Package, Target};
pub use parse::{read_source_file, Position, SourceFile};
pub use scan::{gather_go_files, gather_go_packages};

// Core pipeline
pub use classify::{classify, ErrorCategory};
pub use collect::{collect_file_symbols, collect_package_symbols, Candidate, DeclKind};
pub use invoke::{Attempt, AttemptStatus, RenameInvoker};
pub use naming::{is_exported, unexported_name};
pub use pipeline::{Phase, Unexporter};
pub use policy::{parse_name_list, Policy};
pub use renamer::{Address, GorenameCommand, RenameOutcome, Renamer, DEFAULT_RENAMER};
pub use report::{FailedRename, RenameReport, RenamedSymbol};
