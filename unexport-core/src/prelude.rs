//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use unexport_core::prelude::*;
//! ```

pub use crate::error::{UnexportError, UnexportResult};

pub use crate::load::{load_targets, LoadedUnit};

pub use crate::pipeline::{Phase, Unexporter};
pub use crate::policy::Policy;

pub use crate::renamer::{Address, GorenameCommand, RenameOutcome, Renamer};

pub use crate::classify::ErrorCategory;
pub use crate::report::RenameReport;

pub use crate::config::{load_config, UnexportConfig};
