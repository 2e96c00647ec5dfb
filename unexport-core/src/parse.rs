//! Go source parsing with tree-sitter and the position service built on it.
//!
//! A [`SourceFile`] owns its text and syntax tree. Trees are error-tolerant:
//! a file with syntax errors still parses, and the broken regions show up as
//! `ERROR` nodes that the collector never matches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

use crate::error::{IoResultExt, UnexportError, UnexportResult};
use crate::renamer::Address;

/// Maximum file size to parse (10 MB).
const MAX_FILE_SIZE: usize = 10_000_000;

/// Suffix of Go test files.
pub const TEST_FILE_SUFFIX: &str = "_test.go";

/// Resolved source position of a syntax node.
///
/// `line` and `column` are 1-based; `column` counts bytes. `offset` is the
/// 0-based byte offset into the file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    /// The renamer address of the identifier starting at this position.
    pub fn address(&self) -> Address {
        Address::new(self.file.clone(), self.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A parsed Go source file.
#[derive(Debug)]
pub struct SourceFile {
    path: Option<PathBuf>,
    source: String,
    tree: Tree,
}

impl SourceFile {
    /// Parse `source` as the content of the file at `path`.
    pub fn parse(path: impl Into<PathBuf>, source: String) -> UnexportResult<Self> {
        let path = path.into();
        let tree = parse_tree(&source).map_err(|msg| UnexportError::parse(&path, msg))?;
        Ok(Self {
            path: Some(path),
            source,
            tree,
        })
    }

    /// Parse a synthetic file that has no originating path.
    ///
    /// Such files are part of a package for loading purposes but the collector
    /// ignores them, since no renamer can address them.
    pub fn parse_synthetic(source: String) -> UnexportResult<Self> {
        let tree =
            parse_tree(&source).map_err(|msg| UnexportError::parse("<synthetic>", msg))?;
        Ok(Self {
            path: None,
            source,
            tree,
        })
    }

    /// Originating path, `None` for synthetic files.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Whether the parser had to recover from syntax errors.
    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Whether this is a `_test.go` file.
    pub fn is_test_file(&self) -> bool {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(TEST_FILE_SUFFIX))
    }

    /// Name from the `package` clause.
    pub fn package_name(&self) -> Option<&str> {
        let root = self.tree.root_node();
        let mut cursor = root.walk();
        let clause = root
            .named_children(&mut cursor)
            .find(|n| n.kind() == "package_clause")?;

        let mut clause_cursor = clause.walk();
        let ident = clause
            .named_children(&mut clause_cursor)
            .find(|n| n.kind() == "package_identifier")?;
        self.text(&ident)
    }

    /// Source text covered by a node.
    pub fn text(&self, node: &Node<'_>) -> Option<&str> {
        node.utf8_text(self.source.as_bytes()).ok()
    }

    /// Position of a node's first byte. Synthetic files have no positions.
    pub fn position(&self, node: &Node<'_>) -> Option<Position> {
        let file = self.path.clone()?;
        let point = node.start_position();
        Some(Position {
            file,
            line: point.row + 1,
            column: point.column + 1,
            offset: node.start_byte(),
        })
    }
}

fn parse_tree(source: &str) -> Result<Tree, String> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| format!("Failed to set tree-sitter language: {}", e))?;
    parser
        .parse(source, None)
        .ok_or_else(|| "tree-sitter returned no tree".to_string())
}

/// Reads and parses a Go file from disk.
pub fn read_source_file(path: &Path) -> UnexportResult<SourceFile> {
    let content = fs::read_to_string(path).with_path(path)?;
    if content.len() > MAX_FILE_SIZE {
        return Err(UnexportError::parse(
            path,
            format!("file too large ({} bytes)", content.len()),
        ));
    }
    SourceFile::parse(path, content)
}
