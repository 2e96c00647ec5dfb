//! Package-level symbol collection from Go syntax trees.
//!
//! Collects the names introduced by top-level declarations:
//! - `var` and `const` specs, including grouped `( ... )` forms and specs
//!   that bind several names
//! - `type` specs and aliases
//! - functions and methods (a method is collected like a free function)
//!
//! Declarations inside function bodies are never visited.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tree_sitter::Node;

use crate::load::Package;
use crate::naming::is_exported;
use crate::parse::{Position, SourceFile};

/// What kind of declaration introduced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    /// `var` or `const`
    Value,
    /// `type`
    Type,
    /// `func`, including methods
    Func,
}

/// A package-level declared name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    /// Computed from the first code point's case at collection time.
    pub exported: bool,
    pub kind: DeclKind,
    pub position: Position,
}

impl Candidate {
    fn new(name: &str, kind: DeclKind, position: Position) -> Self {
        Self {
            name: name.to_string(),
            exported: is_exported(name),
            kind,
            position,
        }
    }
}

/// Collects candidates from every file of `package`, in file order.
pub fn collect_package_symbols(package: &Package) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(package.files.len() * 8);
    for file in &package.files {
        out.extend(collect_file_symbols(file));
    }
    debug!(
        package = %package.name,
        dir = %package.dir.display(),
        candidates = out.len(),
        "collected package symbols"
    );
    out
}

/// Collects candidates from one file, in declaration order.
///
/// Files without an originating path yield nothing.
pub fn collect_file_symbols(file: &SourceFile) -> Vec<Candidate> {
    if file.path().is_none() {
        return Vec::new();
    }

    let mut collector = SymbolCollector {
        file,
        results: Vec::with_capacity(16),
    };
    let root = file.root();
    let mut cursor = root.walk();
    for decl in root.named_children(&mut cursor) {
        collector.visit_top_level(decl);
    }
    collector.results
}

struct SymbolCollector<'f> {
    file: &'f SourceFile,
    results: Vec<Candidate>,
}

impl<'f> SymbolCollector<'f> {
    fn visit_top_level(&mut self, decl: Node<'f>) {
        match decl.kind() {
            "var_declaration" | "const_declaration" => {
                self.visit_specs(decl, DeclKind::Value);
            }
            "type_declaration" => {
                self.visit_specs(decl, DeclKind::Type);
            }
            "function_declaration" | "method_declaration" => {
                self.record_names(decl, DeclKind::Func);
            }
            _ => {}
        }
    }

    /// Walks a declaration down to its specs. Grouped forms wrap the specs in
    /// a list node; comments can sit between them.
    fn visit_specs(&mut self, node: Node<'f>, kind: DeclKind) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "var_spec" | "const_spec" | "type_spec" | "type_alias" => {
                    self.record_names(child, kind);
                }
                "comment" => {}
                _ if child.named_child_count() > 0 => self.visit_specs(child, kind),
                _ => {}
            }
        }
    }

    /// Records every identifier in the `name` field of `node`.
    fn record_names(&mut self, node: Node<'f>, kind: DeclKind) {
        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            if !is_name_node(&name) {
                continue;
            }
            let (Some(text), Some(position)) = (self.file.text(&name), self.file.position(&name))
            else {
                continue;
            };
            self.results.push(Candidate::new(text, kind, position));
        }
    }
}

fn is_name_node(node: &Node<'_>) -> bool {
    matches!(
        node.kind(),
        "identifier" | "type_identifier" | "field_identifier"
    )
}
