//! Include/exclude policy for rename candidates.

use std::collections::HashSet;

use crate::collect::Candidate;

/// Which candidates may be attempted.
///
/// An empty unexport set means every name is eligible. The skip set always
/// wins over the unexport set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    unexport: HashSet<String>,
    skip: HashSet<String>,
}

impl Policy {
    pub fn new(
        unexport: impl IntoIterator<Item = impl Into<String>>,
        skip: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            unexport: clean_names(unexport),
            skip: clean_names(skip),
        }
    }

    /// Builds a policy from comma-separated lists, as given on the command line.
    pub fn from_lists(unexport: &str, skip: &str) -> Self {
        Self::new(parse_name_list(unexport), parse_name_list(skip))
    }

    /// True when no unexport set was given, so every name is eligible.
    pub fn attempts_all(&self) -> bool {
        self.unexport.is_empty()
    }

    pub fn unexport_set(&self) -> &HashSet<String> {
        &self.unexport
    }

    pub fn skip_set(&self) -> &HashSet<String> {
        &self.skip
    }

    /// Whether a candidate with this name is retained.
    pub fn allows(&self, name: &str) -> bool {
        (self.attempts_all() || self.unexport.contains(name)) && !self.skip.contains(name)
    }

    /// Keeps the candidates this policy allows, preserving order.
    pub fn filter(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|c| self.allows(&c.name))
            .collect()
    }
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_name_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn clean_names(names: impl IntoIterator<Item = impl Into<String>>) -> HashSet<String> {
    names
        .into_iter()
        .map(Into::into)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::DeclKind;
    use crate::parse::Position;
    use std::path::PathBuf;

    fn candidate(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            exported: crate::naming::is_exported(name),
            kind: DeclKind::Func,
            position: Position {
                file: PathBuf::from("p.go"),
                line: 1,
                column: 1,
                offset: 0,
            },
        }
    }

    fn filtered(policy: &Policy, names: &[&str]) -> Vec<String> {
        let candidates = names.iter().map(|n| candidate(n)).collect();
        policy.filter(candidates).into_iter().map(|c| c.name).collect()
    }

    #[test]
    fn test_parse_name_list() {
        assert_eq!(parse_name_list("Foo, Bar,,Baz "), vec!["Foo", "Bar", "Baz"]);
        assert!(parse_name_list("").is_empty());
        assert!(parse_name_list(" , ").is_empty());
    }

    #[test]
    fn test_empty_policy_allows_everything() {
        let policy = Policy::default();
        assert!(policy.attempts_all());
        assert_eq!(filtered(&policy, &["Foo", "bar"]), vec!["Foo", "bar"]);
    }

    #[test]
    fn test_empty_flag_text_means_all() {
        let policy = Policy::from_lists("", "");
        assert!(policy.attempts_all());
        assert!(policy.allows("Anything"));
    }

    #[test]
    fn test_skip_excludes_from_all() {
        let policy = Policy::new(Vec::<String>::new(), ["Foo"]);
        assert_eq!(filtered(&policy, &["Foo", "Bar", "Baz"]), vec!["Bar", "Baz"]);
    }

    #[test]
    fn test_unexport_set_restricts() {
        let policy = Policy::new(["Bar"], Vec::<String>::new());
        assert_eq!(filtered(&policy, &["Foo", "Bar", "Baz"]), vec!["Bar"]);
    }

    #[test]
    fn test_skip_wins_over_unexport() {
        let policy = Policy::from_lists("Foo,Bar", "Foo");
        assert!(!policy.allows("Foo"));
        assert!(policy.allows("Bar"));
        assert!(!policy.allows("Baz"));
    }
}
