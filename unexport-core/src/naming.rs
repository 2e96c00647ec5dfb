//! Exported/unexported name handling.
//!
//! Go visibility is decided by the first code point: an upper-case letter
//! exports the name.

use crate::error::{UnexportError, UnexportResult};

/// Whether `name` is exported (its first code point is upper-case).
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Lower-cases exactly the first code point of `name`.
///
/// `Foo` becomes `foo`, `HTTPClient` becomes `hTTPClient`. If lower-casing
/// the first code point expands to several code points, only the first of
/// them is kept, so the result always differs from `name` in one code point
/// at most.
///
/// # Errors
///
/// Returns [`UnexportError::InvalidName`] for the empty name.
pub fn unexported_name(name: &str) -> UnexportResult<String> {
    let mut chars = name.chars();
    let first = chars
        .next()
        .ok_or_else(|| UnexportError::invalid_name(name, "empty name cannot be unexported"))?;
    let lower = first.to_lowercase().next().unwrap_or(first);

    let rest = chars.as_str();
    let mut out = String::with_capacity(lower.len_utf8() + rest.len());
    out.push(lower);
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_exported() {
        assert!(is_exported("Foo"));
        assert!(is_exported("X"));
        assert!(is_exported("Ärger"));
        assert!(!is_exported("foo"));
        assert!(!is_exported("_Foo"));
        assert!(!is_exported("日本"));
        assert!(!is_exported(""));
    }

    #[test]
    fn test_unexported_name() {
        assert_eq!(unexported_name("Foo").unwrap(), "foo");
        assert_eq!(unexported_name("HTTPClient").unwrap(), "hTTPClient");
        assert_eq!(unexported_name("X").unwrap(), "x");
        assert_eq!(unexported_name("Ärger").unwrap(), "ärger");
        assert_eq!(unexported_name("already").unwrap(), "already");
    }

    #[test]
    fn test_only_first_code_point_changes() {
        for name in ["Foo", "ABC", "Σigma", "ÉTÉ", "Z9_Q", "İstanbul"] {
            let out = unexported_name(name).unwrap();
            let mut original = name.chars();
            let mut changed = out.chars();
            let first = original.next().unwrap();
            assert_eq!(changed.next(), first.to_lowercase().next());
            assert_eq!(changed.as_str(), original.as_str());
        }
    }

    #[test]
    fn test_empty_name_is_invalid() {
        let err = unexported_name("").unwrap_err();
        assert!(matches!(err, UnexportError::InvalidName { .. }));
    }
}
