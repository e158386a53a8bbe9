//! Target identifier hygiene: escaping source names and minting temporaries.

use std::collections::HashSet;

use lazy_static::lazy_static;

lazy_static! {
    /// Reserved words of the target language that cannot appear as bare
    /// identifiers.
    static ref RESERVED: HashSet<&'static str> = [
        "baremodule", "begin", "break", "catch", "const", "continue", "do",
        "else", "elseif", "end", "export", "false", "finally", "for",
        "function", "global", "if", "import", "let", "local", "macro",
        "module", "quote", "return", "struct", "true", "try", "using",
        "while", "where", "in", "isa", "abstract", "mutable", "primitive",
        "outer", "public",
    ]
    .into_iter()
    .collect();
}

/// Suffix appended to decorated parameter names.
pub const PARAM_MARK: char = '′';

/// Encodes `s` the way a standard JSON string encoder does, quotes included,
/// leaving non-ASCII characters as they are.
pub fn escape_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}

pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let first_ok = match chars.next() {
        Some(c) => c == '_' || c.is_alphabetic(),
        None => false,
    };
    first_ok
        && chars.all(|c| c == '_' || c == PARAM_MARK || c.is_alphanumeric())
        && !RESERVED.contains(s)
}

/// Returns `name` unchanged when it is a usable target identifier, and the
/// quoted `var"..."` form otherwise.
pub fn sanitize(name: &str) -> String {
    if is_valid_identifier(name) {
        name.to_string()
    } else {
        format!("var{}", escape_string(name))
    }
}

/// Internal name a parameter is received under before being rebound to
/// its source name inside the body.
pub fn decorate_param(name: &str) -> String {
    format!("_{name}{PARAM_MARK}")
}

/// Synthetic name source for one compilation unit.
///
/// Every name starts with `.`, which no source identifier can contain, so
/// temporaries never shadow user bindings.
#[derive(Debug, Default)]
pub struct NameGen {
    counter: usize,
}

impl NameGen {
    pub fn new() -> Self {
        NameGen { counter: 0 }
    }

    pub fn gensym(&mut self, hint: &str) -> String {
        self.counter += 1;
        format!(".{}_{}", hint, self.counter)
    }

    /// Number of names minted so far.
    pub fn count(&self) -> usize {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names_pass_through() {
        for name in ["x", "_private", "αβ", "x1", "a′"] {
            assert_eq!(sanitize(name), name);
        }
    }

    #[test]
    fn invalid_names_are_quoted() {
        assert_eq!(sanitize(".iter_1"), "var\".iter_1\"");
        assert_eq!(sanitize("end"), "var\"end\"");
        assert_eq!(sanitize("1x"), "var\"1x\"");
        assert_eq!(sanitize(""), "var\"\"");
        assert_eq!(sanitize("a\"b"), "var\"a\\\"b\"");
    }

    #[test]
    fn sanitize_is_stable_and_injective_on_invalid_names() {
        let names = ["end", "var\"end\"", ".x", "x.", "a b", "a\\b", "a\"b"];
        let out: HashSet<String> = names.iter().map(|n| sanitize(n)).collect();
        assert_eq!(out.len(), names.len());
        for n in names {
            assert_eq!(sanitize(n), sanitize(n));
        }
    }

    #[test]
    fn gensym_counts_from_one_and_never_repeats() {
        let mut names = NameGen::new();
        assert_eq!(names.gensym("iter"), ".iter_1");
        assert_eq!(names.gensym("iter"), ".iter_2");
        assert_eq!(names.gensym("f"), ".f_3");
        let minted: HashSet<String> = (0..100).map(|_| names.gensym("t")).collect();
        assert_eq!(minted.len(), 100);
        assert_eq!(names.count(), 103);
    }

    #[test]
    fn gensym_never_equals_a_sanitized_name() {
        let mut names = NameGen::new();
        let sym = names.gensym("x");
        assert!(!is_valid_identifier(&sym));
        assert_ne!(sanitize(&sym), sym);
    }

    #[test]
    fn decorated_parameters() {
        assert_eq!(decorate_param("x"), "_x′");
        assert!(is_valid_identifier(&decorate_param("x")));
    }
}
