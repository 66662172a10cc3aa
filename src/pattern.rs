//! Filename pattern parsing and matching.
//!
//! Options like `always_overwrite` and `exclude` accept either literal
//! filenames or regular expressions. A plain string is a literal; a string
//! wrapped in slashes (`/\.map$/`, optionally with a trailing `i` for
//! case-insensitive matching) is compiled as a regex.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::str::FromStr;

/// A single filename pattern: an exact name or a regular expression.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches by string equality against the whole filename.
    Literal(String),
    /// Matches anywhere in the filename.
    Regex(Regex),
}

impl Pattern {
    /// Compile a regex pattern directly (without the slash syntax).
    pub fn regex(body: &str) -> Result<Self> {
        let re = Regex::new(body).with_context(|| format!("Invalid pattern regex '{}'", body))?;
        Ok(Pattern::Regex(re))
    }

    /// Check whether `filename` matches this pattern.
    pub fn matches(&self, filename: &str) -> bool {
        match self {
            Pattern::Literal(name) => name == filename,
            Pattern::Regex(re) => re.is_match(filename),
        }
    }
}

impl FromStr for Pattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        // Slash-wrapped patterns become regexes, like the /.../ notation
        // most bundler configs use. Everything else is a literal filename.
        let (body, insensitive) = match s.strip_suffix('i') {
            Some(trimmed) if trimmed.len() >= 2 && trimmed.starts_with('/') && trimmed.ends_with('/') => {
                (trimmed, true)
            }
            _ => (s, false),
        };

        if body.len() >= 2 && body.starts_with('/') && body.ends_with('/') {
            let inner = &body[1..body.len() - 1];
            let source = if insensitive {
                format!("(?i){}", inner)
            } else {
                inner.to_string()
            };
            let re = Regex::new(&source)
                .with_context(|| format!("Invalid pattern regex '{}'", s))?;
            Ok(Pattern::Regex(re))
        } else {
            Ok(Pattern::Literal(s.to_string()))
        }
    }
}

/// Zero or more patterns. An empty set stands in for an unset option.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

/// Config files may give a single pattern or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(PatternString),
    Many(Vec<PatternString>),
}

/// Newtype so list elements go through the same string parsing.
#[derive(Deserialize)]
#[serde(try_from = "String")]
struct PatternString(Pattern);

impl TryFrom<String> for PatternString {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        Ok(PatternString(s.parse()?))
    }
}

impl From<OneOrMany> for PatternSet {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(p) => PatternSet { patterns: vec![p.0] },
            OneOrMany::Many(ps) => PatternSet {
                patterns: ps.into_iter().map(|p| p.0).collect(),
            },
        }
    }
}

impl From<Vec<Pattern>> for PatternSet {
    fn from(patterns: Vec<Pattern>) -> Self {
        PatternSet { patterns }
    }
}

impl PatternSet {
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Parse a list of pattern strings (CLI flag values).
    pub fn parse_all<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        let patterns = values
            .iter()
            .map(|v| v.as_ref().parse())
            .collect::<Result<Vec<Pattern>>>()?;
        Ok(PatternSet { patterns })
    }
}

/// Match `filename` against an optional pattern set.
///
/// With `required` an empty set matches nothing (exclude semantics: no
/// exclude patterns means exclude nothing). Without it an empty set matches
/// everything (applies-to semantics: no file-type filter means the filter
/// applies to every file).
pub fn is_match(filename: &str, patterns: &PatternSet, required: bool) -> bool {
    if patterns.is_empty() {
        return !required;
    }
    patterns.patterns.iter().any(|p| p.matches(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        let p: Pattern = "index.html".parse().unwrap();
        assert!(p.matches("index.html"));
        assert!(!p.matches("index.htm"));
        assert!(!p.matches("sub/index.html"));
    }

    #[test]
    fn test_parse_regex() {
        let p: Pattern = "/\\.map$/".parse().unwrap();
        assert!(p.matches("app.js.map"));
        assert!(!p.matches("app.js"));
    }

    #[test]
    fn test_parse_regex_case_insensitive() {
        let p: Pattern = "/\\.js/i".parse().unwrap();
        assert!(p.matches("APP.JS"));
        assert!(p.matches("app.js.map"), "matches anywhere, like String.match");
        assert!(!p.matches("style.css"));
    }

    #[test]
    fn test_parse_invalid_regex() {
        let result = "/[unclosed/".parse::<Pattern>();
        assert!(result.is_err(), "bad regex should fail at parse time");
    }

    #[test]
    fn test_empty_set_semantics() {
        let empty = PatternSet::default();
        // Applies-to: no filter means everything applies.
        assert!(is_match("main.js", &empty, false));
        // Exclude: no patterns means nothing is excluded.
        assert!(!is_match("main.js", &empty, true));
    }

    #[test]
    fn test_set_matches_any() {
        let set = PatternSet::parse_all(&["index.html", "/\\.txt$/"]).unwrap();
        assert!(is_match("index.html", &set, true));
        assert!(is_match("notes.txt", &set, true));
        assert!(!is_match("main.js", &set, true));
    }

    #[test]
    fn test_literal_with_slash_in_name_is_not_regex() {
        // Only fully slash-wrapped strings are regexes.
        let p: Pattern = "js/app.js".parse().unwrap();
        assert!(matches!(p, Pattern::Literal(_)));
    }
}
