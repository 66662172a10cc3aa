//! Filter settings: defaults and TOML loading.
//!
//! Settings are built once, before attachment, and never change afterwards.
//!
//! ```toml
//! always_overwrite = ["index.html"]
//! exclude = ['/\.map$/']
//! test = '/\.js/i'
//! production = true
//! split_chunks = true
//! ```

use crate::pattern::{Pattern, PatternSet};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Configuration for one attached filter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Files re-emitted every pass, even when a copy already exists on disk.
    pub always_overwrite: PatternSet,
    /// Files removed from consideration entirely: never skipped, never cleaned up.
    pub exclude: PatternSet,
    /// File-type filter. Files failing it are left alone by both phases.
    pub test: PatternSet,
    /// Only activate for production-mode builds.
    pub production: bool,
    /// Toggle the host's code-splitting configuration at attachment.
    pub split_chunks: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            always_overwrite: PatternSet::default(),
            exclude: PatternSet::default(),
            test: default_test(),
            production: true,
            split_chunks: true,
        }
    }
}

/// The stock file-type filter: JavaScript outputs, case-insensitive.
fn default_test() -> PatternSet {
    let pattern = Pattern::regex(r"(?i)\.js").expect("default test pattern is valid");
    PatternSet::from(vec![pattern])
}

impl Settings {
    /// Parse settings from TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse settings TOML")
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::is_match;

    #[test]
    fn test_defaults_match_stock_behavior() {
        let settings = Settings::default();
        assert!(settings.production);
        assert!(settings.split_chunks);
        assert!(settings.always_overwrite.is_empty());
        assert!(settings.exclude.is_empty());
        // Default test pattern covers .js outputs, case-insensitively.
        assert!(is_match("main.JS", &settings.test, false));
        assert!(!is_match("style.css", &settings.test, false));
    }

    #[test]
    fn test_parse_toml() {
        let settings = Settings::from_toml_str(
            r#"
            always_overwrite = ["index.html", '/\.html$/']
            exclude = 'vendor.js'
            production = false
            "#,
        )
        .unwrap();

        assert!(!settings.production);
        assert!(settings.split_chunks, "unset fields keep their defaults");
        assert!(is_match("about.html", &settings.always_overwrite, true));
        assert!(is_match("vendor.js", &settings.exclude, true));
        assert!(!is_match("app.js", &settings.exclude, true));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Settings::from_toml_str("alwaysOverwrite = ['index.html']");
        assert!(result.is_err(), "misspelled option names should not be ignored");
    }

    #[test]
    fn test_bad_regex_rejected() {
        let result = Settings::from_toml_str(r"exclude = '/[unclosed/'");
        assert!(result.is_err());
    }
}
