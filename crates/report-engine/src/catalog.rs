//! Placeholder token definition and validation.
//!
//! A token is a two-character-delimited marker like `{{name}}`. Five inner
//! names are reserved and resolve from patient data or the current date;
//! everything else is a custom field filled in at report completion time.

use crate::error::ReportError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

pub const OPEN_DELIM: &str = "{{";
pub const CLOSE_DELIM: &str = "}}";

/// Inner names resolved automatically, never from user input.
pub const RESERVED_NAMES: &[&str] = &["name", "age", "sex", "date", "regd_no"];

lazy_static! {
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\{\{[^{}]+\}\}").unwrap();
}

/// A validated placeholder marker, stored with its delimiters.
///
/// Tokens are not unique within a template: the same token placed twice
/// means "fill the same value in two locations".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceholderToken(String);

impl PlaceholderToken {
    /// Validate a raw marker string.
    ///
    /// Fails when either delimiter is missing or the inner name is empty
    /// after trimming. No other charset restriction: whitespace and
    /// free-form description text between the delimiters are accepted
    /// verbatim.
    pub fn parse(raw: &str) -> Result<Self, ReportError> {
        let inner = raw
            .strip_prefix(OPEN_DELIM)
            .and_then(|s| s.strip_suffix(CLOSE_DELIM))
            .ok_or_else(|| ReportError::InvalidToken(raw.to_string()))?;

        if inner.trim().is_empty() {
            return Err(ReportError::InvalidToken(raw.to_string()));
        }

        Ok(Self(raw.to_string()))
    }

    /// The text between the delimiters, untrimmed.
    pub fn inner_name(&self) -> &str {
        &self.0[OPEN_DELIM.len()..self.0.len() - CLOSE_DELIM.len()]
    }

    /// True for exactly the five system tokens.
    pub fn is_reserved(&self) -> bool {
        RESERVED_NAMES.contains(&self.inner_name())
    }

    /// The full delimited marker, e.g. `{{result_cbc}}`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceholderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Find candidate placeholder markers in extracted page text.
///
/// Returns every match in document order, duplicates included.
pub fn scan_tokens(text: &str) -> Vec<PlaceholderToken> {
    TOKEN_PATTERN
        .find_iter(text)
        .filter_map(|m| PlaceholderToken::parse(m.as_str()).ok())
        .collect()
}
