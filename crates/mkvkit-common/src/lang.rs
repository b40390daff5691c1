//! Language code lists.
//!
//! Tracks are tagged with ISO 639-2 codes (`eng`, `fre`, `jpn`, `und`).
//! Command line flags and config files accept either a comma separated list
//! of codes or the word `all`, which stands for a configured default set.

use std::fmt;
use std::str::FromStr;

/// Error returned when a language list cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid language list: {0}")]
pub struct ParseLanguageError(pub String);

/// A language selection as written by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSpec {
    /// The `all` sentinel; resolves to a default set.
    All,
    /// An explicit ordered list of codes, lower-cased and de-duplicated.
    Codes(Vec<String>),
}

impl LanguageSpec {
    /// Resolve to concrete codes, expanding `All` to `defaults`.
    pub fn resolve(&self, defaults: &[String]) -> Vec<String> {
        match self {
            LanguageSpec::All => defaults.to_vec(),
            LanguageSpec::Codes(codes) => codes.clone(),
        }
    }
}

/// Check that `code` looks like an ISO 639-2 code.
pub fn is_language_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Parse a comma separated code list into lower-cased, unique codes.
///
/// Order of first appearance is kept. Empty items are ignored.
pub fn parse_language_list(s: &str) -> Result<Vec<String>, ParseLanguageError> {
    let mut codes: Vec<String> = Vec::new();
    for item in s.split(',').map(str::trim).filter(|i| !i.is_empty()) {
        if !is_language_code(item) {
            return Err(ParseLanguageError(format!(
                "'{}' is not a three letter code",
                item
            )));
        }
        let code = item.to_ascii_lowercase();
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    Ok(codes)
}

impl FromStr for LanguageSpec {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(LanguageSpec::All);
        }
        let codes = parse_language_list(s)?;
        if codes.is_empty() {
            return Err(ParseLanguageError("empty list".to_string()));
        }
        Ok(LanguageSpec::Codes(codes))
    }
}

impl fmt::Display for LanguageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSpec::All => write!(f, "all"),
            LanguageSpec::Codes(codes) => write!(f, "{}", codes.join(",")),
        }
    }
}
