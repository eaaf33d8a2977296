//! The place-name query accepted at the orchestration boundary.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Rejection of raw input before it reaches the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("place name is empty")]
    EmptyQuery,
}

/// A non-empty place name, trimmed of surrounding whitespace.
///
/// Trimming is the only normalization: case, punctuation and inner
/// whitespace are preserved exactly as typed or transcribed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Parses raw user input into a query.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyQuery`] if `raw` is empty or whitespace only.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyQuery);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let q = Query::parse("  Paris \n").unwrap();
        assert_eq!(q.as_str(), "Paris");
    }

    #[test]
    fn parse_preserves_case_and_punctuation() {
        let q = Query::parse("St. John's,  Newfoundland").unwrap();
        assert_eq!(q.as_str(), "St. John's,  Newfoundland");
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(Query::parse(""), Err(InputError::EmptyQuery));
    }

    #[test]
    fn parse_rejects_whitespace_only_input() {
        assert_eq!(Query::parse(" \t  "), Err(InputError::EmptyQuery));
    }

    #[test]
    fn serializes_as_plain_string() {
        let q = Query::parse("Oslo").unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"Oslo\"");
    }
}
