//! Parse failures and construction errors.

use std::fmt::{Display, Formatter};

/// How many characters of unparsed input to show in failure messages.
const PREVIEW_CHARS: usize = 10;

/// Describes the unparsed input at a failure for use in messages.
pub(crate) fn found(rest: &str) -> String {
    if rest.is_empty() {
        String::from("end of input")
    } else {
        let preview = match rest.char_indices().nth(PREVIEW_CHARS) {
            Some((end, _)) => &rest[..end],
            None => rest,
        };
        format!("{preview:?}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The expected text was not at the cursor.
    LiteralMismatch,
    /// The pattern did not match at the cursor.
    PatternMismatch,
    /// Every branch of an alternation failed.
    AlternativesExhausted,
    /// A repetition requiring at least one item captured none.
    RepetitionUnsatisfied,
    /// Unparsed input remained where the end of input was required.
    IncompleteConsumption,
    /// A recursive parser's handle was run after the parser was dropped.
    DanglingRecursion,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ErrorKind::LiteralMismatch => "literal mismatch",
            ErrorKind::PatternMismatch => "pattern mismatch",
            ErrorKind::AlternativesExhausted => "alternatives exhausted",
            ErrorKind::RepetitionUnsatisfied => "repetition unsatisfied",
            ErrorKind::IncompleteConsumption => "incomplete consumption",
            ErrorKind::DanglingRecursion => "dangling recursion",
        })
    }
}

/// The failure carried by a failed [ParseState](super::ParseState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    kind: ErrorKind,
    message: String,
}

impl Failure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// A failed parse, positioned in the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (line {line}, byte {position})")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    /// The byte offset the failing parser was at.
    pub position: usize,
    pub line: usize,
}

impl ParseError {
    pub(crate) fn new(failure: Failure, position: usize, line: usize) -> Self {
        Self {
            kind: failure.kind,
            message: failure.message,
            position,
            line,
        }
    }
}

/// A regular expression given to [`pattern`](super::basic::pattern) could not be compiled.
#[derive(Debug, thiserror::Error)]
#[error("invalid pattern `{pattern}`")]
pub struct PatternError {
    pattern: String,
    #[source]
    source: regex::Error,
}

impl PatternError {
    pub(crate) fn new(pattern: &str, source: regex::Error) -> Self {
        Self {
            pattern: pattern.to_owned(),
            source,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_previews_ten_characters() {
        assert_eq!(found(""), "end of input");
        assert_eq!(found("abc"), "\"abc\"");
        assert_eq!(found("0123456789abcdef"), "\"0123456789\"");
        assert_eq!(found("ééééééééééé"), "\"éééééééééé\"");
        assert_eq!(found("a\nb"), "\"a\\nb\"");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::new(
            Failure::new(ErrorKind::LiteralMismatch, "Expected \"x\""),
            4,
            2,
        );
        assert_eq!(err.to_string(), "Expected \"x\" (line 2, byte 4)");
    }
}
