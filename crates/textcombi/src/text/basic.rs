//! Basic text parsers: literals, patterns and the end of input.

use super::{
    error::{found, ErrorKind, PatternError},
    Emit, ParseState, Value,
};
use crate::{Combi, Parser};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Error, Formatter};

#[derive(Clone, Debug)]
pub struct Literal {
    text: String,
}

/// Matches `text` exactly, producing it as a [Value::Token].
/// ```
/// # use textcombi::{Parser, text::{basic::literal, Value}};
/// let func: Parser = literal("func");
/// let parsed = func.run("func main").unwrap();
/// assert_eq!(parsed.value, Value::token("func"));
/// assert_eq!(parsed.end, 4);
/// ```
pub fn literal<N: 'static>(text: impl Into<String>) -> Parser<N> {
    Parser::from_combi(Literal { text: text.into() })
}

impl<N> Combi<N> for Literal {
    #[inline]
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        let rest = state.remaining();
        if rest.starts_with(self.text.as_str()) {
            state.advance(self.text.len(), Value::Token(self.text.clone()))
        } else {
            let message = format!("Expected {:?} but found {}", self.text, found(rest));
            state.fail(ErrorKind::LiteralMismatch, message)
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{:?}", self.text)
    }
}

#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    fn new(source: &str) -> Result<Self, PatternError> {
        // anchored so that only matches starting at the cursor are found
        Regex::new(&format!("^(?:{source})"))
            .map(|regex| Self {
                source: source.to_owned(),
                regex,
            })
            .map_err(|e| PatternError::new(source, e))
    }

    fn constant(source: &'static str) -> Self {
        // INV: only used with the valid patterns below
        Self::new(source).expect("constant pattern is valid")
    }
}

/// Matches the regular expression `source` at the cursor, producing the matched text.
/// ```
/// # use textcombi::{Parser, text::{basic::pattern, Value}};
/// let hex: Parser = pattern("0x[0-9a-f]+").unwrap();
/// assert_eq!(hex.run("0xff;").unwrap().value, Value::token("0xff"));
/// assert!(hex.run("ff").is_err());
/// ```
pub fn pattern<N: 'static>(source: &str) -> Result<Parser<N>, PatternError> {
    Pattern::new(source).map(Parser::from_combi)
}

impl<N> Combi<N> for Pattern {
    #[inline]
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        let rest = state.remaining();
        match self.regex.find(rest) {
            Some(m) => state.advance(m.end(), Value::token(m.as_str())),
            None => {
                let message = format!("Expected /{}/ but found {}", self.source, found(rest));
                state.fail(ErrorKind::PatternMismatch, message)
            }
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "/{}/", self.source)
    }
}

static LETTERS: Lazy<Pattern> = Lazy::new(|| Pattern::constant("[A-Za-z]+"));
static DIGITS: Lazy<Pattern> = Lazy::new(|| Pattern::constant("[0-9]+"));
static WHITESPACE: Lazy<Pattern> = Lazy::new(|| Pattern::constant(r"\s+"));
static NEWLINE: Lazy<Pattern> = Lazy::new(|| Pattern::constant(r"\r\n|\n|\r"));

/// One or more ASCII letters.
pub fn letters<N: 'static>() -> Parser<N> {
    Parser::from_combi(LETTERS.clone())
}

/// One or more ASCII digits.
pub fn digits<N: 'static>() -> Parser<N> {
    Parser::from_combi(DIGITS.clone())
}

/// One or more whitespace characters (including newlines).
pub fn whitespace<N: 'static>() -> Parser<N> {
    Parser::from_combi(WHITESPACE.clone())
}

/// A single line terminator: `\r\n`, `\n` or `\r`.
pub fn newline<N: 'static>() -> Parser<N> {
    Parser::from_combi(NEWLINE.clone())
}

pub fn comma<N: 'static>() -> Parser<N> {
    literal(",")
}

pub fn period<N: 'static>() -> Parser<N> {
    literal(".")
}

pub fn colon<N: 'static>() -> Parser<N> {
    literal(":")
}

pub fn semicolon<N: 'static>() -> Parser<N> {
    literal(";")
}

pub fn plus<N: 'static>() -> Parser<N> {
    literal("+")
}

pub fn minus<N: 'static>() -> Parser<N> {
    literal("-")
}

#[derive(Clone, Debug)]
pub struct EndOfInput;

/// Succeeds without consuming only when all input has been consumed.
/// - The (absent) result is ignored by aggregating combinators.
pub fn end_of_input<N: 'static>() -> Parser<N> {
    Parser::from_combi(EndOfInput)
}

impl<N> Combi<N> for EndOfInput {
    #[inline]
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        if state.at_end() {
            state.succeed(Value::Absent).with_emit(Emit::Ignore)
        } else {
            let message = format!("Expected end of input but found {}", found(state.remaining()));
            state.fail(ErrorKind::IncompleteConsumption, message)
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "<end of input>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::error::ParseError;

    fn run(parser: &Parser, input: &str) -> Result<(Value<()>, usize), ParseError> {
        parser.run(input).map(|p| (p.value, p.end))
    }

    #[test]
    fn literal_consumes_exactly_its_text() {
        let p = literal("func");
        assert_eq!(run(&p, "func"), Ok((Value::token("func"), 4)));
        assert_eq!(run(&p, "function"), Ok((Value::token("func"), 4)));
        assert_eq!(p.label(), "\"func\"");
    }

    #[test]
    fn literal_mismatch_previews_input() {
        let err = run(&literal("func"), "let x = 1234567890").unwrap_err();
        assert_eq!(err.kind, ErrorKind::LiteralMismatch);
        assert_eq!(err.position, 0);
        assert_eq!(err.message, "Expected \"func\" but found \"let x = 12\"");

        let err = run(&literal("}"), "").unwrap_err();
        assert_eq!(err.message, "Expected \"}\" but found end of input");
    }

    #[test]
    fn pattern_is_anchored_at_cursor() {
        let p: Parser = pattern("[0-9]+").unwrap();
        assert_eq!(run(&p, "42abc"), Ok((Value::token("42"), 2)));
        let err = run(&p, "abc42").unwrap_err();
        assert_eq!(err.kind, ErrorKind::PatternMismatch);
        assert_eq!(err.position, 0);
    }

    #[test]
    fn pattern_alternation_is_grouped_by_anchor() {
        // without grouping `^a|b` would find the `b` later in the input
        let p: Parser = pattern("a|b").unwrap();
        assert!(run(&p, "xb").is_err());
        assert_eq!(run(&p, "bx"), Ok((Value::token("b"), 1)));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = pattern::<()>("(unclosed").unwrap_err();
        assert_eq!(err.pattern(), "(unclosed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn convenience_patterns() {
        assert_eq!(run(&letters(), "abcD1"), Ok((Value::token("abcD"), 4)));
        assert_eq!(run(&digits(), "0123x"), Ok((Value::token("0123"), 4)));
        assert_eq!(run(&whitespace(), " \t\n x"), Ok((Value::token(" \t\n "), 4)));
        assert_eq!(run(&newline(), "\r\nx"), Ok((Value::token("\r\n"), 2)));
        assert_eq!(run(&newline(), "\rx"), Ok((Value::token("\r"), 1)));
        assert!(run(&letters(), "1abc").is_err());
        assert!(run(&whitespace(), "x").is_err());
    }

    #[test]
    fn punctuation() {
        for (p, s) in [
            (comma(), ","),
            (period(), "."),
            (colon(), ":"),
            (semicolon(), ";"),
            (plus(), "+"),
            (minus(), "-"),
        ] {
            assert_eq!(run(&p, s), Ok((Value::token(s), 1)));
        }
    }

    #[test]
    fn end_of_input_only_at_end() {
        let state = end_of_input::<()>().run_state("");
        assert!(!state.is_error());
        assert_eq!(state.emit(), Emit::Ignore);

        let err = run(&end_of_input(), "rest").unwrap_err();
        assert_eq!(err.kind, ErrorKind::IncompleteConsumption);
        assert_eq!(err.message, "Expected end of input but found \"rest\"");
    }

    #[test]
    fn multibyte_input_advances_by_bytes() {
        let p = literal("é");
        assert_eq!(run(&p, "éa"), Ok((Value::token("é"), 2)));
    }
}
