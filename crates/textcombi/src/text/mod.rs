//! The state threaded through parsers, and the values they produce.
//!
//! A [ParseState] is an immutable snapshot: each [Combi](crate::Combi) takes
//! one by value and returns the next. Once a state has failed its cursor and
//! result stay frozen at the point of failure, only the recovering combinators
//! ([`or`](crate::core::or), [`choice`](crate::core::choice),
//! [`optional`](crate::core::optional), [`map_error`](crate::core::map_error))
//! produce a successful state from a failed one.

pub mod basic;
pub mod error;

use error::{ErrorKind, Failure, ParseError};
use once_cell::sync::OnceCell;
use std::{mem, sync::Arc};

/// A node tagged with the source line it was produced on.
/// - [`map`](crate::core::map) stamps the line on nodes that do not yet have one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<N> {
    pub node: N,
    pub line: Option<usize>,
}

impl<N> Located<N> {
    pub fn new(node: N) -> Self {
        Self { node, line: None }
    }

    pub fn at(node: N, line: usize) -> Self {
        Self {
            node,
            line: Some(line),
        }
    }
}

/// The result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<N> {
    /// Matched text.
    Token(String),
    /// Results collected by an aggregating combinator, in order.
    List(Vec<Value<N>>),
    /// A caller-defined node, built in a [`map`](crate::core::map).
    Node(Located<N>),
    /// No result, e.g. an [`optional`](crate::core::optional) that did not match.
    Absent,
}

impl<N> Default for Value<N> {
    fn default() -> Self {
        Value::Absent
    }
}

impl<N> Value<N> {
    pub fn token(text: impl Into<String>) -> Self {
        Value::Token(text.into())
    }

    pub fn node(node: N) -> Self {
        Value::Node(Located::new(node))
    }

    pub fn as_token(&self) -> Option<&str> {
        match self {
            Value::Token(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value<N>]> {
        match self {
            Value::List(vs) => Some(vs),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<Value<N>>> {
        match self {
            Value::List(vs) => Some(vs),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Located<N>> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_node(self) -> Option<Located<N>> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Stamps a line onto an unlocated node, `line` is only computed when needed.
    pub(crate) fn locate(mut self, line: impl FnOnce() -> usize) -> Self {
        if let Value::Node(located) = &mut self {
            if located.line.is_none() {
                located.line = Some(line());
            }
        }
        self
    }
}

/// How an aggregating combinator should treat the result of a successful state.
///
/// This travels with the state rather than the parser, so a parser that can
/// produce differently-treated results (an [`or`](crate::core::or) whose
/// branches differ) stays immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    /// Collect the result as one element.
    #[default]
    Keep,
    /// Match, but leave the result out of the collection.
    Ignore,
    /// The result is a list to be flattened into the enclosing
    /// [`and`](crate::core::and) chain.
    Splice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Ok,
    Error(Failure),
}

/// Byte offsets of each `\n` in an input.
/// - Found on first use, and shared by every state descended from the same [ParseState::new].
#[derive(Debug, Clone, Default)]
struct LineIndex(Arc<OnceCell<Vec<usize>>>);

impl LineIndex {
    /// The line (starting from 1) containing the byte at `cursor`.
    fn line(&self, input: &str, cursor: usize) -> usize {
        let newlines = self.0.get_or_init(|| {
            input
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i)
                .collect()
        });
        1 + newlines.partition_point(|nl| *nl < cursor)
    }
}

// the index is derived from the input, which states already compare
impl PartialEq for LineIndex {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for LineIndex {}

/// A snapshot of parsing progress over one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState<'a, N> {
    input: &'a str,
    cursor: usize,
    result: Value<N>,
    status: Status,
    emit: Emit,
    lines: LineIndex,
}

/// A successful parse, with the byte offset it ended at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<N> {
    pub value: Value<N>,
    pub end: usize,
}

/// The closest char boundary of `input` at or before `at`.
fn floor_boundary(input: &str, at: usize) -> usize {
    let mut at = at.min(input.len());
    while !input.is_char_boundary(at) {
        at -= 1;
    }
    at
}

impl<'a, N> ParseState<'a, N> {
    /// A fresh state at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: 0,
            result: Value::Absent,
            status: Status::Ok,
            emit: Emit::Keep,
            lines: LineIndex::default(),
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    /// The byte offset of the next character to parse.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The input not yet consumed.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    pub fn result(&self) -> &Value<N> {
        &self.result
    }

    pub fn emit(&self) -> Emit {
        self.emit
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, Status::Error(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.status {
            Status::Ok => None,
            Status::Error(f) => Some(f),
        }
    }

    pub fn at_end(&self) -> bool {
        self.cursor == self.input.len()
    }

    /// The line (starting from 1) the cursor is on.
    pub fn line_number(&self) -> usize {
        self.lines.line(self.input, self.cursor)
    }

    /// Succeeds having consumed `len` bytes, producing `result`.
    /// - The cursor never passes the end of input or stops inside a character,
    ///   it is moved back to the previous char boundary instead.
    pub fn advance(self, len: usize, result: Value<N>) -> Self {
        let cursor = floor_boundary(self.input, self.cursor.saturating_add(len));
        Self {
            cursor,
            result,
            status: Status::Ok,
            emit: Emit::Keep,
            ..self
        }
    }

    /// Succeeds without consuming anything further, producing `result`.
    pub fn succeed(self, result: Value<N>) -> Self {
        self.advance(0, result)
    }

    /// Fails at the current cursor, keeping the current result.
    pub fn fail(self, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: Status::Error(Failure::new(kind, message)),
            ..self
        }
    }

    pub fn with_emit(self, emit: Emit) -> Self {
        Self { emit, ..self }
    }

    /// Moves the result out, leaving [Value::Absent].
    pub fn take_result(&mut self) -> Value<N> {
        mem::take(&mut self.result)
    }

    /// Backtracks to `cursor`, discarding any failure and result.
    /// - As with [ParseState::advance], the cursor is kept on a char boundary.
    pub fn rewind(self, cursor: usize) -> Self {
        Self {
            cursor: floor_boundary(self.input, cursor),
            result: Value::Absent,
            status: Status::Ok,
            emit: Emit::Keep,
            ..self
        }
    }

    /// The failure of this state, positioned in the input.
    pub fn to_error(&self) -> Option<ParseError> {
        self.failure()
            .map(|f| ParseError::new(f.clone(), self.cursor, self.line_number()))
    }

    pub fn into_result(self) -> Result<Parsed<N>, ParseError> {
        match self.status {
            Status::Ok => Ok(Parsed {
                value: self.result,
                end: self.cursor,
            }),
            Status::Error(failure) => {
                let line = self.lines.line(self.input, self.cursor);
                Err(ParseError::new(failure, self.cursor, line))
            }
        }
    }
}
