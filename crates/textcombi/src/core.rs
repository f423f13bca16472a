//! The core combinators upon which others can be constructed.
//! - Each has a type, a construction function returning a [Parser] and a [Combi] implementation.
//! - Parser arguments accept anything convertible into a [Parser], including `&str` literals.

use crate::{
    text::{
        error::{found, ErrorKind, ParseError},
        Emit, ParseState, Value,
    },
    Combi, Parser,
};
use derive_where::derive_where;
use std::{
    fmt::{Error, Formatter},
    sync::{Arc, Weak},
};

/// Collects the result of a successful state, unless it is ignored.
fn gather<N>(results: &mut Vec<Value<N>>, state: &mut ParseState<'_, N>) {
    if state.emit() != Emit::Ignore {
        results.push(state.take_result());
    }
}

/// Collects the result of a successful state, flattening spliced lists.
fn splice<N>(results: &mut Vec<Value<N>>, state: &mut ParseState<'_, N>) {
    match state.emit() {
        Emit::Ignore => (),
        Emit::Keep => results.push(state.take_result()),
        Emit::Splice => match state.take_result() {
            Value::List(items) => results.extend(items),
            other => results.push(other),
        },
    }
}

fn write_all<N>(f: &mut Formatter<'_>, parsers: &[Parser<N>], sep: &str) -> Result<(), Error> {
    for (i, p) in parsers.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{p}")?;
    }
    Ok(())
}

/// Applies each parser in order, collecting the results that are not ignored.
#[derive_where(Clone)]
pub struct Sequence<N>(Vec<Parser<N>>);

/// Applies each parser in order, failing at the first failure.
/// ```
/// # use textcombi::{
/// #     Parser,
/// #     core::{ignore, sequence},
/// #     text::{basic::{letters, whitespace}, Value},
/// # };
/// let decl: Parser = sequence([Parser::from("let"), ignore(whitespace()), letters()]);
/// assert_eq!(
///     decl.run("let x").unwrap().value,
///     Value::List(vec![Value::token("let"), Value::token("x")])
/// );
/// ```
pub fn sequence<N: 'static>(parsers: impl IntoIterator<Item = impl Into<Parser<N>>>) -> Parser<N> {
    Parser::from_combi(Sequence(parsers.into_iter().map(Into::into).collect()))
}

impl<N> Combi<N> for Sequence<N> {
    fn comp<'a>(&self, mut state: ParseState<'a, N>) -> ParseState<'a, N> {
        let mut results = Vec::with_capacity(self.0.len());
        for parser in &self.0 {
            state = parser.comp(state);
            if state.is_error() {
                return state;
            }
            gather(&mut results, &mut state);
        }
        state.succeed(Value::List(results))
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write_all(f, &self.0, " ")
    }
}

/// Applies the first parser, then the second, collecting both results into a flat list.
#[derive_where(Clone)]
pub struct And<N>(Parser<N>, Parser<N>);

/// `left` followed by `right`.
/// - Results of operands that are themselves built by [and] are spliced into
///   the list, so `a & b & c` (in any association) produces `[a, b, c]`.
/// - Ignored operands contribute nothing.
pub fn and<N: 'static>(left: impl Into<Parser<N>>, right: impl Into<Parser<N>>) -> Parser<N> {
    Parser::from_combi(And(left.into(), right.into()))
}

impl<N> Combi<N> for And<N> {
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        let mut results = Vec::new();
        let mut state = self.0.comp(state);
        if state.is_error() {
            return state;
        }
        splice(&mut results, &mut state);
        state = self.1.comp(state);
        if state.is_error() {
            return state;
        }
        splice(&mut results, &mut state);
        state.succeed(Value::List(results)).with_emit(Emit::Splice)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} {}", self.0, self.1)
    }
}

/// Attempts the first parser, and if it fails, backtracks and attempts the second.
#[derive_where(Clone)]
pub struct Or<N>(Parser<N>, Parser<N>);

/// `left`, or else `right` from the same starting position.
/// - The successful branch's state is returned as-is, so enclosing combinators
///   treat the result exactly as they would treat that branch's.
/// - Any input consumed by a failed `left` is given back before `right` runs.
pub fn or<N: 'static>(left: impl Into<Parser<N>>, right: impl Into<Parser<N>>) -> Parser<N> {
    Parser::from_combi(Or(left.into(), right.into()))
}

impl<N> Combi<N> for Or<N> {
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        let start = state.cursor();
        let left = self.0.comp(state);
        if !left.is_error() {
            return left;
        }
        let right = self.1.comp(left.rewind(start));
        if !right.is_error() {
            return right;
        }
        let message = format!("Neither {} nor {} matched", self.0.label(), self.1.label());
        right
            .rewind(start)
            .fail(ErrorKind::AlternativesExhausted, message)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} | {}", self.0, self.1)
    }
}

/// Attempts each parser from the same position, taking the first success.
#[derive_where(Clone)]
pub struct Choice<N>(Vec<Parser<N>>);

/// The first of `parsers` to succeed from the current position.
pub fn choice<N: 'static>(parsers: impl IntoIterator<Item = impl Into<Parser<N>>>) -> Parser<N> {
    Parser::from_combi(Choice(parsers.into_iter().map(Into::into).collect()))
}

impl<N> Combi<N> for Choice<N> {
    fn comp<'a>(&self, mut state: ParseState<'a, N>) -> ParseState<'a, N> {
        let start = state.cursor();
        for parser in &self.0 {
            state = parser.comp(state);
            if !state.is_error() {
                return state.with_emit(Emit::Keep);
            }
            state = state.rewind(start);
        }
        state.fail(ErrorKind::AlternativesExhausted, "No alternative matched")
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "(")?;
        write_all(f, &self.0, " | ")?;
        write!(f, ")")
    }
}

#[derive_where(Clone)]
pub struct Optional<N>(Parser<N>);

/// Attempts `parser`, succeeding with [Value::Absent] at the original position if it fails.
pub fn optional<N: 'static>(parser: impl Into<Parser<N>>) -> Parser<N> {
    Parser::from_combi(Optional(parser.into()))
}

impl<N> Combi<N> for Optional<N> {
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        let start = state.cursor();
        let state = self.0.comp(state);
        if state.is_error() {
            state.rewind(start)
        } else {
            state.with_emit(Emit::Keep)
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "[{}]", self.0)
    }
}

#[derive_where(Clone)]
pub struct Ignore<N>(Parser<N>);

/// Matches `parser`, but marks its result to be left out of any enclosing collection.
/// - Failures propagate as normal.
pub fn ignore<N: 'static>(parser: impl Into<Parser<N>>) -> Parser<N> {
    Parser::from_combi(Ignore(parser.into()))
}

impl<N> Combi<N> for Ignore<N> {
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        let state = self.0.comp(state);
        if state.is_error() {
            state
        } else {
            state.with_emit(Emit::Ignore)
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.0.repr(f)
    }
}

/// Repeatedly applies a parser until it fails, requiring at least `min` repetitions.
#[derive_where(Clone)]
pub struct Many<N> {
    parser: Parser<N>,
    min: usize,
}

/// Zero or more of `parser`, collecting the results that are not ignored.
/// - The failing attempt that ends the repetition is discarded, so this never fails.
/// - A repetition that consumes nothing ends the loop after being collected.
pub fn many<N: 'static>(parser: impl Into<Parser<N>>) -> Parser<N> {
    Parser::from_combi(Many {
        parser: parser.into(),
        min: 0,
    })
}

/// One or more of `parser`, as [many] but failing when the first attempt fails.
pub fn many1<N: 'static>(parser: impl Into<Parser<N>>) -> Parser<N> {
    Parser::from_combi(Many {
        parser: parser.into(),
        min: 1,
    })
}

impl<N> Combi<N> for Many<N> {
    fn comp<'a>(&self, mut state: ParseState<'a, N>) -> ParseState<'a, N> {
        let start = state.cursor();
        let mut results = Vec::new();
        let mut count = 0;
        loop {
            let before = state.cursor();
            let mut next = self.parser.comp(state);
            if next.is_error() {
                state = next.rewind(before);
                break;
            }
            count += 1;
            gather(&mut results, &mut next);
            let stalled = next.cursor() == before;
            state = next;
            if stalled {
                break;
            }
        }

        if count < self.min {
            let message = format!(
                "Expected at least {} of {} but found {}",
                self.min,
                self.parser.label(),
                found(state.remaining())
            );
            state
                .rewind(start)
                .fail(ErrorKind::RepetitionUnsatisfied, message)
        } else {
            state.succeed(Value::List(results))
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self.min {
            0 => write!(f, "{}*", self.parser),
            1 => write!(f, "{}+", self.parser),
            n => write!(f, "{}{{{n},}}", self.parser),
        }
    }
}

/// Alternates values and separators, collecting the values.
#[derive_where(Clone)]
pub struct SepBy<N> {
    value: Parser<N>,
    separator: Parser<N>,
    min: usize,
}

/// `value`s separated by `separator`s, requiring at least `min` values.
/// - Stops (without failing) at the first value or separator that does not match.
/// - Separator results are discarded.
pub fn separated<N: 'static>(
    value: impl Into<Parser<N>>,
    separator: impl Into<Parser<N>>,
    min: usize,
) -> Parser<N> {
    Parser::from_combi(SepBy {
        value: value.into(),
        separator: separator.into(),
        min,
    })
}

impl<N> Combi<N> for SepBy<N> {
    fn comp<'a>(&self, mut state: ParseState<'a, N>) -> ParseState<'a, N> {
        let start = state.cursor();
        let mut results = Vec::new();
        let mut count = 0;
        loop {
            let before = state.cursor();
            let mut next = self.value.comp(state);
            if next.is_error() {
                state = next.rewind(before);
                break;
            }
            count += 1;
            gather(&mut results, &mut next);

            let after_value = next.cursor();
            let next = self.separator.comp(next);
            if next.is_error() {
                state = next.rewind(after_value);
                break;
            }
            let stalled = next.cursor() == before;
            state = next;
            if stalled {
                break;
            }
        }

        if count < self.min {
            let message = format!(
                "Expected at least {} of {} separated by {} but found {}",
                self.min,
                self.value.label(),
                self.separator.label(),
                found(state.remaining())
            );
            state
                .rewind(start)
                .fail(ErrorKind::RepetitionUnsatisfied, message)
        } else {
            state.succeed(Value::List(results))
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} / {}", self.value, self.separator)
    }
}

/// Repeatedly applies a parser until the input is consumed.
#[derive_where(Clone)]
pub struct All<N>(Parser<N>);

/// Applies `parser` repeatedly until all input is consumed, collecting the
/// results that are not ignored.
/// - Unlike [many], any failing attempt fails the whole parse.
/// ```
/// # use textcombi::{Parser, core::{all, choice}, text::{basic::{literal, whitespace}}};
/// let xs: Parser = all(choice([whitespace(), literal("x")]));
/// assert!(xs.run("  x x").is_ok());
/// assert!(xs.run("  x y").is_err());
/// ```
pub fn all<N: 'static>(parser: impl Into<Parser<N>>) -> Parser<N> {
    Parser::from_combi(All(parser.into()))
}

impl<N> Combi<N> for All<N> {
    fn comp<'a>(&self, mut state: ParseState<'a, N>) -> ParseState<'a, N> {
        let mut results = Vec::new();
        loop {
            let before = state.cursor();
            let mut next = self.0.comp(state);
            if next.is_error() {
                return next;
            }
            gather(&mut results, &mut next);
            if next.at_end() {
                return next.succeed(Value::List(results));
            }
            if next.cursor() == before {
                let message = format!(
                    "Expected {} to consume input, but it matched nothing before {}",
                    self.0.label(),
                    found(next.remaining())
                );
                return next.fail(ErrorKind::IncompleteConsumption, message);
            }
            state = next;
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}... <end of input>", self.0)
    }
}

/// Applies a provided function to successful results.
#[derive_where(Clone; F)]
pub struct MapSuc<N, F>(Parser<N>, F)
where
    F: Fn(Value<N>) -> Value<N>;

/// Replaces the result of `parser` with `f(result)`.
/// - A [Value::Node] produced without a line is stamped with the line the match ended on.
/// ```
/// # use textcombi::{Parser, core::map, text::{basic::digits, Value}};
/// let number: Parser<u32> = map(digits(), |v| {
///     Value::node(v.as_token().and_then(|t| t.parse().ok()).unwrap_or_default())
/// });
/// let node = number.run("42").unwrap().value.into_node().unwrap();
/// assert_eq!((node.node, node.line), (42, Some(1)));
/// ```
pub fn map<N: 'static, F>(parser: impl Into<Parser<N>>, f: F) -> Parser<N>
where
    F: Fn(Value<N>) -> Value<N> + Send + Sync + 'static,
{
    Parser::from_combi(MapSuc(parser.into(), f))
}

impl<N, F> Combi<N> for MapSuc<N, F>
where
    F: Fn(Value<N>) -> Value<N>,
{
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        let mut state = self.0.comp(state);
        if state.is_error() {
            return state;
        }
        let value = (self.1)(state.take_result()).locate(|| state.line_number());
        state.succeed(value)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.0.repr(f)
    }
}

/// Applies a provided function to successful results and the line they ended on.
#[derive_where(Clone; F)]
pub struct MapLine<N, F>(Parser<N>, F)
where
    F: Fn(Value<N>, usize) -> Value<N>;

/// As [map], but `f` is also given the line the match ended on.
pub fn map_with_line<N: 'static, F>(parser: impl Into<Parser<N>>, f: F) -> Parser<N>
where
    F: Fn(Value<N>, usize) -> Value<N> + Send + Sync + 'static,
{
    Parser::from_combi(MapLine(parser.into(), f))
}

impl<N, F> Combi<N> for MapLine<N, F>
where
    F: Fn(Value<N>, usize) -> Value<N>,
{
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        let mut state = self.0.comp(state);
        if state.is_error() {
            return state;
        }
        let line = state.line_number();
        let value = (self.1)(state.take_result(), line).locate(|| line);
        state.succeed(value)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.0.repr(f)
    }
}

/// Converts failures into successful results.
#[derive_where(Clone; F)]
pub struct MapErr<N, F>(Parser<N>, F)
where
    F: Fn(ParseError) -> Value<N>;

/// Recovers from a failure of `parser`, succeeding with `f(error)` at the
/// position the failure occurred.
/// - Successful results pass through unchanged.
/// ```
/// # use textcombi::{Parser, core::map_error, text::{basic::literal, Value}};
/// let semi: Parser<&str> = map_error(literal(";"), |_| Value::node("missing semicolon"));
/// let parsed = semi.run("}").unwrap();
/// assert_eq!(parsed.value.into_node().map(|n| n.node), Some("missing semicolon"));
/// assert_eq!(parsed.end, 0);
/// ```
pub fn map_error<N: 'static, F>(parser: impl Into<Parser<N>>, f: F) -> Parser<N>
where
    F: Fn(ParseError) -> Value<N> + Send + Sync + 'static,
{
    Parser::from_combi(MapErr(parser.into(), f))
}

impl<N, F> Combi<N> for MapErr<N, F>
where
    F: Fn(ParseError) -> Value<N>,
{
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        let state = self.0.comp(state);
        match state.to_error() {
            None => state.with_emit(Emit::Keep),
            Some(err) => {
                let at = state.cursor();
                let line = err.line;
                let value = (self.1)(err).locate(|| line);
                state.rewind(at).succeed(value)
            }
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.0.repr(f)
    }
}

/// Uses the result of a parser to choose the next parser to apply.
#[derive_where(Clone; F)]
pub struct Chain<N, F>(Parser<N>, F)
where
    F: Fn(Value<N>) -> Parser<N>;

/// Applies `parser`, then the parser returned by `f(result)` from where it left off.
/// - `f` is not called if `parser` fails.
/// - The state of the chosen parser is returned as-is.
/// ```
/// # use textcombi::{Parser, core::chain, text::{basic::{letters, literal}, Value}};
/// // a tag must be closed by the same name: `<b>...</b>`
/// let close: Parser = chain(letters(), |name| {
///     literal(format!("</{}>", name.as_token().unwrap_or_default()))
/// });
/// assert!(close.run("b</b>").is_ok());
/// assert!(close.run("b</i>").is_err());
/// ```
pub fn chain<N: 'static, F>(parser: impl Into<Parser<N>>, f: F) -> Parser<N>
where
    F: Fn(Value<N>) -> Parser<N> + Send + Sync + 'static,
{
    Parser::from_combi(Chain(parser.into(), f))
}

impl<N, F> Combi<N> for Chain<N, F>
where
    F: Fn(Value<N>) -> Parser<N>,
{
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        let mut state = self.0.comp(state);
        if state.is_error() {
            return state;
        }
        let next = (self.1)(state.take_result());
        next.comp(state)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{} => ...", self.0)
    }
}

/// The recursion combinator.
///
/// `f` is given a handle to the parser being defined, which it can use to
/// refer to itself. The handle is bound once `f` returns, running it from
/// inside `f` fails.
/// ```
/// # use textcombi::{Parser, core::{or, recursive}, derived::in_parens, text::basic::digits};
/// // nested parentheses around a number: `((1))`
/// let nested: Parser = recursive(|nested| or(in_parens(nested), digits()));
/// assert!(nested.run("((1))").is_ok());
/// assert!(nested.run("((1)").is_err());
/// ```
pub fn recursive<N: 'static, F>(f: F) -> Parser<N>
where
    F: FnOnce(Parser<N>) -> Parser<N>,
{
    let combi = Arc::new_cyclic(|handle: &Weak<Recursive<N>>| Recursive {
        parser: f(Parser::from_combi(RecursiveHandle {
            p: handle.clone(),
        })),
    });
    Parser::from_arc(combi)
}

pub struct RecursiveHandle<N> {
    p: Weak<Recursive<N>>,
}

impl<N> Combi<N> for RecursiveHandle<N> {
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        // INV: while the recursive parser is alive (it owns this handle) the upgrade succeeds,
        //      it can only fail if the handle is run during, or escapes, its definition.
        match self.p.upgrade() {
            Some(p) => p.parser.comp(state),
            None => {
                log::warn!("recursive parser run outside of its definition");
                state.fail(
                    ErrorKind::DanglingRecursion,
                    "Recursive parser is not available",
                )
            }
        }
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "...")
    }
}

pub struct Recursive<N> {
    parser: Parser<N>,
}

impl<N> Combi<N> for Recursive<N> {
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        self.parser.comp(state)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.parser)
    }
}

impl<N: 'static> Parser<N> {
    /// See [map].
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(Value<N>) -> Value<N> + Send + Sync + 'static,
    {
        map(self, f)
    }

    /// See [map_with_line].
    pub fn map_with_line<F>(self, f: F) -> Self
    where
        F: Fn(Value<N>, usize) -> Value<N> + Send + Sync + 'static,
    {
        map_with_line(self, f)
    }

    /// See [map_error].
    pub fn map_error<F>(self, f: F) -> Self
    where
        F: Fn(ParseError) -> Value<N> + Send + Sync + 'static,
    {
        map_error(self, f)
    }

    /// See [chain].
    pub fn chain<F>(self, f: F) -> Self
    where
        F: Fn(Value<N>) -> Parser<N> + Send + Sync + 'static,
    {
        chain(self, f)
    }

    /// See [ignore].
    pub fn ignore(self) -> Self {
        ignore(self)
    }

    /// See [optional].
    pub fn optional(self) -> Self {
        optional(self)
    }

    /// See [many].
    pub fn many(self) -> Self {
        many(self)
    }

    /// See [many1].
    pub fn many1(self) -> Self {
        many1(self)
    }
}
