//! A parser combinator library over text.
//!
//! Grammars are built once by composing the primitives in [`text::basic`] with
//! the combinators in [`core`] and [`derived`] (or the operators from [`ops`]),
//! and can then be run any number of times, from any number of threads.
//! ```
//! use textcombi::{Parser, text::{basic::digits, Value}};
//!
//! let list: Parser = digits() / ",";
//! let parsed = list.run("1,2,3").unwrap();
//! assert_eq!(
//!     parsed.value,
//!     Value::List(vec![Value::token("1"), Value::token("2"), Value::token("3")])
//! );
//! ```
#![allow(internal_features)]
#![cfg_attr(feature = "nightly", feature(rustc_attrs))]
#![warn(clippy::style)]
#![warn(clippy::perf)]
#![warn(clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use derive_where::derive_where;
use std::{
    cell::Cell,
    fmt::{Debug, Display, Error, Formatter, Write as _},
    sync::Arc,
};

pub mod core;
pub mod derived;
pub mod macros;
pub mod ops;
pub mod text;

use text::{error::ParseError, ParseState, Parsed};

/// The outcome of running a [Parser] over a whole input.
pub type ParseResult<N> = Result<Parsed<N>, ParseError>;

/// The core trait for defining combinable parsing computations.
///
/// A [Combi] is a state transform: it takes the [ParseState] left by the
/// previous computation and produces the next one. Implementations are only
/// ever called on states that have not failed, the short-circuit is done by
/// [Parser::comp].
#[cfg_attr(
    feature = "nightly",
    rustc_on_unimplemented(
        message = "`{Self}` is not a `Combi` parser over `{N}` nodes so cannot be combined & used as one",
        label = "Not `Combi`",
    )
)]
pub trait Combi<N> {
    /// Parses from the cursor of `state`, returning the advanced (or failed) state.
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N>;

    /// Produces a representation of the combinator for error messages.
    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error>;
}

/// The most bytes of a structural label rendered by [Parser::label].
const LABEL_LIMIT: usize = 64;

/// Nesting below this depth is rendered as `...`.
const REPR_DEPTH: usize = 16;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Collects at most [LABEL_LIMIT] bytes, then fails to stop the rendering.
struct Bounded {
    out: String,
    full: bool,
}

impl std::fmt::Write for Bounded {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        let room = LABEL_LIMIT - self.out.len();
        if s.len() <= room {
            self.out.push_str(s);
            Ok(())
        } else {
            let mut end = room;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            self.out.push_str(&s[..end]);
            self.full = true;
            Err(Error)
        }
    }
}

/// An opaque, shareable parser producing [`text::Value`]s with caller-defined nodes `N`.
///
/// Cloning is cheap (the computation is reference counted), and a parser never
/// changes once built, so one value can be run concurrently on many inputs.
///
/// Labels are rendered from [Combi::repr] on demand, only a label given by
/// [Parser::named] is stored.
#[derive_where(Clone)]
pub struct Parser<N = ()> {
    label: Option<Arc<str>>,
    combi: Arc<dyn Combi<N> + Send + Sync>,
}

impl<N: 'static> Parser<N> {
    /// Wraps a [Combi] as a parser, labelled by its [Combi::repr].
    pub fn from_combi<C>(combi: C) -> Self
    where
        C: Combi<N> + Send + Sync + 'static,
    {
        Self::from_arc(Arc::new(combi))
    }

    pub(crate) fn from_arc(combi: Arc<dyn Combi<N> + Send + Sync>) -> Self {
        Self { label: None, combi }
    }
}

impl<N> Parser<N> {
    /// The label used for this parser in failure messages.
    /// - Labels are cut short after a few dozen bytes.
    pub fn label(&self) -> String {
        let mut out = Bounded {
            out: String::new(),
            full: false,
        };
        if write!(out, "{self}").is_err() && out.full {
            out.out.push_str("...");
        }
        out.out
    }

    /// Replaces the label used for this parser in failure messages.
    /// ```
    /// # use textcombi::{Parser, text::basic::digits};
    /// let number: Parser = digits().named("number");
    /// assert_eq!(number.label(), "number");
    /// ```
    pub fn named(self, label: impl Into<String>) -> Self {
        Self {
            label: Some(Arc::from(label.into())),
            combi: self.combi,
        }
    }

    /// Runs the parser from the cursor of `state`.
    /// - A failed state is returned untouched.
    #[inline]
    pub fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        if state.is_error() {
            state
        } else {
            self.combi.comp(state)
        }
    }

    /// Runs the parser from the start of `input`, returning the final state.
    pub fn run_state<'a>(&self, input: &'a str) -> ParseState<'a, N> {
        log::trace!("running {} over {} bytes", self.label(), input.len());
        let state = self.comp(ParseState::new(input));
        if let Some(failure) = state.failure() {
            log::debug!(
                "parse failed at byte {} ({}): {}",
                state.cursor(),
                failure.kind(),
                failure
            );
        }
        state
    }

    /// Runs the parser from the start of `input`.
    /// - Input left over after a successful parse is not an error, see
    ///   [`core::all`] and [`text::basic::end_of_input`] to require it.
    pub fn run(&self, input: &str) -> ParseResult<N> {
        self.run_state(input).into_result()
    }
}

impl<N> Combi<N> for Parser<N> {
    fn comp<'a>(&self, state: ParseState<'a, N>) -> ParseState<'a, N> {
        Parser::comp(self, state)
    }

    fn repr(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if let Some(label) = &self.label {
            return f.write_str(label);
        }
        let depth = DEPTH.with(|d| d.replace(d.get() + 1));
        let result = if depth >= REPR_DEPTH {
            f.write_str("...")
        } else {
            self.combi.repr(f)
        };
        DEPTH.with(|d| d.set(depth));
        result
    }
}

impl<N> Display for Parser<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Combi::repr(self, f)
    }
}

impl<N> Debug for Parser<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("label", &self.label())
            .finish_non_exhaustive()
    }
}
