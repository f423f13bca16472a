//! Parsers derived by function from the [core](crate::core) combinators.

use crate::{
    core::{ignore, map, separated, sequence},
    Parser,
};

/// Builds a wrapper that parses `open`, the center parser, then `close`,
/// producing only the center's result.
/// ```
/// # use textcombi::{Parser, derived::between, text::{basic::digits, Value}};
/// let parens = between("(", ")");
/// let number: Parser = parens(digits());
/// let parsed = number.run("(42)").unwrap();
/// assert_eq!((parsed.value, parsed.end), (Value::token("42"), 4));
/// ```
pub fn between<N: 'static>(
    open: impl Into<Parser<N>>,
    close: impl Into<Parser<N>>,
) -> impl Fn(Parser<N>) -> Parser<N> {
    let open = ignore(open);
    let close = ignore(close);
    move |center| {
        map(sequence([open.clone(), center, close.clone()]), |v| {
            v.into_list()
                .and_then(|vs| vs.into_iter().next())
                .unwrap_or_default()
        })
    }
}

pub fn in_parens<N: 'static>(center: impl Into<Parser<N>>) -> Parser<N> {
    between("(", ")")(center.into())
}

pub fn in_brackets<N: 'static>(center: impl Into<Parser<N>>) -> Parser<N> {
    between("[", "]")(center.into())
}

pub fn in_braces<N: 'static>(center: impl Into<Parser<N>>) -> Parser<N> {
    between("{", "}")(center.into())
}

pub fn in_angles<N: 'static>(center: impl Into<Parser<N>>) -> Parser<N> {
    between("<", ">")(center.into())
}

/// Builds a parser for zero or more values separated by `separator`.
/// - Stops at the first value or separator that does not match, never failing.
/// - Only the values are collected.
/// ```
/// # use textcombi::{Parser, derived::sep_by, text::{basic::digits, Value}};
/// let numbers: Parser = sep_by(",")(digits());
/// assert_eq!(numbers.run("").unwrap().value, Value::List(vec![]));
/// assert_eq!(numbers.run("1,2").unwrap().value.into_list().map(|l| l.len()), Some(2));
/// ```
pub fn sep_by<N: 'static>(separator: impl Into<Parser<N>>) -> impl Fn(Parser<N>) -> Parser<N> {
    let separator = separator.into();
    move |value| separated(value, separator.clone(), 0)
}

/// As [sep_by], but fails unless at least one value matched.
pub fn sep_by1<N: 'static>(separator: impl Into<Parser<N>>) -> impl Fn(Parser<N>) -> Parser<N> {
    let separator = separator.into();
    move |value| separated(value, separator.clone(), 1)
}

impl<N: 'static> Parser<N> {
    /// See [sep_by].
    pub fn sep_by(self, separator: impl Into<Parser<N>>) -> Self {
        sep_by(separator)(self)
    }

    /// See [sep_by1].
    pub fn sep_by1(self, separator: impl Into<Parser<N>>) -> Self {
        sep_by1(separator)(self)
    }
}
