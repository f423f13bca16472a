//! Operator sugar for building parsers.
//! - `a & b` is [and], `a | b` is [or] and `value / separator` is [sep_by].
//! - String literals are promoted to [literal] parsers wherever a [Parser] is expected.
//! ```
//! # use textcombi::{Parser, text::{basic::{letters, whitespace}, Value}};
//! let ws = || whitespace().optional().ignore();
//! let decl: Parser = "let" & ws() & letters() & ws() & "=" & ws() & letters();
//! assert_eq!(
//!     decl.run("let x = y").unwrap().value,
//!     Value::List(
//!         ["let", "x", "=", "y"].into_iter().map(Value::token).collect()
//!     )
//! );
//! ```

use crate::{
    core::{and, or},
    derived::sep_by,
    text::basic::literal,
    Parser,
};
use std::ops::{BitAnd, BitOr, Div};

impl<N: 'static> From<&str> for Parser<N> {
    fn from(text: &str) -> Self {
        literal(text)
    }
}

impl<N: 'static> From<String> for Parser<N> {
    fn from(text: String) -> Self {
        literal(text)
    }
}

impl<N> From<&Parser<N>> for Parser<N> {
    fn from(parser: &Parser<N>) -> Self {
        parser.clone()
    }
}

/// Implements a binary operator for `Parser op x`, `&Parser op x` and `&str op Parser`.
macro_rules! parser_op {
    ($op:ident, $method:ident, $build:expr) => {
        impl<N: 'static, R: Into<Parser<N>>> $op<R> for Parser<N> {
            type Output = Parser<N>;

            fn $method(self, rhs: R) -> Parser<N> {
                $build(self, rhs.into())
            }
        }

        impl<N: 'static, R: Into<Parser<N>>> $op<R> for &Parser<N> {
            type Output = Parser<N>;

            fn $method(self, rhs: R) -> Parser<N> {
                $build(self.clone(), rhs.into())
            }
        }

        impl<N: 'static> $op<Parser<N>> for &str {
            type Output = Parser<N>;

            fn $method(self, rhs: Parser<N>) -> Parser<N> {
                $build(literal(self), rhs)
            }
        }
    };
}

parser_op!(BitAnd, bitand, and);
parser_op!(BitOr, bitor, or);
parser_op!(Div, div, |value: Parser<N>, separator: Parser<N>| sep_by(separator)(value));
