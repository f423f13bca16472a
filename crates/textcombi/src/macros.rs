//! Helper macros

/// Helper to build a [sequence](crate::core::sequence) from parsers of mixed types.
/// ```
/// # use textcombi::{seqs, Parser, core::ignore, text::basic::{letters, whitespace}};
/// let decl: Parser = seqs!["let", ignore(whitespace()), letters()];
/// // is equivalent to
/// let same: Parser = textcombi::core::sequence([
///     Parser::from("let"),
///     ignore(whitespace()),
///     letters(),
/// ]);
/// assert_eq!(decl.run("let x"), same.run("let x"));
/// ```
#[macro_export]
macro_rules! seqs {
    ($($p:expr),* $(,)?) => {
        $crate::core::sequence([$($crate::Parser::from($p)),*])
    };
}

pub use seqs;

/// Helper to build a [choice](crate::core::choice) from parsers of mixed types.
/// ```
/// # use textcombi::{choices, Parser, text::{basic::digits, Value}};
/// let sign: Parser = choices!["+", "-", digits()];
/// assert_eq!(sign.run("-").unwrap().value, Value::token("-"));
/// ```
#[macro_export]
macro_rules! choices {
    ($($p:expr),* $(,)?) => {
        $crate::core::choice([$($crate::Parser::from($p)),*])
    };
}

pub use choices;
