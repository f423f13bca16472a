//! Benchmarks for the textcombi parser, compared with others.
//! - each case is in [`cases`], and defines a parse that will pass.
//! - each parser is checked against the expected case before being timed.
//!
//! | Method      | Reason for inclusion                                      |
//! |-------------|-----------------------------------------------------------|
//! | TextCombi   | is this library                                           |
//! | Hand-Rolled | How small, fixed formats are usually parsed               |
//! | Chumsky     | A parser combinator library with a static parser type     |
//!
use std::fmt::Debug;

mod cases;
use cases::{LongSequence, Nothing, RecursiveIdent};
mod parsers;
use parsers::{chumsky::Chumsky, handrolled::HandRolled, textcombi::TextCombi};

trait Parseable: Eq + PartialEq + Debug {
    type Param;
    fn generate_case(param: Self::Param) -> Self;
    fn generate_text(&self) -> String;
}

trait Parse<O> {
    fn parse(input: &str) -> O;
}

macro_rules! impl_cases {
    ($($case:ident as $name:ident for [ $($arg:tt)* ] ),* ) => {
        $(
            #[divan::bench(
                name = stringify!($name),
                types = [TextCombi, HandRolled, Chumsky],
                args = [ $($arg)* ]
            )]
            fn $name<P: Parse<$case>>(bencher: divan::Bencher, param: <$case as Parseable>::Param) {
                let o = $case::generate_case(param);
                let text = o.generate_text();
                assert_eq!(P::parse(&text), o);
                bencher.bench_local(|| {
                    P::parse(&text)
                })
            }
        )*
    }
}

impl_cases! {
    RecursiveIdent as recursive_ident for [1, 2, 64],
    LongSequence as long_sequence for [0, 100, 100000],
    Nothing as parse_nothing for [()]
}

fn main() {
    divan::main();
}
