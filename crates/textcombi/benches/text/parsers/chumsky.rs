use super::super::{LongSequence, Nothing, Parse, RecursiveIdent};
use chumsky::prelude::*;

pub struct Chumsky;

fn recur_ident_parser() -> impl Parser<char, RecursiveIdent, Error = Simple<char>> {
    recursive(|r| {
        text::ident()
            .then(r.padded().delimited_by(just('{'), just('}')).padded())
            .map(|(id, recur)| RecursiveIdent::Next {
                id,
                recur: Box::new(recur),
            })
            .or(just('!').to(RecursiveIdent::Final))
            .padded()
    })
    .then_ignore(end())
}

impl Parse<RecursiveIdent> for Chumsky {
    fn parse(input: &str) -> RecursiveIdent {
        recur_ident_parser().parse(input).unwrap()
    }
}

fn long_parser() -> impl Parser<char, LongSequence, Error = Simple<char>> {
    text::ident()
        .padded()
        .repeated()
        .then_ignore(end())
        .map(|ids| LongSequence { ids })
}

impl Parse<LongSequence> for Chumsky {
    fn parse(input: &str) -> LongSequence {
        long_parser().parse(input).unwrap()
    }
}

fn nothing_parser() -> impl Parser<char, Nothing, Error = Simple<char>> {
    end().to(Nothing)
}

impl Parse<Nothing> for Chumsky {
    fn parse(input: &str) -> Nothing {
        nothing_parser().parse(input).unwrap()
    }
}
