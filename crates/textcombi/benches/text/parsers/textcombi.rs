use once_cell::sync::Lazy;
use textcombi::{
    choices,
    core::{all, optional, recursive},
    derived::{between, in_braces},
    text::{
        basic::{end_of_input, literal, pattern, whitespace},
        Value,
    },
    Parser,
};

use super::super::{LongSequence, Nothing, Parse, RecursiveIdent};

pub struct TextCombi;

fn ident<N: 'static>() -> Parser<N> {
    pattern("[A-Za-z_][A-Za-z0-9_]*").unwrap()
}

fn ws<N: 'static>() -> Parser<N> {
    optional(whitespace()).ignore()
}

fn quick_parse<N: 'static>(parser: &Parser<N>, input: &str) -> N {
    parser.run(input).unwrap().value.into_node().unwrap().node
}

static RECURSIVE_IDENT: Lazy<Parser<RecursiveIdent>> = Lazy::new(|| {
    let padded = between(ws(), ws());
    let parser = recursive(|r| {
        let next = (ident() & ws() & in_braces(padded(r))).map(|v| {
            let mut items = v.into_list().unwrap_or_default().into_iter();
            match (items.next(), items.next()) {
                (Some(Value::Token(id)), Some(Value::Node(recur))) => {
                    Value::node(RecursiveIdent::Next {
                        id,
                        recur: Box::new(recur.node),
                    })
                }
                _ => Value::Absent,
            }
        });
        choices![literal("!").map(|_| Value::node(RecursiveIdent::Final)), next]
    });
    between(ws(), ws() & end_of_input())(parser)
});

impl Parse<RecursiveIdent> for TextCombi {
    fn parse(input: &str) -> RecursiveIdent {
        quick_parse(&RECURSIVE_IDENT, input)
    }
}

static LONG_SEQUENCE: Lazy<Parser<LongSequence>> = Lazy::new(|| {
    between(ws(), ws() & end_of_input())(ident() / whitespace()).map(|v| {
        let ids = v
            .into_list()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| id.as_token().map(str::to_owned))
            .collect();
        Value::node(LongSequence { ids })
    })
});

impl Parse<LongSequence> for TextCombi {
    fn parse(input: &str) -> LongSequence {
        quick_parse(&LONG_SEQUENCE, input)
    }
}

static NOTHING: Lazy<Parser<Nothing>> =
    Lazy::new(|| all(end_of_input()).map(|_| Value::node(Nothing)));

impl Parse<Nothing> for TextCombi {
    fn parse(input: &str) -> Nothing {
        quick_parse(&NOTHING, input)
    }
}
