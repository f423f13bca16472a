use super::super::{LongSequence, Nothing, Parse, RecursiveIdent};

pub struct HandRolled;

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn recursive_ident(input: &str) -> (RecursiveIdent, &str) {
    let input = input.trim_start();
    if let Some(rest) = input.strip_prefix('!') {
        return (RecursiveIdent::Final, rest);
    }
    let end = input
        .find(|c: char| !is_ident_char(c))
        .unwrap_or(input.len());
    assert!(end > 0, "Expected identifier");
    let (id, rest) = input.split_at(end);
    let rest = rest
        .trim_start()
        .strip_prefix('{')
        .expect("Expected group {  }");
    let (recur, rest) = recursive_ident(rest);
    let rest = rest
        .trim_start()
        .strip_prefix('}')
        .expect("Expected group {  }");
    (
        RecursiveIdent::Next {
            id: id.to_owned(),
            recur: Box::new(recur),
        },
        rest,
    )
}

impl Parse<RecursiveIdent> for HandRolled {
    fn parse(input: &str) -> RecursiveIdent {
        let (ident, rest) = recursive_ident(input);
        assert!(rest.trim().is_empty());
        ident
    }
}

impl Parse<LongSequence> for HandRolled {
    fn parse(input: &str) -> LongSequence {
        let ids = input
            .split_whitespace()
            .map(|id| {
                assert!(id.chars().all(is_ident_char), "Expected ident");
                id.to_owned()
            })
            .collect();
        LongSequence { ids }
    }
}

impl Parse<Nothing> for HandRolled {
    fn parse(input: &str) -> Nothing {
        assert!(input.is_empty());
        Nothing
    }
}
