use super::Parseable;

/// Identifiers nested in braces, ending with `!`: `id1 { id0 { ! } }`
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum RecursiveIdent {
    Next {
        id: String,
        recur: Box<RecursiveIdent>,
    },
    Final,
}

impl Parseable for RecursiveIdent {
    type Param = usize;
    fn generate_case(param: Self::Param) -> Self {
        let mut case = RecursiveIdent::Final;
        for i in 0..param {
            case = RecursiveIdent::Next {
                id: format!("id{}", i),
                recur: Box::new(case),
            };
        }
        case
    }

    fn generate_text(&self) -> String {
        match self {
            RecursiveIdent::Next { id, recur } => format!("{id} {{ {} }}", recur.generate_text()),
            RecursiveIdent::Final => String::from("!"),
        }
    }
}

/// Whitespace separated identifiers.
#[derive(PartialEq, Eq, Debug)]
pub struct LongSequence {
    pub ids: Vec<String>,
}

impl Parseable for LongSequence {
    type Param = usize;

    fn generate_case(param: Self::Param) -> Self {
        LongSequence {
            ids: (0..param).map(|i| format!("id{}", i)).collect(),
        }
    }

    fn generate_text(&self) -> String {
        self.ids.join(" ")
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Nothing;

impl Parseable for Nothing {
    type Param = ();

    fn generate_case((): Self::Param) -> Self {
        Nothing
    }

    fn generate_text(&self) -> String {
        String::new()
    }
}
