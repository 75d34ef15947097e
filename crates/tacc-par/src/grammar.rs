//! The fixed grammar: terminals, productions, and the augmented start
//! production. Production order is load-bearing — it is the iteration
//! order CLOSURE/GOTO use when building states, and therefore affects
//! state numbering (see the determinism property tested in `tables`).

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

pub const EPSILON: &str = "ε";
pub const END: &str = "$";

/// A production's head and body. Body symbols are interned `&'static str`
/// literals drawn straight from the grammar table below; equality is
/// structural (derived).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Production {
    pub head: &'static str,
    pub body: Vec<&'static str>,
}

impl Production {
    fn new(head: &'static str, body: &[&'static str]) -> Self {
        Self {
            head,
            body: body.to_vec(),
        }
    }

    /// True for an explicit `A → ε` production (body is the single
    /// epsilon symbol, not an empty vector) — see the FIRST-set note in
    /// `first`.
    pub fn is_epsilon(&self) -> bool {
        matches!(self.body.as_slice(), [EPSILON])
    }
}

/// `program' → program`, used only to seed state 0 and to recognise
/// ACCEPT; it does not occupy a slot in [`PRODUCTIONS`].
pub static AUGMENTED: LazyLock<Production> =
    LazyLock::new(|| Production::new("program'", &["program"]));

pub const AUGMENTED_HEAD: &str = "program'";

/// Every terminal symbol in the grammar, including the two sentinels.
pub static TERMINALS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    vec![
        "{", "}", ";", "[", "]", "(", ")", "+", "-", "*", "/", "%", "=", "==", "!=", "<", "<=",
        ">", ">=", "&&", "||", "!", "if", "else", "while", "do", "break", "true", "false",
        "basic", "id", "num", "real", EPSILON, END,
    ]
});

pub fn is_terminal(symbol: &str) -> bool {
    TERMINALS.iter().any(|t| *t == symbol)
}

/// The 54 productions, transcribed verbatim (and in order) from the
/// reference grammar.
pub static PRODUCTIONS: LazyLock<Vec<Production>> = LazyLock::new(|| {
    vec![
        Production::new("program", &["block"]),
        Production::new("block", &["{", "decls", "stmts", "}"]),
        Production::new("block", &["{", "decls", "}"]),
        Production::new("block", &["{", "stmts", "}"]),
        Production::new("block", &["{", "}"]),
        Production::new("decls", &["decls", "decl"]),
        Production::new("decls", &[EPSILON]),
        Production::new("decl", &["type", "id", ";"]),
        Production::new("type", &["type", "[", "num", "]"]),
        Production::new("type", &["basic"]),
        Production::new("stmts", &["stmts", "stmt"]),
        Production::new("stmts", &[EPSILON]),
        Production::new("stmt", &["matched_stmt"]),
        Production::new("stmt", &["unmatched_stmt"]),
        Production::new("stmt", &["decls"]),
        Production::new("unmatched_stmt", &["if", "(", "bool", ")", "unmatched_stmt"]),
        Production::new(
            "unmatched_stmt",
            &["if", "(", "bool", ")", "matched_stmt", "else", "unmatched_stmt"],
        ),
        Production::new("matched_stmt", &["loc", "=", "bool", ";"]),
        Production::new(
            "matched_stmt",
            &["if", "(", "bool", ")", "matched_stmt", "else", "matched_stmt"],
        ),
        Production::new("matched_stmt", &["if", "(", "bool", ")", "matched_stmt"]),
        Production::new("matched_stmt", &["while", "(", "bool", ")", "stmt"]),
        Production::new("matched_stmt", &["do", "stmt", "while", "(", "bool", ")", ";"]),
        Production::new("matched_stmt", &["break", ";"]),
        Production::new("matched_stmt", &["block"]),
        Production::new("loc", &["loc", "[", "num", "]"]),
        Production::new("loc", &["id"]),
        Production::new("bool", &["bool'"]),
        Production::new("bool'", &["bool'", "||", "join"]),
        Production::new("bool'", &["join"]),
        Production::new("join", &["join", "&&", "equality"]),
        Production::new("join", &["equality"]),
        Production::new("equality", &["equality", "==", "rel"]),
        Production::new("equality", &["equality", "!=", "rel"]),
        Production::new("equality", &["rel"]),
        Production::new("rel", &["expr", "<", "expr"]),
        Production::new("rel", &["expr", "<=", "expr"]),
        Production::new("rel", &["expr", ">=", "expr"]),
        Production::new("rel", &["expr", ">", "expr"]),
        Production::new("rel", &["expr"]),
        Production::new("expr", &["expr", "+", "term"]),
        Production::new("expr", &["expr", "-", "term"]),
        Production::new("expr", &["term"]),
        Production::new("term", &["term", "*", "unary"]),
        Production::new("term", &["term", "/", "unary"]),
        Production::new("term", &["unary"]),
        Production::new("unary", &["!", "unary"]),
        Production::new("unary", &["-", "unary"]),
        Production::new("unary", &["factor"]),
        Production::new("factor", &["(", "bool", ")"]),
        Production::new("factor", &["loc"]),
        Production::new("factor", &["num"]),
        Production::new("factor", &["real"]),
        Production::new("factor", &["true"]),
        Production::new("factor", &["false"]),
    ]
});

/// Production indices grouped by head, in production order — used by
/// CLOSURE to enumerate the alternatives for a non-terminal without a
/// linear scan per item.
pub static PRODUCTIONS_BY_HEAD: LazyLock<FxHashMap<&'static str, Vec<usize>>> =
    LazyLock::new(|| {
        let mut map: FxHashMap<&'static str, Vec<usize>> = FxHashMap::default();
        for (index, production) in PRODUCTIONS.iter().enumerate() {
            map.entry(production.head).or_default().push(index);
        }
        map
    });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_54_productions() {
        assert_eq!(PRODUCTIONS.len(), 54);
    }

    #[test]
    fn terminals_has_35_entries_including_sentinels() {
        assert!(TERMINALS.contains(&EPSILON));
        assert!(TERMINALS.contains(&END));
        assert_eq!(TERMINALS.len(), 35);
    }

    #[test]
    fn decls_epsilon_production_is_recognised() {
        let decls_eps = &PRODUCTIONS[6];
        assert_eq!(decls_eps.head, "decls");
        assert!(decls_eps.is_epsilon());
    }

    #[test]
    fn program_is_not_a_terminal() {
        assert!(!is_terminal("program"));
        assert!(is_terminal("while"));
    }
}
