//! FIRST-set fixed-point computation.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::grammar::{is_terminal, Production, EPSILON};

pub type FirstSets = FxHashMap<&'static str, FxHashSet<&'static str>>;

/// Computes FIRST(X) for every terminal and every non-terminal that
/// appears as a production head. FIRST(terminal) = {terminal}.
///
/// Adopts the "second source" fix for epsilon propagation: a production
/// contributes ε to FIRST(head) both when its body is literally empty
/// (`n = 0`) and when its body is the explicit one-symbol epsilon
/// production `[ε]` — this grammar always spells its epsilon alternatives
/// the second way (`decls → ε`, `stmts → ε`), so the two checks are kept
/// side by side rather than collapsed into one.
pub fn compute(productions: &[Production]) -> FirstSets {
    let mut first: FirstSets = FxHashMap::default();

    for &t in crate::grammar::TERMINALS.iter() {
        if t != EPSILON {
            first.entry(t).or_default().insert(t);
        }
    }
    for p in productions {
        first.entry(p.head).or_default();
    }

    loop {
        let mut changed = false;
        for p in productions {
            let head = p.head;
            if p.body.is_empty() || p.is_epsilon() {
                changed |= first.get_mut(head).unwrap().insert(EPSILON);
                continue;
            }

            let mut all_nullable = true;
            for symbol in &p.body {
                let symbol_first = first.get(symbol).cloned().unwrap_or_default();
                for s in symbol_first.iter().filter(|s| **s != EPSILON) {
                    changed |= first.get_mut(head).unwrap().insert(s);
                }
                if !symbol_first.contains(EPSILON) {
                    all_nullable = false;
                    break;
                }
            }
            if all_nullable {
                changed |= first.get_mut(head).unwrap().insert(EPSILON);
            }
        }
        if !changed {
            break;
        }
    }

    first
}

/// FIRST of a symbol sequence (e.g. the `β a` in an LR(1) item's
/// lookahead computation): the union of FIRST(Xᵢ) \ {ε} for each prefix
/// symbol up to the first that does not admit ε, plus ε itself if every
/// symbol in the sequence admits it.
pub fn first_of_sequence(seq: &[&'static str], first: &FirstSets) -> FxHashSet<&'static str> {
    let mut result = FxHashSet::default();
    let mut all_nullable = true;
    for symbol in seq {
        let symbol_first = if is_terminal(symbol) {
            let mut s = FxHashSet::default();
            if *symbol != EPSILON {
                s.insert(*symbol);
            }
            s
        } else {
            first.get(symbol).cloned().unwrap_or_default()
        };
        for s in symbol_first.iter().filter(|s| **s != EPSILON) {
            result.insert(*s);
        }
        if !symbol_first.contains(EPSILON) {
            all_nullable = false;
            break;
        }
    }
    if all_nullable {
        result.insert(EPSILON);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::PRODUCTIONS;

    #[test]
    fn first_of_a_terminal_is_itself() {
        let first = compute(&PRODUCTIONS);
        assert_eq!(first["while"], FxHashSet::from_iter(["while"]));
    }

    #[test]
    fn decls_admits_epsilon() {
        let first = compute(&PRODUCTIONS);
        assert!(first["decls"].contains(EPSILON));
    }

    #[test]
    fn stmts_admits_epsilon() {
        let first = compute(&PRODUCTIONS);
        assert!(first["stmts"].contains(EPSILON));
    }

    #[test]
    fn factor_first_set_covers_every_alternative() {
        let first = compute(&PRODUCTIONS);
        for t in ["(", "id", "num", "real", "true", "false"] {
            assert!(first["factor"].contains(t), "missing {t}");
        }
    }

    #[test]
    fn unary_first_set_propagates_through_factor() {
        let first = compute(&PRODUCTIONS);
        assert!(first["unary"].contains("!"));
        assert!(first["unary"].contains("-"));
        assert!(first["unary"].contains("id"));
    }

    #[test]
    fn first_of_sequence_stops_at_first_non_nullable_symbol() {
        let first = compute(&PRODUCTIONS);
        let seq: Vec<&'static str> = vec!["decls", "stmts", "}"];
        let result = first_of_sequence(&seq, &first);
        assert!(result.contains("}"));
        assert!(!result.contains(EPSILON));
    }
}
