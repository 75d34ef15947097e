//! LR(1) items, CLOSURE, and GOTO.

use rustc_hash::FxHashSet;

use crate::first::{first_of_sequence, FirstSets};
use crate::grammar::{is_terminal, AUGMENTED, AUGMENTED_HEAD, EPSILON, PRODUCTIONS, PRODUCTIONS_BY_HEAD};

/// Which production an item refers to: the one synthetic augmented
/// production used only to seed state 0, or an index into
/// [`crate::grammar::PRODUCTIONS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProdRef {
    Augmented,
    Indexed(usize),
}

impl ProdRef {
    pub fn head(&self) -> &'static str {
        match self {
            ProdRef::Augmented => AUGMENTED_HEAD,
            ProdRef::Indexed(i) => PRODUCTIONS[*i].head,
        }
    }

    pub fn body(&self) -> &'static [&'static str] {
        match self {
            ProdRef::Augmented => &AUGMENTED.body,
            ProdRef::Indexed(i) => &PRODUCTIONS[*i].body,
        }
    }
}

/// An LR(1) item: `(production, dot position, lookahead)`. Equality
/// (derived) matches all three components, as the spec requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Item {
    pub prod: ProdRef,
    pub dot: usize,
    pub lookahead: &'static str,
}

impl Item {
    /// A production whose body is the explicit epsilon symbol `[ε]`
    /// contributes nothing to dot-advancement: it behaves as if its body
    /// were empty, so `dot == 0` is already "at the end" for it.
    fn effective_len(&self) -> usize {
        if self.prod.body() == [EPSILON] {
            0
        } else {
            self.prod.body().len()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.dot >= self.effective_len()
    }

    pub fn next_symbol(&self) -> Option<&'static str> {
        if self.is_complete() {
            None
        } else {
            self.prod.body().get(self.dot).copied()
        }
    }
}

pub type ItemSet = FxHashSet<Item>;

/// Computes the closure of a seed item set under the grammar's
/// productions, adding predictive items for every non-terminal that
/// appears immediately after a dot.
pub fn closure(seed: impl IntoIterator<Item = Item>, first: &FirstSets) -> ItemSet {
    let mut items: ItemSet = seed.into_iter().collect();

    loop {
        let mut additions = Vec::new();
        for item in &items {
            let Some(next) = item.next_symbol() else {
                continue;
            };
            if is_terminal(next) {
                continue;
            }

            let rest: Vec<&'static str> = item
                .prod
                .body()
                .get(item.dot + 1..)
                .unwrap_or(&[])
                .iter()
                .copied()
                .chain(std::iter::once(item.lookahead))
                .collect();
            let lookaheads = first_of_sequence(&rest, first);

            if let Some(indices) = PRODUCTIONS_BY_HEAD.get(next) {
                for &index in indices {
                    for &lookahead in lookaheads.iter().filter(|l| **l != EPSILON) {
                        let candidate = Item {
                            prod: ProdRef::Indexed(index),
                            dot: 0,
                            lookahead,
                        };
                        if !items.contains(&candidate) {
                            additions.push(candidate);
                        }
                    }
                }
            }
        }
        if additions.is_empty() {
            break;
        }
        for item in additions {
            items.insert(item);
        }
    }

    items
}

/// GOTO(I, X): the items reachable from `I` by shifting over `X`, closed
/// under further prediction.
pub fn goto(items: &ItemSet, symbol: &str, first: &FirstSets) -> ItemSet {
    let moved = items.iter().filter_map(|item| {
        if item.next_symbol() == Some(symbol) {
            Some(Item {
                prod: item.prod,
                dot: item.dot + 1,
                lookahead: item.lookahead,
            })
        } else {
            None
        }
    });
    closure(moved, first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first::compute;
    use crate::grammar::END;

    #[test]
    fn state_zero_closure_contains_the_augmented_item() {
        let first = compute(&PRODUCTIONS);
        let seed = Item {
            prod: ProdRef::Augmented,
            dot: 0,
            lookahead: END,
        };
        let state0 = closure([seed], &first);
        assert!(state0.contains(&seed));
        assert!(state0.len() > 1, "closure should predict program → block");
    }

    #[test]
    fn closure_of_empty_seed_is_empty() {
        let first = compute(&PRODUCTIONS);
        let state = closure(std::iter::empty(), &first);
        assert!(state.is_empty());
    }

    #[test]
    fn goto_over_block_reaches_program_reduce_item() {
        let first = compute(&PRODUCTIONS);
        let seed = Item {
            prod: ProdRef::Augmented,
            dot: 0,
            lookahead: END,
        };
        let state0 = closure([seed], &first);
        let after_block = goto(&state0, "block", &first);
        assert!(after_block.iter().any(|item| {
            item.prod.head() == "program'" && item.dot == 1
        }));
    }

    #[test]
    fn epsilon_production_item_is_immediately_complete() {
        let item = Item {
            prod: ProdRef::Indexed(6), // decls → ε
            dot: 0,
            lookahead: END,
        };
        assert!(item.is_complete());
    }

    #[test]
    fn every_item_reachable_from_state_zero_keeps_its_dot_within_the_body() {
        use crate::tables::LrTable;
        let table = LrTable::build();
        for state in &table.states {
            for item in state {
                assert!(item.dot <= item.prod.body().len());
            }
        }
    }
}
