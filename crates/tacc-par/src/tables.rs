//! Canonical LR(1) state construction and the ACTION/GOTO table.

use std::collections::hash_map::Entry;
use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::error::TableError;
use crate::first::{compute, FirstSets};
use crate::grammar::{is_terminal, EPSILON, END, PRODUCTIONS};
use crate::items::{closure, goto, Item, ItemSet, ProdRef};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

pub struct LrTable {
    pub states: Vec<ItemSet>,
    pub action: FxHashMap<(usize, &'static str), Action>,
    pub goto: FxHashMap<(usize, &'static str), usize>,
    pub first: FirstSets,
    /// Every conflict observed while installing actions/gotos, in the
    /// order they were found; the installed table already reflects the
    /// first-installed-wins policy, this is purely for inspection.
    pub conflicts: Vec<TableError>,
}

impl LrTable {
    /// Builds the canonical collection of LR(1) states by a worklist
    /// fixed point over GOTO, then derives ACTION/GOTO from the completed
    /// state set.
    pub fn build() -> Self {
        let first = compute(&PRODUCTIONS);
        let seed = Item {
            prod: ProdRef::Augmented,
            dot: 0,
            lookahead: END,
        };
        let state0 = closure([seed], &first);

        let mut states: Vec<ItemSet> = vec![state0];
        let mut transitions: FxHashMap<(usize, &'static str), usize> = FxHashMap::default();

        let mut index = 0;
        while index < states.len() {
            let symbols: BTreeSet<&'static str> = states[index]
                .iter()
                .filter_map(|item| item.next_symbol())
                .filter(|s| *s != EPSILON)
                .collect();

            for symbol in symbols {
                let target_set = goto(&states[index], symbol, &first);
                if target_set.is_empty() {
                    continue;
                }
                let target_index = states
                    .iter()
                    .position(|existing| *existing == target_set)
                    .unwrap_or_else(|| {
                        states.push(target_set);
                        states.len() - 1
                    });
                transitions.insert((index, symbol), target_index);
            }
            index += 1;
        }

        let mut action: FxHashMap<(usize, &'static str), Action> = FxHashMap::default();
        let mut goto_table: FxHashMap<(usize, &'static str), usize> = FxHashMap::default();
        let mut conflicts = Vec::new();

        for (state_index, item_set) in states.iter().enumerate() {
            for item in item_set {
                if item.is_complete() {
                    match item.prod {
                        ProdRef::Augmented if item.lookahead == END => {
                            install_action(&mut action, &mut conflicts, state_index, END, Action::Accept);
                        }
                        ProdRef::Indexed(production_index) => {
                            install_action(
                                &mut action,
                                &mut conflicts,
                                state_index,
                                item.lookahead,
                                Action::Reduce(production_index),
                            );
                        }
                        _ => {}
                    }
                    continue;
                }

                let symbol = item.next_symbol().expect("incomplete item has a next symbol");
                let Some(&target) = transitions.get(&(state_index, symbol)) else {
                    continue;
                };
                if is_terminal(symbol) {
                    install_action(&mut action, &mut conflicts, state_index, symbol, Action::Shift(target));
                } else {
                    match goto_table.entry((state_index, symbol)) {
                        Entry::Occupied(existing) => {
                            if *existing.get() != target {
                                conflicts.push(TableError::GotoConflictIgnored {
                                    state: state_index,
                                    symbol: symbol.to_string(),
                                    existing: *existing.get(),
                                    attempted: target,
                                });
                            }
                        }
                        Entry::Vacant(vacant) => {
                            vacant.insert(target);
                        }
                    }
                }
            }
        }

        Self {
            states,
            action,
            goto: goto_table,
            first,
            conflicts,
        }
    }
}

fn install_action(
    action: &mut FxHashMap<(usize, &'static str), Action>,
    conflicts: &mut Vec<TableError>,
    state: usize,
    terminal: &'static str,
    attempted: Action,
) {
    match action.entry((state, terminal)) {
        Entry::Occupied(existing) => {
            if *existing.get() != attempted {
                conflicts.push(TableError::ActionConflict {
                    state,
                    terminal: terminal.to_string(),
                    existing: format!("{:?}", existing.get()),
                    attempted: format!("{attempted:?}"),
                });
            }
        }
        Entry::Vacant(vacant) => {
            vacant.insert(attempted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn building_the_table_produces_no_conflicts() {
        let table = LrTable::build();
        assert!(
            table.conflicts.is_empty(),
            "unexpected conflicts: {:?}",
            table.conflicts
        );
    }

    #[test]
    fn state_construction_is_deterministic_in_count() {
        let a = LrTable::build();
        let b = LrTable::build();
        assert_eq!(a.states.len(), b.states.len());
    }

    #[test]
    fn state_zero_shifts_on_open_brace() {
        let table = LrTable::build();
        assert!(matches!(table.action.get(&(0, "{")), Some(Action::Shift(_))));
    }

    #[test]
    fn accept_is_reachable() {
        let table = LrTable::build();
        assert!(table.action.values().any(|a| matches!(a, Action::Accept)));
    }
}
