//! Regular operations on epsilon-NFAs.
//!
//! Each operator copies its operands into a fresh state space, shifting
//! every state reference by a per-operand offset, and glues the pieces
//! together with epsilon moves. Operands are only read.

use log::debug;

use crate::automaton::{Automaton, StateId};
use crate::nfa::Nfa;

/// Copies every transition of `source` into `target`, shifted by `offset`.
fn copy_shifted(target: &mut Nfa, source: &Nfa, offset: StateId) {
    for (from, on, to) in source.transitions() {
        target.add_transition(from + offset, on, to + offset);
    }
}

/// Accepts what `a` or `b` accepts.
///
/// State 0 is a fresh start with epsilon moves into both operands; `a`
/// occupies `[1, 1 + |a|)` and `b` the states after it.
pub fn union(a: &Nfa, b: &Nfa) -> Nfa {
    let a_off = 1;
    let b_off = 1 + a.num_states();
    let mut result = Nfa::with_states(1 + a.num_states() + b.num_states(),
                                      a.alphabet().union(b.alphabet()),
                                      0);

    result.add_transition(0, None, a.start_state() + a_off);
    result.add_transition(0, None, b.start_state() + b_off);
    copy_shifted(&mut result, a, a_off);
    copy_shifted(&mut result, b, b_off);
    for state in a.accepting_states() {
        result.mark_final(state + a_off);
    }
    for state in b.accepting_states() {
        result.mark_final(state + b_off);
    }

    debug!("union of {} and {} states: {} states", a.num_states(), b.num_states(), result.num_states());
    result
}

/// Accepts `uv` whenever `a` accepts `u` and `b` accepts `v`.
pub fn concatenation(a: &Nfa, b: &Nfa) -> Nfa {
    let b_off = a.num_states();
    let mut result = Nfa::with_states(a.num_states() + b.num_states(),
                                      a.alphabet().union(b.alphabet()),
                                      a.start_state());

    copy_shifted(&mut result, a, 0);
    copy_shifted(&mut result, b, b_off);
    for state in a.accepting_states() {
        result.add_transition(state, None, b.start_state() + b_off);
    }
    for state in b.accepting_states() {
        result.mark_final(state + b_off);
    }

    debug!("concatenation of {} and {} states: {} states",
           a.num_states(), b.num_states(), result.num_states());
    result
}

/// Zero or more repetitions of `a`.
///
/// The extra state `|a|` is both the new start and accepting, which admits
/// the empty word; accepting states of `a` return to it on epsilon.
pub fn kleene_star(a: &Nfa) -> Nfa {
    let hub = a.num_states();
    let mut result = Nfa::with_states(a.num_states() + 1, a.alphabet().clone(), hub);

    copy_shifted(&mut result, a, 0);
    result.add_transition(hub, None, a.start_state());
    for state in a.accepting_states() {
        result.add_transition(state, None, hub);
    }
    result.mark_final(hub);

    debug!("kleene star of {} states: {} states", a.num_states(), result.num_states());
    result
}

/// One or more repetitions of `a`.
pub fn kleene_plus(a: &Nfa) -> Nfa {
    concatenation(a, &kleene_star(a))
}
