use std::fmt::Debug;

use bit_vec::BitVec;

use crate::alphabet::Alphabet;

/// Zero-based ordinal of a state within its owning automaton.
pub type StateId = usize;

/// Read-only view shared by deterministic and epsilon-nondeterministic automata.
pub trait Automaton: Debug {
    fn num_states(&self) -> usize;

    fn alphabet(&self) -> &Alphabet;

    fn start_state(&self) -> StateId;

    fn finals(&self) -> &BitVec;

    #[inline]
    fn is_accepting(&self, state: StateId) -> bool {
        self.finals().get(state).unwrap_or(false)
    }

    fn accepting_states(&self) -> AcceptingStates<'_> {
        AcceptingStates {
            finals: self.finals(),
            next: 0,
        }
    }
}

/// Iterator over the accepting states of an automaton, in ascending order.
#[derive(Debug)]
pub struct AcceptingStates<'a> {
    finals: &'a BitVec,
    next: StateId,
}

impl<'a> Iterator for AcceptingStates<'a> {
    type Item = StateId;

    fn next(&mut self) -> Option<StateId> {
        while self.next < self.finals.len() {
            let state = self.next;
            self.next += 1;
            if self.finals[state] {
                return Some(state);
            }
        }
        None
    }
}

/// Builds an accepting-state bit vector of length `num_states`.
pub(crate) fn finals_from<I>(num_states: usize, accepting: I) -> BitVec
    where I: IntoIterator<Item = StateId>
{
    let mut finals = BitVec::from_elem(num_states, false);
    for state in accepting {
        finals.set(state, true);
    }
    finals
}
