use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::iter;
use std::path::Path;
use std::str::FromStr;

use bit_vec::BitVec;
use log::{debug, trace};

use crate::alphabet::Alphabet;
use crate::automaton::{finals_from, Automaton, StateId};
use crate::dfa::{Dfa, DfaState, DFA_START, DFA_STUCK};
use crate::error::{Error, ParseError};
use crate::parser::{self, Description, Mode};

/// A set of NFA states, treated as a single DFA state during subset construction.
pub type PowerState = BTreeSet<StateId>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NfaState {
    // `None` is the epsilon move
    pub(crate) transitions: HashMap<Option<char>, BTreeSet<StateId>>,
}

/// An epsilon-NFA.
///
/// This is a construction-time representation: it is built by the parser,
/// by lifting a `Dfa`, or by the composition operators, and its only real
/// consumer is `to_dfa`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nfa {
    alphabet: Alphabet,
    start: StateId,
    states: Vec<NfaState>,
    finals: BitVec,
}

impl Nfa {
    /// `num_states` states without transitions.
    pub(crate) fn with_states(num_states: usize, alphabet: Alphabet, start: StateId) -> Self {
        Nfa {
            alphabet,
            start,
            states: vec![NfaState::default(); num_states],
            finals: BitVec::from_elem(num_states, false),
        }
    }

    pub(crate) fn add_transition(&mut self, from: StateId, on: Option<char>, to: StateId) {
        self.states[from].transitions.entry(on).or_insert_with(BTreeSet::new).insert(to);
    }

    pub(crate) fn mark_final(&mut self, state: StateId) {
        self.finals.set(state, true);
    }

    /// Builds from a parsed description, in either mode.
    pub fn from_description(desc: &Description) -> Self {
        let mut nfa = Nfa::with_states(desc.num_states(), desc.alphabet().clone(), desc.start());
        nfa.finals = finals_from(desc.num_states(), desc.accepting().iter().cloned());
        for t in desc.transitions() {
            nfa.add_transition(t.from, t.symbol, t.to);
        }
        nfa
    }

    /// Reads a description file leniently, whatever its kind tag says.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(text.parse::<Nfa>()?)
    }

    /// Targets of `from` on `on`; `None` asks for epsilon moves.
    pub fn targets(&self, from: StateId, on: Option<char>) -> impl Iterator<Item = StateId> + '_ {
        self.states[from].transitions.get(&on).into_iter().flat_map(|set| set.iter().cloned())
    }

    /// Every `(from, symbol, to)` triple, `from` ascending, epsilon first.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Option<char>, StateId)> + '_ {
        let symbols: Vec<Option<char>> = iter::once(None).chain(self.alphabet.iter().map(Some)).collect();
        (0..self.states.len()).flat_map(move |from| {
            symbols.clone().into_iter().flat_map(move |on| self.targets(from, on).map(move |to| (from, on, to)))
        })
    }

    pub fn epsilon_closure(&self, state: StateId) -> PowerState {
        self.epsilon_closure_of(iter::once(state))
    }

    /// Smallest superset of `states` closed under epsilon moves.
    pub fn epsilon_closure_of<I>(&self, states: I) -> PowerState
        where I: IntoIterator<Item = StateId>
    {
        let mut closure = PowerState::new();
        let mut worklist = Vec::new();
        for state in states {
            if closure.insert(state) {
                worklist.push(state);
            }
        }
        while let Some(state) = worklist.pop() {
            for to in self.targets(state, None) {
                if closure.insert(to) {
                    worklist.push(to);
                }
            }
        }
        closure
    }

    /// Epsilon closure of everything `states` can reach on `symbol`.
    fn step(&self, states: &PowerState, symbol: char) -> PowerState {
        self.epsilon_closure_of(states.iter().flat_map(|&s| self.targets(s, Some(symbol))))
    }

    /// Runs the automaton directly on sets of states.
    ///
    /// A symbol outside the alphabet rejects the word, as `Dfa::recognize` does.
    pub fn simulate(&self, word: &str) -> bool {
        let mut cur_states = self.epsilon_closure(self.start);
        for symbol in word.chars() {
            if !self.alphabet.contains(symbol) {
                return false;
            }
            let nxt_states = self.step(&cur_states, symbol);
            cur_states = nxt_states;

            // Return early if "in stuck state"
            if cur_states.is_empty() {
                return false;
            }
        }
        cur_states.iter().any(|&s| self.is_accepting(s))
    }

    /// Subset construction.
    ///
    /// DFA state `DFA_STUCK` is the empty power-state and `DFA_START` the
    /// epsilon closure of the start state. Other power-states are numbered in
    /// discovery order. Every `(state, symbol)` pair gets an edge, so the
    /// result is total.
    pub fn to_dfa(&self) -> Dfa {
        let width = self.alphabet.len();
        let start_states = self.epsilon_closure(self.start);

        let mut rows: Vec<Vec<StateId>> = vec![vec![DFA_STUCK; width], vec![DFA_STUCK; width]];
        let mut power_states: Vec<PowerState> = vec![PowerState::new(), start_states.clone()];
        let mut states_map: HashMap<PowerState, StateId> = HashMap::new();
        states_map.insert(PowerState::new(), DFA_STUCK);
        states_map.insert(start_states.clone(), DFA_START);

        let mut worklist = vec![(start_states, DFA_START)];
        while let Some((cur_states, cur_num)) = worklist.pop() {
            for (index, symbol) in self.alphabet.iter().enumerate() {
                let nxt_states = self.step(&cur_states, symbol);

                let nxt_num = match states_map.get(&nxt_states) {
                    Some(&num) => num,
                    None => {
                        let num = rows.len();
                        trace!("power-state {} = {:?}", num, nxt_states);
                        rows.push(vec![DFA_STUCK; width]);
                        power_states.push(nxt_states.clone());
                        states_map.insert(nxt_states.clone(), num);
                        worklist.push((nxt_states, num));
                        num
                    }
                };

                rows[cur_num][index] = nxt_num;
            }
        }

        let finals: BitVec = power_states
            .iter()
            .map(|set| set.iter().any(|&s| self.is_accepting(s)))
            .collect();
        let states: Vec<DfaState> = rows
            .into_iter()
            .map(|row| DfaState::new(row.into_boxed_slice()))
            .collect();

        debug!("subset construction: {} NFA states -> {} DFA states",
               self.num_states(), states.len());

        Dfa::from_parts(self.alphabet.clone(), DFA_START, states.into_boxed_slice(), finals)
    }
}

impl Automaton for Nfa {
    fn num_states(&self) -> usize {
        self.states.len()
    }

    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn start_state(&self) -> StateId {
        self.start
    }

    fn finals(&self) -> &BitVec {
        &self.finals
    }
}

/// Lifts a DFA: the same table, seen as single-target sets, with epsilon available.
impl<'a> From<&'a Dfa> for Nfa {
    fn from(dfa: &'a Dfa) -> Nfa {
        let mut nfa = Nfa::with_states(dfa.num_states(), dfa.alphabet().clone(), dfa.start_state());
        nfa.finals = dfa.finals().clone();
        for (from, symbol, to) in dfa.transitions() {
            nfa.add_transition(from, Some(symbol), to);
        }
        nfa
    }
}

impl FromStr for Nfa {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Nfa, ParseError> {
        parser::parse_as(text, Mode::Lenient).map(|desc| Nfa::from_description(&desc))
    }
}
