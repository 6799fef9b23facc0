use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use bit_vec::BitVec;
use log::debug;

use crate::alphabet::Alphabet;
use crate::automaton::{finals_from, Automaton, StateId};
use crate::error::{Error, ParseError};
use crate::graph::{self, TransitionGraph};
use crate::nfa::Nfa;
use crate::ops;
use crate::parser::{self, Description, Mode};
use crate::scc;

/// The sink of a DFA produced by subset construction.
pub const DFA_STUCK: StateId = 0;
/// The start state of a DFA produced by subset construction.
pub const DFA_START: StateId = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    /// Successor per symbol, indexed by the symbol's ordinal in the alphabet.
    pub transitions: Box<[StateId]>,
}

impl DfaState {
    pub fn new(transitions: Box<[StateId]>) -> Self {
        DfaState { transitions }
    }
}

/// A deterministic finite automaton with a total transition function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    alphabet: Alphabet,
    start: StateId,
    states: Box<[DfaState]>,
    finals: BitVec,
}

impl Dfa {
    pub(crate) fn from_parts(alphabet: Alphabet,
                             start: StateId,
                             states: Box<[DfaState]>,
                             finals: BitVec)
                             -> Self {
        debug_assert!(states.iter().all(|s| s.transitions.len() == alphabet.len()));
        debug_assert_eq!(finals.len(), states.len());
        Dfa { alphabet, start, states, finals }
    }

    /// Builds the automaton a description stands for.
    ///
    /// A strict description is a complete table and is taken as is; a lenient
    /// one is read as an epsilon-NFA and determinized.
    pub fn from_description(desc: &Description) -> Self {
        match desc.mode() {
            Mode::Strict => {
                let width = desc.alphabet().len();
                let mut rows = vec![vec![0; width]; desc.num_states()];
                for t in desc.transitions() {
                    if let Some(index) = t.symbol.and_then(|c| desc.alphabet().index_of(c)) {
                        rows[t.from][index] = t.to;
                    }
                }
                let states: Vec<DfaState> = rows
                    .into_iter()
                    .map(|row| DfaState::new(row.into_boxed_slice()))
                    .collect();
                Dfa::from_parts(desc.alphabet().clone(),
                                desc.start(),
                                states.into_boxed_slice(),
                                finals_from(desc.num_states(), desc.accepting().iter().cloned()))
            }
            Mode::Lenient => {
                debug!("determinizing {} description", desc.kind());
                Nfa::from_description(desc).to_dfa()
            }
        }
    }

    /// Loads a description file; non-DFA kinds are determinized.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loading automaton from {}", path.display());
        Ok(text.parse::<Dfa>()?)
    }

    /// Writing automata back to disk is not supported.
    pub fn export<P: AsRef<Path>>(&self, _path: P) -> Result<(), Error> {
        Err(Error::NotImplemented("export"))
    }

    #[inline]
    pub fn transition(&self, from: StateId, symbol: char) -> Option<StateId> {
        let index = self.alphabet.index_of(symbol)?;
        self.states.get(from).map(|state| state.transitions[index])
    }

    /// Every `(from, symbol, to)` triple, `from` ascending, symbols in alphabet order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, char, StateId)> + '_ {
        self.states.iter().enumerate().flat_map(move |(from, state)| {
            state.transitions
                .iter()
                .enumerate()
                .map(move |(index, &to)| (from, self.alphabet.symbol(index), to))
        })
    }

    /// Returns true if `word` is in the language.
    ///
    /// A symbol outside the alphabet rejects the word at once.
    pub fn recognize(&self, word: &str) -> bool {
        let mut state = self.start;
        for symbol in word.chars() {
            match self.alphabet.index_of(symbol) {
                Some(index) => state = self.states[state].transitions[index],
                None => return false,
            }
        }
        self.finals[state]
    }

    /// Vertices are states, edges are transitions with their symbols dropped.
    pub fn graph(&self) -> TransitionGraph {
        let mut graph = TransitionGraph::new(self.states.len());
        for (from, _, to) in self.transitions() {
            graph.add_edge(from, to);
        }
        graph
    }

    pub fn is_language_empty(&self) -> bool {
        let graph = self.graph();
        let reachable = graph::reachable(&graph, self.start);
        !self.accepting_states().any(|state| reachable.contains(state))
    }

    /// The language is infinite iff some cycle lies on a path from the start
    /// state to an accepting state.
    pub fn is_language_infinite(&self) -> bool {
        let graph = self.graph();
        let from_start = graph::reachable(&graph, self.start);
        let to_accepting = graph::reachable_from(&graph.transpose(), self.accepting_states());
        let sccs = scc::kosaraju(&graph);

        (0..graph.len()).any(|v| {
            from_start.contains(v) && to_accepting.contains(v) &&
            !sccs.is_trivial(&graph, sccs.component_of(v))
        })
    }

    /// Writes one `"<from> <symbol> <to>"` line per transition.
    pub fn print_transitions<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for (from, symbol, to) in self.transitions() {
            writeln!(sink, "{} {} {}", from, symbol, to)?;
        }
        Ok(())
    }

    pub fn union(&self, other: &Dfa) -> Dfa {
        ops::union(&Nfa::from(self), &Nfa::from(other)).to_dfa()
    }

    pub fn concatenate(&self, other: &Dfa) -> Dfa {
        ops::concatenation(&Nfa::from(self), &Nfa::from(other)).to_dfa()
    }

    pub fn kleene_star(&self) -> Dfa {
        ops::kleene_star(&Nfa::from(self)).to_dfa()
    }

    pub fn kleene_plus(&self) -> Dfa {
        ops::kleene_plus(&Nfa::from(self)).to_dfa()
    }
}

impl Automaton for Dfa {
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

impl FromStr for Dfa {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Dfa, ParseError> {
        parser::parse(text).map(|desc| Dfa::from_description(&desc))
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (from, symbol, to) in self.transitions() {
            writeln!(f, "{} {} {}", from, symbol, to)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_A: &str = "DFA\n3\na b\n0\n2\n\
                              0 a 1\n0 b 0\n1 a 2\n1 b 0\n2 a 2\n2 b 2\n";

    fn dfa(text: &str) -> Dfa {
        text.parse().unwrap()
    }

    #[test]
    fn recognizes_scenario_a() {
        let a = dfa(SCENARIO_A);
        assert!(a.recognize("aa"));
        assert!(a.recognize("baab"));
        assert!(!a.recognize("b"));
        assert!(!a.recognize("abab"));
        assert!(!a.recognize(""));
    }

    #[test]
    fn foreign_symbols_reject() {
        let a = dfa(SCENARIO_A);
        assert!(!a.recognize("aac"));
        assert!(!a.recognize("c"));
    }

    #[test]
    fn empty_word_depends_on_start_state() {
        assert!(dfa("DFA\n1\na\n0\n0\n0 a 0\n").recognize(""));
        assert!(!dfa("DFA\n1\na\n0\n\n0 a 0\n").recognize(""));
    }

    #[test]
    fn scenario_a_properties() {
        let a = dfa(SCENARIO_A);
        assert!(!a.is_language_empty());
        assert!(a.is_language_infinite());
    }

    #[test]
    fn unreachable_accepting_state_means_empty() {
        let a = dfa("DFA\n2\na\n0\n1\n0 a 0\n1 a 1\n");
        assert!(a.is_language_empty());
        assert!(!a.is_language_infinite());
    }

    #[test]
    fn finite_language() {
        // accepts exactly "a" and "ab"; state 3 is a non-accepting sink
        let a = dfa("DFA\n4\na b\n0\n1 2\n\
                     0 a 1\n0 b 3\n1 a 3\n1 b 2\n2 a 3\n2 b 3\n3 a 3\n3 b 3\n");
        assert!(!a.is_language_empty());
        assert!(!a.is_language_infinite());
        assert!(a.recognize("a"));
        assert!(a.recognize("ab"));
        assert!(!a.recognize("abb"));
    }

    #[test]
    fn cycle_before_acceptance_is_infinite() {
        // 0 <-> 1 loop, then 2 accepting without a self-loop, 3 sink
        let a = dfa("DFA\n4\na b\n0\n2\n\
                     0 a 1\n0 b 2\n1 a 0\n1 b 3\n2 a 3\n2 b 3\n3 a 3\n3 b 3\n");
        assert!(a.is_language_infinite());
    }

    #[test]
    fn cycle_only_after_acceptance_is_not_enough_if_unreachable() {
        // the accepting state 1 is reached once; the only cycles are in sinks
        let a = dfa("DFA\n3\na\n0\n1\n0 a 1\n1 a 2\n2 a 2\n");
        assert!(!a.is_language_empty());
        assert!(!a.is_language_infinite());
    }

    #[test]
    fn self_loop_on_a_single_state() {
        let a = dfa("DFA\n1\na\n0\n0\n0 a 0\n");
        assert!(a.is_language_infinite());
        let b = dfa("DFA\n1\na\n0\n\n0 a 0\n");
        assert!(b.is_language_empty());
        assert!(!b.is_language_infinite());
    }

    #[test]
    fn prints_grouped_by_source() {
        let a = dfa(SCENARIO_A);
        let mut out = Vec::new();
        a.print_transitions(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(),
                   "0 a 1\n0 b 0\n1 a 2\n1 b 0\n2 a 2\n2 b 2\n");
        assert_eq!(a.to_string(), "0 a 1\n0 b 0\n1 a 2\n1 b 0\n2 a 2\n2 b 2\n");
    }

    #[test]
    fn lenient_text_is_determinized() {
        let a = dfa("NFA\n2\na b\n0\n1\n0 a 1\n0 a 0\n");
        assert_eq!(a.start_state(), DFA_START);
        assert!(a.recognize("a"));
        assert!(a.recognize("aaa"));
        assert!(!a.recognize("ab"));
    }

    #[test]
    fn export_is_not_implemented() {
        let a = dfa(SCENARIO_A);
        match a.export("/tmp/never-written.txt") {
            Err(Error::NotImplemented(what)) => assert_eq!(what, "export"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
