use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::automaton::StateId;

/// Reasons a transition-table description is rejected.
///
/// Line numbers are 1-based and refer to the input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: expected exactly one integer, found {content:?}")]
    MalformedCountLine { line: usize, content: String },

    #[error("line {line}: state {state} is out of range for an automaton with {num_states} states")]
    UndefinedStateReference {
        line: usize,
        state: StateId,
        num_states: usize,
    },

    #[error("a DFA with {num_states} states over {symbols} symbols needs {expected} transitions, found {found}")]
    IncompleteTransitionTable {
        num_states: usize,
        symbols: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: transition ({from}, {symbol:?}) already leads to {first}, cannot also lead to {second}")]
    DuplicateTransition {
        line: usize,
        from: StateId,
        symbol: char,
        first: StateId,
        second: StateId,
    },

    #[error("line {line}: symbol token {token:?} is not exactly one character")]
    InvalidSymbolToken { line: usize, token: String },

    #[error("unknown automaton kind tag {tag:?}, expected DFA, NFA, ENFA or UNSPECIFIED")]
    UnknownAutomatonKindTag { tag: String },

    #[error("line {line}: {token:?} is not a state number")]
    MalformedStateList { line: usize, token: String },

    #[error("line {line}: expected \"<from> <symbol> <to>\", found {content:?}")]
    MalformedTransition { line: usize, content: String },

    #[error("line {line}: symbol {symbol:?} is not part of the alphabet")]
    SymbolNotInAlphabet { line: usize, symbol: char },

    #[error("line {line}: {num_states} states exceed the supported maximum of {limit}")]
    TooManyStates {
        line: usize,
        num_states: usize,
        limit: usize,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

pub type Result<T> = ::std::result::Result<T, Error>;
