//! Finite automata over `char` alphabets.
//!
//! Automata are read from a small line-oriented text format (see
//! [`parser`]), combined with the regular operations on epsilon-NFAs
//! ([`ops`]), determinized by subset construction ([`Nfa::to_dfa`]) and
//! queried through [`Dfa`]: word recognition, emptiness and infiniteness of
//! the language.
//!
//! ```
//! let even_as: fsa::Dfa = "DFA\n2\na\n0\n0\n0 a 1\n1 a 0\n".parse().unwrap();
//! assert!(even_as.recognize("aa"));
//! assert!(even_as.is_language_infinite());
//!
//! let one_or_more = even_as.kleene_plus();
//! assert!(one_or_more.recognize(""));
//! ```

pub mod alphabet;
pub mod automaton;
pub mod cli;
pub mod dfa;
pub mod error;
pub mod graph;
pub mod nfa;
pub mod ops;
pub mod parser;
pub mod registry;
pub mod scc;

use std::path::Path;

pub use crate::alphabet::{Alphabet, EPSILON};
pub use crate::automaton::{Automaton, StateId};
pub use crate::dfa::Dfa;
pub use crate::error::{Error, ParseError, Result};
pub use crate::nfa::Nfa;
pub use crate::registry::{Identifier, IdentifierRegistry, Registry};

/// Loads the automaton described by the file at `path`.
///
/// Files tagged `DFA` are validated strictly; anything else is read as an
/// epsilon-NFA and determinized.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Dfa> {
    Dfa::load(path)
}
