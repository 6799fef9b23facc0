//! Reader for the line-oriented transition-table format.
//!
//! ```text
//! DFA            kind tag: DFA, NFA, ENFA, or blank/UNSPECIFIED
//! 3              number of states
//! a b            alphabet
//! 0              start state
//! 2              accepting states (may be empty)
//! 0 a 1          one "<from> <symbol> <to>" per line
//! ...
//! ```
//!
//! A `DFA` tag selects strict validation: the table must define exactly one
//! target for every `(state, symbol)` pair. Every other tag is lenient:
//! repeated pairs accumulate targets and `~` stands for an epsilon move.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::alphabet::{Alphabet, EPSILON};
use crate::automaton::StateId;
use crate::error::ParseError;

/// Largest state count a description may declare.
pub const MAX_STATES: usize = 1 << 24;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Dfa,
    Nfa,
    Enfa,
    Unspecified,
}

impl Kind {
    /// Validation mode implied by the tag.
    pub fn mode(self) -> Mode {
        match self {
            Kind::Dfa => Mode::Strict,
            Kind::Nfa | Kind::Enfa | Kind::Unspecified => Mode::Lenient,
        }
    }
}

impl FromStr for Kind {
    type Err = ParseError;

    fn from_str(tag: &str) -> Result<Kind, ParseError> {
        let tag = tag.trim();
        match tag.to_ascii_uppercase().as_str() {
            "DFA" => Ok(Kind::Dfa),
            "NFA" => Ok(Kind::Nfa),
            "ENFA" => Ok(Kind::Enfa),
            "" | "UNSPECIFIED" => Ok(Kind::Unspecified),
            _ => Err(ParseError::UnknownAutomatonKindTag { tag: tag.to_string() }),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Kind::Dfa => "DFA",
            Kind::Nfa => "NFA",
            Kind::Enfa => "ENFA",
            Kind::Unspecified => "UNSPECIFIED",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Total, single-valued table; no epsilon moves.
    Strict,
    /// Multi-valued table with epsilon moves.
    Lenient,
}

/// One `"<from> <symbol> <to>"` line. `symbol` is `None` for an epsilon move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: StateId,
    pub symbol: Option<char>,
    pub to: StateId,
}

/// A validated automaton description.
///
/// Only `parse` and `parse_as` produce one, so every state reference is in
/// range, and a `Mode::Strict` description defines exactly one target per
/// `(state, symbol)` pair.
#[derive(Clone, Debug)]
pub struct Description {
    kind: Kind,
    mode: Mode,
    num_states: usize,
    alphabet: Alphabet,
    start: StateId,
    accepting: BTreeSet<StateId>,
    transitions: Vec<Transition>,
}

impl Description {
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepting(&self) -> &BTreeSet<StateId> {
        &self.accepting
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}

/// Parses `text`, validating according to its kind tag.
pub fn parse(text: &str) -> Result<Description, ParseError> {
    parse_with(text, None)
}

/// Parses `text`, validating in `mode` regardless of its kind tag.
pub fn parse_as(text: &str, mode: Mode) -> Result<Description, ParseError> {
    parse_with(text, Some(mode))
}

fn parse_with(text: &str, mode: Option<Mode>) -> Result<Description, ParseError> {
    let mut lines = text.lines().map(|line| line.trim_end_matches('\r')).enumerate();
    let mut header = |expected: usize| next_line(&mut lines, expected);

    let (_, tag) = header(1);
    let kind: Kind = tag.parse()?;
    let mode = mode.unwrap_or_else(|| kind.mode());

    let (n, line) = header(2);
    let num_states = single_integer(n, line)?;
    if num_states > MAX_STATES {
        return Err(ParseError::TooManyStates { line: n, num_states, limit: MAX_STATES });
    }

    let (n, line) = header(3);
    let alphabet = read_alphabet(n, line, mode)?;

    let (n, line) = header(4);
    let start = single_integer(n, line)?;
    check_state(n, start, num_states)?;

    let (n, line) = header(5);
    let mut accepting = BTreeSet::new();
    for token in line.split_whitespace() {
        let state = token.parse().map_err(|_| ParseError::MalformedStateList {
            line: n,
            token: token.to_string(),
        })?;
        check_state(n, state, num_states)?;
        accepting.insert(state);
    }

    debug!("parsed {} header: {} states, alphabet [{}], start {}, {} accepting",
           kind, num_states, alphabet, start, accepting.len());

    let mut transitions = Vec::new();
    for (n, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let transition = read_transition(n + 1, line, num_states)?;
        match transition.symbol {
            Some(symbol) if !alphabet.contains(symbol) => {
                return Err(ParseError::SymbolNotInAlphabet { line: n + 1, symbol });
            }
            None if mode == Mode::Strict => {
                return Err(ParseError::SymbolNotInAlphabet { line: n + 1, symbol: EPSILON });
            }
            _ => {}
        }
        transitions.push((n + 1, transition));
    }

    if mode == Mode::Strict {
        check_deterministic(num_states, &alphabet, &transitions)?;
    }

    debug!("parsed {} transitions", transitions.len());

    Ok(Description {
        kind,
        mode,
        num_states,
        alphabet,
        start,
        accepting,
        transitions: transitions.into_iter().map(|(_, t)| t).collect(),
    })
}

fn next_line<'t, I>(lines: &mut I, expected: usize) -> (usize, &'t str)
    where I: Iterator<Item = (usize, &'t str)>
{
    match lines.next() {
        Some((n, line)) => (n + 1, line),
        None => (expected, ""),
    }
}

fn single_integer(line: usize, content: &str) -> Result<usize, ParseError> {
    let malformed = || ParseError::MalformedCountLine {
        line,
        content: content.to_string(),
    };
    let mut tokens = content.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => token.parse().map_err(|_| malformed()),
        _ => Err(malformed()),
    }
}

fn check_state(line: usize, state: StateId, num_states: usize) -> Result<(), ParseError> {
    if state < num_states {
        Ok(())
    } else {
        Err(ParseError::UndefinedStateReference { line, state, num_states })
    }
}

fn single_char(line: usize, token: &str) -> Result<char, ParseError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseError::InvalidSymbolToken {
            line,
            token: token.to_string(),
        }),
    }
}

fn read_alphabet(line: usize, content: &str, mode: Mode) -> Result<Alphabet, ParseError> {
    let mut symbols = Vec::new();
    for token in content.split_whitespace() {
        let symbol = single_char(line, token)?;
        if symbol == EPSILON && mode == Mode::Strict {
            return Err(ParseError::InvalidSymbolToken {
                line,
                token: token.to_string(),
            });
        }
        symbols.push(symbol);
    }
    // Epsilon is implicit in lenient mode; `Alphabet` drops it.
    Ok(symbols.into_iter().collect())
}

fn read_transition(line: usize, content: &str, num_states: usize) -> Result<Transition, ParseError> {
    let malformed = || ParseError::MalformedTransition {
        line,
        content: content.to_string(),
    };
    let fields: Vec<&str> = content.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(malformed());
    }
    let from = fields[0].parse().map_err(|_| malformed())?;
    let symbol = single_char(line, fields[1])?;
    let to = fields[2].parse().map_err(|_| malformed())?;
    check_state(line, from, num_states)?;
    check_state(line, to, num_states)?;
    Ok(Transition {
        from,
        symbol: if symbol == EPSILON { None } else { Some(symbol) },
        to,
    })
}

fn check_deterministic(num_states: usize,
                       alphabet: &Alphabet,
                       transitions: &[(usize, Transition)])
                       -> Result<(), ParseError> {
    let expected = num_states.checked_mul(alphabet.len()).ok_or(ParseError::TooManyStates {
        line: 2,
        num_states,
        limit: MAX_STATES,
    })?;
    let mut table: HashMap<(StateId, char), StateId> = HashMap::new();
    for &(line, t) in transitions {
        // Epsilon moves were rejected before we got here.
        let symbol = match t.symbol {
            Some(symbol) => symbol,
            None => continue,
        };
        match table.entry((t.from, symbol)) {
            Entry::Vacant(entry) => {
                entry.insert(t.to);
            }
            Entry::Occupied(entry) => {
                if *entry.get() != t.to {
                    return Err(ParseError::DuplicateTransition {
                        line,
                        from: t.from,
                        symbol,
                        first: *entry.get(),
                        second: t.to,
                    });
                }
            }
        }
    }

    if transitions.len() != expected || table.len() != expected {
        return Err(ParseError::IncompleteTransitionTable {
            num_states,
            symbols: alphabet.len(),
            expected,
            found: transitions.len(),
        });
    }
    Ok(())
}
