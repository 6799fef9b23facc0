//! Identifiers for automata held by an interactive session.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::dfa::Dfa;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(u64);

impl Identifier {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identifier {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Identifier, Self::Err> {
        s.parse().map(Identifier)
    }
}

/// Hands out increasing identifiers, starting at 1. Never reuses one.
#[derive(Debug)]
pub struct IdentifierRegistry {
    last: AtomicU64,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        IdentifierRegistry { last: AtomicU64::new(0) }
    }

    pub fn create_identifier(&self) -> Identifier {
        Identifier(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl Default for IdentifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The live automata of a session, keyed by identifier.
#[derive(Debug, Default)]
pub struct Registry {
    identifiers: IdentifierRegistry,
    live: BTreeMap<Identifier, Dfa>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            identifiers: IdentifierRegistry::new(),
            live: BTreeMap::new(),
        }
    }

    /// Takes ownership of `dfa` and returns its fresh identifier.
    pub fn insert(&mut self, dfa: Dfa) -> Identifier {
        let id = self.identifiers.create_identifier();
        self.live.insert(id, dfa);
        id
    }

    pub fn get(&self, id: Identifier) -> Option<&Dfa> {
        self.live.get(&id)
    }

    pub fn remove(&mut self, id: Identifier) -> Option<Dfa> {
        self.live.remove(&id)
    }

    pub fn contains(&self, id: Identifier) -> bool {
        self.live.contains_key(&id)
    }

    /// Live identifiers in ascending order.
    pub fn identifiers(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.live.keys().cloned()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
