use std::fmt;
use std::iter::FromIterator;

/// Textual token for an epsilon move in transition-table files.
///
/// Epsilon is never a member of an `Alphabet`; inside an epsilon-NFA it is
/// the `None` key of a transition map.
pub const EPSILON: char = '~';

/// A finite, ordered set of input symbols.
///
/// Symbols are kept sorted so every symbol has a dense ordinal, which the
/// DFA uses to index its transition rows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new() -> Self {
        Alphabet { symbols: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn contains(&self, symbol: char) -> bool {
        self.index_of(symbol).is_some()
    }

    /// Ordinal of `symbol` within the alphabet, if it is a member.
    #[inline]
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.binary_search(&symbol).ok()
    }

    #[inline]
    pub fn symbol(&self, index: usize) -> char {
        self.symbols[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().cloned()
    }

    pub fn union(&self, other: &Alphabet) -> Alphabet {
        self.iter().chain(other.iter()).collect()
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut symbols: Vec<char> = iter.into_iter().filter(|&c| c != EPSILON).collect();
        symbols.sort_unstable();
        symbols.dedup();
        Alphabet { symbols }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for symbol in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", symbol)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_sorted_and_deduplicated() {
        let alphabet: Alphabet = "cabba".chars().collect();
        assert_eq!(alphabet.iter().collect::<String>(), "abc");
        assert_eq!(alphabet.index_of('c'), Some(2));
        assert_eq!(alphabet.index_of('z'), None);
    }

    #[test]
    fn epsilon_is_never_a_member() {
        let alphabet: Alphabet = vec!['a', EPSILON].into_iter().collect();
        assert_eq!(alphabet.len(), 1);
        assert!(!alphabet.contains(EPSILON));
    }

    #[test]
    fn union_merges_both_sides() {
        let a: Alphabet = "ab".chars().collect();
        let b: Alphabet = "bc".chars().collect();
        assert_eq!(a.union(&b).to_string(), "a b c");
    }
}
