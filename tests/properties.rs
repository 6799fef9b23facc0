//! Language laws checked against brute-force enumeration on small automata.

use std::fmt::Write;

use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

use fsa::{Automaton, Dfa, Nfa};

const SYMBOLS: [char; 2] = ['a', 'b'];
const MAX_LEN: usize = 5;

/// A total DFA over {a, b} with 1 to 4 states.
#[derive(Clone, Debug)]
struct SmallDfa(Dfa);

impl Arbitrary for SmallDfa {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = 1 + usize::arbitrary(g) % 4;
        let start = usize::arbitrary(g) % n;
        let accepting: Vec<String> = (0..n)
            .filter(|_| bool::arbitrary(g))
            .map(|s| s.to_string())
            .collect();
        let mut text = format!("DFA\n{}\na b\n{}\n{}\n", n, start, accepting.join(" "));
        for from in 0..n {
            for symbol in &SYMBOLS {
                let to = usize::arbitrary(g) % n;
                writeln!(text, "{} {} {}", from, symbol, to).unwrap();
            }
        }
        SmallDfa(text.parse().unwrap())
    }
}

/// An epsilon-NFA over {a, b} with 1 to 4 states and up to 10 transitions.
#[derive(Clone, Debug)]
struct SmallEnfa(Nfa);

impl Arbitrary for SmallEnfa {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = 1 + usize::arbitrary(g) % 4;
        let start = usize::arbitrary(g) % n;
        let accepting: Vec<String> = (0..n)
            .filter(|_| bool::arbitrary(g))
            .map(|s| s.to_string())
            .collect();
        let mut text = format!("ENFA\n{}\na b\n{}\n{}\n", n, start, accepting.join(" "));
        for _ in 0..usize::arbitrary(g) % 11 {
            let from = usize::arbitrary(g) % n;
            let symbol = *g.choose(&['a', 'b', '~']).unwrap();
            let to = usize::arbitrary(g) % n;
            writeln!(text, "{} {} {}", from, symbol, to).unwrap();
        }
        SmallEnfa(text.parse().unwrap())
    }
}

/// Every word over {a, b} of length `min..max`.
fn words(min: usize, max: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max {
        frontier = frontier
            .iter()
            .flat_map(|w| SYMBOLS.iter().map(move |&c| format!("{}{}", w, c)))
            .collect();
        all.extend(frontier.iter().cloned());
    }
    all.into_iter().filter(|w| w.len() >= min && w.len() < max).collect()
}

fn short_words() -> Vec<String> {
    words(0, MAX_LEN + 1)
}

/// Can `word` be cut into one or more nonempty pieces accepted by `a`?
fn splits_into_pieces(a: &Dfa, word: &str) -> bool {
    let mut reach = vec![false; word.len() + 1];
    reach[0] = true;
    for end in 1..=word.len() {
        reach[end] = (0..end).any(|begin| reach[begin] && a.recognize(&word[begin..end]));
    }
    reach[word.len()]
}

#[quickcheck]
fn union_law(a: SmallDfa, b: SmallDfa) -> bool {
    let u = a.0.union(&b.0);
    short_words().iter().all(|w| u.recognize(w) == (a.0.recognize(w) || b.0.recognize(w)))
}

#[quickcheck]
fn concatenation_law(a: SmallDfa, b: SmallDfa) -> bool {
    let c = a.0.concatenate(&b.0);
    short_words().iter().all(|w| {
        let expected = (0..=w.len()).any(|i| a.0.recognize(&w[..i]) && b.0.recognize(&w[i..]));
        c.recognize(w) == expected
    })
}

#[quickcheck]
fn kleene_star_law(a: SmallDfa) -> bool {
    let s = a.0.kleene_star();
    short_words().iter().all(|w| s.recognize(w) == (w.is_empty() || splits_into_pieces(&a.0, w)))
}

#[quickcheck]
fn kleene_plus_law(a: SmallDfa) -> bool {
    let p = a.0.kleene_plus();
    short_words().iter().all(|w| {
        let expected = if w.is_empty() { a.0.recognize("") } else { splits_into_pieces(&a.0, w) };
        p.recognize(w) == expected
    })
}

#[quickcheck]
fn conversion_matches_simulation(e: SmallEnfa) -> bool {
    let d = e.0.to_dfa();
    short_words().iter().all(|w| d.recognize(w) == e.0.simulate(w))
}

#[quickcheck]
fn converted_automata_are_total(e: SmallEnfa) -> bool {
    let d = e.0.to_dfa();
    (0..d.num_states()).all(|s| SYMBOLS.iter().all(|&c| d.transition(s, c).is_some()))
}

// A DFA with n states accepts something iff it accepts a word shorter than n.
#[quickcheck]
fn emptiness_agrees_with_enumeration(a: SmallDfa) -> bool {
    let n = a.0.num_states();
    let accepts_short = words(0, n).iter().any(|w| a.0.recognize(w));
    a.0.is_language_empty() == !accepts_short
}

// ... and its language is infinite iff it accepts a word with length in [n, 2n).
#[quickcheck]
fn infiniteness_agrees_with_pumping(a: SmallDfa) -> bool {
    let n = a.0.num_states();
    let accepts_long = words(n, 2 * n).iter().any(|w| a.0.recognize(w));
    a.0.is_language_infinite() == accepts_long
}

#[quickcheck]
fn decisions_hold_after_conversion(e: SmallEnfa) -> TestResult {
    let d = e.0.to_dfa();
    let n = d.num_states();
    // enumeration up to length 2n gets too slow beyond this
    if n > 6 {
        return TestResult::discard();
    }
    let empty = !words(0, n).iter().any(|w| d.recognize(w));
    let infinite = words(n, 2 * n).iter().any(|w| d.recognize(w));
    TestResult::from_bool(d.is_language_empty() == empty && d.is_language_infinite() == infinite)
}

#[quickcheck]
fn printed_transitions_reparse_to_the_same_automaton(a: SmallDfa) -> bool {
    let accepting: Vec<String> = a.0.accepting_states().map(|s| s.to_string()).collect();
    let text = format!("DFA\n{}\n{}\n{}\n{}\n{}",
                       a.0.num_states(),
                       a.0.alphabet(),
                       a.0.start_state(),
                       accepting.join(" "),
                       a.0);
    text.parse::<Dfa>().map(|b| b == a.0).unwrap_or(false)
}
