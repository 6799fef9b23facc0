//! Command dispatcher for the interactive `fsa` shell.

use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::{anyhow, bail, Context, Result};
use lazy_static::lazy_static;
use log::info;

use crate::automaton::Automaton;
use crate::dfa::Dfa;
use crate::registry::{Identifier, Registry};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Open,
    List,
    Print,
    SaveAs,
    Empty,
    Infinite,
    Recognize,
    Union,
    Concat,
    Star,
    Plus,
    Close,
    Help,
    Exit,
}

lazy_static! {
    // name -> (command, most arguments accepted, usage)
    static ref COMMANDS: BTreeMap<&'static str, (Command, usize, &'static str)> = {
        let mut m = BTreeMap::new();
        m.insert("open", (Command::Open, usize::MAX, "open <path>            load an automaton file"));
        m.insert("list", (Command::List, 0, "list                   identifiers of loaded automata"));
        m.insert("print", (Command::Print, 1, "print <id>             show the transition table"));
        m.insert("saveas", (Command::SaveAs, 2, "saveas <id> <path>     write an automaton to a file"));
        m.insert("empty", (Command::Empty, 1, "empty <id>             is the language empty?"));
        m.insert("infinite", (Command::Infinite, 1, "infinite <id>          is the language infinite?"));
        m.insert("recognize", (Command::Recognize, 2, "recognize <id> [word]  is the word accepted?"));
        m.insert("union", (Command::Union, 2, "union <id> <id>        new automaton for the union"));
        m.insert("concat", (Command::Concat, 2, "concat <id> <id>       new automaton for the concatenation"));
        m.insert("star", (Command::Star, 1, "star <id>              new automaton for the Kleene star"));
        m.insert("plus", (Command::Plus, 1, "plus <id>              new automaton for the Kleene plus"));
        m.insert("close", (Command::Close, 1, "close <id>             forget an automaton"));
        m.insert("help", (Command::Help, 0, "help                   this text"));
        m.insert("exit", (Command::Exit, 0, "exit                   leave the shell"));
        m
    };
}

/// What the shell should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Exit,
}

/// A shell session: the automata loaded so far.
#[derive(Debug, Default)]
pub struct Session {
    registry: Registry,
}

impl Session {
    pub fn new() -> Self {
        Session { registry: Registry::new() }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Loads `path` and registers the result.
    pub fn open(&mut self, path: &str) -> Result<Identifier> {
        let dfa = Dfa::load(path)?;
        let id = self.registry.insert(dfa);
        info!("opened {} as automaton {}", path, id);
        Ok(id)
    }

    /// Runs one command line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        let (name, rest) = match line.find(char::is_whitespace) {
            Some(at) => (&line[..at], line[at..].trim()),
            None => (line, ""),
        };
        if name.is_empty() {
            return Ok(Outcome::Continue(String::new()));
        }
        let (command, max_args, usage) = match COMMANDS.get(name) {
            Some(&entry) => entry,
            None => bail!("unknown command {:?}, try \"help\"", name),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();
        if args.len() > max_args {
            let synopsis = usage.split("  ").next().unwrap_or(usage);
            bail!("too many arguments, usage: {}", synopsis);
        }

        let output = match command {
            Command::Open => {
                let path = unquote(rest);
                if path.is_empty() {
                    bail!("usage: open <path>");
                }
                format!("opened automaton {}", self.open(path)?)
            }
            Command::List => {
                let ids: Vec<String> = self.registry.identifiers().map(|id| id.to_string()).collect();
                ids.join(" ")
            }
            Command::Print => {
                let dfa = self.lookup(&args, 0)?;
                let mut out = Vec::new();
                dfa.print_transitions(&mut out)?;
                String::from_utf8(out)?.trim_end().to_string()
            }
            Command::SaveAs => {
                let dfa = self.lookup(&args, 0)?;
                let path = args.get(1).ok_or_else(|| anyhow!("usage: saveas <id> <path>"))?;
                dfa.export(unquote(path))?;
                format!("saved to {}", path)
            }
            Command::Empty => yes_no(self.lookup(&args, 0)?.is_language_empty()),
            Command::Infinite => yes_no(self.lookup(&args, 0)?.is_language_infinite()),
            Command::Recognize => {
                let dfa = self.lookup(&args, 0)?;
                let word = args.get(1).cloned().unwrap_or("");
                yes_no(dfa.recognize(word))
            }
            Command::Union => {
                let result = self.lookup(&args, 0)?.union(self.lookup(&args, 1)?);
                self.register(result)
            }
            Command::Concat => {
                let result = self.lookup(&args, 0)?.concatenate(self.lookup(&args, 1)?);
                self.register(result)
            }
            Command::Star => {
                let result = self.lookup(&args, 0)?.kleene_star();
                self.register(result)
            }
            Command::Plus => {
                let result = self.lookup(&args, 0)?.kleene_plus();
                self.register(result)
            }
            Command::Close => {
                let id = identifier(&args, 0)?;
                self.registry
                    .remove(id)
                    .ok_or_else(|| anyhow!("no automaton with identifier {}", id))?;
                format!("closed automaton {}", id)
            }
            Command::Help => help(),
            Command::Exit => return Ok(Outcome::Exit),
        };
        Ok(Outcome::Continue(output))
    }

    fn lookup(&self, args: &[&str], position: usize) -> Result<&Dfa> {
        let id = identifier(args, position)?;
        self.registry.get(id).ok_or_else(|| anyhow!("no automaton with identifier {}", id))
    }

    fn register(&mut self, dfa: Dfa) -> String {
        let states = dfa.num_states();
        let id = self.registry.insert(dfa);
        format!("created automaton {} ({} states)", id, states)
    }
}

fn identifier(args: &[&str], position: usize) -> Result<Identifier> {
    let token = args
        .get(position)
        .ok_or_else(|| anyhow!("missing automaton identifier (argument {})", position + 1))?;
    token.parse().with_context(|| format!("{:?} is not an automaton identifier", token))
}

fn unquote(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn yes_no(answer: bool) -> String {
    String::from(if answer { "yes" } else { "no" })
}

fn help() -> String {
    let mut text = String::new();
    for &(_, _, usage) in COMMANDS.values() {
        let _ = writeln!(text, "  {}", usage);
    }
    text.trim_end().to_string()
}
