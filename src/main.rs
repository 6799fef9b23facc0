use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use fsa::cli::{Outcome, Session};

/// Interactive shell for finite automata
#[derive(Parser, Debug)]
#[command(name = "fsa", version)]
#[command(about = "Load, combine and query finite automata", long_about = None)]
struct Args {
    /// Automaton files to open on startup
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Log level, overriding RUST_LOG
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LevelFilter>,

    /// Do not print the greeting
    #[arg(long)]
    no_banner: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = args.log_level {
        logger.filter_level(level);
    }
    logger.init();

    let mut session = Session::new();
    for file in &args.files {
        let path = file.to_string_lossy();
        match session.open(&path) {
            Ok(id) => println!("opened {} as automaton {}", path, id),
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    if !args.no_banner {
        println!("fsa {}: type 'help' for commands", env!("CARGO_PKG_VERSION"));
    }

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("fsa> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                editor.add_history_entry(line.as_str())?;
                match session.execute(&line) {
                    Ok(Outcome::Continue(text)) => {
                        if !text.is_empty() {
                            println!("{}", text);
                        }
                    }
                    Ok(Outcome::Exit) => break,
                    Err(e) => eprintln!("Error: {:#}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
