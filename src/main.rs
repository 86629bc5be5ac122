// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! A simple interactive shell of the database.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use heaplight::Database;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter;
use tracing_subscriber::prelude::*;

/// HeapLight: a small heap-file relational engine.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Database environment directory.
    path: PathBuf,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(1);
        }
    };

    let fmt_layer = tracing_subscriber::fmt::layer().compact();
    let filter_layer =
        filter::EnvFilter::from_default_env().add_directive(LevelFilter::WARN.into());
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let mut db = match Database::open(&args.path) {
        Ok(db) => db,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(1);
        }
    };
    info!(path = %args.path.display(), "database environment open");

    match interactive(&mut db, &args.path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(1)
        }
    }
}

/// Run the interactive loop: `quit` exits, `test` runs the built-in
/// storage self-test, anything else is executed as SQL.
fn interactive(db: &mut Database, env_dir: &std::path::Path) -> Result<()> {
    let mut rl = Editor::<()>::new();
    let history_path = env_dir.join("history.txt");
    if let Err(err) = rl.load_history(&history_path) {
        info!("no shell history: {err}");
    }

    loop {
        match rl.readline("SQL> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                rl.add_history_entry(input);
                if input == "quit" {
                    break;
                }
                if input == "test" {
                    match db.run_self_test() {
                        Ok(()) => println!("test ok"),
                        Err(err) => println!("Error: {err}"),
                    }
                    continue;
                }
                match db.run(input) {
                    Ok(result) => println!("{result}"),
                    Err(err) => println!("Error: {err}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }

    if rl.save_history(&history_path).is_err() {
        info!("could not save shell history");
    }
    Ok(())
}
