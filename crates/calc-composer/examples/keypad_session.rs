//! Keypad Session Example
//!
//! Reads keystroke scripts from stdin, one line at a time, echoes the keys
//! the keypad recognized, and prints the expression and result displays.
//!
//! Run with: cargo run --example keypad_session [resources.yaml]
//! Set RUST_LOG=calc_composer=debug to see rejected keys.

use std::io::{self, BufRead, Write};

use calc_composer::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let resources = match std::env::args().nth(1) {
        Some(path) => TextResources::from_yaml_file(path)?,
        None => TextResources::default(),
    };
    let mut session = Session::new(resources)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", session.expression())?;

    for line in stdin.lock().lines() {
        let line = line?;
        let keys: Vec<String> = parse_keys(&line, session.resources())
            .iter()
            .map(|event| event.label(session.resources()))
            .collect();
        writeln!(stdout, "keys: {}", keys.join(" "))?;

        if let Err(err) = session.press_keys(&line) {
            eprintln!("Error: {err}");
            continue;
        }
        writeln!(
            stdout,
            "{:>24} | {}",
            session.expression(),
            session.result_display()
        )?;
    }

    Ok(())
}
