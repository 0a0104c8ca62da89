//! Interactive shell
//!
//! Reads lines with rustyline and runs each one as a contactbook command,
//! so `add Ann Lee --phone 5551234567` behaves exactly like the one-shot
//! CLI. Errors are printed and the loop continues.

use crate::cli::{Commands, ShellLine};
use crate::commands;
use crate::config::Config;
use crate::error::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// What the shell should do with one input line
#[derive(Debug)]
pub enum ShellInput {
    /// Blank line
    Empty,
    /// `exit` or `quit`
    Exit,
    /// A parsed command
    Command(Commands),
    /// Unbalanced quotes or a clap error (including `help` output)
    Invalid(String),
}

/// Split a line into words; double quotes group words and are removed
///
/// Returns `None` when a quote is left open.
pub fn split_words(line: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }

    if in_quotes {
        return None;
    }
    if has_word {
        words.push(current);
    }
    Some(words)
}

/// Classify one line of shell input
pub fn parse_input(line: &str) -> ShellInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellInput::Empty;
    }
    if matches!(trimmed.to_lowercase().as_str(), "exit" | "quit") {
        return ShellInput::Exit;
    }

    let Some(words) = split_words(trimmed) else {
        return ShellInput::Invalid("Unbalanced quotes".to_string());
    };

    match ShellLine::try_parse_from(words) {
        Ok(ShellLine {
            command: Commands::Shell,
        }) => ShellInput::Invalid("Already in the shell".to_string()),
        Ok(parsed) => ShellInput::Command(parsed.command),
        Err(e) => ShellInput::Invalid(e.render().to_string()),
    }
}

/// Run the read-eval loop until `exit`, Ctrl-C or Ctrl-D
pub fn run_shell(config: &Config) -> Result<()> {
    tracing::info!("Starting interactive shell");
    let mut rl = DefaultEditor::new()?;

    println!(
        "{} (collection: {})",
        "contactbook shell".bold(),
        config.storage.data_file.display()
    );
    println!("Type 'help' for commands, 'exit' to leave.\n");

    loop {
        match rl.readline(&format!("{} ", "contacts>".cyan())) {
            Ok(line) => {
                let input = parse_input(&line);
                if !matches!(input, ShellInput::Empty) {
                    rl.add_history_entry(line.trim())?;
                }

                match input {
                    ShellInput::Empty => continue,
                    ShellInput::Exit => break,
                    ShellInput::Invalid(message) => println!("{}", message),
                    ShellInput::Command(command) => {
                        if let Err(e) = commands::execute(config, command) {
                            println!("{} {:#}", "Error:".red(), e);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Readline error: {}", e);
                return Err(e.into());
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}
