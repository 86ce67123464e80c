//! Input line tokenizer
//!
//! Grammar: `KEYWORD (-NAME VALUE...)*`. An option name is a dash followed by
//! a letter; every token up to the next option name is part of its value,
//! joined with single spaces. `-5` is a value, not an option.

use super::{Command, Keyword};
use crate::error::{TripError, TripResult};

const QUIT_TOKENS: [&str; 3] = ["bye", "quit", "exit"];

/// Check whether a line ends the session
pub fn is_quit_command(line: &str) -> bool {
    let line = line.trim();
    QUIT_TOKENS.iter().any(|q| q.eq_ignore_ascii_case(line))
}

/// Parse a raw input line into a command
pub fn parse_command(line: &str) -> TripResult<Command> {
    let mut tokens = line.split_whitespace();

    let keyword: Keyword = tokens
        .next()
        .ok_or_else(|| TripError::invalid_argument("", "Empty command."))?
        .parse()?;

    let mut command = Command::new(keyword);
    let mut current: Option<(String, Vec<&str>)> = None;

    for token in tokens {
        if let Some(name) = option_name(token) {
            if let Some((name, words)) = current.take() {
                command.add_option(name, words.join(" "));
            }
            current = Some((name.to_string(), Vec::new()));
        } else {
            match current.as_mut() {
                Some((_, words)) => words.push(token),
                None => {
                    return Err(TripError::invalid_argument(
                        token,
                        "Expected an option such as -n before this value.",
                    ))
                }
            }
        }
    }

    if let Some((name, words)) = current {
        command.add_option(name, words.join(" "));
    }

    Ok(command)
}

fn option_name(token: &str) -> Option<&str> {
    let name = token.strip_prefix('-')?;
    if name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        Some(name)
    } else {
        None
    }
}
