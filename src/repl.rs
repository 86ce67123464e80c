//! Interactive read/print loop
//!
//! Reads one command per line, runs it against the expense manager and
//! prints the result framed by separator lines. Command errors are printed
//! and the session goes on, including for lines that are not valid UTF-8.
//! Only a failing reader or writer ends it early.

use std::io::{BufRead, Write};

use crate::command::{is_quit_command, parse_command};
use crate::error::TripResult;
use crate::handler::{dispatch, CommandHandler};
use crate::services::ExpenseManager;

const SEPARATOR: &str =
    "____________________________________________________________";

const WELCOME: &str = "Welcome to TripBuddy! Type `tutorial` for a list of available commands.";
const GOODBYE: &str = "Your TripBuddy session has ended. Bye!";

/// Line-oriented session over any reader/writer pair
pub struct Repl<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until a quit command or end of input
    pub fn run(&mut self, manager: &mut ExpenseManager) -> TripResult<()> {
        self.print_framed(WELCOME)?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                tracing::debug!("end of input");
                break;
            }

            // Invalid UTF-8 becomes U+FFFD instead of ending the session
            let line = String::from_utf8_lossy(&buf);
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if is_quit_command(trimmed) {
                break;
            }

            let message = run_line(manager, trimmed);
            self.print_framed(&message)?;
        }

        self.print_framed(GOODBYE)?;
        self.output.flush()?;
        Ok(())
    }

    /// Give back the writer, e.g. to inspect captured output
    pub fn into_output(self) -> W {
        self.output
    }

    fn print_framed(&mut self, message: &str) -> TripResult<()> {
        writeln!(self.output, "{}", SEPARATOR)?;
        writeln!(self.output, "{}", message)?;
        writeln!(self.output, "{}", SEPARATOR)?;
        Ok(())
    }
}

/// Parse and run one line, turning any error into its message
fn run_line(manager: &mut ExpenseManager, line: &str) -> String {
    let result = parse_command(line).and_then(|command| {
        let mut handler = CommandHandler::new(manager);
        dispatch(&mut handler, &command)
    });

    match result {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(input = line, error = %e, "command failed");
            e.to_string()
        }
    }
}
