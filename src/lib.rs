//! TripBuddy - a trip budget and expense tracker for the terminal
//!
//! The user sets a budget, records expenses with optional categories and
//! reviews spending in a chosen display currency. Everything runs through a
//! line-oriented command loop; the trip is saved to a single JSON file when
//! the session ends.
//!
//! # Architecture
//!
//! - `models`: money, currencies and expenses
//! - `services`: the [`ExpenseManager`](services::ExpenseManager) repository
//!   and its business rules
//! - `command`: keywords, options and the input line parser
//! - `handler`: typed command handlers and the keyword dispatch table
//! - `display`: text formatting shared by the handlers
//! - `storage`: the JSON snapshot store
//! - `config`: paths and user settings
//! - `repl`: the interactive session
//! - `error`: custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use tripbuddy::command::parse_command;
//! use tripbuddy::handler::{dispatch, CommandHandler};
//! use tripbuddy::services::ExpenseManager;
//!
//! let mut manager = ExpenseManager::default();
//! let command = parse_command("add-expense -n lunch -a 12.50 -c food")?;
//! let message = dispatch(&mut CommandHandler::new(&mut manager), &command)?;
//! ```

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod handler;
pub mod models;
pub mod repl;
pub mod services;
pub mod storage;

pub use error::{TripError, TripResult};
