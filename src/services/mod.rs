//! Service layer for TripBuddy
//!
//! The service layer holds the business rules on top of the data models:
//! uniqueness, category references and budget arithmetic.

pub mod expense_manager;

pub use expense_manager::{ExpenseManager, DEFAULT_BUDGET};
