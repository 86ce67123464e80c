//! Core data models for TripBuddy
//!
//! This module contains the value types of the expense domain: money amounts,
//! the static currency table and the expense entity.

pub mod currency;
pub mod expense;
pub mod money;

pub use currency::Currency;
pub use expense::{parse_timestamp, Expense, TIMESTAMP_FORMAT};
pub use money::{Money, MoneyParseError, MAX_AMOUNT};
