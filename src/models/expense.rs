//! Expense model
//!
//! An expense is a named amount spent on the trip, optionally tagged with a
//! category, stamped with the local time it happened.

use chrono::{Local, NaiveDateTime, Timelike};

use super::money::Money;
use crate::error::{TripError, TripResult};

/// Format used for every timestamp read from or shown to the user
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    name: String,
    amount: Money,
    category: Option<String>,
    timestamp: NaiveDateTime,
}

impl Expense {
    /// Create a new expense stamped with the current local time
    pub fn new(name: impl Into<String>, amount: Money, category: Option<String>) -> Self {
        Self::with_timestamp(name, amount, category, now())
    }

    /// Create an expense with an explicit timestamp
    pub fn with_timestamp(
        name: impl Into<String>,
        amount: Money,
        category: Option<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            category,
            timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Timestamp rendered as `yyyy-MM-dd HH:mm:ss`
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Check whether this expense is tagged with the given category
    pub fn is_in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }

    pub(crate) fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
    }

    pub(crate) fn set_category(&mut self, category: Option<String>) {
        self.category = category;
    }

    pub(crate) fn set_timestamp(&mut self, timestamp: NaiveDateTime) {
        self.timestamp = timestamp;
    }
}

/// Parse a `yyyy-MM-dd HH:mm:ss` timestamp
pub fn parse_timestamp(input: &str) -> TripResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        TripError::DateParse {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Current local time truncated to whole seconds
fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
