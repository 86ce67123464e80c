//! Structured commands
//!
//! A [`Command`] is a [`Keyword`] plus named options such as
//! `-n lunch -a 12.50`. The parser turns a raw input line into one; the
//! handler reads typed values out of it.

pub mod keyword;
pub mod parser;

pub use keyword::Keyword;
pub use parser::{is_quit_command, parse_command};

use std::fmt;

use crate::error::{TripError, TripResult};
use crate::models::{Money, MoneyParseError, MAX_AMOUNT};

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    keyword: Keyword,
    options: Vec<(String, String)>,
}

impl Command {
    /// Create a command with no options
    pub fn new(keyword: Keyword) -> Self {
        Self {
            keyword,
            options: Vec::new(),
        }
    }

    /// Builder-style option append
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_option(name, value);
        self
    }

    pub fn keyword(&self) -> Keyword {
        self.keyword
    }

    /// Options in the order they were given
    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    /// Append an option; a repeated name replaces the earlier value
    pub fn add_option(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.options.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.options.push((name, value)),
        }
    }

    /// Value of an optional option
    pub fn opt_or_none(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a required option
    pub fn opt(&self, name: &str) -> TripResult<&str> {
        self.opt_or_none(name)
            .ok_or_else(|| TripError::MissingOption(name.to_string()))
    }

    /// Parse an option as a positive amount no larger than [`MAX_AMOUNT`]
    pub fn amount(&self, name: &str) -> TripResult<Money> {
        let value = self.opt(name)?;
        let echo = || format!("-{} {}", name, value);

        let amount = match Money::parse(value) {
            Ok(amount) => amount,
            Err(MoneyParseError::InvalidFormat(_)) => {
                return Err(TripError::invalid_argument(echo(), "Not a number."))
            }
            // Too large in magnitude: the sign decides which bound was crossed
            Err(MoneyParseError::OutOfRange(_)) if value.trim_start().starts_with('-') => {
                Money::from_cents(i64::MIN)
            }
            Err(MoneyParseError::OutOfRange(_)) => Money::from_cents(i64::MAX),
        };

        if !amount.is_positive() {
            return Err(TripError::invalid_argument(
                echo(),
                "Value should be more than 0.",
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(TripError::invalid_argument(
                echo(),
                format!("Value should be no more than {}.", MAX_AMOUNT),
            ));
        }
        Ok(amount)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword)?;
        for (name, value) in &self.options {
            write!(f, " -{} {}", name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_amount(value: &str) -> Command {
        Command::new(Keyword::SetBudget).with_option("a", value)
    }

    #[test]
    fn test_missing_option() {
        let cmd = Command::new(Keyword::AddExpense);
        assert!(matches!(cmd.opt("n"), Err(TripError::MissingOption(ref o)) if o == "n"));
        assert!(matches!(cmd.amount("a"), Err(TripError::MissingOption(_))));
        assert_eq!(cmd.opt_or_none("c"), None);
    }

    #[test]
    fn test_amount() {
        assert_eq!(with_amount("12.5").amount("a").unwrap(), Money::from_cents(1250));
        assert_eq!(with_amount("100000").amount("a").unwrap(), MAX_AMOUNT);
    }

    #[test]
    fn test_amount_not_a_number() {
        let err = with_amount("abc").amount("a").unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument '-a abc': Not a number.");
    }

    #[test]
    fn test_amount_not_positive() {
        let err = with_amount("0").amount("a").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument '-a 0': Value should be more than 0."
        );
        assert!(with_amount("-5").amount("a").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_amount_too_large() {
        let err = with_amount("100000.01").amount("a").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument '-a 100000.01': Value should be no more than 100000.00."
        );
    }

    #[test]
    fn test_amount_exponent_notation() {
        assert_eq!(with_amount("1.25e2").amount("a").unwrap(), Money::from_cents(12_500));

        let err = with_amount("1e9").amount("a").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument '-a 1e9': Value should be no more than 100000.00."
        );

        let err = with_amount("1e40").amount("a").unwrap_err();
        assert!(err.to_string().ends_with("Value should be no more than 100000.00."));

        let err = with_amount("-1e40").amount("a").unwrap_err();
        assert!(err.to_string().ends_with("Value should be more than 0."));
    }

    #[test]
    fn test_repeated_option_replaces() {
        let cmd = Command::new(Keyword::Search)
            .with_option("k", "a")
            .with_option("k", "b");
        assert_eq!(cmd.options().len(), 1);
        assert_eq!(cmd.opt("k").unwrap(), "b");
    }

    #[test]
    fn test_display() {
        let cmd = Command::new(Keyword::AddExpense)
            .with_option("n", "lunch")
            .with_option("a", "12");
        assert_eq!(cmd.to_string(), "add-expense -n lunch -a 12");
    }
}
