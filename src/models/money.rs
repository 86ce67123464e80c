//! Money type for expense and budget amounts
//!
//! Amounts are stored in cents of the canonical currency (i64) so that the
//! running total is an exact sum no matter how many additions, edits and
//! deletions happen.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest amount accepted for an expense or a command argument (100000.00)
pub const MAX_AMOUNT: Money = Money::from_cents(10_000_000);

/// A monetary amount stored as cents of the canonical currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use tripbuddy::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole canonical units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Convert a decimal value (as found in snapshot files) to the nearest cent
    pub fn from_decimal(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount as a decimal number of canonical units
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a decimal amount from a string
    ///
    /// Accepts "10", "10.5", "-10.50" and exponent forms such as "1.5e3",
    /// rounding extra fractional digits to the nearest cent ("11.118" becomes
    /// 11.12). A well-formed number too large for an `i64` of cents is
    /// [`MoneyParseError::OutOfRange`].
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (mantissa, exponent) = match body.split_once(|c: char| c == 'e' || c == 'E') {
            Some((mantissa, exponent)) => (mantissa, Some(exponent)),
            None => (body, None),
        };

        let (whole, fraction) = match mantissa.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (mantissa, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let cents = match exponent {
            None => digits_to_cents(whole, fraction),
            Some(exponent) => {
                let exponent: i32 = exponent.parse().map_err(|_| invalid())?;
                shifted_digits_to_cents(whole, fraction, exponent)
            }
        }
        .ok_or_else(|| MoneyParseError::OutOfRange(trimmed.to_string()))?;

        Ok(Self(if negative { -cents } else { cents }))
    }
}

/// Cents for validated `whole.fraction` digits; `None` on overflow
fn digits_to_cents(whole: &str, fraction: &str) -> Option<i64> {
    let units: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    let digits: Vec<i64> = fraction
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(i64::from)
        .collect();
    let tenths = digits.first().copied().unwrap_or(0);
    let hundredths = digits.get(1).copied().unwrap_or(0);
    let round_up = digits.get(2).is_some_and(|d| *d >= 5);

    units
        .checked_mul(100)
        .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
}

/// Move the decimal point `exponent` places, then convert
fn shifted_digits_to_cents(whole: &str, fraction: &str, exponent: i32) -> Option<i64> {
    let digits = format!("{}{}", whole, fraction);
    if digits.chars().all(|c| c == '0') {
        return Some(0);
    }

    let point = whole.len() as i64 + i64::from(exponent);
    // Past the thousandths place nothing survives rounding
    if point < -2 {
        return Some(0);
    }
    // More whole digits than an i64 of cents can hold
    if point > digits.len() as i64 + 20 {
        return None;
    }

    if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        digits_to_cents("", &format!("{}{}", zeros, digits))
    } else {
        let point = point as usize;
        if point >= digits.len() {
            let zeros = "0".repeat(point - digits.len());
            digits_to_cents(&format!("{}{}", digits, zeros), "")
        } else {
            digits_to_cents(&digits[..point], &digits[point..])
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.0.abs();
        write!(f, "{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    /// Well-formed, but too large to represent
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
