//! Static currency table
//!
//! All amounts are stored in SGD, the canonical currency. Each rate is the
//! number of units of that currency worth one SGD. The table is fixed; the
//! base currency only changes how amounts are shown.

use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::TripError;

/// A supported display currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    Sgd,
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cny,
    Myr,
    Aud,
    Krw,
    Thb,
}

impl Currency {
    /// Every currency in the table, canonical currency first
    pub const ALL: [Currency; 10] = [
        Currency::Sgd,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cny,
        Currency::Myr,
        Currency::Aud,
        Currency::Krw,
        Currency::Thb,
    ];

    /// The currency amounts are stored in
    pub const CANONICAL: Currency = Currency::Sgd;

    /// ISO code of the currency
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Sgd => "SGD",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Cny => "CNY",
            Self::Myr => "MYR",
            Self::Aud => "AUD",
            Self::Krw => "KRW",
            Self::Thb => "THB",
        }
    }

    /// Units of this currency per one canonical unit
    pub const fn rate(&self) -> f64 {
        match self {
            Self::Sgd => 1.0,
            Self::Usd => 0.75,
            Self::Eur => 0.69,
            Self::Gbp => 0.59,
            Self::Jpy => 112.0,
            Self::Cny => 5.40,
            Self::Myr => 3.30,
            Self::Aud => 1.15,
            Self::Krw => 1020.0,
            Self::Thb => 25.5,
        }
    }

    /// Look up a currency by code, ignoring ASCII case
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }

    /// Convert a canonical amount into this currency
    pub fn convert(&self, amount: Money) -> f64 {
        amount.to_decimal() * self.rate()
    }

    /// Render a canonical amount in this currency, e.g. "7.50 USD"
    pub fn format(&self, amount: Money) -> String {
        format!("{:.2} {}", self.convert(amount), self.code())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| TripError::invalid_argument(s, "Unknown currency code."))
    }
}
