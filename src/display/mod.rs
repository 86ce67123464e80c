//! Display formatting for terminal output
//!
//! Renders expenses, categories and the currency table as plain text.

pub mod expense;

pub use expense::{format_expense, format_expense_lines};

use crate::models::Currency;

/// Format the category list, or a "no categories" line
pub fn format_category_list<'a>(categories: impl IntoIterator<Item = &'a str>) -> String {
    let mut output = String::from("Here are your categories:");
    let mut any = false;
    for category in categories {
        any = true;
        output.push_str("\n - ");
        output.push_str(category);
    }
    if any {
        output
    } else {
        "There are no categories.".to_string()
    }
}

/// Format the currency table with the active base currency
pub fn format_currency_table(base: Currency) -> String {
    let mut output = format!(
        "Your current base currency is {}.\nAvailable currencies (per 1 {}):",
        base,
        Currency::CANONICAL
    );
    for currency in Currency::ALL {
        output.push_str(&format!("\n - {}: {}", currency.code(), currency.rate()));
    }
    output
}
