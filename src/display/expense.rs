//! Expense display formatting
//!
//! Amounts are always converted to the active base currency before being
//! shown.

use crate::models::{Currency, Expense};

/// Format a single expense, e.g. `lunch | 20.00 SGD | food | 2025-04-05 12:00:00`
pub fn format_expense(expense: &Expense, currency: Currency) -> String {
    let mut output = format!("{} | {}", expense.name(), currency.format(expense.amount()));
    if let Some(category) = expense.category() {
        output.push_str(" | ");
        output.push_str(category);
    }
    output.push_str(" | ");
    output.push_str(&expense.timestamp_string());
    output
}

/// Format a header followed by one ` - ` line per expense
pub fn format_expense_lines(header: &str, expenses: &[&Expense], currency: Currency) -> String {
    let mut output = String::from(header);
    for expense in expenses {
        output.push_str("\n - ");
        output.push_str(&format_expense(expense, currency));
    }
    output
}
