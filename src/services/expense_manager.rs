//! Expense manager
//!
//! Owns the trip aggregate: budget, running total, base currency, category
//! set and expense list. Every operation validates its input before touching
//! state, so a rejected call leaves the manager exactly as it was.
//!
//! Invariants kept after every call:
//!
//! - every expense amount is positive and at most [`MAX_AMOUNT`]
//! - expense names are unique ignoring case
//! - every expense category is a member of the category set
//! - `total_expense` is the exact sum of all expense amounts
//! - a category referenced by an expense cannot be deleted

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::error::{TripError, TripResult};
use crate::models::{Currency, Expense, Money, MAX_AMOUNT};
use crate::storage::{ExpenseRecord, Snapshot};

/// Budget used when no saved state exists
pub const DEFAULT_BUDGET: Money = Money::from_units(1000);

/// In-memory repository of the trip's expenses and categories
#[derive(Debug, Clone)]
pub struct ExpenseManager {
    budget: Money,
    total_expense: Money,
    base_currency: Currency,
    categories: BTreeSet<String>,
    expenses: Vec<Expense>,
}

impl Default for ExpenseManager {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET)
    }
}

impl ExpenseManager {
    /// Create an empty manager with the given budget
    pub fn new(budget: Money) -> Self {
        Self::with_base_currency(budget, Currency::CANONICAL)
    }

    /// Create an empty manager with a budget and display currency
    pub fn with_base_currency(budget: Money, base_currency: Currency) -> Self {
        Self {
            budget,
            total_expense: Money::zero(),
            base_currency,
            categories: BTreeSet::new(),
            expenses: Vec::new(),
        }
    }

    // === Budget ===

    pub fn budget(&self) -> Money {
        self.budget
    }

    pub fn total_expense(&self) -> Money {
        self.total_expense
    }

    /// Budget minus total spent; negative once the budget is exceeded
    pub fn remaining_budget(&self) -> Money {
        self.budget - self.total_expense
    }

    /// Replace the budget
    pub fn set_budget(&mut self, amount: Money) -> TripResult<()> {
        if !amount.is_positive() {
            return Err(TripError::invalid_argument(
                amount.to_string(),
                "Budget should be more than 0.",
            ));
        }
        self.budget = amount;
        tracing::debug!(budget = %amount, "budget set");
        Ok(())
    }

    // === Currency ===

    pub fn base_currency(&self) -> Currency {
        self.base_currency
    }

    /// Switch the display currency; stored amounts are not converted
    pub fn set_base_currency(&mut self, code: &str) -> TripResult<Currency> {
        let currency: Currency = code.parse()?;
        self.base_currency = currency;
        tracing::debug!(currency = %currency, "base currency set");
        Ok(currency)
    }

    // === Categories ===

    /// All categories in sorted order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.contains(name)
    }

    /// Create a new, empty category
    pub fn create_category(&mut self, name: &str) -> TripResult<()> {
        if name.is_empty() {
            return Err(TripError::invalid_argument(
                name,
                "Category name should not be empty.",
            ));
        }
        if self.has_category(name) {
            return Err(TripError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        self.categories.insert(name.to_string());
        tracing::debug!(category = name, "category created");
        Ok(())
    }

    /// Delete a category that no expense refers to
    pub fn delete_category(&mut self, name: &str) -> TripResult<()> {
        if name.is_empty() {
            return Err(TripError::invalid_argument(
                name,
                "Category name should not be empty.",
            ));
        }
        if !self.has_category(name) {
            return Err(TripError::category_not_found(name));
        }

        let in_use = self.expenses.iter().filter(|e| e.is_in_category(name)).count();
        if in_use > 0 {
            return Err(TripError::invalid_argument(
                name,
                format!(
                    "Category is not empty: {} expense(s) still use it.",
                    in_use
                ),
            ));
        }

        self.categories.remove(name);
        tracing::debug!(category = name, "category deleted");
        Ok(())
    }

    // === Expenses ===

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    /// Case-insensitive lookup by name
    pub fn find_expense(&self, name: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.has_name(name))
    }

    /// Add a new expense stamped with the current time
    ///
    /// A category that does not exist yet is created.
    pub fn add_expense(
        &mut self,
        name: &str,
        amount: Money,
        category: Option<&str>,
    ) -> TripResult<&Expense> {
        self.validate_new_expense(name, amount, category)?;
        let expense = Expense::new(name, amount, category.map(str::to_string));
        Ok(self.push_expense(expense))
    }

    /// Add an expense with an explicit timestamp
    pub fn add_expense_at(
        &mut self,
        name: &str,
        amount: Money,
        category: Option<&str>,
        timestamp: NaiveDateTime,
    ) -> TripResult<&Expense> {
        self.validate_new_expense(name, amount, category)?;
        let expense =
            Expense::with_timestamp(name, amount, category.map(str::to_string), timestamp);
        Ok(self.push_expense(expense))
    }

    /// Remove an expense by name
    pub fn delete_expense(&mut self, name: &str) -> TripResult<Expense> {
        let index = self.index_of(name)?;
        let expense = self.expenses.remove(index);
        self.total_expense -= expense.amount();
        tracing::debug!(expense = expense.name(), amount = %expense.amount(), "expense deleted");
        Ok(expense)
    }

    /// Replace the amount of an expense
    pub fn edit_expense_amount(&mut self, name: &str, amount: Money) -> TripResult<&Expense> {
        validate_amount(amount)?;
        let index = self.index_of(name)?;

        let old = self.expenses[index].amount();
        self.total_expense += amount - old;
        self.expenses[index].set_amount(amount);
        tracing::debug!(expense = name, from = %old, to = %amount, "expense amount edited");
        Ok(&self.expenses[index])
    }

    /// Tag an expense with a category, creating the category if needed
    pub fn set_expense_category(&mut self, name: &str, category: &str) -> TripResult<()> {
        if name.is_empty() {
            return Err(TripError::invalid_argument(
                name,
                "Expense name should not be empty.",
            ));
        }
        if category.is_empty() {
            return Err(TripError::invalid_argument(
                category,
                "Category name should not be empty.",
            ));
        }
        let index = self.index_of(name)?;

        self.categories.insert(category.to_string());
        self.expenses[index].set_category(Some(category.to_string()));
        tracing::debug!(expense = name, category, "expense category set");
        Ok(())
    }

    /// Remove the category tag from an expense
    pub fn clear_category(&mut self, name: &str) -> TripResult<()> {
        if name.is_empty() {
            return Err(TripError::invalid_argument(
                name,
                "Expense name should not be empty.",
            ));
        }
        let index = self.index_of(name)?;
        self.expenses[index].set_category(None);
        tracing::debug!(expense = name, "expense category cleared");
        Ok(())
    }

    /// Change when an expense happened
    pub fn set_expense_time(&mut self, name: &str, timestamp: NaiveDateTime) -> TripResult<()> {
        let index = self.index_of(name)?;
        self.expenses[index].set_timestamp(timestamp);
        tracing::debug!(expense = name, %timestamp, "expense time set");
        Ok(())
    }

    /// Expense at a position in insertion order
    pub fn get_expense(&self, index: usize) -> TripResult<&Expense> {
        self.expenses.get(index).ok_or_else(|| {
            TripError::invalid_argument(index.to_string(), "Index out of bounds.")
        })
    }

    /// All expenses tagged with an existing category
    pub fn get_expenses_by_category(&self, category: &str) -> TripResult<Vec<&Expense>> {
        if !self.has_category(category) {
            return Err(TripError::category_not_found(category));
        }
        Ok(self
            .expenses
            .iter()
            .filter(|e| e.is_in_category(category))
            .collect())
    }

    /// Expenses whose name contains the word, ignoring case
    pub fn get_expenses_by_searchword(&self, word: &str) -> Vec<&Expense> {
        let needle = word.to_lowercase();
        self.expenses
            .iter()
            .filter(|e| e.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Expenses with `start <= timestamp <= end`
    pub fn get_expenses_by_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.timestamp() >= start && e.timestamp() <= end)
            .collect()
    }

    /// The largest expense; the earliest one wins a tie
    pub fn get_max_expense(&self) -> TripResult<&Expense> {
        let (first, rest) = self.split_first_expense()?;
        Ok(rest.iter().fold(first, |max, e| {
            if e.amount() > max.amount() {
                e
            } else {
                max
            }
        }))
    }

    /// The smallest expense; the earliest one wins a tie
    pub fn get_min_expense(&self) -> TripResult<&Expense> {
        let (first, rest) = self.split_first_expense()?;
        Ok(rest.iter().fold(first, |min, e| {
            if e.amount() < min.amount() {
                e
            } else {
                min
            }
        }))
    }

    /// Drop every expense and category; budget and currency stay
    pub fn clear_expenses_and_categories(&mut self) {
        self.expenses.clear();
        self.categories.clear();
        self.total_expense = Money::zero();
        tracing::debug!("expenses and categories cleared");
    }

    // === Persistence ===

    /// Capture the full state for saving
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            budget: self.budget,
            total_expense: self.total_expense,
            categories: self.categories.iter().cloned().collect(),
            expenses: self
                .expenses
                .iter()
                .map(|e| ExpenseRecord {
                    name: e.name().to_string(),
                    amount: e.amount(),
                    category: e.category().map(str::to_string),
                    timestamp: e.timestamp(),
                })
                .collect(),
        }
    }

    /// Rebuild a manager from a saved snapshot
    ///
    /// Every record goes through the same validation as a new expense. The
    /// running total is recomputed from the expenses.
    pub fn restore(snapshot: Snapshot, base_currency: Currency) -> TripResult<Self> {
        if !snapshot.budget.is_positive() {
            return Err(TripError::DataLoad(format!(
                "budget must be more than 0, found {}",
                snapshot.budget
            )));
        }

        let mut manager = Self::with_base_currency(snapshot.budget, base_currency);

        for category in snapshot.categories {
            if category.is_empty() {
                return Err(TripError::DataLoad("empty category name".into()));
            }
            manager.categories.insert(category);
        }

        for record in snapshot.expenses {
            manager
                .add_expense_at(
                    &record.name,
                    record.amount,
                    record.category.as_deref(),
                    record.timestamp,
                )
                .map_err(|e| {
                    TripError::DataLoad(format!("expense '{}': {}", record.name, e))
                })?;
        }

        if manager.total_expense != snapshot.total_expense {
            tracing::warn!(
                stored = %snapshot.total_expense,
                computed = %manager.total_expense,
                "stored total does not match expenses, using computed total"
            );
        }

        Ok(manager)
    }

    // === Internals ===

    fn validate_new_expense(
        &self,
        name: &str,
        amount: Money,
        category: Option<&str>,
    ) -> TripResult<()> {
        if name.is_empty() {
            return Err(TripError::invalid_argument(
                name,
                "Expense name should not be empty.",
            ));
        }
        validate_amount(amount)?;
        if category == Some("") {
            return Err(TripError::invalid_argument(
                "",
                "Category name should not be empty.",
            ));
        }
        if self.find_expense(name).is_some() {
            return Err(TripError::Duplicate {
                entity_type: "Expense",
                identifier: name.to_string(),
            });
        }
        Ok(())
    }

    fn push_expense(&mut self, expense: Expense) -> &Expense {
        if let Some(category) = expense.category() {
            if !self.categories.contains(category) {
                self.categories.insert(category.to_string());
            }
        }
        self.total_expense += expense.amount();
        tracing::debug!(expense = expense.name(), amount = %expense.amount(), "expense added");
        self.expenses.push(expense);
        &self.expenses[self.expenses.len() - 1]
    }

    fn index_of(&self, name: &str) -> TripResult<usize> {
        self.expenses
            .iter()
            .position(|e| e.has_name(name))
            .ok_or_else(|| TripError::expense_not_found(name))
    }

    fn split_first_expense(&self) -> TripResult<(&Expense, &[Expense])> {
        self.expenses
            .split_first()
            .ok_or_else(|| TripError::invalid_argument("", "No expenses available."))
    }
}

fn validate_amount(amount: Money) -> TripResult<()> {
    if !amount.is_positive() {
        return Err(TripError::invalid_argument(
            amount.to_string(),
            "Amount should be more than 0.",
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(TripError::invalid_argument(
            amount.to_string(),
            format!("Amount should be no more than {}.", MAX_AMOUNT),
        ));
    }
    Ok(())
}
