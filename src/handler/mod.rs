//! Command handler
//!
//! Turns typed arguments into calls on the [`ExpenseManager`] and renders the
//! outcome as a message for the user. The handler keeps no state of its own;
//! it borrows the manager for as long as it lives.

pub mod dispatch;

pub use dispatch::{dispatch, HandlerFn, DISPATCH_TABLE};

use chrono::NaiveDateTime;

use crate::display::{
    format_category_list, format_currency_table, format_expense, format_expense_lines,
};
use crate::error::{TripError, TripResult};
use crate::models::{parse_timestamp, Money, TIMESTAMP_FORMAT};
use crate::services::ExpenseManager;

const TUTORIAL: &str = "\
Welcome to the tutorial of TripBuddy!

Format guidelines:
- Square brackets [] indicate optional parts.
- AMOUNT must be a positive number no larger than 100000.
- TIME must look like 2025-04-05 12:00:00.

Budget:
  set-budget -a AMOUNT            Set your total trip budget (default 1000).
  adjust-budget -a AMOUNT         Change the budget and see what is left.
  view-budget                     Show budget, spending and what remains.

Expenses:
  add-expense -n NAME -a AMOUNT [-c CATEGORY]
  delete-expense -n NAME
  edit-amount -n NAME -a AMOUNT
  set-time -n NAME -t TIME
  list-expense [-c CATEGORY]
  max-expense / min-expense
  filter-date -s TIME -e TIME
  search -k WORD
  clear                           Remove all expenses and categories.

Categories:
  create-category -c CATEGORY
  delete-category -c CATEGORY
  set-category -n NAME -c CATEGORY
  clear-category -n NAME
  view-categories

Currency:
  view-currency
  set-base-currency -c CODE

Type `bye` to save and leave.";

/// Handles commands and returns message strings
pub struct CommandHandler<'a> {
    manager: &'a mut ExpenseManager,
}

impl<'a> CommandHandler<'a> {
    /// Create a handler working on the given manager
    pub fn new(manager: &'a mut ExpenseManager) -> Self {
        Self { manager }
    }

    /// Read-only access to the underlying manager
    pub fn manager(&self) -> &ExpenseManager {
        &*self.manager
    }

    /// Amount converted to the base currency, e.g. "7.50 USD"
    fn fmt(&self, amount: Money) -> String {
        self.manager.base_currency().format(amount)
    }

    fn remaining_line(&self) -> String {
        format!(
            "Your remaining budget is {}.",
            self.fmt(self.manager.remaining_budget())
        )
    }

    pub fn handle_tutorial(&self) -> String {
        TUTORIAL.to_string()
    }

    // === Budget ===

    pub fn handle_set_budget(&mut self, budget: Money) -> TripResult<String> {
        self.manager.set_budget(budget)?;
        Ok(format!("Your budget has been set to {}.", self.fmt(budget)))
    }

    pub fn handle_adjust_budget(&mut self, budget: Money) -> TripResult<String> {
        self.manager.set_budget(budget)?;
        Ok(format!(
            "Your budget has been updated to {}.\nYou have {} remaining to spend!",
            self.fmt(budget),
            self.fmt(self.manager.remaining_budget())
        ))
    }

    pub fn handle_view_budget(&self) -> String {
        let remaining = self.manager.remaining_budget();
        let last_line = if remaining.is_negative() {
            format!("You have exceeded your budget by {}.", self.fmt(remaining.abs()))
        } else {
            format!(
                "This leaves you with a remaining budget of {}.",
                self.fmt(remaining)
            )
        };
        format!(
            "The original budget you set was {}.\nSo far, you have spent {}.\n{}",
            self.fmt(self.manager.budget()),
            self.fmt(self.manager.total_expense()),
            last_line
        )
    }

    // === Categories ===

    pub fn handle_create_category(&mut self, category: &str) -> TripResult<String> {
        self.manager.create_category(category)?;
        Ok(format!("Successfully created category: {}.", category))
    }

    pub fn handle_delete_category(&mut self, category: &str) -> TripResult<String> {
        self.manager.delete_category(category)?;
        Ok(format!("Successfully deleted category: {}.", category))
    }

    pub fn handle_set_category(&mut self, name: &str, category: &str) -> TripResult<String> {
        self.manager.set_expense_category(name, category)?;
        Ok(format!("Successfully set category for {} to {}.", name, category))
    }

    pub fn handle_clear_category(&mut self, name: &str) -> TripResult<String> {
        self.manager.clear_category(name)?;
        Ok(format!("Successfully cleared category for {}.", name))
    }

    pub fn handle_view_categories(&self) -> String {
        format_category_list(self.manager.categories())
    }

    // === Expenses ===

    pub fn handle_add_expense(
        &mut self,
        name: &str,
        amount: Money,
        category: Option<&str>,
    ) -> TripResult<String> {
        self.manager.add_expense(name, amount, category)?;
        let added = match category {
            Some(category) => format!(
                "Expense {} added successfully to category {}.",
                name, category
            ),
            None => format!("Expense {} added successfully.", name),
        };
        Ok(format!("{}\n{}", added, self.remaining_line()))
    }

    pub fn handle_delete_expense(&mut self, name: &str) -> TripResult<String> {
        self.manager.delete_expense(name)?;
        Ok(format!(
            "Expense {} deleted successfully.\n{}",
            name,
            self.remaining_line()
        ))
    }

    pub fn handle_edit_amount(&mut self, name: &str, amount: Money) -> TripResult<String> {
        self.manager.edit_expense_amount(name, amount)?;
        Ok(format!(
            "Successfully updated amount for {} to {}.\n{}",
            name,
            self.fmt(amount),
            self.remaining_line()
        ))
    }

    /// Set an expense's time; the name is checked before the time is parsed
    pub fn handle_set_time(&mut self, name: &str, timestamp: &str) -> TripResult<String> {
        if self.manager.find_expense(name).is_none() {
            return Err(TripError::expense_not_found(name));
        }
        let timestamp = parse_timestamp(timestamp)?;
        self.manager.set_expense_time(name, timestamp)?;
        Ok(format!(
            "Successfully set time for {} to {}.",
            name,
            timestamp.format(TIMESTAMP_FORMAT)
        ))
    }

    pub fn handle_list_expense(&self, category: Option<&str>) -> TripResult<String> {
        let expenses = match category {
            Some(category) => self.manager.get_expenses_by_category(category)?,
            None => self.manager.expenses().iter().collect(),
        };
        if expenses.is_empty() {
            return Ok("There are no expenses.".to_string());
        }

        let total: Money = expenses.iter().map(|e| e.amount()).sum();
        let list = format_expense_lines(
            "Here is a list of your past expenses: ",
            &expenses,
            self.manager.base_currency(),
        );
        Ok(format!("{}\nTotal amount spent: {}.", list, self.fmt(total)))
    }

    pub fn handle_max_expense(&self) -> TripResult<String> {
        let expense = self.manager.get_max_expense()?;
        Ok(format!(
            "Maximum expense: {}",
            format_expense(expense, self.manager.base_currency())
        ))
    }

    pub fn handle_min_expense(&self) -> TripResult<String> {
        let expense = self.manager.get_min_expense()?;
        Ok(format!(
            "Minimum expense: {}",
            format_expense(expense, self.manager.base_currency())
        ))
    }

    pub fn handle_filter_date(&self, start: &str, end: &str) -> TripResult<String> {
        let start = parse_timestamp(start)?;
        let end = parse_timestamp(end)?;
        if start > end {
            return Err(TripError::invalid_argument(
                format!("{} > {}", fmt_ts(start), fmt_ts(end)),
                "Start time should not be after end time.",
            ));
        }

        let expenses = self.manager.get_expenses_by_date_range(start, end);
        if expenses.is_empty() {
            return Ok(format!(
                "There are no expenses between {} and {}.",
                fmt_ts(start),
                fmt_ts(end)
            ));
        }
        Ok(format_expense_lines(
            &format!("Here are the expenses between {} and {}:", fmt_ts(start), fmt_ts(end)),
            &expenses,
            self.manager.base_currency(),
        ))
    }

    pub fn handle_search(&self, word: &str) -> String {
        let expenses = self.manager.get_expenses_by_searchword(word);
        if expenses.is_empty() {
            return format!(
                "There are no expenses that matched your search word: {}.",
                word
            );
        }
        format_expense_lines(
            &format!("Expenses that matched your search word '{}':", word),
            &expenses,
            self.manager.base_currency(),
        )
    }

    pub fn handle_clear_all(&mut self) -> String {
        self.manager.clear_expenses_and_categories();
        "All expenses and categories have been cleared.".to_string()
    }

    // === Currency ===

    pub fn handle_view_currency(&self) -> String {
        format_currency_table(self.manager.base_currency())
    }

    pub fn handle_set_base_currency(&mut self, code: &str) -> TripResult<String> {
        let currency = self.manager.set_base_currency(code)?;
        Ok(format!("Your base currency has been set to {}.", currency))
    }
}

fn fmt_ts(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;

    const DEFAULT_BUDGET: i64 = 2333;

    fn manager() -> ExpenseManager {
        ExpenseManager::new(Money::from_units(DEFAULT_BUDGET))
    }

    fn money(units: i64) -> Money {
        Money::from_units(units)
    }

    fn line(manager: &ExpenseManager, name: &str) -> String {
        format_expense(manager.find_expense(name).unwrap(), manager.base_currency())
    }

    #[test]
    fn test_add_expense_message() {
        let mut manager = manager();
        let mut handler = CommandHandler::new(&mut manager);

        let message = handler.handle_add_expense("a", money(1), None).unwrap();
        assert_eq!(
            message,
            "Expense a added successfully.\nYour remaining budget is 2332.00 SGD."
        );

        let message = handler
            .handle_add_expense("b", money(2), Some("food"))
            .unwrap();
        assert_eq!(
            message,
            "Expense b added successfully to category food.\nYour remaining budget is 2330.00 SGD."
        );
    }

    #[test]
    fn test_add_expense_duplicate() {
        let mut manager = manager();
        let mut handler = CommandHandler::new(&mut manager);
        handler.handle_add_expense("Lunch", money(1), None).unwrap();
        let err = handler.handle_add_expense("lunch", money(1), None).unwrap_err();
        assert!(matches!(err, TripError::Duplicate { .. }));
    }

    #[test]
    fn test_set_budget() {
        let mut manager = manager();
        let mut handler = CommandHandler::new(&mut manager);
        let message = handler.handle_set_budget(money(135)).unwrap();
        assert_eq!(message, "Your budget has been set to 135.00 SGD.");
        assert!(handler.handle_set_budget(Money::zero()).is_err());
    }

    #[test]
    fn test_adjust_budget() {
        let mut manager = manager();
        manager.add_expense("a", money(100), None).unwrap();
        let mut handler = CommandHandler::new(&mut manager);
        let message = handler.handle_adjust_budget(money(500)).unwrap();
        assert_eq!(
            message,
            "Your budget has been updated to 500.00 SGD.\nYou have 400.00 SGD remaining to spend!"
        );
    }

    #[test]
    fn test_view_budget_positive_remaining() {
        let mut manager = ExpenseManager::new(money(100));
        manager.add_expense("item1", money(40), None).unwrap();
        let handler = CommandHandler::new(&mut manager);
        assert_eq!(
            handler.handle_view_budget(),
            "The original budget you set was 100.00 SGD.\n\
             So far, you have spent 40.00 SGD.\n\
             This leaves you with a remaining budget of 60.00 SGD."
        );
    }

    #[test]
    fn test_view_budget_exceeded() {
        let mut manager = ExpenseManager::new(money(100));
        manager.add_expense("item1", money(150), None).unwrap();
        let handler = CommandHandler::new(&mut manager);
        let message = handler.handle_view_budget();
        assert!(message.ends_with("You have exceeded your budget by 50.00 SGD."));
    }

    #[test]
    fn test_create_and_delete_category() {
        let mut manager = manager();
        let mut handler = CommandHandler::new(&mut manager);
        assert_eq!(
            handler.handle_create_category("food").unwrap(),
            "Successfully created category: food."
        );
        assert!(handler.manager().has_category("food"));
        assert_eq!(
            handler.handle_delete_category("food").unwrap(),
            "Successfully deleted category: food."
        );
        assert!(handler.handle_delete_category("food").unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_and_clear_category() {
        let mut manager = manager();
        manager.add_expense("meal", money(50), None).unwrap();
        let mut handler = CommandHandler::new(&mut manager);

        assert_eq!(
            handler.handle_set_category("meal", "dining").unwrap(),
            "Successfully set category for meal to dining."
        );
        assert_eq!(handler.manager().get_expense(0).unwrap().category(), Some("dining"));

        assert_eq!(
            handler.handle_clear_category("meal").unwrap(),
            "Successfully cleared category for meal."
        );
        assert_eq!(handler.manager().get_expense(0).unwrap().category(), None);
    }

    #[test]
    fn test_delete_expense() {
        let mut manager = manager();
        manager.add_expense("deleteTest", money(20), None).unwrap();
        let mut handler = CommandHandler::new(&mut manager);
        let message = handler.handle_delete_expense("deleteTest").unwrap();
        assert!(message.contains("Expense deleteTest deleted successfully."));
        assert_eq!(handler.manager().expense_count(), 0);
        assert!(handler.handle_delete_expense("deleteTest").unwrap_err().is_not_found());
    }

    #[test]
    fn test_edit_amount() {
        let mut manager = manager();
        manager.add_expense("coffee", money(3), None).unwrap();
        let mut handler = CommandHandler::new(&mut manager);
        let message = handler.handle_edit_amount("coffee", Money::from_cents(425)).unwrap();
        assert_eq!(
            message,
            "Successfully updated amount for coffee to 4.25 SGD.\nYour remaining budget is 2328.75 SGD."
        );
    }

    #[test]
    fn test_max_and_min_expense() {
        let mut manager = manager();
        manager.add_expense("a", money(10), None).unwrap();
        manager.add_expense("b", money(20), None).unwrap();
        manager.add_expense("c", money(20), None).unwrap();
        let expected_max = format!("Maximum expense: {}", line(&manager, "b"));
        let expected_min = format!("Minimum expense: {}", line(&manager, "a"));

        let handler = CommandHandler::new(&mut manager);
        assert_eq!(handler.handle_max_expense().unwrap(), expected_max);
        assert_eq!(handler.handle_min_expense().unwrap(), expected_min);
    }

    #[test]
    fn test_max_and_min_without_expenses() {
        let mut manager = manager();
        let handler = CommandHandler::new(&mut manager);
        assert!(handler.handle_max_expense().unwrap_err().is_invalid_argument());
        assert!(handler.handle_min_expense().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_list_expense_with_total() {
        let mut manager = manager();
        manager.add_expense("a", money(50), None).unwrap();
        manager.add_expense("b", money(100), Some("fun")).unwrap();
        let expected = format!(
            "Here is a list of your past expenses: \n - {}\n - {}\nTotal amount spent: 150.00 SGD.",
            line(&manager, "a"),
            line(&manager, "b")
        );
        let expected_fun = format!(
            "Here is a list of your past expenses: \n - {}\nTotal amount spent: 100.00 SGD.",
            line(&manager, "b")
        );

        let handler = CommandHandler::new(&mut manager);
        assert_eq!(handler.handle_list_expense(None).unwrap(), expected);
        assert_eq!(handler.handle_list_expense(Some("fun")).unwrap(), expected_fun);
        assert!(handler.handle_list_expense(Some("nope")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_expense_empty() {
        let mut manager = manager();
        manager.create_category("food").unwrap();
        let handler = CommandHandler::new(&mut manager);
        assert_eq!(handler.handle_list_expense(None).unwrap(), "There are no expenses.");
        assert_eq!(
            handler.handle_list_expense(Some("food")).unwrap(),
            "There are no expenses."
        );
    }

    #[test]
    fn test_search_matching() {
        let mut manager = manager();
        manager.add_expense("lunch", money(20), None).unwrap();
        manager.add_expense("dinner", money(40), None).unwrap();
        manager.add_expense("lunch-buffet", money(30), None).unwrap();
        manager.add_expense("transport", money(15), None).unwrap();
        let expected = format!(
            "Expenses that matched your search word 'lunch':\n - {}\n - {}",
            line(&manager, "lunch"),
            line(&manager, "lunch-buffet")
        );

        let handler = CommandHandler::new(&mut manager);
        assert_eq!(handler.handle_search("lunch"), expected);
    }

    #[test]
    fn test_search_no_match() {
        let mut manager = manager();
        manager.add_expense("lunch", money(20), None).unwrap();
        let handler = CommandHandler::new(&mut manager);
        assert_eq!(
            handler.handle_search("shopping"),
            "There are no expenses that matched your search word: shopping."
        );
    }

    #[test]
    fn test_filter_date() {
        let mut manager = manager();
        manager
            .add_expense_at("early", money(1), None, parse_timestamp("2025-04-01 10:00:00").unwrap())
            .unwrap();
        manager
            .add_expense_at("late", money(1), None, parse_timestamp("2025-04-05 20:00:00").unwrap())
            .unwrap();
        let expected = format!(
            "Here are the expenses between 2025-04-01 00:00:00 and 2025-04-04 23:59:59:\n - {}",
            line(&manager, "early")
        );

        let handler = CommandHandler::new(&mut manager);
        assert_eq!(
            handler
                .handle_filter_date("2025-04-01 00:00:00", "2025-04-04 23:59:59")
                .unwrap(),
            expected
        );
        assert_eq!(
            handler
                .handle_filter_date("2024-01-01 00:00:00", "2024-01-02 00:00:00")
                .unwrap(),
            "There are no expenses between 2024-01-01 00:00:00 and 2024-01-02 00:00:00."
        );
    }

    #[test]
    fn test_filter_date_errors() {
        let mut manager = manager();
        let handler = CommandHandler::new(&mut manager);
        assert!(matches!(
            handler.handle_filter_date("April 1st", "2025-04-04 23:59:59"),
            Err(TripError::DateParse { .. })
        ));
        assert!(handler
            .handle_filter_date("2025-04-05 00:00:00", "2025-04-04 00:00:00")
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_set_time() {
        let mut manager = manager();
        manager.add_expense("test-breakfast", money(10), None).unwrap();
        let mut handler = CommandHandler::new(&mut manager);

        let message = handler
            .handle_set_time("test-breakfast", "2024-01-01 10:00:00")
            .unwrap();
        assert_eq!(
            message,
            "Successfully set time for test-breakfast to 2024-01-01 10:00:00."
        );
        assert_eq!(
            handler.manager().get_expense(0).unwrap().timestamp_string(),
            "2024-01-01 10:00:00"
        );
    }

    #[test]
    fn test_set_time_unknown_expense_checked_first() {
        let mut manager = manager();
        let mut handler = CommandHandler::new(&mut manager);
        let err = handler
            .handle_set_time("ghost-expense", "not a time")
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Expense not found: ghost-expense");
    }

    #[test]
    fn test_set_time_invalid_format() {
        let mut manager = manager();
        manager.add_expense("test-breakfast", money(10), None).unwrap();
        let before = manager.get_expense(0).unwrap().timestamp();
        let mut handler = CommandHandler::new(&mut manager);

        let err = handler
            .handle_set_time("test-breakfast", "15th March, 2024")
            .unwrap_err();
        assert!(matches!(err, TripError::DateParse { .. }));
        assert_eq!(handler.manager().get_expense(0).unwrap().timestamp(), before);
    }

    #[test]
    fn test_view_categories() {
        let mut manager = manager();
        let handler = CommandHandler::new(&mut manager);
        assert_eq!(handler.handle_view_categories(), "There are no categories.");

        let mut manager = ExpenseManager::default();
        manager.add_expense("lunch", money(20), Some("food")).unwrap();
        manager.add_expense("dinner", money(40), Some("food")).unwrap();
        manager.add_expense("grab", money(15), Some("transport")).unwrap();
        let handler = CommandHandler::new(&mut manager);
        assert_eq!(
            handler.handle_view_categories(),
            "Here are your categories:\n - food\n - transport"
        );
    }

    #[test]
    fn test_clear_all() {
        let mut manager = manager();
        manager.add_expense("greek-meal", money(20), Some("food")).unwrap();
        manager.add_expense("grab", money(15), Some("transport")).unwrap();
        let mut handler = CommandHandler::new(&mut manager);

        assert_eq!(
            handler.handle_clear_all(),
            "All expenses and categories have been cleared."
        );
        assert_eq!(handler.manager().expense_count(), 0);
        assert_eq!(handler.manager().categories().count(), 0);
    }

    #[test]
    fn test_base_currency_changes_display_only() {
        let mut manager = manager();
        manager.add_expense("a", money(100), None).unwrap();
        let mut handler = CommandHandler::new(&mut manager);

        assert_eq!(
            handler.handle_set_base_currency("USD").unwrap(),
            "Your base currency has been set to USD."
        );
        assert_eq!(handler.manager().base_currency(), Currency::Usd);
        assert_eq!(handler.manager().total_expense(), money(100));
        assert!(handler.handle_view_budget().contains("So far, you have spent 75.00 USD."));
        assert!(handler.handle_view_currency().starts_with("Your current base currency is USD."));
    }

    #[test]
    fn test_set_base_currency_unknown() {
        let mut manager = manager();
        let mut handler = CommandHandler::new(&mut manager);
        let err = handler.handle_set_base_currency("ABC").unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(handler.manager().base_currency(), Currency::Sgd);
    }

    #[test]
    fn test_tutorial_mentions_every_command() {
        let mut manager = manager();
        let handler = CommandHandler::new(&mut manager);
        let tutorial = handler.handle_tutorial();
        for keyword in crate::command::Keyword::ALL {
            if keyword == crate::command::Keyword::Tutorial {
                continue;
            }
            assert!(tutorial.contains(keyword.as_str()), "{} missing", keyword);
        }
    }
}
