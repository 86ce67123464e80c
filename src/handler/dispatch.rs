//! Keyword dispatch
//!
//! Each [`Keyword`] maps to exactly one entry in [`DISPATCH_TABLE`]. An entry
//! pulls its options out of the [`Command`] and calls the matching
//! `handle_*` method. Adding a command means adding a keyword variant and a
//! row here.

use super::CommandHandler;
use crate::command::{Command, Keyword};
use crate::error::{TripError, TripResult};

/// Signature shared by every table entry
pub type HandlerFn = fn(&mut CommandHandler<'_>, &Command) -> TripResult<String>;

/// Keyword to handler table
pub static DISPATCH_TABLE: &[(Keyword, HandlerFn)] = &[
    (Keyword::Tutorial, tutorial),
    (Keyword::SetBudget, set_budget),
    (Keyword::AdjustBudget, adjust_budget),
    (Keyword::ViewBudget, view_budget),
    (Keyword::CreateCategory, create_category),
    (Keyword::DeleteCategory, delete_category),
    (Keyword::SetCategory, set_category),
    (Keyword::ClearCategory, clear_category),
    (Keyword::AddExpense, add_expense),
    (Keyword::DeleteExpense, delete_expense),
    (Keyword::EditAmount, edit_amount),
    (Keyword::SetTime, set_time),
    (Keyword::ListExpense, list_expense),
    (Keyword::MaxExpense, max_expense),
    (Keyword::MinExpense, min_expense),
    (Keyword::FilterDate, filter_date),
    (Keyword::Search, search),
    (Keyword::ViewCategories, view_categories),
    (Keyword::ViewCurrency, view_currency),
    (Keyword::SetBaseCurrency, set_base_currency),
    (Keyword::Clear, clear),
];

/// Run a command against the handler
pub fn dispatch(handler: &mut CommandHandler<'_>, command: &Command) -> TripResult<String> {
    let keyword = command.keyword();
    let (_, run) = DISPATCH_TABLE
        .iter()
        .find(|(k, _)| *k == keyword)
        .ok_or_else(|| TripError::invalid_argument(keyword.as_str(), "Command is not supported."))?;

    tracing::debug!(command = %command, "dispatching");
    run(handler, command)
}

fn tutorial(h: &mut CommandHandler<'_>, _cmd: &Command) -> TripResult<String> {
    Ok(h.handle_tutorial())
}

fn set_budget(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_set_budget(cmd.amount("a")?)
}

fn adjust_budget(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_adjust_budget(cmd.amount("a")?)
}

fn view_budget(h: &mut CommandHandler<'_>, _cmd: &Command) -> TripResult<String> {
    Ok(h.handle_view_budget())
}

fn create_category(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_create_category(cmd.opt("c")?)
}

fn delete_category(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_delete_category(cmd.opt("c")?)
}

fn set_category(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_set_category(cmd.opt("n")?, cmd.opt("c")?)
}

fn clear_category(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_clear_category(cmd.opt("n")?)
}

fn add_expense(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_add_expense(cmd.opt("n")?, cmd.amount("a")?, cmd.opt_or_none("c"))
}

fn delete_expense(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_delete_expense(cmd.opt("n")?)
}

fn edit_amount(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_edit_amount(cmd.opt("n")?, cmd.amount("a")?)
}

fn set_time(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_set_time(cmd.opt("n")?, cmd.opt("t")?)
}

fn list_expense(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_list_expense(cmd.opt_or_none("c"))
}

fn max_expense(h: &mut CommandHandler<'_>, _cmd: &Command) -> TripResult<String> {
    h.handle_max_expense()
}

fn min_expense(h: &mut CommandHandler<'_>, _cmd: &Command) -> TripResult<String> {
    h.handle_min_expense()
}

fn filter_date(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_filter_date(cmd.opt("s")?, cmd.opt("e")?)
}

fn search(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    Ok(h.handle_search(cmd.opt("k")?))
}

fn view_categories(h: &mut CommandHandler<'_>, _cmd: &Command) -> TripResult<String> {
    Ok(h.handle_view_categories())
}

fn view_currency(h: &mut CommandHandler<'_>, _cmd: &Command) -> TripResult<String> {
    Ok(h.handle_view_currency())
}

fn set_base_currency(h: &mut CommandHandler<'_>, cmd: &Command) -> TripResult<String> {
    h.handle_set_base_currency(cmd.opt("c")?)
}

fn clear(h: &mut CommandHandler<'_>, _cmd: &Command) -> TripResult<String> {
    Ok(h.handle_clear_all())
}
