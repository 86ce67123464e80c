//! Command keywords

use std::fmt;
use std::str::FromStr;

use crate::error::TripError;

/// The closed set of commands understood by the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Tutorial,
    SetBudget,
    AdjustBudget,
    ViewBudget,
    CreateCategory,
    DeleteCategory,
    SetCategory,
    ClearCategory,
    AddExpense,
    DeleteExpense,
    EditAmount,
    SetTime,
    ListExpense,
    MaxExpense,
    MinExpense,
    FilterDate,
    Search,
    ViewCategories,
    ViewCurrency,
    SetBaseCurrency,
    Clear,
}

impl Keyword {
    pub const ALL: [Keyword; 21] = [
        Keyword::Tutorial,
        Keyword::SetBudget,
        Keyword::AdjustBudget,
        Keyword::ViewBudget,
        Keyword::CreateCategory,
        Keyword::DeleteCategory,
        Keyword::SetCategory,
        Keyword::ClearCategory,
        Keyword::AddExpense,
        Keyword::DeleteExpense,
        Keyword::EditAmount,
        Keyword::SetTime,
        Keyword::ListExpense,
        Keyword::MaxExpense,
        Keyword::MinExpense,
        Keyword::FilterDate,
        Keyword::Search,
        Keyword::ViewCategories,
        Keyword::ViewCurrency,
        Keyword::SetBaseCurrency,
        Keyword::Clear,
    ];

    /// The token typed by the user
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tutorial => "tutorial",
            Self::SetBudget => "set-budget",
            Self::AdjustBudget => "adjust-budget",
            Self::ViewBudget => "view-budget",
            Self::CreateCategory => "create-category",
            Self::DeleteCategory => "delete-category",
            Self::SetCategory => "set-category",
            Self::ClearCategory => "clear-category",
            Self::AddExpense => "add-expense",
            Self::DeleteExpense => "delete-expense",
            Self::EditAmount => "edit-amount",
            Self::SetTime => "set-time",
            Self::ListExpense => "list-expense",
            Self::MaxExpense => "max-expense",
            Self::MinExpense => "min-expense",
            Self::FilterDate => "filter-date",
            Self::Search => "search",
            Self::ViewCategories => "view-categories",
            Self::ViewCurrency => "view-currency",
            Self::SetBaseCurrency => "set-base-currency",
            Self::Clear => "clear",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Keyword {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == token)
            .ok_or_else(|| {
                TripError::invalid_argument(
                    s,
                    "Unknown command. Type `tutorial` for a list of available commands.",
                )
            })
    }
}
