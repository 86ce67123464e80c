//! Snapshot encoding for the persisted trip state
//!
//! The on-disk document looks like:
//!
//! ```json
//! {
//!   "budget": 2000.0,
//!   "totalExpense": 12.5,
//!   "categories": ["Food"],
//!   "expenses": [
//!     {"name": "Lunch", "amount": 12.5, "category": "Food", "dateTime": "2025-04-05 12:00:00"}
//!   ]
//! }
//! ```
//!
//! Encoding and decoding are written out by hand over [`serde_json::Value`]
//! so that every missing or mistyped field is reported as
//! [`TripError::DataLoad`] naming the field.

use chrono::NaiveDateTime;
use serde_json::{json, Map, Value};

use crate::error::{TripError, TripResult};
use crate::models::{parse_timestamp, Money, TIMESTAMP_FORMAT};

/// A persisted expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub name: String,
    pub amount: Money,
    pub category: Option<String>,
    pub timestamp: NaiveDateTime,
}

/// The full persisted state of an expense manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub budget: Money,
    pub total_expense: Money,
    pub categories: Vec<String>,
    pub expenses: Vec<ExpenseRecord>,
}

impl Snapshot {
    /// Encode the snapshot as a JSON document
    pub fn to_json(&self) -> Value {
        let expenses: Vec<Value> = self.expenses.iter().map(ExpenseRecord::to_json).collect();
        json!({
            "budget": self.budget.to_decimal(),
            "totalExpense": self.total_expense.to_decimal(),
            "categories": self.categories,
            "expenses": expenses,
        })
    }

    /// Decode a snapshot, rejecting anything that is not well-formed
    pub fn from_json(value: &Value) -> TripResult<Self> {
        let root = as_object(value, "root")?;

        let budget = required_amount(root, "budget", "budget")?;
        let total_expense = required_amount(root, "totalExpense", "totalExpense")?;

        let categories = required_array(root, "categories", "categories")?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| malformed(&format!("categories[{}]", i), "expected a string"))
            })
            .collect::<TripResult<Vec<_>>>()?;

        let expenses = required_array(root, "expenses", "expenses")?
            .iter()
            .enumerate()
            .map(|(i, v)| ExpenseRecord::from_json(v, &format!("expenses[{}]", i)))
            .collect::<TripResult<Vec<_>>>()?;

        Ok(Self {
            budget,
            total_expense,
            categories,
            expenses,
        })
    }
}

impl ExpenseRecord {
    fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "amount": self.amount.to_decimal(),
            "category": self.category,
            "dateTime": self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        })
    }

    fn from_json(value: &Value, path: &str) -> TripResult<Self> {
        let obj = as_object(value, path)?;

        let name = obj
            .get("name")
            .ok_or_else(|| missing(&format!("{}.name", path)))?
            .as_str()
            .ok_or_else(|| malformed(&format!("{}.name", path), "expected a string"))?
            .to_string();

        let amount = required_amount(obj, "amount", &format!("{}.amount", path))?;

        let category = match obj.get("category") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(malformed(
                    &format!("{}.category", path),
                    "expected a string or null",
                ))
            }
        };

        let date_field = format!("{}.dateTime", path);
        let date_text = obj
            .get("dateTime")
            .ok_or_else(|| missing(&date_field))?
            .as_str()
            .ok_or_else(|| malformed(&date_field, "expected a string"))?;
        let timestamp =
            parse_timestamp(date_text).map_err(|e| malformed(&date_field, &e.to_string()))?;

        Ok(Self {
            name,
            amount,
            category,
            timestamp,
        })
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> TripResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| malformed(path, "expected an object"))
}

fn required_amount(obj: &Map<String, Value>, key: &str, path: &str) -> TripResult<Money> {
    let number = obj
        .get(key)
        .ok_or_else(|| missing(path))?
        .as_f64()
        .ok_or_else(|| malformed(path, "expected a number"))?;
    Ok(Money::from_decimal(number))
}

fn required_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> TripResult<&'a Vec<Value>> {
    obj.get(key)
        .ok_or_else(|| missing(path))?
        .as_array()
        .ok_or_else(|| malformed(path, "expected an array"))
}

fn missing(path: &str) -> TripError {
    TripError::DataLoad(format!("missing field `{}`", path))
}

fn malformed(path: &str, reason: &str) -> TripError {
    TripError::DataLoad(format!("field `{}`: {}", path, reason))
}
