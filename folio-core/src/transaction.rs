//! Transaction types: the raw model output and the consumer-facing record

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::{Category, guess_from_description};

/// One transaction exactly as the vision model emitted it.
///
/// Nominally `{ date, description, type, amount }`, but nothing is validated:
/// the value is passed through to callers untouched, extra keys included.
/// The accessors below read it leniently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTransaction(pub Value);

impl RawTransaction {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str).map(str::trim)
    }

    pub fn date(&self) -> Option<&str> {
        self.str_field("date")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    /// The model's `type` field (credit/debit or whatever it wrote)
    pub fn kind(&self) -> Option<&str> {
        self.str_field("type")
    }

    /// Signed amount. Accepts numbers and numeric strings ("1,204.50").
    pub fn amount(&self) -> Option<f64> {
        match self.0.get("amount")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        }
    }

    /// Category label, when the model added one
    pub fn category(&self) -> Option<Category> {
        self.str_field("category")?.parse().ok()
    }
}

impl From<Value> for RawTransaction {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Consumer-facing transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    /// Positive = credit/income, negative = debit/expense
    pub amount: f64,
    pub category: Category,
}

impl Transaction {
    /// Convert a raw model transaction when date, description and amount are
    /// readable. Category: the model's own label if it gave a valid one,
    /// otherwise a guess from the description.
    pub fn from_raw(raw: &RawTransaction) -> Option<Self> {
        let description = raw.description()?.to_string();
        let category = raw
            .category()
            .unwrap_or_else(|| guess_from_description(&description));
        Some(Self {
            date: raw.date()?.to_string(),
            description,
            amount: raw.amount()?,
            category,
        })
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }
}
