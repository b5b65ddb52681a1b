//! Summary shape consumed by the statement viewer.
//!
//! Folio does not build this itself; the roll-forward and totals are computed
//! downstream from an [`ExtractionResult`](crate::ExtractionResult). The type
//! lives here so both sides agree on the wire format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::category::Category;
use crate::transaction::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisData {
    pub initial_balance: f64,
    pub final_balance: f64,
    pub total_income: f64,
    pub total_expenditure: f64,
    pub expenditure_by_category: BTreeMap<Category, f64>,
    pub transaction_details: Vec<Transaction>,
}
