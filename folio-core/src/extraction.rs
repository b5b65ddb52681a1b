//! Per-page and merged extraction results

use serde::{Deserialize, Serialize};

use crate::transaction::RawTransaction;

/// Decoded form of one page's model response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_balance: Option<f64>,
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
}

/// Merged output across all pages of one statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Opening balance, taken from the first page only
    pub initial_balance: Option<f64>,
    pub transactions: Vec<RawTransaction>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one page into the result. `page_index` is the page's position in
    /// the input; only index 0 may set the opening balance. Pages must be
    /// absorbed in input order.
    pub fn absorb(mut self, page_index: usize, page: ParsedPage) -> Self {
        if page_index == 0 {
            self.initial_balance = page.initial_balance;
        }
        self.transactions.extend(page.transactions);
        self
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}
