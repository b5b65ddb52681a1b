//! Decoding of per-page model responses and the merge across pages
//!
//! Expected response body (optionally inside a ```json fence):
//!   { "initial_balance": 500, "transactions": [ { "date": ..., "amount": ... } ] }
//!
//! Anything that is not a JSON object after fence removal is a malformed page.
//! Malformed pages are logged and contribute nothing; they never fail a run.

use folio_core::{ExtractionResult, ParsedPage, RawTransaction};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

/// A page whose text could not be decoded
#[derive(Debug, Error)]
pub enum PageError {
    #[error("page response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("page response is JSON but not an object (found {0})")]
    NotAnObject(&'static str),
}

/// Remove ```json / ``` fence markers wherever they appear and trim.
/// No other cleanup: surrounding prose stays and will fail to parse.
pub fn clean_response(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn balance_from(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let parsed = s.trim().replace(',', "").parse().ok();
            if parsed.is_none() {
                warn!(initial_balance = %s, "ignoring non-numeric initial_balance");
            }
            parsed
        }
        other => {
            warn!(kind = json_kind(other), "ignoring non-numeric initial_balance");
            None
        }
    }
}

/// Decode one page response.
pub fn parse_page(raw: &str) -> Result<ParsedPage, PageError> {
    let value: Value = serde_json::from_str(&clean_response(raw))?;

    let mut obj = match value {
        Value::Object(obj) => obj,
        other => return Err(PageError::NotAnObject(json_kind(&other))),
    };

    let initial_balance = obj.get("initial_balance").and_then(balance_from);

    let transactions = match obj.remove("transactions") {
        Some(Value::Array(items)) => items.into_iter().map(RawTransaction::new).collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            warn!(kind = json_kind(&other), "transactions is not an array; page contributes none");
            Vec::new()
        }
    };

    Ok(ParsedPage {
        initial_balance,
        transactions,
    })
}

/// Decode every response and fold them, in order, into one result.
/// `responses[0]` is the first page of the statement.
pub fn merge_pages<S: AsRef<str>>(responses: &[S]) -> ExtractionResult {
    responses
        .iter()
        .enumerate()
        .fold(ExtractionResult::new(), |acc, (index, raw)| {
            let raw = raw.as_ref();
            match parse_page(raw) {
                Ok(page) => acc.absorb(index, page),
                Err(err) => {
                    error!(page = index + 1, error = %err, "error parsing JSON from page");
                    error!(page = index + 1, raw = %raw, "raw page data");
                    acc
                }
            }
        })
}
