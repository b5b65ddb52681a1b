//! folio-core: domain types for bank-statement extraction

pub mod analysis;
pub mod category;
pub mod extraction;
pub mod transaction;

pub use analysis::AnalysisData;
pub use category::{Category, UnknownCategory, guess_from_description};
pub use extraction::{ExtractionResult, ParsedPage};
pub use transaction::{RawTransaction, Transaction};
