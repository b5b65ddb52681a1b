//! folio-ingest: turns scanned statement pages into one extraction result
//! by way of a vision model.

pub mod extractor;
pub mod pacing;
pub mod page;
pub mod prompt;
pub mod vision;

pub use extractor::{ExtractError, Extractor, ImageBatch};
pub use pacing::Pacing;
pub use page::{PageError, clean_response, merge_pages, parse_page};
pub use prompt::EXTRACTION_PROMPT;
pub use vision::{VisionError, VisionModel};
