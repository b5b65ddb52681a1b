//! folio-cli: configuration, the vision client, and the HTTP surface

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod vision;

pub use api::{AppState, build_router};
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use vision::VisionClient;
