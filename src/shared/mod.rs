// Shared kernel: configuration, error types and logging helpers

pub mod config;
pub mod errors;
pub mod utils;

pub use config::{CatalogConfig, SupabaseConfig};
pub use errors::{AppError, AppResult, ErrorKind, StoreError};
