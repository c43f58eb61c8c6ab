pub mod app_error;
pub mod store_error;

pub use app_error::{AppError, AppResult, ErrorKind};
pub use store_error::StoreError;
