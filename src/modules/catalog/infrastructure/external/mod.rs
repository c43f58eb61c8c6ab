pub mod retry_util;
pub mod supabase_client;

pub use retry_util::{RetryConfig, RetryUtil};
pub use supabase_client::SupabaseStore;
