pub mod admin;
pub mod service;

pub use admin::CacheAdmin;
pub use service::CatalogService;
