pub mod remote_store;

pub use remote_store::{Filter, OrderBy, RemoteQuery, RemoteStore};

#[cfg(test)]
pub use remote_store::MockRemoteStore;
