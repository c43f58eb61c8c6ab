/// Scripted in-memory `RemoteStore` for integration tests
use anime_catalog::{NamedList, RemoteQuery, RemoteStore, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Answers queries from rows registered per query key (`collection[field=value]`).
/// Unknown keys answer with no rows.
#[derive(Default)]
pub struct FakeRemoteStore {
    rows: Mutex<HashMap<String, Vec<Value>>>,
    delay: Mutex<Option<Duration>>,
    failing_status: Mutex<Option<u16>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<RemoteQuery>>,
}

impl FakeRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, key: &str, rows: Vec<Value>) -> Self {
        self.set_rows(key, rows);
        self
    }

    pub fn with_list(self, list: NamedList, rows: Vec<Value>) -> Self {
        self.with_rows(&list.query().to_string(), rows)
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn set_rows(&self, key: &str, rows: Vec<Value>) {
        self.rows.lock().unwrap().insert(key.to_string(), rows);
    }

    /// Make every following call fail with the given HTTP status
    pub fn fail_with_status(&self, status: u16) {
        *self.failing_status.lock().unwrap() = Some(status);
    }

    pub fn recover(&self) {
        *self.failing_status.lock().unwrap() = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_queries(&self) -> Vec<RemoteQuery> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteStore for FakeRemoteStore {
    async fn query(&self, query: &RemoteQuery, _timeout: Duration) -> Result<Vec<Value>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(query.clone());

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failing = *self.failing_status.lock().unwrap();
        if let Some(status) = failing {
            return Err(StoreError::Status {
                status,
                body: format!("{{\"message\":\"fake failure for {}\"}}", query),
            });
        }

        let rows = self.rows.lock().unwrap();
        Ok(rows.get(&query.to_string()).cloned().unwrap_or_default())
    }
}
