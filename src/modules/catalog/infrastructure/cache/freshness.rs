use super::tables::ListSnapshot;
use crate::modules::catalog::domain::NamedList;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Default staleness window for named lists (5 minutes)
pub const DEFAULT_LIST_TTL: Duration = Duration::from_secs(300);

/// Decides whether a cached named-list snapshot may still be served.
///
/// Entity and child tables never expire, so only named lists consult this.
#[derive(Debug, Clone)]
pub struct FreshnessPolicy {
    default_window: Duration,
    overrides: HashMap<NamedList, Duration>,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LIST_TTL)
    }
}

impl FreshnessPolicy {
    pub fn new(default_window: Duration) -> Self {
        Self {
            default_window,
            overrides: HashMap::new(),
        }
    }

    pub fn with_window(mut self, list: NamedList, window: Duration) -> Self {
        self.overrides.insert(list, window);
        self
    }

    pub fn window(&self, list: NamedList) -> Duration {
        self.overrides
            .get(&list)
            .copied()
            .unwrap_or(self.default_window)
    }

    /// Fresh iff fetched before, within the window, and non-empty.
    ///
    /// Empty snapshots are never fresh, so an empty backend result is
    /// re-queried on the next call.
    pub fn is_fresh_at(&self, list: NamedList, snapshot: &ListSnapshot, now: Instant) -> bool {
        !snapshot.is_empty()
            && now.saturating_duration_since(snapshot.fetched_at) < self.window(list)
    }

    pub fn is_fresh(&self, list: NamedList, snapshot: &ListSnapshot) -> bool {
        self.is_fresh_at(list, snapshot, Instant::now())
    }
}
