use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::shared::errors::StoreError;

/// Equality filter on a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: false,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: true,
        }
    }
}

/// Description of one remote lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteQuery {
    pub collection: String,
    pub filter: Option<Filter>,
    pub order: Vec<OrderBy>,
    pub limit: Option<usize>,
}

impl RemoteQuery {
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            filter: None,
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn filter_eq(mut self, field: &str, value: impl ToString) -> Self {
        self.filter = Some(Filter {
            field: field.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order.push(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl fmt::Display for RemoteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection)?;
        if let Some(filter) = &self.filter {
            write!(f, "[{}={}]", filter.field, filter.value)?;
        }
        Ok(())
    }
}

/// Async lookup service backing the catalog cache.
///
/// Implementations return raw JSON rows in backend order; decoding into
/// entities happens in the catalog service so that shape errors are
/// classified uniformly. `timeout` is the budget the caller will enforce;
/// implementations should abandon work once it is spent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn query(&self, query: &RemoteQuery, timeout: Duration) -> Result<Vec<Value>, StoreError>;
}
