use super::retry_util::{RetryConfig, RetryUtil};
use crate::modules::catalog::domain::repositories::{RemoteQuery, RemoteStore};
use crate::shared::config::SupabaseConfig;
use crate::shared::errors::StoreError;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// `RemoteStore` backed by a Supabase project's PostgREST endpoint
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    config: SupabaseConfig,
}

impl SupabaseStore {
    pub fn new(config: SupabaseConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent("anime-catalog/0.1")
            .build()
            .map_err(|e| StoreError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            config,
        })
    }

    /// Build the store and check that the backend answers
    pub async fn connect(config: SupabaseConfig) -> Result<Self, StoreError> {
        let store = Self::new(config)?;
        store.verify_connection().await?;
        info!("Connected to Supabase at {}", store.config.url);
        Ok(store)
    }

    /// Fetch a single row from `animes`, retrying transient failures
    pub async fn verify_connection(&self) -> Result<(), StoreError> {
        let probe = &RemoteQuery::new("animes").limit(1);
        let retry = RetryConfig::linear(self.config.max_retries.saturating_sub(1));
        let timeout = self.config.timeout;
        let store = self;

        RetryUtil::with_retry(
            move || async move { store.query(probe, timeout).await.map(|_| ()) },
            &retry,
            "Supabase connection check",
        )
        .await
    }

    /// PostgREST query string for a remote query
    pub fn query_params(query: &RemoteQuery) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];

        if let Some(filter) = &query.filter {
            params.push((filter.field.clone(), format!("eq.{}", filter.value)));
        }

        if !query.order.is_empty() {
            let order = query
                .order
                .iter()
                .map(|o| {
                    format!(
                        "{}.{}",
                        o.field,
                        if o.descending { "desc" } else { "asc" }
                    )
                })
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), order));
        }

        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }

    fn endpoint(&self, collection: &str) -> String {
        format!("{}/{}", self.rest_url, collection)
    }
}

#[async_trait]
impl RemoteStore for SupabaseStore {
    async fn query(&self, query: &RemoteQuery, timeout: Duration) -> Result<Vec<Value>, StoreError> {
        let key = query.to_string();
        LogContext::backend_call(&query.collection, &key, "start", None);
        let timer = TimedOperation::new(&format!("supabase {}", key));

        let response = self
            .client
            .get(self.endpoint(&query.collection))
            .query(&Self::query_params(query))
            .header("apikey", &self.config.key)
            .bearer_auth(&self.config.key)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StoreError::Timeout { after: timeout }
                } else {
                    StoreError::from(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            LogContext::backend_call(&query.collection, &key, status.as_str(), Some(timer.elapsed_ms()));
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<Value> = response.json().await?;
        LogContext::backend_call(
            &query.collection,
            &key,
            &format!("{} rows", rows.len()),
            Some(timer.elapsed_ms()),
        );
        Ok(rows)
    }
}
