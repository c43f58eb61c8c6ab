use crate::shared::errors::{AppError, AppResult};
use std::time::Duration;

const DEFAULT_QUERY_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_LIST_TTL_SECS: u64 = 300;
const DEFAULT_SUPABASE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_SUPABASE_MAX_RETRIES: u32 = 3;

/// Tunables for the read-through catalog service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Upper bound for a single remote store call
    pub query_timeout: Duration,
    /// Staleness window applied to every named list
    pub list_ttl: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
            list_ttl: Duration::from_secs(DEFAULT_LIST_TTL_SECS),
        }
    }
}

impl CatalogConfig {
    /// Load from the process environment (and `.env`, if present)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_ms = parse_or(&lookup, "CATALOG_QUERY_TIMEOUT_MS", DEFAULT_QUERY_TIMEOUT_MS)?;
        let ttl_secs = parse_or(&lookup, "CATALOG_LIST_TTL_SECS", DEFAULT_LIST_TTL_SECS)?;

        if timeout_ms == 0 {
            return Err(AppError::Configuration(
                "CATALOG_QUERY_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            query_timeout: Duration::from_millis(timeout_ms),
            list_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

/// Connection settings for the Supabase (PostgREST) backend
#[derive(Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            timeout: Duration::from_secs(DEFAULT_SUPABASE_TIMEOUT_SECS),
            max_retries: DEFAULT_SUPABASE_MAX_RETRIES,
        }
    }

    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = required(&lookup, "SUPABASE_URL")?;
        let key = required(&lookup, "SUPABASE_KEY")?;

        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(AppError::Configuration(
                "SUPABASE_URL must start with http:// or https://".to_string(),
            ));
        }

        let timeout_secs = parse_or(&lookup, "SUPABASE_TIMEOUT_SECS", DEFAULT_SUPABASE_TIMEOUT_SECS)?;
        let max_retries = parse_or(&lookup, "SUPABASE_MAX_RETRIES", DEFAULT_SUPABASE_MAX_RETRIES)?;

        log::info!("Supabase backend configured for {}", url);

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            key,
            timeout: Duration::from_secs(timeout_secs),
            max_retries,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> AppResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(AppError::Configuration(format!(
            "{} environment variable not set",
            key
        ))),
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::Configuration(format!("Invalid {}: {}", key, e))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn catalog_defaults_when_unset() {
        let config = CatalogConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.query_timeout, Duration::from_secs(3));
        assert_eq!(config.list_ttl, Duration::from_secs(300));
    }

    #[test]
    fn catalog_reads_overrides() {
        let config = CatalogConfig::from_lookup(lookup_from(&[
            ("CATALOG_QUERY_TIMEOUT_MS", "1500"),
            ("CATALOG_LIST_TTL_SECS", "60"),
        ]))
        .unwrap();
        assert_eq!(config.query_timeout, Duration::from_millis(1500));
        assert_eq!(config.list_ttl, Duration::from_secs(60));
    }

    #[test]
    fn catalog_rejects_garbage_and_zero_timeout() {
        let err = CatalogConfig::from_lookup(lookup_from(&[("CATALOG_LIST_TTL_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));

        let err = CatalogConfig::from_lookup(lookup_from(&[("CATALOG_QUERY_TIMEOUT_MS", "0")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn supabase_requires_url_and_key() {
        let err = SupabaseConfig::from_lookup(lookup_from(&[("SUPABASE_URL", "https://x.supabase.co")]))
            .unwrap_err();
        assert_eq!(
            err,
            AppError::Configuration("SUPABASE_KEY environment variable not set".to_string())
        );
    }

    #[test]
    fn supabase_trims_trailing_slash_and_redacts_key() {
        let config = SupabaseConfig::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://x.supabase.co/"),
            ("SUPABASE_KEY", "secret-key"),
            ("SUPABASE_MAX_RETRIES", "5"),
        ]))
        .unwrap();
        assert_eq!(config.url, "https://x.supabase.co");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!format!("{:?}", config).contains("secret-key"));
    }
}
