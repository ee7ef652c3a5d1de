//! Backend connection settings
//!
//! The browser has no process environment, so values are baked in at build
//! time from `SWIFTFYX_SUPABASE_URL` and `SWIFTFYX_SUPABASE_ANON_KEY`.

use crate::error::{BackendError, Result};

/// Local `supabase start` API gateway.
pub const DEFAULT_URL: &str = "http://localhost:54321";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project base URL without trailing slash
    pub url: String,
    /// Public anon key sent as `apikey`
    pub anon_key: String,
    /// Browser storage key for the persisted session
    pub storage_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let url = url.into().trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(BackendError::Config(format!(
                "backend URL must start with http:// or https://, got '{}'",
                url
            )));
        }

        let storage_key = format!("sb-{}-auth-token", project_ref(&url));
        Ok(Self {
            url,
            anon_key: anon_key.into().trim().to_string(),
            storage_key,
        })
    }

    pub fn from_env() -> Result<Self> {
        let url = option_env!("SWIFTFYX_SUPABASE_URL").unwrap_or(DEFAULT_URL);
        let anon_key = option_env!("SWIFTFYX_SUPABASE_ANON_KEY").unwrap_or_default();
        if anon_key.is_empty() {
            tracing::warn!("SWIFTFYX_SUPABASE_ANON_KEY not set at build time; requests will be anonymous");
        }
        Self::new(url, anon_key)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path)
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }
}

/// First host label, e.g. `abcd` for `https://abcd.supabase.co`.
fn project_ref(url: &str) -> &str {
    let host = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = host.split(['/', ':']).next().unwrap_or(host);
    host.split('.').next().unwrap_or(host)
}
