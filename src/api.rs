//! Data loaders used by the screens
//!
//! Each loader applies the screen's failure policy so components only see
//! display-ready values.

use crate::backend::Backend;
use crate::error::Result;
use crate::providers::{sample_providers, shape_rows, ServiceProvider};
use crate::types::UserProfile;

/// Fetch and shape available providers, keeping backend order.
pub async fn fetch_providers(backend: &dyn Backend) -> Result<Vec<ServiceProvider>> {
    let rows = backend.query_providers().await?;
    Ok(shape_rows(rows))
}

/// Providers for the home grid. Any fetch error falls back to the built-in
/// sample listings so the grid is never empty because of an outage.
pub async fn load_providers(backend: &dyn Backend) -> Vec<ServiceProvider> {
    match fetch_providers(backend).await {
        Ok(providers) => providers,
        Err(e) => {
            tracing::error!("Error fetching service providers: {}", e);
            sample_providers()
        }
    }
}

/// Profile of `user_id`. A missing row is normal for new accounts; other
/// errors are logged. Both yield `None`.
pub async fn load_profile(backend: &dyn Backend, user_id: &str) -> Option<UserProfile> {
    match backend.query_profile(user_id).await {
        Ok(row) => Some(UserProfile::from(row)),
        Err(e) if e.is_not_found() => None,
        Err(e) => {
            tracing::error!("Error fetching profile: {}", e);
            None
        }
    }
}
