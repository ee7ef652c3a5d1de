//! Backend collaborator: auth sessions and table reads
//!
//! Components never look the backend up themselves; they receive a
//! [`SharedBackend`] prop from the root, which gets it from [`shared`].

pub mod events;
pub mod http;
pub mod postgrest;
pub mod session_store;
pub mod supabase;

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde_json::Value;

use crate::config::BackendConfig;
use crate::error::Result;
use crate::types::{ProfileRow, Session, SignInRequest, SignUpOutcome, SignUpRequest};

pub use events::{AuthEvent, AuthHandler, AuthListeners, Subscription};
pub use supabase::SupabaseBackend;

/// Operations the screens need from the managed backend.
///
/// Futures are not `Send`: everything runs on the browser's event loop.
#[async_trait(?Send)]
pub trait Backend: Send + Sync {
    /// Current session, restoring and refreshing a persisted one if needed.
    async fn get_session(&self) -> Result<Option<Session>>;

    /// Register for auth-state changes until the subscription is dropped.
    fn on_auth_state_change(&self, handler: AuthHandler) -> Subscription;

    async fn sign_in(&self, request: &SignInRequest) -> Result<Session>;

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome>;

    /// Send a password recovery email.
    async fn reset_password(&self, email: &str) -> Result<()>;

    /// End the session. Listeners receive `SignedOut` even when the remote
    /// call fails.
    async fn sign_out(&self) -> Result<()>;

    /// Raw rows of available providers, best rated first.
    async fn query_providers(&self) -> Result<Vec<Value>>;

    /// Profile row owned by `owner_id`, or `BackendError::NotFound`.
    async fn query_profile(&self, owner_id: &str) -> Result<ProfileRow>;
}

pub type SharedBackend = Arc<dyn Backend>;

static BACKEND: OnceLock<SharedBackend> = OnceLock::new();

/// Process-wide backend handle, built from [`BackendConfig::from_env`] on
/// first use.
pub fn shared() -> Result<SharedBackend> {
    if let Some(backend) = BACKEND.get() {
        return Ok(backend.clone());
    }

    let config = BackendConfig::from_env()?;
    tracing::info!("Connecting to backend at {}", config.url);
    Ok(BACKEND
        .get_or_init(|| Arc::new(SupabaseBackend::new(config)))
        .clone())
}
