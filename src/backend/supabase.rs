//! Supabase implementation of [`Backend`]: GoTrue for auth, PostgREST for rows

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

use super::events::{AuthEvent, AuthHandler, AuthListeners, Subscription};
use super::postgrest::{self, Query};
use super::session_store::{self, Persistence};
use super::{http, Backend};
use crate::config::BackendConfig;
use crate::error::{BackendError, Result, Service};
use crate::types::{
    ProfileRow, RecoverRequest, RefreshRequest, Session, SignInRequest, SignUpOutcome,
    SignUpRequest, User,
};

/// Refresh this many seconds before the access token expires.
const REFRESH_MARGIN_SECS: i64 = 60;
/// Browsers fire longer `setTimeout` delays immediately.
const MAX_TIMER_MS: i64 = i32::MAX as i64;

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

struct Inner {
    config: BackendConfig,
    current: Mutex<Option<(Session, Persistence)>>,
    listeners: AuthListeners,
    /// Bumped whenever the session changes; stale refresh timers compare
    /// against it and bail out.
    refresh_generation: AtomicU64,
}

/// Handle to one Supabase project. Cheap to clone.
#[derive(Clone)]
pub struct SupabaseBackend {
    inner: Arc<Inner>,
}

impl SupabaseBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                current: Mutex::new(None),
                listeners: AuthListeners::new(),
                refresh_generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.inner.config
    }

    fn access_token(&self) -> Option<String> {
        self.inner
            .current
            .lock()
            .as_ref()
            .map(|(session, _)| session.access_token.clone())
    }

    fn with_token(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder
            .header("apikey", &self.inner.config.anon_key)
            .header("Authorization", &format!("Bearer {}", token))
    }

    /// Auth endpoints that must not carry a possibly stale user token.
    fn anonymous(&self, builder: RequestBuilder) -> RequestBuilder {
        let anon_key = self.inner.config.anon_key.clone();
        self.with_token(builder, &anon_key)
    }

    /// Row reads run as the signed-in user so row-level security applies.
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self
            .access_token()
            .unwrap_or_else(|| self.inner.config.anon_key.clone());
        self.with_token(builder, &token)
    }

    fn rest_request(&self, query: &Query) -> RequestBuilder {
        tracing::debug!("GET /rest/v1/{}", query.to_path());
        let builder = Request::get(&self.inner.config.rest_url(query.table()))
            .query(query.params().iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let builder = if query.is_single() {
            builder.header("Accept", "application/vnd.pgrst.object+json")
        } else {
            builder
        };
        self.authorized(builder)
    }

    async fn request_token<B: Serialize>(&self, grant_type: &str, body: &B) -> Result<Session> {
        let url = self
            .inner
            .config
            .auth_url(&format!("token?grant_type={}", grant_type));
        let session: Session =
            http::post_json(self.anonymous(Request::post(&url)), body, Service::Auth).await?;
        Ok(session.stamped(now()))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.request_token("refresh_token", &body).await
    }

    /// Make `session` current, persist it, arm the refresh timer and notify
    /// listeners when `event` is set.
    fn establish(&self, session: Session, persistence: Persistence, event: Option<AuthEvent>) {
        if let Err(e) = session_store::save(&self.inner.config.storage_key, &session, persistence)
        {
            tracing::warn!("Failed to persist session: {}", e);
        }
        *self.inner.current.lock() = Some((session.clone(), persistence));
        self.schedule_refresh(&session, persistence);

        if let Some(event) = event {
            self.inner.listeners.emit(event, Some(&session));
        }
    }

    fn clear_session(&self) {
        self.inner.current.lock().take();
        self.inner.refresh_generation.fetch_add(1, Ordering::SeqCst);
        session_store::clear(&self.inner.config.storage_key);
        self.inner.listeners.emit(AuthEvent::SignedOut, None);
    }

    fn schedule_refresh(&self, session: &Session, persistence: Persistence) {
        let generation = self.inner.refresh_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let Some(expires_at) = session.expires_at else {
            return;
        };

        let delay_ms = (expires_at - now() - REFRESH_MARGIN_SECS)
            .max(0)
            .saturating_mul(1000)
            .min(MAX_TIMER_MS);
        let delay_ms = u32::try_from(delay_ms).unwrap_or(0);
        let backend = self.clone();
        let refresh_token = session.refresh_token.clone();

        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            if backend.inner.refresh_generation.load(Ordering::SeqCst) != generation {
                return;
            }

            match backend.refresh(&refresh_token).await {
                Ok(fresh) => {
                    tracing::debug!("Session refreshed for {}", fresh.user.id);
                    backend.establish(fresh, persistence, Some(AuthEvent::TokenRefreshed));
                }
                Err(e) => {
                    tracing::warn!("Session refresh failed, signing out: {}", e);
                    backend.clear_session();
                }
            }
        });
    }
}

/// GoTrue answers sign-up with a full session when the account is
/// auto-confirmed, and with the bare user (sometimes wrapped) otherwise.
pub fn parse_sign_up(body: Value, now: i64) -> Result<SignUpOutcome> {
    let decode = |e: serde_json::Error| BackendError::Decode(e.to_string());

    if body.get("access_token").is_some() {
        let session: Session = serde_json::from_value(body).map_err(decode)?;
        return Ok(SignUpOutcome::SignedIn(session.stamped(now)));
    }

    let user = match body.get("user") {
        Some(user) if user.is_object() => user.clone(),
        _ => body,
    };
    let user: User = serde_json::from_value(user).map_err(decode)?;
    Ok(SignUpOutcome::ConfirmationRequired(user))
}

#[async_trait(?Send)]
impl Backend for SupabaseBackend {
    async fn get_session(&self) -> Result<Option<Session>> {
        let cached = self.inner.current.lock().clone();
        let from_storage = cached.is_none();
        let Some((session, persistence)) =
            cached.or_else(|| session_store::load(&self.inner.config.storage_key))
        else {
            return Ok(None);
        };

        if !session.expires_within(now(), REFRESH_MARGIN_SECS) {
            if from_storage {
                tracing::info!("Restored session for {}", session.user.id);
                self.establish(session.clone(), persistence, None);
            }
            return Ok(Some(session));
        }

        match self.refresh(&session.refresh_token).await {
            Ok(fresh) => {
                self.establish(fresh.clone(), persistence, Some(AuthEvent::TokenRefreshed));
                Ok(Some(fresh))
            }
            // Offline: keep the stored session for the next attempt.
            Err(BackendError::Network(e)) => Err(BackendError::Network(e)),
            Err(e) => {
                tracing::warn!("Stored session could not be refreshed: {}", e);
                self.clear_session();
                Ok(None)
            }
        }
    }

    fn on_auth_state_change(&self, handler: AuthHandler) -> Subscription {
        self.inner.listeners.subscribe(handler)
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<Session> {
        let session = self.request_token("password", request).await?;
        tracing::info!("Signed in as {}", session.user.id);
        self.establish(
            session.clone(),
            Persistence::from_remember_me(request.remember_me),
            Some(AuthEvent::SignedIn),
        );
        Ok(session)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome> {
        let url = self.inner.config.auth_url("signup");
        let body: Value =
            http::post_json(self.anonymous(Request::post(&url)), request, Service::Auth).await?;

        let outcome = parse_sign_up(body, now())?;
        match &outcome {
            SignUpOutcome::SignedIn(session) => {
                tracing::info!("Signed up and signed in as {}", session.user.id);
                self.establish(session.clone(), Persistence::Durable, Some(AuthEvent::SignedIn));
            }
            SignUpOutcome::ConfirmationRequired(user) => {
                tracing::info!("Signed up {}, awaiting email confirmation", user.id);
            }
        }
        Ok(outcome)
    }

    async fn reset_password(&self, email: &str) -> Result<()> {
        let url = self.inner.config.auth_url("recover");
        let body = RecoverRequest {
            email: email.to_string(),
        };
        http::post_empty(self.anonymous(Request::post(&url)), &body, Service::Auth).await
    }

    async fn sign_out(&self) -> Result<()> {
        let remote = match self.access_token() {
            Some(token) => {
                let url = self.inner.config.auth_url("logout");
                http::execute(self.with_token(Request::post(&url), &token), Service::Auth).await
            }
            None => Ok(()),
        };

        self.clear_session();
        match remote {
            // Token already revoked or expired; nothing left to end remotely.
            Err(BackendError::Auth(_)) | Err(BackendError::NotFound) => Ok(()),
            other => other,
        }
    }

    async fn query_providers(&self) -> Result<Vec<Value>> {
        let query = postgrest::available_providers();
        http::get_json(self.rest_request(&query), Service::Rest).await
    }

    async fn query_profile(&self, owner_id: &str) -> Result<ProfileRow> {
        let query = postgrest::profile_for(owner_id);
        http::get_json(self.rest_request(&query), Service::Rest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_sign_up_with_session() {
        let body = json!({
            "access_token": "a",
            "refresh_token": "r",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": { "id": "u1", "email": "new@example.com" }
        });

        match parse_sign_up(body, 100).unwrap() {
            SignUpOutcome::SignedIn(session) => {
                assert_eq!(session.user.id, "u1");
                assert_eq!(session.expires_at, Some(3700));
            }
            other => panic!("expected session, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_sign_up_awaiting_confirmation() {
        let body = json!({ "id": "u2", "email": "new@example.com", "confirmation_sent_at": "2026-01-01T00:00:00Z" });
        assert_eq!(
            parse_sign_up(body, 0).unwrap(),
            SignUpOutcome::ConfirmationRequired(User {
                id: "u2".to_string(),
                email: Some("new@example.com".to_string()),
                phone: None,
            })
        );
    }

    #[test]
    fn test_parse_sign_up_wrapped_user() {
        let body = json!({ "user": { "id": "u3" }, "session": null });
        assert!(matches!(
            parse_sign_up(body, 0).unwrap(),
            SignUpOutcome::ConfirmationRequired(user) if user.id == "u3"
        ));
    }

    #[test]
    fn test_parse_sign_up_garbage_is_decode_error() {
        assert!(matches!(
            parse_sign_up(json!({ "unexpected": true }), 0),
            Err(BackendError::Decode(_))
        ));
    }

    #[test]
    fn test_new_backend_has_no_session() {
        let config = BackendConfig::new("https://abcd.supabase.co", "anon").unwrap();
        let backend = SupabaseBackend::new(config);
        assert_eq!(backend.access_token(), None);
        assert_eq!(backend.config().storage_key, "sb-abcd-auth-token");
    }
}
