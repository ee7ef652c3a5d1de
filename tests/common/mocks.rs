//! Mock backend for testing.
//!
//! `MockBackend` answers every `Backend` call from canned results and records
//! what the screens asked for, so loaders and auth flows can be exercised
//! without a browser or a Supabase project.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use swiftfyx_ui::backend::{AuthEvent, AuthHandler, AuthListeners, Backend, Subscription};
use swiftfyx_ui::error::{BackendError, Result};
use swiftfyx_ui::types::{
    ProfileRow, Session, SignInRequest, SignUpOutcome, SignUpRequest, User,
};

/// Backend double with configurable responses.
///
/// ```
/// let backend = MockBackend::new()
///     .with_providers(Err(BackendError::Network("offline".into())))
///     .with_profile(Err(BackendError::NotFound));
/// ```
#[derive(Clone)]
pub struct MockBackend {
    providers: Result<Vec<Value>>,
    profile: Result<ProfileRow>,
    session: Result<Option<Session>>,
    sign_in: Result<Session>,
    sign_up: Result<SignUpOutcome>,
    sign_out_error: Option<BackendError>,
    listeners: AuthListeners,
    calls: Arc<Mutex<Calls>>,
}

/// What the mock was asked to do
#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub sign_ins: Vec<SignInRequest>,
    pub sign_ups: Vec<SignUpRequest>,
    pub reset_emails: Vec<String>,
    pub profile_owners: Vec<String>,
    pub sign_outs: usize,
}

pub fn test_user() -> User {
    User {
        id: "user-1".to_string(),
        email: Some("robbie@example.com".to_string()),
        phone: None,
    }
}

pub fn test_session() -> Session {
    Session {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        token_type: Some("bearer".to_string()),
        expires_in: 3600,
        expires_at: Some(1_900_000_000),
        user: test_user(),
    }
}

/// A `service_providers` row as PostgREST returns it
pub fn provider_row(id: &str, name: &str, rating: f64) -> Value {
    json!({
        "id": id,
        "business_name": name,
        "service_category": "Handyman Services",
        "location_address": "Poway, CA",
        "rating": rating,
        "review_count": 10,
        "hourly_rate": 45,
        "is_available": true,
    })
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            providers: Ok(vec![]),
            profile: Err(BackendError::NotFound),
            session: Ok(None),
            sign_in: Ok(test_session()),
            sign_up: Ok(SignUpOutcome::SignedIn(test_session())),
            sign_out_error: None,
            listeners: AuthListeners::new(),
            calls: Arc::new(Mutex::new(Calls::default())),
        }
    }

    pub fn with_providers(mut self, providers: Result<Vec<Value>>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_profile(mut self, profile: Result<ProfileRow>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_session(mut self, session: Result<Option<Session>>) -> Self {
        self.session = session;
        self
    }

    pub fn with_sign_in(mut self, result: Result<Session>) -> Self {
        self.sign_in = result;
        self
    }

    pub fn with_sign_up(mut self, result: Result<SignUpOutcome>) -> Self {
        self.sign_up = result;
        self
    }

    pub fn failing_sign_out(mut self, error: BackendError) -> Self {
        self.sign_out_error = Some(error);
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().clone()
    }

    pub fn listeners(&self) -> &AuthListeners {
        &self.listeners
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    async fn get_session(&self) -> Result<Option<Session>> {
        self.session.clone()
    }

    fn on_auth_state_change(&self, handler: AuthHandler) -> Subscription {
        self.listeners.subscribe(handler)
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<Session> {
        self.calls.lock().sign_ins.push(request.clone());
        let session = self.sign_in.clone()?;
        self.listeners.emit(AuthEvent::SignedIn, Some(&session));
        Ok(session)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome> {
        self.calls.lock().sign_ups.push(request.clone());
        let outcome = self.sign_up.clone()?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.listeners.emit(AuthEvent::SignedIn, Some(session));
        }
        Ok(outcome)
    }

    async fn reset_password(&self, email: &str) -> Result<()> {
        self.calls.lock().reset_emails.push(email.to_string());
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        self.calls.lock().sign_outs += 1;
        self.listeners.emit(AuthEvent::SignedOut, None);
        match &self.sign_out_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn query_providers(&self) -> Result<Vec<Value>> {
        self.providers.clone()
    }

    async fn query_profile(&self, owner_id: &str) -> Result<ProfileRow> {
        self.calls.lock().profile_owners.push(owner_id.to_string());
        self.profile.clone()
    }
}
