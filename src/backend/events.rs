//! Auth-state change notifications

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::types::Session;

/// Kind of auth-state change, mirroring GoTrue client events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

pub type AuthHandler = Arc<dyn Fn(AuthEvent, Option<Session>) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, AuthHandler)>,
}

/// Listener registry shared by a backend and its subscriptions
#[derive(Clone, Default)]
pub struct AuthListeners {
    registry: Arc<Mutex<Registry>>,
}

impl AuthListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: AuthHandler) -> Subscription {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, handler));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Notify every listener. Handlers run outside the lock so they may
    /// subscribe or unsubscribe.
    pub fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        let handlers: Vec<AuthHandler> = self
            .registry
            .lock()
            .handlers
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        tracing::debug!(?event, listeners = handlers.len(), "auth state change");
        for handler in handlers {
            handler(event, session.cloned());
        }
    }

    pub fn len(&self) -> usize {
        self.registry.lock().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for one listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}
