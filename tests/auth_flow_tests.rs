//! Credential exchange and the auth-driven screen router

mod common;

use std::sync::Arc;

use common::mocks::{test_session, test_user, MockBackend};
use parking_lot::Mutex;
use swiftfyx_ui::backend::{AuthEvent, AuthHandler, Backend, Subscription};
use swiftfyx_ui::error::BackendError;
use swiftfyx_ui::pages::auth::{submit, AuthForm, AuthMode, SubmitOutcome};
use swiftfyx_ui::state::{RouteEvent, Screen};
use swiftfyx_ui::types::{Session, SignUpOutcome};

fn form(mode: AuthMode) -> AuthForm {
    AuthForm {
        identifier: "robbie@example.com".to_string(),
        phone: "555-0100".to_string(),
        password: "hunter22".to_string(),
        confirm_password: "hunter22".to_string(),
        remember_me: false,
        mode,
    }
}

/// Screen driven by auth notifications, the way the root component wires it
fn track_screen(backend: &MockBackend) -> (Arc<Mutex<Screen>>, Subscription) {
    let screen = Arc::new(Mutex::new(Screen::default()));
    let handle = screen.clone();
    let handler: AuthHandler = Arc::new(move |event: AuthEvent, session: Option<Session>| {
        let mut screen = handle.lock();
        *screen = screen.next(RouteEvent::SessionChanged {
            event,
            present: session.is_some(),
        });
    });
    let subscription = backend.on_auth_state_change(handler);
    (screen, subscription)
}

#[tokio::test]
async fn test_sign_in_success() {
    let backend = MockBackend::new();

    let outcome = submit(&backend, form(AuthMode::SignIn).request()).await;

    assert_eq!(outcome, Ok(SubmitOutcome::Authenticated));
    let calls = backend.calls();
    assert_eq!(calls.sign_ins.len(), 1);
    assert_eq!(calls.sign_ins[0].email, "robbie@example.com");
    assert!(calls.sign_ups.is_empty());
}

#[tokio::test]
async fn test_sign_in_rejected() {
    let backend = MockBackend::new()
        .with_sign_in(Err(BackendError::Auth("Invalid login credentials".to_string())));

    let error = submit(&backend, form(AuthMode::SignIn).request())
        .await
        .unwrap_err();

    assert_eq!(error.user_message(), "Invalid login credentials");
}

#[tokio::test]
async fn test_sign_up_needing_confirmation() {
    let backend = MockBackend::new()
        .with_sign_up(Ok(SignUpOutcome::ConfirmationRequired(test_user())));

    let outcome = submit(&backend, form(AuthMode::SignUp).request()).await;

    assert_eq!(outcome, Ok(SubmitOutcome::ConfirmEmail));
    let calls = backend.calls();
    assert_eq!(calls.sign_ups[0].data.phone.as_deref(), Some("555-0100"));
}

#[tokio::test]
async fn test_auto_confirmed_sign_up_is_authenticated() {
    let backend = MockBackend::new();
    let outcome = submit(&backend, form(AuthMode::SignUp).request()).await;
    assert_eq!(outcome, Ok(SubmitOutcome::Authenticated));
}

#[tokio::test]
async fn test_password_reset_records_email() {
    let backend = MockBackend::new();
    backend.reset_password("robbie@example.com").await.unwrap();
    assert_eq!(backend.calls().reset_emails, vec!["robbie@example.com"]);
}

#[tokio::test]
async fn test_session_events_drive_screens() {
    let backend = MockBackend::new();
    let (screen, _subscription) = track_screen(&backend);
    assert_eq!(*screen.lock(), Screen::Auth);

    submit(&backend, form(AuthMode::SignIn).request())
        .await
        .unwrap();
    assert_eq!(*screen.lock(), Screen::Home);

    {
        let mut screen = screen.lock();
        *screen = screen.next(RouteEvent::OpenProfile);
    }
    backend
        .listeners()
        .emit(AuthEvent::TokenRefreshed, Some(&test_session()));
    assert_eq!(*screen.lock(), Screen::Profile);

    backend.sign_out().await.unwrap();
    assert_eq!(*screen.lock(), Screen::Auth);
    assert_eq!(backend.calls().sign_outs, 1);
}

#[tokio::test]
async fn test_failed_remote_sign_out_still_signs_out() {
    let backend = MockBackend::new().failing_sign_out(BackendError::Network("offline".to_string()));
    let (screen, _subscription) = track_screen(&backend);
    backend
        .listeners()
        .emit(AuthEvent::InitialSession, Some(&test_session()));
    assert_eq!(*screen.lock(), Screen::Home);

    assert!(backend.sign_out().await.is_err());
    assert_eq!(*screen.lock(), Screen::Auth);
}

#[tokio::test]
async fn test_unsubscribed_router_ignores_events() {
    let backend = MockBackend::new();
    let (screen, subscription) = track_screen(&backend);
    subscription.unsubscribe();
    assert!(backend.listeners().is_empty());

    backend
        .listeners()
        .emit(AuthEvent::SignedIn, Some(&test_session()));
    assert_eq!(*screen.lock(), Screen::Auth);
}

#[tokio::test]
async fn test_startup_without_session_stays_on_auth() {
    let backend = MockBackend::new().with_session(Ok(None));
    let session = backend.get_session().await.unwrap();

    let screen = Screen::default().next(RouteEvent::SessionChanged {
        event: AuthEvent::InitialSession,
        present: session.is_some(),
    });
    assert_eq!(screen, Screen::Auth);
}
