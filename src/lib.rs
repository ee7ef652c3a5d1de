//! SwiftFyx - local services marketplace client
//!
//! Leptos front end over a Supabase backend: sign in, browse available
//! providers, open a provider's profile and manage the account.

pub mod api;
pub mod backend;
pub mod components;
pub mod config;
pub mod error;
pub mod pages;
pub mod providers;
pub mod state;
pub mod types;

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, Title};

use backend::{AuthEvent, AuthHandler, SharedBackend};
use components::LoadingOverlay;
use error::BackendError;
use pages::{AuthView, HomeView, ProfileView};
use state::{AppState, RouteEvent, Screen};
use types::Session;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let root = match backend::shared() {
        Ok(backend) => view! { <AppRoot backend=backend /> }.into_any(),
        Err(e) => {
            tracing::error!("Backend unavailable: {}", e);
            view! { <ConfigError error=e /> }.into_any()
        }
    };

    view! {
        <Title text="SwiftFyx" />
        <main class="min-h-screen bg-background text-foreground">{root}</main>
    }
}

/// Screen router. Follows the backend's auth state and the screens'
/// navigation callbacks.
#[component]
pub fn AppRoot(backend: SharedBackend) -> impl IntoView {
    let state = AppState::new();

    let handler: AuthHandler = Arc::new(move |event: AuthEvent, session: Option<Session>| {
        state.apply_session(event, session);
    });
    let subscription = backend.on_auth_state_change(handler);
    on_cleanup(move || subscription.unsubscribe());

    // Startup session query
    {
        let backend = backend.clone();
        spawn_local(async move {
            match backend.get_session().await {
                Ok(session) => state.apply_session(AuthEvent::InitialSession, session),
                Err(e) => {
                    tracing::error!("Error restoring session: {}", e);
                    state.apply_session(AuthEvent::InitialSession, None);
                }
            }
        });
    }

    let sign_out = {
        let backend = backend.clone();
        Callback::new(move |_: ()| {
            let backend = backend.clone();
            spawn_local(async move {
                if let Err(e) = backend.sign_out().await {
                    tracing::warn!("Sign out failed remotely: {}", e);
                }
                state.apply(RouteEvent::SignedOut);
            });
        })
    };

    let user = Memo::new(move |_| state.user());
    let screen = Memo::new(move |_| state.screen.get());

    view! {
        <Show when=move || state.resolved.get() fallback=|| view! { <LoadingOverlay /> }>
            {
                let backend = backend.clone();
                move || match screen.get() {
                    Screen::Auth => view! {
                        <AuthView
                            backend=backend.clone()
                            on_success=move || state.apply(RouteEvent::AuthSucceeded)
                            on_back=sign_out
                        />
                    }
                    .into_any(),
                    Screen::Home => view! {
                        <HomeView
                            backend=backend.clone()
                            user=user
                            on_profile_click=move || state.apply(RouteEvent::OpenProfile)
                        />
                    }
                    .into_any(),
                    Screen::Profile => view! {
                        <ProfileView
                            backend=backend.clone()
                            user=user
                            on_back=move || state.apply(RouteEvent::BackToHome)
                            on_sign_out=sign_out
                        />
                    }
                    .into_any(),
                }
            }
        </Show>
    }
}

/// Shown when the backend connection is not configured
#[component]
fn ConfigError(error: BackendError) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center p-6">
            <div class="text-center max-w-sm">
                <h1 class="text-2xl font-semibold mb-2">"SwiftFyx is unavailable"</h1>
                <p class="text-muted-foreground">{error.to_string()}</p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_callbacks_drive_the_router() {
        let state = AppState::new();
        let on_success: Callback<()> = (move || state.apply(RouteEvent::AuthSucceeded)).into();
        let on_profile_click: Callback<()> = (move || state.apply(RouteEvent::OpenProfile)).into();
        let on_back: Callback<()> = (move || state.apply(RouteEvent::BackToHome)).into();

        on_success.run(());
        assert_eq!(state.screen.get_untracked(), Screen::Home);
        on_profile_click.run(());
        assert_eq!(state.screen.get_untracked(), Screen::Profile);
        on_back.run(());
        assert_eq!(state.screen.get_untracked(), Screen::Home);
    }
}
