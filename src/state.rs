//! Application state: the top-level screen router and the home feed state

use leptos::prelude::*;

use crate::backend::AuthEvent;
use crate::providers::{filter_providers, ServiceProvider};
use crate::types::{Session, User};

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Auth,
    Home,
    Profile,
}

/// Inputs to the screen router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEvent {
    /// Session bootstrap or auth notification resolved
    SessionChanged { event: AuthEvent, present: bool },
    AuthSucceeded,
    OpenProfile,
    BackToHome,
    SignedOut,
}

impl Screen {
    pub fn next(self, event: RouteEvent) -> Screen {
        match (self, event) {
            (_, RouteEvent::SessionChanged { present: false, .. }) => Screen::Auth,
            (Screen::Auth, RouteEvent::SessionChanged { present: true, .. }) => Screen::Home,
            (
                _,
                RouteEvent::SessionChanged {
                    event: AuthEvent::SignedIn | AuthEvent::InitialSession,
                    present: true,
                },
            ) => Screen::Home,
            // Token refreshes and user updates keep the current screen.
            (screen, RouteEvent::SessionChanged { .. }) => screen,
            (_, RouteEvent::AuthSucceeded) => Screen::Home,
            (Screen::Home, RouteEvent::OpenProfile) => Screen::Profile,
            (Screen::Profile, RouteEvent::BackToHome) => Screen::Home,
            (_, RouteEvent::SignedOut) => Screen::Auth,
            (screen, RouteEvent::OpenProfile | RouteEvent::BackToHome) => screen,
        }
    }
}

/// Root state shared by the router and its screens
#[derive(Clone, Copy)]
pub struct AppState {
    /// Active screen
    pub screen: RwSignal<Screen>,
    /// Current backend session
    pub session: RwSignal<Option<Session>>,
    /// Set once the startup query or a notification has answered
    pub resolved: RwSignal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: RwSignal::new(Screen::default()),
            session: RwSignal::new(None),
            resolved: RwSignal::new(false),
        }
    }

    pub fn apply(&self, event: RouteEvent) {
        self.screen.update(|screen| *screen = screen.next(event));
    }

    pub fn apply_session(&self, event: AuthEvent, session: Option<Session>) {
        let present = session.is_some();
        self.session.set(session);
        self.apply(RouteEvent::SessionChanged { event, present });
        self.resolved.set(true);
    }

    pub fn user(&self) -> Option<User> {
        self.session
            .with(|session| session.as_ref().map(|s| s.user.clone()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Home feed state
#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    /// Providers in backend order
    pub providers: Vec<ServiceProvider>,
    /// Provider whose detail view is open
    pub selected: Option<ServiceProvider>,
    pub search_query: String,
    /// True until the first provider fetch settles
    pub loading: bool,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            providers: vec![],
            selected: None,
            search_query: String::new(),
            loading: true,
        }
    }
}

impl HomeState {
    pub fn finish_loading(&mut self, providers: Vec<ServiceProvider>) {
        self.providers = providers;
        self.loading = false;
    }

    pub fn select(&mut self, provider: ServiceProvider) {
        self.selected = Some(provider);
    }

    pub fn back(&mut self) {
        self.selected = None;
    }

    pub fn visible_providers(&self) -> Vec<ServiceProvider> {
        filter_providers(&self.providers, &self.search_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::sample_providers;
    use rstest::rstest;

    fn session_event(event: AuthEvent, present: bool) -> RouteEvent {
        RouteEvent::SessionChanged { event, present }
    }

    #[test]
    fn test_initial_screen_is_auth() {
        assert_eq!(Screen::default(), Screen::Auth);
    }

    #[rstest]
    #[case(AuthEvent::InitialSession)]
    #[case(AuthEvent::SignedIn)]
    #[case(AuthEvent::TokenRefreshed)]
    #[case(AuthEvent::UserUpdated)]
    fn test_present_session_from_auth_goes_home(#[case] event: AuthEvent) {
        let next = Screen::Auth.next(session_event(event, true));
        assert_eq!(next, Screen::Home);
        assert_ne!(next, Screen::Profile);
    }

    #[rstest]
    #[case(Screen::Auth)]
    #[case(Screen::Home)]
    #[case(Screen::Profile)]
    fn test_absent_session_goes_to_auth(#[case] from: Screen) {
        assert_eq!(
            from.next(session_event(AuthEvent::SignedOut, false)),
            Screen::Auth
        );
    }

    #[test]
    fn test_token_refresh_keeps_profile_open() {
        assert_eq!(
            Screen::Profile.next(session_event(AuthEvent::TokenRefreshed, true)),
            Screen::Profile
        );
        assert_eq!(
            Screen::Profile.next(session_event(AuthEvent::SignedIn, true)),
            Screen::Home
        );
    }

    #[test]
    fn test_click_transitions() {
        assert_eq!(Screen::Auth.next(RouteEvent::AuthSucceeded), Screen::Home);
        assert_eq!(Screen::Home.next(RouteEvent::OpenProfile), Screen::Profile);
        assert_eq!(Screen::Profile.next(RouteEvent::BackToHome), Screen::Home);
        assert_eq!(Screen::Profile.next(RouteEvent::SignedOut), Screen::Auth);
        assert_eq!(Screen::Auth.next(RouteEvent::SignedOut), Screen::Auth);
    }

    #[test]
    fn test_profile_unreachable_from_auth() {
        assert_eq!(Screen::Auth.next(RouteEvent::OpenProfile), Screen::Auth);
        assert_eq!(Screen::Auth.next(RouteEvent::BackToHome), Screen::Auth);
    }

    #[test]
    fn test_app_state_resolves_on_first_session_answer() {
        let state = AppState::new();
        assert!(!state.resolved.get_untracked());
        assert_eq!(state.screen.get_untracked(), Screen::Auth);

        let session = Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_type: None,
            expires_in: 3600,
            expires_at: None,
            user: User {
                id: "user-1".to_string(),
                email: None,
                phone: None,
            },
        };
        state.apply_session(AuthEvent::InitialSession, Some(session));
        assert!(state.resolved.get_untracked());
        assert_eq!(state.screen.get_untracked(), Screen::Home);
        assert_eq!(state.user().map(|u| u.id), Some("user-1".to_string()));

        state.apply(RouteEvent::SignedOut);
        assert_eq!(state.screen.get_untracked(), Screen::Auth);
        assert!(state.resolved.get_untracked());
    }

    #[test]
    fn test_absent_startup_session_resolves_to_auth() {
        let state = AppState::new();
        state.apply_session(AuthEvent::InitialSession, None);
        assert!(state.resolved.get_untracked());
        assert_eq!(state.screen.get_untracked(), Screen::Auth);
        assert_eq!(state.user(), None);
    }

    #[test]
    fn test_home_state_starts_loading() {
        let state = HomeState::default();
        assert!(state.loading);
        assert!(state.providers.is_empty());
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_select_then_back_leaves_grid_untouched() {
        let mut state = HomeState::default();
        state.finish_loading(sample_providers());
        state.search_query = "service".to_string();
        let before = state.clone();

        state.select(state.providers[2].clone());
        assert_eq!(
            state.selected.as_ref().map(|p| p.name.as_str()),
            Some("Ryan B.")
        );

        state.back();
        assert_eq!(state, before);
    }

    #[test]
    fn test_visible_providers_follow_search() {
        let mut state = HomeState::default();
        state.finish_loading(sample_providers());
        assert_eq!(state.visible_providers().len(), 4);

        state.search_query = "plumb".to_string();
        let visible = state.visible_providers();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Ryan B.");
        assert_eq!(state.providers.len(), 4);
    }
}
