//! Session persistence in browser storage

use gloo_storage::{LocalStorage, SessionStorage, Storage};

use crate::error::{BackendError, Result};
use crate::types::Session;

/// Where a session is kept between page loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persistence {
    /// `localStorage`, survives browser restarts
    #[default]
    Durable,
    /// `sessionStorage`, cleared with the tab
    PerTab,
}

impl Persistence {
    pub fn from_remember_me(remember_me: bool) -> Self {
        if remember_me {
            Persistence::Durable
        } else {
            Persistence::PerTab
        }
    }
}

/// Load a stored session, durable storage first.
pub fn load(key: &str) -> Option<(Session, Persistence)> {
    if let Ok(session) = LocalStorage::get::<Session>(key) {
        return Some((session, Persistence::Durable));
    }
    SessionStorage::get::<Session>(key)
        .ok()
        .map(|session| (session, Persistence::PerTab))
}

pub fn save(key: &str, session: &Session, persistence: Persistence) -> Result<()> {
    let stored = match persistence {
        Persistence::Durable => {
            SessionStorage::delete(key);
            LocalStorage::set(key, session)
        }
        Persistence::PerTab => {
            LocalStorage::delete(key);
            SessionStorage::set(key, session)
        }
    };
    stored.map_err(|e| BackendError::Storage(e.to_string()))
}

pub fn clear(key: &str) {
    LocalStorage::delete(key);
    SessionStorage::delete(key);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remember_me_selects_storage() {
        assert_eq!(Persistence::from_remember_me(true), Persistence::Durable);
        assert_eq!(Persistence::from_remember_me(false), Persistence::PerTab);
    }
}
