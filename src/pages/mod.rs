//! Top-level screens

pub mod auth;
pub mod home;
pub mod profile;

pub use auth::AuthView;
pub use home::HomeView;
pub use profile::ProfileView;
