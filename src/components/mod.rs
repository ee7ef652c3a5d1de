//! Reusable UI components

pub mod loading;
pub mod logo;
pub mod provider_card;
pub mod provider_profile;

pub use loading::{LoadingOverlay, LoadingSpinner, ProviderGridSkeleton, Skeleton};
pub use logo::Logo;
pub use provider_card::ProviderCard;
pub use provider_profile::ProviderProfile;
