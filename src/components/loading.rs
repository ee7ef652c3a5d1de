//! Loading indicators

use leptos::prelude::*;

use super::Logo;

/// Spinner loading indicator
#[component]
pub fn LoadingSpinner(
    #[prop(default = "w-5 h-5")] size: &'static str,
) -> impl IntoView {
    view! {
        <svg
            class=format!("{} animate-spin text-primary", size)
            xmlns="http://www.w3.org/2000/svg"
            fill="none"
            viewBox="0 0 24 24"
        >
            <circle
                class="opacity-25"
                cx="12"
                cy="12"
                r="10"
                stroke="currentColor"
                stroke-width="4"
            ></circle>
            <path
                class="opacity-75"
                fill="currentColor"
                d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"
            ></path>
        </svg>
    }
}

/// Full-page loading screen shown while the session resolves
#[component]
pub fn LoadingOverlay(
    #[prop(default = "Loading...")] message: &'static str,
) -> impl IntoView {
    view! {
        <div class="min-h-screen gradient-orange flex items-center justify-center">
            <div class="flex flex-col items-center gap-4">
                <Logo class="w-16 h-16" show_text=true />
                <LoadingSpinner size="w-12 h-12" />
                <p class="text-white/90 font-medium">{message}</p>
            </div>
        </div>
    }
}

/// Skeleton loader for content
#[component]
pub fn Skeleton(
    #[prop(default = "h-4 w-full")] class: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("bg-secondary rounded {}", class)></div>
    }
}

/// Placeholder grid with the same shape as the provider grid
#[component]
pub fn ProviderGridSkeleton(
    #[prop(default = 4)] count: usize,
) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 gap-4">
            {(0..count).map(|_| view! {
                <div class="bg-card rounded-xl shadow-card p-4 animate-pulse">
                    <Skeleton class="h-32 rounded-lg mb-3" />
                    <Skeleton class="h-4 mb-2" />
                    <Skeleton class="h-3" />
                </div>
            }).collect::<Vec<_>>()}
        </div>
    }
}
