//! Home feed: greeting, search, provider grid and featured categories

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{load_profile, load_providers};
use crate::backend::SharedBackend;
use crate::components::{ProviderCard, ProviderGridSkeleton, ProviderProfile};
use crate::providers::{ServiceProvider, SERVICE_CATEGORIES};
use crate::state::HomeState;
use crate::types::{User, UserProfile};

pub const LOCATION_PLACEHOLDER: &str = "Location not set";

/// Name for the greeting: profile name, then the email's local part.
pub fn greeting_name(profile: Option<&UserProfile>, user: Option<&User>) -> String {
    profile
        .and_then(|p| p.full_name.clone())
        .or_else(|| {
            user.and_then(|u| u.email.as_deref())
                .and_then(|email| email.split('@').next())
                .filter(|local| !local.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "User".to_string())
}

pub fn location_line(profile: Option<&UserProfile>) -> String {
    profile
        .and_then(|p| p.address.clone())
        .unwrap_or_else(|| LOCATION_PLACEHOLDER.to_string())
}

/// Home screen
#[component]
pub fn HomeView(
    backend: SharedBackend,
    /// Signed-in user; both fetches rerun when its id changes
    #[prop(into)]
    user: Signal<Option<User>>,
    #[prop(into)] on_profile_click: Callback<()>,
) -> impl IntoView {
    let home = RwSignal::new(HomeState::default());
    let user_profile = RwSignal::new(Option::<UserProfile>::None);
    let user_id = Memo::new(move |_| user.with(|u| u.as_ref().map(|u| u.id.clone())));
    let selected = Memo::new(move |_| home.with(|h| h.selected.clone()));

    // Load providers and the profile on mount and on identity change
    let backend_for_load = backend.clone();
    Effect::new(move |_| {
        let owner = user_id.get();

        let backend = backend_for_load.clone();
        spawn_local(async move {
            let providers = load_providers(backend.as_ref()).await;
            tracing::info!("Loaded {} providers", providers.len());
            home.update(|h| h.finish_loading(providers));
        });

        match owner {
            Some(id) => {
                let backend = backend_for_load.clone();
                spawn_local(async move {
                    user_profile.set(load_profile(backend.as_ref(), &id).await);
                });
            }
            None => user_profile.set(None),
        }
    });

    let on_select = Callback::new(move |provider: ServiceProvider| {
        home.update(|h| h.select(provider))
    });
    let on_back = Callback::new(move |_: ()| home.update(HomeState::back));
    let on_check_availability = Callback::new(move |_: ()| {
        // Booking is not wired to a backend yet.
        if let Some(provider) = selected.get_untracked() {
            tracing::info!("Check availability for: {}", provider.name);
        }
    });

    move || match selected.get() {
        Some(provider) => view! {
            <ProviderProfile
                provider=provider
                on_back=on_back
                on_check_availability=on_check_availability
            />
        }
        .into_any(),
        None => view! {
            <div class="min-h-screen bg-background">
                // Header
                <div class="bg-card p-6 border-b border-border">
                    <div class="flex items-center justify-between mb-4">
                        <div>
                            <h1 class="text-xl font-semibold">
                                {move || format!(
                                    "Hello, {}",
                                    greeting_name(user_profile.get().as_ref(), user.get().as_ref())
                                )}
                            </h1>
                            <div class="flex items-center text-sm text-muted-foreground mt-1">
                                <span class="mr-1">"📍"</span>
                                <span>{move || location_line(user_profile.get().as_ref())}</span>
                            </div>
                        </div>
                        <button
                            on:click=move |_| on_profile_click.run(())
                            class="w-10 h-10 rounded-full bg-primary flex items-center justify-center text-primary-foreground"
                            aria-label="Profile"
                        >
                            "👤"
                        </button>
                    </div>

                    // Search bar
                    <div class="relative">
                        <span class="absolute left-3 top-1/2 transform -translate-y-1/2 text-muted-foreground">"🔍"</span>
                        <input
                            type="search"
                            placeholder="Explore!"
                            prop:value=move || home.with(|h| h.search_query.clone())
                            on:input=move |ev| home.update(|h| h.search_query = event_target_value(&ev))
                            class="input pl-10 py-3 rounded-xl border-primary/20 focus:border-primary"
                        />
                    </div>
                </div>

                <div class="p-6 space-y-6">
                    <section>
                        <h2 class="text-lg font-semibold mb-4">"Available Now Near You"</h2>
                        <Show
                            when=move || !home.with(|h| h.loading)
                            fallback=|| view! { <ProviderGridSkeleton /> }
                        >
                            <div class="grid grid-cols-2 gap-4">
                                {move || home.with(HomeState::visible_providers)
                                    .into_iter()
                                    .map(|provider| view! {
                                        <ProviderCard provider=provider on_select=on_select />
                                    })
                                    .collect::<Vec<_>>()}
                            </div>
                        </Show>
                    </section>

                    <section>
                        <h2 class="text-lg font-semibold mb-4">"SwiftFyx Featured Selections"</h2>
                        <div class="space-y-3">
                            {SERVICE_CATEGORIES.iter().map(|category| view! {
                                <div class="flex items-center p-4 bg-card rounded-xl shadow-card cursor-pointer hover:shadow-lg transition-smooth">
                                    <div class="w-10 h-10 bg-primary/10 rounded-full flex items-center justify-center mr-3">
                                        <span class="text-lg">{category.icon}</span>
                                    </div>
                                    <span class="font-medium">{category.name}</span>
                                </div>
                            }).collect::<Vec<_>>()}
                        </div>

                        <div class="mt-4">
                            <button class="w-full py-3 text-center text-muted-foreground bg-secondary rounded-xl hover:bg-secondary/80 transition-smooth">
                                "Show More"
                            </button>
                        </div>
                    </section>
                </div>
            </div>
        }
        .into_any(),
    }
}
