//! Account page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::load_profile;
use crate::backend::SharedBackend;
use crate::components::LoadingSpinner;
use crate::types::{User, UserProfile};

pub const VALUE_PLACEHOLDER: &str = "Not set";

/// Navigation rows with no data behind them yet
const STATIC_ROWS: [&str; 4] = ["Settings", "Business Account", "Report", "Legal"];

/// One row of the account menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    pub label: &'static str,
    pub value: Option<String>,
}

pub fn profile_entries(profile: Option<&UserProfile>) -> Vec<ProfileEntry> {
    let value = |field: Option<&String>| {
        Some(
            field
                .cloned()
                .unwrap_or_else(|| VALUE_PLACEHOLDER.to_string()),
        )
    };

    let mut entries = vec![
        ProfileEntry {
            label: "Name",
            value: value(profile.and_then(|p| p.full_name.as_ref())),
        },
        ProfileEntry {
            label: "Email",
            value: value(profile.and_then(|p| p.email.as_ref())),
        },
        ProfileEntry {
            label: "Phone",
            value: value(profile.and_then(|p| p.phone.as_ref())),
        },
        ProfileEntry {
            label: "Address",
            value: value(profile.and_then(|p| p.address.as_ref())),
        },
    ];
    entries.extend(STATIC_ROWS.iter().map(|label| ProfileEntry { label, value: None }));
    entries
}

/// First word of the profile name for the "Hi, ..." header.
pub fn first_name(profile: Option<&UserProfile>) -> String {
    profile
        .and_then(|p| p.full_name.as_deref())
        .and_then(|name| name.split_whitespace().next())
        .unwrap_or("there")
        .to_string()
}

#[component]
pub fn ProfileView(
    backend: SharedBackend,
    #[prop(into)] user: Signal<Option<User>>,
    #[prop(into)] on_back: Callback<()>,
    #[prop(into)] on_sign_out: Callback<()>,
) -> impl IntoView {
    let profile = RwSignal::new(Option::<UserProfile>::None);
    let is_loading = RwSignal::new(true);
    let user_id = Memo::new(move |_| user.with(|u| u.as_ref().map(|u| u.id.clone())));

    Effect::new(move |_| {
        let Some(id) = user_id.get() else {
            profile.set(None);
            is_loading.set(false);
            return;
        };

        let backend = backend.clone();
        is_loading.set(true);
        spawn_local(async move {
            profile.set(load_profile(backend.as_ref(), &id).await);
            is_loading.set(false);
        });
    });

    view! {
        <div class="min-h-screen bg-background">
            // Header
            <div class="bg-card p-6 border-b border-border">
                <div class="flex items-center justify-between">
                    <button
                        on:click=move |_| on_back.run(())
                        class="p-2 hover:bg-secondary rounded-lg transition-smooth"
                        aria-label="Back"
                    >
                        "←"
                    </button>
                    <h1 class="font-semibold text-lg">"Profile"</h1>
                    <div class="w-9 h-9"></div>
                </div>
            </div>

            <div class="p-6">
                <div class="flex items-center space-x-4 mb-6">
                    <div class="w-16 h-16 rounded-full bg-primary flex items-center justify-center text-primary-foreground text-2xl">
                        "👤"
                    </div>
                    <div>
                        <h2 class="text-xl font-semibold">
                            {move || format!("Hi, {}", first_name(profile.get().as_ref()))}
                        </h2>
                        <p class="text-muted-foreground">"Manage your account"</p>
                    </div>
                </div>

                <Show
                    when=move || !is_loading.get()
                    fallback=|| view! {
                        <div class="flex justify-center py-8">
                            <LoadingSpinner size="w-8 h-8" />
                        </div>
                    }
                >
                    <div class="space-y-1">
                        {move || profile_entries(profile.get().as_ref())
                            .into_iter()
                            .map(|entry| view! {
                                <div class="flex items-center justify-between p-4 bg-card rounded-lg hover:bg-secondary/50 cursor-pointer transition-smooth border border-border">
                                    <div class="flex flex-col">
                                        <span class="font-medium">{entry.label}</span>
                                        {entry.value.map(|value| view! {
                                            <span class="text-sm text-muted-foreground mt-1">{value}</span>
                                        })}
                                    </div>
                                    <span class="text-muted-foreground">"›"</span>
                                </div>
                            })
                            .collect::<Vec<_>>()}
                    </div>
                </Show>

                <button
                    on:click=move |_| on_sign_out.run(())
                    class="btn w-full mt-6 py-3 text-destructive border border-border rounded-lg"
                >
                    "Sign Out"
                </button>
            </div>
        </div>
    }
}
