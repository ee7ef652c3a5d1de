//! Provider summary card for the home grid

use leptos::prelude::*;

use crate::providers::ServiceProvider;

/// One provider in the grid. Clicking anywhere on the card selects it.
#[component]
pub fn ProviderCard(
    provider: ServiceProvider,
    /// Receives the full provider on click
    #[prop(into)]
    on_select: Callback<ServiceProvider>,
) -> impl IntoView {
    let selected = provider.clone();

    view! {
        <div
            on:click=move |_| on_select.run(selected.clone())
            class="bg-card rounded-xl shadow-card p-4 cursor-pointer hover:shadow-lg transition-smooth relative"
        >
            // Favourite marker
            <span class="absolute top-4 right-4 z-10 w-8 h-8 bg-white/90 rounded-full flex items-center justify-center shadow-sm text-primary">
                "♡"
            </span>

            // Provider image
            <div class="relative mb-3">
                <img
                    src=provider.image_url.clone()
                    alt=provider.name.clone()
                    class="w-full h-32 object-cover rounded-lg"
                />
                {provider.is_available.then(|| view! {
                    <div class="absolute bottom-2 left-2">
                        <div class="w-3 h-3 bg-green-500 rounded-full border-2 border-white"></div>
                    </div>
                })}
            </div>

            // Provider info
            <div class="space-y-2">
                <div class="flex items-center justify-between">
                    <h3 class="font-semibold text-foreground">{provider.name.clone()}</h3>
                    <div class="flex items-center space-x-1">
                        <span class="text-yellow-400">"★"</span>
                        <span class="text-sm font-medium">{provider.rating.to_string()}</span>
                        <span class="text-sm text-muted-foreground">
                            {format!("({})", provider.review_count)}
                        </span>
                    </div>
                </div>

                <p class="text-sm text-muted-foreground">{provider.service.clone()}</p>

                <div class="flex items-center text-xs text-muted-foreground">
                    <span class="mr-1">"📍"</span>
                    <span>{provider.location.clone()}</span>
                </div>

                <div class="flex flex-wrap gap-1 mt-2">
                    {provider.tags.iter().map(|tag| view! {
                        <span class="badge badge-secondary text-xs px-2 py-1">{tag.clone()}</span>
                    }).collect::<Vec<_>>()}
                </div>
            </div>
        </div>
    }
}
