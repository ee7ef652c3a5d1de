//! Full detail view for one provider

use leptos::prelude::*;

use crate::providers::ServiceProvider;

#[component]
pub fn ProviderProfile(
    provider: ServiceProvider,
    #[prop(into)] on_back: Callback<()>,
    #[prop(into)] on_check_availability: Callback<()>,
) -> impl IntoView {
    let stars = (1..=5u8)
        .map(|n| {
            let class = if provider.star_filled(n) {
                "text-yellow-400"
            } else {
                "text-gray-300"
            };
            view! { <span class=class>"★"</span> }
        })
        .collect::<Vec<_>>();

    let background = if provider.background_checked {
        "Background Checked"
    } else {
        "Verification Pending"
    };

    view! {
        <div class="min-h-screen bg-background">
            // Header
            <div class="bg-card border-b border-border p-4">
                <div class="flex items-center justify-between">
                    <button
                        on:click=move |_| on_back.run(())
                        class="p-2 hover:bg-secondary rounded-lg transition-smooth"
                        aria-label="Back"
                    >
                        "←"
                    </button>
                    <h1 class="font-semibold text-lg capitalize">{provider.service.clone()}</h1>
                    <div class="w-9 h-9"></div>
                </div>
            </div>

            <div class="p-6 space-y-6">
                <img
                    src=provider.image_url.clone()
                    alt=provider.name.clone()
                    class="w-full h-64 object-cover rounded-xl"
                />

                // Provider info
                <div class="space-y-4">
                    <div class="flex items-center justify-between">
                        <h2 class="text-2xl font-bold">{provider.name.clone()}</h2>
                        <div class="text-right">
                            <div class="text-lg font-bold">{provider.price.clone()}</div>
                            <div class="text-sm text-muted-foreground">"Estimated Price"</div>
                        </div>
                    </div>

                    <div class="flex items-center space-x-2">
                        <div class="flex items-center">{stars}</div>
                        <span class="font-medium">{format!("({})", provider.review_count)}</span>
                    </div>

                    <div class="flex items-center text-muted-foreground">
                        <span class="mr-2">"📍"</span>
                        <span>{provider.location.clone()}</span>
                    </div>
                </div>

                // Specialties
                <div>
                    <h3 class="font-semibold mb-3">"Specialties"</h3>
                    <div class="flex flex-wrap gap-2">
                        {provider.specialties.iter().map(|specialty| view! {
                            <span class="badge badge-secondary px-3 py-1">{specialty.clone()}</span>
                        }).collect::<Vec<_>>()}
                    </div>
                </div>

                // About
                <div>
                    <h3 class="font-semibold mb-3">"About This Expert"</h3>
                    <p class="text-muted-foreground leading-relaxed">{provider.description.clone()}</p>
                </div>

                // Overview
                <div>
                    <h3 class="font-semibold mb-3">"Overview"</h3>
                    <div class="space-y-3 text-sm">
                        <div class="flex items-center">
                            <span class="mr-3">"🕒"</span>
                            <span>{format!("{} years in business", provider.years_in_business)}</span>
                        </div>
                        <div class="flex items-center">
                            <span class="mr-3">"🛡"</span>
                            <span>{background}</span>
                        </div>
                        <div class="flex items-center">
                            <span class="mr-3">"🗣"</span>
                            <span>{format!("Languages Spoken: {}", provider.languages.join(", "))}</span>
                        </div>
                        <div class="flex items-center">
                            <span class="mr-3">"⚡"</span>
                            <span>{format!("Responds in {}", provider.response_time)}</span>
                        </div>
                    </div>
                </div>

                <div class="pt-4">
                    <button
                        on:click=move |_| on_check_availability.run(())
                        class="btn btn-primary w-full py-6 text-lg font-bold"
                    >
                        "Check Availability"
                    </button>
                </div>
            </div>
        </div>
    }
}
