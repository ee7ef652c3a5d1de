//! Brand mark

use leptos::prelude::*;

#[component]
pub fn Logo(
    #[prop(default = "w-10 h-10")] class: &'static str,
    #[prop(optional)] show_text: bool,
) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2">
            <div class=format!("bg-white rounded-xl flex items-center justify-center {}", class)>
                <span class="text-primary text-xl font-bold">"S"</span>
            </div>
            {show_text.then(|| view! {
                <span class="text-xl font-bold text-white">"SwiftFyx"</span>
            })}
        </div>
    }
}
