use leptos::prelude::*;

use crate::state::{AppState, Page};

/// Landing page: pick the guest chat or the admin dashboard.
#[component]
pub fn HomePage() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-gradient-to-br from-purple-50 via-pink-50 to-amber-50 p-6">
            <h1 class="text-4xl font-bold mb-2">"Cincinnati Hotel"</h1>
            <p class="text-lg mb-10 text-gray-600">"Your AI concierge, available around the clock"</p>
            <div class="grid gap-6 md:grid-cols-2 w-full max-w-3xl">
                <button
                    class="rounded-2xl bg-white/90 shadow-lg p-8 text-left hover:shadow-xl transition"
                    on:click=move |_| state.navigate(Page::User)
                >
                    <h2 class="text-2xl font-semibold mb-2">"Guest"</h2>
                    <p class="text-gray-600">"Ask about rooms, dining, facilities and prices."</p>
                </button>
                <button
                    class="rounded-2xl bg-white/90 shadow-lg p-8 text-left hover:shadow-xl transition"
                    on:click=move |_| state.navigate(Page::Admin)
                >
                    <h2 class="text-2xl font-semibold mb-2">"Admin"</h2>
                    <p class="text-gray-600">"Upload hotel information and watch usage statistics."</p>
                </button>
            </div>
        </div>
    }
}
