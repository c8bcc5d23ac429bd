mod api;
mod components;
mod dashboard;
mod format;
mod models;
mod session;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::admin::AdminPage;
use components::chat::UserPage;
use components::home::HomePage;
use state::{AppState, Page};

/// Root application component: switches between the three views.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    move || match state.page.get() {
        Page::Home => view! { <HomePage /> }.into_any(),
        Page::User => view! { <UserPage /> }.into_any(),
        Page::Admin => view! { <AdminPage /> }.into_any(),
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
