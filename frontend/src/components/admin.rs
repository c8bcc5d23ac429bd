use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use crate::api;
use crate::dashboard::{category_color, share_percent, DashboardData};
use crate::state::{start_polling, AppState, Page};

const PDF_MIME_TYPE: &str = "application/pdf";

fn alert(message: &str) {
    if let Err(e) = window().alert_with_message(message) {
        log::warn!("Alert failed: {e:?}");
    }
}

/// Admin dashboard: hotel PDF upload plus live usage statistics.
#[component]
pub fn AdminPage() -> impl IntoView {
    let app = expect_context::<AppState>();
    let stats = RwSignal::new(DashboardData::default());
    start_polling(stats);

    view! {
        <div class="min-h-screen bg-gradient-to-br from-purple-50 via-pink-50 to-amber-50">
            <header class="bg-white/80 border-b border-purple-200 shadow-lg">
                <div class="max-w-6xl mx-auto px-6 py-4 flex items-center space-x-4">
                    <button class="px-3 py-1 rounded-xl hover:bg-purple-100" on:click=move |_| app.navigate(Page::Home)>
                        "← Back"
                    </button>
                    <h1 class="text-xl font-bold">"Admin Dashboard"</h1>
                </div>
            </header>
            <main class="max-w-6xl mx-auto px-6 py-8 grid gap-8 lg:grid-cols-2">
                <PdfUpload />
                <Statistics stats=stats />
            </main>
        </div>
    }
}

#[component]
fn PdfUpload() -> impl IntoView {
    let uploaded_file = RwSignal::new(None::<String>);
    let is_uploading = RwSignal::new(false);

    let on_change = move |ev| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else { return };

        if file.type_() != PDF_MIME_TYPE {
            alert("Please upload a valid PDF file");
            return;
        }

        is_uploading.set(true);
        spawn_local(async move {
            match api::upload_pdf(&file).await {
                Ok(_) => {
                    uploaded_file.try_set(Some(file.name()));
                    alert("PDF uploaded successfully!");
                }
                Err(e) => {
                    log::error!("Upload error: {e}");
                    alert(&format!("Upload failed: {e}"));
                }
            }
            is_uploading.try_set(false);
        });
    };

    view! {
        <section class="rounded-2xl bg-white/90 shadow-lg p-6">
            <h2 class="text-2xl font-semibold mb-2">"Hotel Information"</h2>
            <p class="text-gray-600 mb-6">"Upload a PDF with the hotel details. It replaces the current document."</p>
            <label
                for="pdf-upload"
                class="block border-2 border-dashed border-purple-300 rounded-2xl p-8 text-center cursor-pointer hover:bg-purple-50"
            >
                {move || {
                    if is_uploading.get() {
                        "Uploading…".to_string()
                    } else {
                        uploaded_file
                            .get()
                            .map(|name| format!("Uploaded: {name}"))
                            .unwrap_or_else(|| "Click to choose a PDF (max 10 MB)".to_string())
                    }
                }}
            </label>
            <input
                id="pdf-upload"
                type="file"
                accept=".pdf"
                class="hidden"
                on:change=on_change
                disabled=move || is_uploading.get()
            />
        </section>
    }
}

#[component]
fn Statistics(stats: RwSignal<DashboardData>) -> impl IntoView {
    let total_questions = move || stats.with(|d| d.summary.total_questions);

    view! {
        <section class="rounded-2xl bg-white/90 shadow-lg p-6">
            <h2 class="text-2xl font-semibold mb-6">"Statistics"</h2>
            <Show
                when=move || stats.with(|d| d.loaded)
                fallback=|| view! { <p class="text-gray-500">"Loading statistics…"</p> }
            >
                {move || stats.with(|d| d.last_error.clone()).map(|_| view! {
                    <p class="text-amber-600 text-sm mb-4">"Could not refresh statistics; showing the last known values."</p>
                })}
                <div class="grid grid-cols-2 gap-4 mb-8">
                    <div class="rounded-xl bg-purple-50 p-4">
                        <div class="text-sm text-gray-500">"Total Sessions"</div>
                        <div class="text-3xl font-bold">{move || stats.with(|d| d.summary.total_sessions)}</div>
                    </div>
                    <div class="rounded-xl bg-pink-50 p-4">
                        <div class="text-sm text-gray-500">"Total Questions"</div>
                        <div class="text-3xl font-bold">{total_questions}</div>
                    </div>
                </div>
                <h3 class="text-lg font-semibold mb-4">"Questions by Category"</h3>
                <div class="space-y-3">
                    <For
                        each=move || stats.with(|d| d.summary.questions_by_category.clone())
                        key=|c| (c.category.clone(), c.count)
                        let:category
                    >
                        {
                            let share = share_percent(category.count, total_questions());
                            let bar_class = format!("h-3 rounded-full bg-gradient-to-r {}", category_color(&category.category));
                            view! {
                                <div>
                                    <div class="flex justify-between text-sm mb-1">
                                        <span>{category.category.clone()}</span>
                                        <span>{format!("{} ({share}%)", category.count)}</span>
                                    </div>
                                    <div class="h-3 rounded-full bg-gray-100">
                                        <div class=bar_class style=format!("width: {share}%")></div>
                                    </div>
                                </div>
                            }
                        }
                    </For>
                </div>
            </Show>
        </section>
    }
}
