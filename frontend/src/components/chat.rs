use leptos::ev;
use leptos::prelude::*;

use crate::format::format_message;
use crate::session::{Sender, TranscriptEntry};
use crate::state::{AppState, ChatState, Page};

/// Guest chat page: transcript, input box and the contact form.
#[component]
pub fn UserPage() -> impl IntoView {
    let app = expect_context::<AppState>();
    let chat = ChatState::new();
    provide_context(chat);
    let show_contact_form = RwSignal::new(false);

    view! {
        <div class="h-screen flex flex-col bg-gradient-to-br from-purple-50 via-pink-50 to-amber-50">
            <header class="flex-shrink-0 bg-white/80 border-b border-purple-200 shadow-lg">
                <div class="max-w-5xl mx-auto px-6 py-4 flex items-center space-x-4">
                    <button class="px-3 py-1 rounded-xl hover:bg-purple-100" on:click=move |_| app.navigate(Page::Home)>
                        "← Back"
                    </button>
                    <h1 class="text-xl font-bold">"Cincinnati Hotel Assistant"</h1>
                </div>
            </header>

            <main class="flex-1 overflow-y-auto">
                <div class="max-w-5xl mx-auto px-6 py-6 space-y-4">
                    <For
                        each=move || chat.session.with(|s| s.entries().to_vec())
                        key=|entry| entry.id
                        let:entry
                    >
                        <MessageBubble entry=entry show_contact_form=show_contact_form />
                    </For>
                    <Show when=move || chat.is_pending()>
                        <div class="message bot typing">"Typing…"</div>
                    </Show>
                </div>
            </main>

            <ChatInput />

            <Show when=move || show_contact_form.get()>
                <ContactForm show=show_contact_form />
            </Show>
        </div>
    }
}

/// A single transcript entry. Bot replies admitting missing information offer
/// a hand-off to staff.
#[component]
fn MessageBubble(entry: TranscriptEntry, show_contact_form: RwSignal<bool>) -> impl IntoView {
    let is_bot = entry.sender == Sender::Bot;
    let offers_contact = entry.offers_contact();
    let css_class = if is_bot { "message bot" } else { "message user" };
    let html = format_message(&entry.text);

    view! {
        <div class=css_class>
            <div class="rounded-2xl px-4 py-3 text-sm" inner_html=html></div>
            <div class="text-xs text-gray-400 mt-1">{entry.time}</div>
            {offers_contact.then(|| view! {
                <div class="mt-3 bg-purple-50 rounded-2xl p-4 border border-purple-200">
                    <p class="text-sm mb-3 font-semibold">"Would you like to leave your contact details?"</p>
                    <div class="flex space-x-2">
                        <button class="flex-1 px-4 py-2 rounded-xl text-white font-semibold bg-purple-600"
                            on:click=move |_| show_contact_form.set(true)>
                            "Yes, please"
                        </button>
                        <button class="flex-1 px-4 py-2 rounded-xl border-2 border-purple-300 font-semibold"
                            on:click=move |_| show_contact_form.set(false)>
                            "No, thanks"
                        </button>
                    </div>
                </div>
            })}
        </div>
    }
}

/// Message box. Disabled while a reply is outstanding.
#[component]
fn ChatInput() -> impl IntoView {
    let chat = expect_context::<ChatState>();
    let (input, set_input) = signal(String::new());

    let is_sending = move || chat.is_pending();

    let send = move || {
        let text = input.get();
        if text.trim().is_empty() || is_sending() {
            return;
        }
        set_input.set(String::new());
        chat.send_message(text);
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        send();
    };

    view! {
        <form class="flex-shrink-0 bg-white/80 border-t border-purple-200" on:submit=on_submit>
            <div class="max-w-5xl mx-auto px-6 py-4 flex space-x-3">
                <input
                    type="text"
                    class="flex-1 rounded-2xl border border-purple-200 px-4 py-3"
                    placeholder="Ask me anything about the hotel…"
                    prop:value=input
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    disabled=is_sending
                />
                <button
                    type="submit"
                    class="px-6 py-3 rounded-2xl text-white font-semibold bg-purple-600 disabled:opacity-50"
                    disabled=move || is_sending() || input.get().trim().is_empty()
                >
                    {move || if is_sending() { "Sending…" } else { "Send" }}
                </button>
            </div>
        </form>
    }
}

/// Guest contact details for a staff callback. Submission is acknowledged locally.
#[component]
fn ContactForm(show: RwSignal<bool>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if let Err(e) = window().alert_with_message("Thank you! A customer service representative will contact you soon.") {
            log::warn!("Alert failed: {e:?}");
        }
        name.set(String::new());
        phone.set(String::new());
        email.set(String::new());
        show.set(false);
    };

    view! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center p-4">
            <form class="bg-white rounded-2xl shadow-xl p-6 w-full max-w-md space-y-4" on:submit=on_submit>
                <h2 class="text-xl font-bold">"Contact Information"</h2>
                <input type="text" required=true placeholder="Name" class="w-full rounded-xl border px-4 py-2"
                    prop:value=name on:input=move |ev| name.set(event_target_value(&ev)) />
                <input type="tel" required=true placeholder="Phone" class="w-full rounded-xl border px-4 py-2"
                    prop:value=phone on:input=move |ev| phone.set(event_target_value(&ev)) />
                <input type="email" required=true placeholder="Email" class="w-full rounded-xl border px-4 py-2"
                    prop:value=email on:input=move |ev| email.set(event_target_value(&ev)) />
                <div class="flex space-x-2">
                    <button type="submit" class="flex-1 px-4 py-2 rounded-xl text-white font-semibold bg-purple-600">
                        "Submit"
                    </button>
                    <button type="button" class="flex-1 px-4 py-2 rounded-xl border-2 border-purple-300"
                        on:click=move |_| show.set(false)>
                        "Cancel"
                    </button>
                </div>
            </form>
        </div>
    }
}
