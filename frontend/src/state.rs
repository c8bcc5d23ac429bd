use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::dashboard::{within_deadline, DashboardData, POLL_INTERVAL_MS};
use crate::session::{new_session_id, ChatSession};

const PAGE_STORAGE_KEY: &str = "currentPage";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    User,
    Admin,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::User => "user",
            Page::Admin => "admin",
        }
    }

    /// Unknown values fall back to the landing page.
    pub fn parse(s: &str) -> Page {
        match s {
            "user" => Page::User,
            "admin" => Page::Admin,
            _ => Page::Home,
        }
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    window().local_storage().ok().flatten()
}

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    pub page: RwSignal<Page>,
}

impl AppState {
    /// Create a new `AppState`, restoring the last visited page, and provide it in
    /// the current Leptos context.
    pub fn provide() -> Self {
        let saved = local_storage()
            .and_then(|storage| storage.get_item(PAGE_STORAGE_KEY).ok().flatten())
            .map(|s| Page::parse(&s))
            .unwrap_or(Page::Home);

        let state = Self { page: RwSignal::new(saved) };
        provide_context(state);
        state
    }

    pub fn navigate(&self, page: Page) {
        self.page.set(page);
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.set_item(PAGE_STORAGE_KEY, page.as_str()) {
                log::warn!("Failed to persist current page: {e:?}");
            }
        }
    }
}

/// Local wall-clock time as `HH:MM`.
pub fn clock_label() -> String {
    let now = js_sys::Date::new_0();
    format!("{:02}:{:02}", now.get_hours(), now.get_minutes())
}

/// Chat transcript state for one visit of the user page.
#[derive(Clone, Copy)]
pub struct ChatState {
    pub session: RwSignal<ChatSession>,
}

impl ChatState {
    pub fn new() -> Self {
        Self { session: RwSignal::new(ChatSession::new(new_session_id(), clock_label())) }
    }

    pub fn is_pending(&self) -> bool {
        self.session.with(ChatSession::is_pending)
    }

    /// Appends the user's message and asks the backend for a reply.
    /// Ignored while a previous reply is still outstanding.
    pub fn send_message(&self, text: String) {
        let mut turn = None;
        self.session.update(|s| turn = s.begin_turn(&text, clock_label()));
        let Some(turn) = turn else { return };

        let session = self.session;
        spawn_local(async move {
            let reply = api::send_chat(&turn.message, &turn.session_id).await;
            // The page may have been left while the reply was in flight.
            if session.try_update(|s| s.finish_turn(reply, clock_label())).is_none() {
                log::debug!("Chat view closed before the reply arrived");
            }
        });
    }
}

/// Starts polling the statistics endpoint into `data`. Polling stops when the
/// owning view is cleaned up.
pub fn start_polling(data: RwSignal<DashboardData>) {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();

    spawn_local(async move {
        while !cancelled.load(Ordering::Relaxed) {
            let result =
                within_deadline(api::fetch_statistics(), TimeoutFuture::new(POLL_INTERVAL_MS)).await;
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            data.update(|d| d.apply(result));
            TimeoutFuture::new(POLL_INTERVAL_MS).await;
        }
    });

    on_cleanup(move || flag.store(true, Ordering::Relaxed));
}
