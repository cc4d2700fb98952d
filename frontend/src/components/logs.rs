//! Activity log panel.
//!
//! Every user-visible step (file loaded, request sent, result received,
//! failures) is appended here and mirrored to the browser console.

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::MAX_LOG_ENTRIES;
use crate::types::{push_bounded, LogEntry, LogLevel};

/// Run `f` on the next animation frame.
fn request_animation_frame(f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(f);
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::warn!("requestAnimationFrame failed: {:?}", e);
        return;
    }
    closure.forget();
}

/// Record an activity entry.
pub fn add_log(set_logs: WriteSignal<Vec<LogEntry>>, level: LogLevel, message: impl Into<String>) {
    let entry = LogEntry::now(level, message);
    log::log!(level.console_level(), "{}", entry.message);
    set_logs.update(|logs| push_bounded(logs, entry, MAX_LOG_ENTRIES));
}

#[component]
pub fn LogsPanel(
    logs: ReadSignal<Vec<LogEntry>>,
    /// For clearing
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let logs_container = create_node_ref::<leptos::html::Div>();

    // Keep the newest entry in view
    create_effect(move |_| {
        logs.with(|_| ());
        if let Some(container) = logs_container.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    view! {
        <div class="logs-panel">
            <div class="logs-header">
                <span class="logs-title">"Activity"</span>
                <button class="logs-clear" type="button" on:click=move |_| set_logs.set(vec![])>
                    "Clear"
                </button>
            </div>
            <div class="logs-content" node_ref=logs_container>
                {move || {
                    logs.get()
                        .into_iter()
                        .map(|entry| view! {
                            <div class=format!("log-entry {}", entry.level.css_class())>
                                <span class="log-time">"[" {entry.timestamp} "] "</span>
                                {entry.message}
                            </div>
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
