//! Regex Preview - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for previewing a CSV/Excel file, asking the
//! transformation service to apply a natural-language command, and
//! comparing the result with the original.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (title)                                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                │
//! │  ├── CommandForm (file, command, execute)                   │
//! │  ├── ContentCard (original / after tabs)                    │
//! │  └── LogsPanel (when activity exists)                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All view state lives in one [`Controller`] signal.
//!
//! # Modules
//!
//! - [`types`] - Controller alias and log entries
//! - [`components`] - UI components
//! - [`services`] - File reading, service requests, browser downloads

use leptos::*;
use leptos_meta::provide_meta_context;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::*;

pub use types::{Controller, LogEntry, LogLevel};

pub use components::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let state = create_rw_signal(Controller::new());
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    view! {
        <Header/>

        <div class="container">
            <CommandForm state=state set_logs=set_logs/>

            <ContentCard state=state set_logs=set_logs/>

            <Show when=move || logs.with(|l| !l.is_empty()) fallback=|| view! {}>
                <LogsPanel logs=logs set_logs=set_logs/>
            </Show>
        </div>
    }
}
