//! File picker and command form.
//!
//! Selecting a file parses it locally for the original preview; submitting
//! the command sends the file and instruction to the transform endpoint.

use leptos::ev::SubmitEvent;
use leptos::*;
use web_sys::{Event, File, HtmlInputElement};

use crate::components::logs::add_log;
use crate::config::{ACCEPTED_EXTENSIONS, MAX_FILE_SIZE};
use crate::services::{read_file_bytes, request_transform};
use crate::types::{Controller, LogEntry, LogLevel};

/// Read, size-check and parse the file picked under token `selection`.
async fn load_file(
    state: RwSignal<Controller>,
    set_logs: WriteSignal<Vec<LogEntry>>,
    selection: u64,
    file: File,
) {
    let name = file.name();

    if file.size() > MAX_FILE_SIZE as f64 {
        let message = format!(
            "File is too large ({:.1} MB, limit {} MB).",
            file.size() / (1024.0 * 1024.0),
            MAX_FILE_SIZE / (1024 * 1024)
        );
        reject(state, set_logs, selection, message);
        return;
    }

    let bytes = match read_file_bytes(&file).await {
        Ok(bytes) => bytes,
        Err(e) => {
            reject(state, set_logs, selection, e);
            return;
        }
    };

    let outcome = state
        .try_update(|c| {
            c.finish_selection(selection, name.clone(), file, &bytes)
                .map(|loaded| {
                    loaded
                        .map(|preview| (preview.table.columns.len(), preview.decoded_rows))
                        .map_err(|e| e.to_string())
                })
        })
        .flatten();

    match outcome {
        Some(Ok((columns, rows))) => add_log(
            set_logs,
            LogLevel::Success,
            format!("Loaded {}: {} columns, {} rows", name, columns, rows),
        ),
        Some(Err(message)) => add_log(set_logs, LogLevel::Error, message),
        // A newer pick replaced this one
        None => {}
    }
}

fn reject(
    state: RwSignal<Controller>,
    set_logs: WriteSignal<Vec<LogEntry>>,
    selection: u64,
    message: String,
) {
    let rejected = state
        .try_update(|c| c.reject_selection(selection, message))
        .flatten();
    if let Some(err) = rejected {
        add_log(set_logs, LogLevel::Error, err.to_string());
    }
}

#[component]
pub fn CommandForm(
    state: RwSignal<Controller>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let file_input = create_node_ref::<html::Input>();
    let busy = move || state.with(|c| c.is_busy());

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Allow picking the same file again
        input.set_value("");
        let Some(selection) = state.try_update(|c| c.begin_selection()) else {
            return;
        };
        spawn_local(load_file(state, set_logs, selection, file));
    };

    let on_upload_click = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let request = match state.try_update(|c| c.begin_submit().map_err(|e| e.to_string())) {
            Some(Ok(request)) => request,
            Some(Err(message)) => {
                add_log(set_logs, LogLevel::Warning, message);
                return;
            }
            None => return,
        };

        add_log(
            set_logs,
            LogLevel::Info,
            format!("Sending \"{}\" for {}", request.form.payload.instruction, request.file.name),
        );

        spawn_local(async move {
            let outcome = request_transform(&request).await;
            match &outcome {
                Ok(result) => add_log(
                    set_logs,
                    LogLevel::Success,
                    format!(
                        "Regex used: {} ({} of {} rows shown)",
                        result.regex_used,
                        result.rows.len(),
                        result.total_rows
                    ),
                ),
                Err(e) => add_log(set_logs, LogLevel::Error, format!("Transform failed: {}", e)),
            }
            state.update(|c| c.finish_submit(request.generation, outcome));
        });
    };

    view! {
        <form class="card command-form" on:submit=on_submit>
            <div class="file-row">
                <button class="btn btn-secondary" type="button" on:click=on_upload_click>
                    "upload"
                </button>
                <input
                    type="file"
                    accept=ACCEPTED_EXTENSIONS
                    style="display:none"
                    node_ref=file_input
                    on:change=on_file_change
                />
                <span class="file-name">
                    {move || state.with(|c| c.file_name().unwrap_or("filename").to_string())}
                </span>
            </div>

            <div class="command-row">
                <input
                    class="command-input"
                    type="text"
                    placeholder="e.g. Find email addresses in the Email column and replace them with REDACTED"
                    prop:value=move || state.with(|c| c.instruction().to_string())
                    on:input=move |ev| state.update(|c| c.set_instruction(event_target_value(&ev)))
                />
                <button class="btn btn-primary" type="submit" disabled=busy>
                    {move || if busy() { "Processing..." } else { "execute" }}
                </button>
            </div>

            <Show when=move || state.with(|c| c.error().is_some()) fallback=|| view! {}>
                <div class="error-message">
                    {move || state.with(|c| c.error().unwrap_or_default().to_string())}
                </div>
            </Show>
        </form>
    }
}
