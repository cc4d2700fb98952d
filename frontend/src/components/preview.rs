//! Original/after tabs.
//!
//! The original tab renders the local preview, with the matches of the
//! service's regex wrapped in `<mark>` once a result exists. The after tab
//! renders the service result with changed cells marked, plus download
//! buttons for the full file.

use leptos::*;

use regex_preview::{ExportFormat, Highlighter, Preview, Segment, Tab, TransformResult};

use crate::components::logs::add_log;
use crate::services::request_download;
use crate::types::{Controller, LogEntry, LogLevel};

/// Cell text with highlighted matches. Empty segments render nothing.
fn highlighted(text: &str, highlighter: Option<&Highlighter>) -> View {
    match highlighter {
        Some(highlighter) if highlighter.is_active() => highlighter
            .highlight(text)
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment {
                Segment::Literal(s) => s.to_string().into_view(),
                Segment::Match(s) => view! { <mark>{s.to_string()}</mark> }.into_view(),
            })
            .collect_view(),
        _ => text.to_string().into_view(),
    }
}

fn preview_meta(preview: &Preview) -> String {
    if preview.is_truncated() {
        format!(
            "Showing first {} of {} rows.",
            preview.table.len(),
            preview.decoded_rows
        )
    } else {
        format!("Showing first {} rows.", preview.table.len())
    }
}

fn start_download(
    state: RwSignal<Controller>,
    set_logs: WriteSignal<Vec<LogEntry>>,
    format: ExportFormat,
) {
    let request = match state.try_update(|c| c.begin_download(format).map_err(|e| e.to_string())) {
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
        format!("Downloading {}", format.file_name()),
    );

    spawn_local(async move {
        let outcome = request_download(&request).await;
        match &outcome {
            Ok(()) => add_log(
                set_logs,
                LogLevel::Success,
                format!("Downloaded {}", format.file_name()),
            ),
            Err(e) => add_log(set_logs, LogLevel::Error, format!("Download failed: {}", e)),
        }
        state.update(|c| c.finish_download(request.generation, outcome));
    });
}

#[component]
fn TabButton(state: RwSignal<Controller>, tab: Tab) -> impl IntoView {
    let class = move || {
        if state.with(|c| c.tab() == tab) {
            "tab active"
        } else {
            "tab"
        }
    };

    view! {
        <button
            class=class
            type="button"
            disabled=move || !state.with(|c| c.can_view(tab))
            on:click=move |_| {
                state.update(|c| {
                    c.select_tab(tab);
                })
            }
        >
            {tab.label()}
        </button>
    }
}

#[component]
fn OriginalTable(preview: Memo<Option<Preview>>, pattern: Memo<Option<String>>) -> impl IntoView {
    move || {
        let Some(preview) = preview.get() else {
            return ().into_view();
        };
        let highlighter = pattern.get().map(|p| Highlighter::new(&p));
        let table = &preview.table;

        let header = table
            .columns
            .iter()
            .map(|column| view! { <th>{column.clone()}</th> })
            .collect_view();

        let body = table
            .rows
            .iter()
            .map(|row| {
                let cells = table
                    .columns
                    .iter()
                    .map(|column| {
                        let text = row.display(column);
                        view! { <td>{highlighted(&text, highlighter.as_ref())}</td> }
                    })
                    .collect_view();
                view! { <tr>{cells}</tr> }
            })
            .collect_view();

        view! {
            <div class="table-wrap">
                <table class="table">
                    <thead><tr>{header}</tr></thead>
                    <tbody>{body}</tbody>
                </table>
            </div>
            <div class="meta">{preview_meta(&preview)}</div>
        }
        .into_view()
    }
}

#[component]
fn DownloadButton(
    state: RwSignal<Controller>,
    set_logs: WriteSignal<Vec<LogEntry>>,
    format: ExportFormat,
) -> impl IntoView {
    view! {
        <button
            class="btn btn-secondary"
            type="button"
            disabled=move || state.with(|c| c.is_busy())
            on:click=move |_| start_download(state, set_logs, format)
        >
            {format.button_label()}
        </button>
    }
}

#[component]
fn AfterTable(
    result: Memo<Option<TransformResult>>,
    state: RwSignal<Controller>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    move || {
        let Some(data) = result.get() else {
            return ().into_view();
        };
        let summary = data.change_summary();

        let header = data
            .columns
            .iter()
            .map(|column| view! { <th>{column.clone()}</th> })
            .collect_view();

        let body = data
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let cells = data
                    .columns
                    .iter()
                    .map(|column| {
                        let changed = data.is_cell_changed(index, column);
                        view! { <td class:changed=changed>{row.display(column).into_owned()}</td> }
                    })
                    .collect_view();
                view! { <tr>{cells}</tr> }
            })
            .collect_view();

        view! {
            <div class="meta"><b>"Regex used: "</b><code>{data.regex_used.clone()}</code></div>
            <div class="meta"><b>"Applied columns: "</b>{data.applied_columns_label()}</div>
            <div class="meta">
                {format!(
                    "{} cells changed in {} rows.",
                    summary.changed_cells, summary.changed_rows
                )}
            </div>
            <div class="download-row">
                <DownloadButton state=state set_logs=set_logs format=ExportFormat::Csv/>
                <DownloadButton state=state set_logs=set_logs format=ExportFormat::Xlsx/>
            </div>
            <div class="table-wrap">
                <table class="table">
                    <thead><tr>{header}</tr></thead>
                    <tbody>{body}</tbody>
                </table>
            </div>
            <div class="meta">
                {format!("Showing first {} of {} rows.", data.rows.len(), data.total_rows)}
            </div>
        }
        .into_view()
    }
}

/// Tabbed content area, shown once a file has been previewed.
#[component]
pub fn ContentCard(
    state: RwSignal<Controller>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    // Narrow the controller so typing a command does not re-render tables
    let preview = create_memo(move |_| state.with(|c| c.preview().cloned()));
    let result = create_memo(move |_| state.with(|c| c.result().cloned()));
    let pattern = create_memo(move |_| state.with(|c| c.highlight_pattern().map(str::to_string)));
    let tab = create_memo(move |_| state.with(|c| c.tab()));

    view! {
        <Show when=move || preview.with(Option::is_some) fallback=|| view! {}>
            <div class="card content-card">
                <div class="tabs">
                    <TabButton state=state tab=Tab::Original/>
                    <TabButton state=state tab=Tab::After/>
                </div>
                <div class="content-area">
                    {move || match tab.get() {
                        Tab::Original => view! {
                            <OriginalTable preview=preview pattern=pattern/>
                        }
                        .into_view(),
                        Tab::After => view! {
                            <AfterTable result=result state=state set_logs=set_logs/>
                        }
                        .into_view(),
                    }}
                </div>
            </div>
        </Show>
    }
}
