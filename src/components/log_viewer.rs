//! Log Viewer Component
//!
//! The in-memory tail of the app log, for diagnosing sync and upload failures.

use leptos::prelude::*;

const SHOWN_LINES: usize = 200;

#[component]
pub fn LogViewer() -> impl IntoView {
    let lines = RwSignal::new(rolling_logger::recent(SHOWN_LINES));

    let on_refresh = move |_| lines.set(rolling_logger::recent(SHOWN_LINES));
    let on_clear = move |_| {
        rolling_logger::clear();
        lines.set(Vec::new());
    };

    view! {
        <div class="log-viewer">
            <div class="log-viewer-header">
                <h3>"Recent log"</h3>
                <button type="button" class="btn btn-ghost" title="Refresh" on:click=on_refresh>
                    <i class="fas fa-sync-alt"></i>
                </button>
                <button type="button" class="btn btn-ghost" title="Clear" on:click=on_clear>
                    <i class="fas fa-eraser"></i>
                </button>
            </div>
            <Show
                when=move || lines.with(|l| !l.is_empty())
                fallback=|| view! { <p class="log-empty">"Nothing logged yet."</p> }
            >
                <pre class="log-lines">
                    {move || lines.with(|l| l.join("\n"))}
                </pre>
            </Show>
        </div>
    }
}
