//! Toasts
//!
//! Transfer confirmations and API errors, stacked bottom-right. Each can
//! be dismissed before its timer clears it.

use leptos::*;

use crate::state::global::use_global_state;

/// Server error bodies can be whole stack traces; keep toasts readable
const MAX_TOAST_CHARS: usize = 140;

fn clip(message: &str) -> String {
    let message = message.trim();
    match message.char_indices().nth(MAX_TOAST_CHARS) {
        Some((cut, _)) => format!("{}…", message[..cut].trim_end()),
        None => message.to_string(),
    }
}

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div class="fixed bottom-4 right-4 z-50 w-80 space-y-2">
            {move || state.success.get().map(|text| view! {
                <ToastCard text=text failed=false slot=state.success />
            })}
            {move || state.error.get().map(|text| view! {
                <ToastCard text=text failed=true slot=state.error />
            })}
        </div>
    }
}

#[component]
fn ToastCard(
    #[prop(into)]
    text: String,
    failed: bool,
    /// Cleared when the card is dismissed
    slot: RwSignal<Option<String>>,
) -> impl IntoView {
    let (title, class) = if failed {
        ("Payment error", "bg-red-700 border-red-500")
    } else {
        ("Done", "bg-green-700 border-green-500")
    };

    view! {
        <div
            role={if failed { "alert" } else { "status" }}
            class=format!("flex items-start justify-between border-l-4 {} text-white px-4 py-3 rounded-lg shadow-lg", class)
        >
            <div class="pr-3">
                <p class="text-xs uppercase tracking-wide opacity-75">{title}</p>
                <p class="text-sm font-medium break-words">{clip(&text)}</p>
            </div>
            <button
                class="text-white/70 hover:text-white"
                aria-label="Dismiss"
                on:click=move |_| slot.set(None)
            >
                "×"
            </button>
        </div>
    }
}
