//! Loading, error and demo-data indicators

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Failed load with a retry button
#[component]
pub fn ErrorNotice(
    #[prop(into)]
    message: String,
    #[prop(into)]
    on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="bg-red-900/40 border border-red-700 rounded-lg p-6 text-center">
            <p class="text-red-300 mb-4">{message}</p>
            <button
                class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm"
                on:click=move |_| on_retry.call(())
            >
                "Try again"
            </button>
        </div>
    }
}

/// Marks a page that is showing generated data
#[component]
pub fn DemoBanner(
    #[prop(into)]
    visible: Signal<bool>,
) -> impl IntoView {
    view! {
        <Show when=move || visible.get()>
            <div class="bg-yellow-900/40 border border-yellow-700 text-yellow-300 rounded-lg px-4 py-2 text-sm">
                "The API could not be reached. Showing demo data."
            </div>
        </Show>
    }
}
