//! Transactions Page
//!
//! Full history with time-range, search and type filters, client-side
//! paging and CSV export. Filters are local and never persisted.

use chrono::Utc;
use leptos::*;
use payclone::export::{default_filename, to_csv_string};
use payclone::filter::{paginate, TimeRange, TransactionFilter, TypeFilter};
use payclone::{Id, Transaction};
use wasm_bindgen::{JsCast, JsValue};

use crate::api;
use crate::components::{DemoBanner, ErrorNotice, Loading, TransactionTable};
use crate::state::global::use_global_state;
use crate::state::session::use_session;
use crate::state::{resolve, settle, spawn_scoped, use_page_scope, LoadState};

const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
struct History {
    viewer: Id,
    transactions: Vec<Transaction>,
}

#[component]
pub fn Transactions() -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();
    let data = create_rw_signal(LoadState::<History>::Loading);

    let range = create_rw_signal(TimeRange::All);
    let search = create_rw_signal(String::new());
    let kind = create_rw_signal(TypeFilter::All);
    let page = create_rw_signal(0_usize);

    let load = move || {
        let Some(current) = session.get_untracked() else { return };
        let viewer = current.user_id;
        let demo = state.demo_data.get_untracked();
        data.set(LoadState::Loading);

        spawn_scoped(
            scope,
            async move { api::user_transactions(&current).await },
            move |result| {
                let result = result.map(|transactions| History { viewer, transactions });
                settle(data, session, resolve(result, demo, |gen| History {
                    viewer,
                    transactions: gen.transactions(viewer, 40),
                }));
            },
        );
    };
    load();

    // Any filter change starts again from the first page
    create_effect(move |_| {
        range.with(|_| ());
        search.with(|_| ());
        kind.with(|_| ());
        page.set(0);
    });

    let visible = create_memo(move |_| {
        data.with(|d| match d.data() {
            Some(h) => {
                let in_range = range.get().apply(&h.transactions, Utc::now());
                let filter = TransactionFilter::default()
                    .search(search.get())
                    .kind(kind.get());
                filter.apply(&in_range, h.viewer)
            }
            None => Vec::new(),
        })
    });

    let export = move |_| {
        let Some(viewer) = data.with_untracked(|d| d.data().map(|h| h.viewer)) else { return };
        let now = Utc::now();
        let result = to_csv_string(&visible.get_untracked(), viewer)
            .map_err(|e| e.to_string())
            .and_then(|csv| download_csv(&default_filename(now), &csv));
        match result {
            Ok(()) => state.show_success("Transactions exported"),
            Err(e) => state.show_error(&format!("Export failed: {}", e)),
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Transactions"</h1>
                <button
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm"
                    on:click=export
                >
                    "Export CSV"
                </button>
            </div>

            <DemoBanner visible=Signal::derive(move || data.with(LoadState::is_demo)) />

            <div class="flex flex-wrap gap-3">
                <input
                    type="search"
                    placeholder="Search description, amount or status"
                    class="flex-1 px-3 py-2 rounded-lg bg-gray-800"
                    prop:value=search
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select
                    class="px-3 py-2 rounded-lg bg-gray-800"
                    on:change=move |ev| {
                        if let Ok(r) = event_target_value(&ev).parse() {
                            range.set(r);
                        }
                    }
                >
                    {TimeRange::ALL.iter().map(|&r| view! {
                        <option value=r.as_str() selected=move || range.get() == r>{r.label()}</option>
                    }).collect_view()}
                </select>
                <select
                    class="px-3 py-2 rounded-lg bg-gray-800"
                    on:change=move |ev| {
                        if let Ok(k) = event_target_value(&ev).parse() {
                            kind.set(k);
                        }
                    }
                >
                    <option value="all">"All types"</option>
                    <option value="sent">"Sent"</option>
                    <option value="received">"Received"</option>
                </select>
            </div>

            {move || match data.get() {
                LoadState::Loading | LoadState::SignedOut => view! { <Loading /> }.into_view(),
                LoadState::Failed(message) => view! {
                    <ErrorNotice message=message on_retry=move |_| load() />
                }.into_view(),
                LoadState::Ready { data: h, .. } => {
                    let rows = visible.get();
                    let (slice, total_pages) = paginate(&rows, page.get(), PAGE_SIZE);
                    let current = page.get().min(total_pages - 1);
                    view! {
                        <section class="bg-gray-800 rounded-xl p-6">
                            <TransactionTable viewer=h.viewer rows=slice.to_vec() empty_text="No transactions match these filters" />
                            <div class="flex items-center justify-between mt-4 text-sm text-gray-400">
                                <span>{format!("{} matching", rows.len())}</span>
                                <div class="flex items-center space-x-2">
                                    <button
                                        class="px-3 py-1 rounded bg-gray-700 disabled:opacity-40"
                                        disabled={current == 0}
                                        on:click=move |_| page.update(|p| *p = p.saturating_sub(1))
                                    >
                                        "Previous"
                                    </button>
                                    <span>{format!("Page {} of {}", current + 1, total_pages)}</span>
                                    <button
                                        class="px-3 py-1 rounded bg-gray-700 disabled:opacity-40"
                                        disabled={current + 1 >= total_pages}
                                        on:click=move |_| page.update(|p| *p += 1)
                                    >
                                        "Next"
                                    </button>
                                </div>
                            </div>
                        </section>
                    }.into_view()
                }
            }}
        </div>
    }
}

/// Blob → object URL → anchor click
fn download_csv(filename: &str, content: &str) -> Result<(), String> {
    let js_err = |e: JsValue| format!("{:?}", e);

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(
        &js_sys::Array::of1(&JsValue::from_str(content)),
        &options,
    )
    .map_err(js_err)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;
    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
    Ok(())
}
