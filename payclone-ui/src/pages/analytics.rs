//! Analytics Page

use chrono::Utc;
use leptos::*;
use payclone::filter::TimeRange;
use payclone::{AnalyticsReport, Id, Transaction};

use crate::api;
use crate::components::{AnalyticsPanel, DemoBanner, ErrorNotice, Loading};
use crate::state::global::use_global_state;
use crate::state::session::use_session;
use crate::state::{resolve, settle, spawn_scoped, use_page_scope, LoadState};

const ACTIVITY_DAYS: usize = 7;

#[derive(Debug, Clone)]
struct History {
    viewer: Id,
    transactions: Vec<Transaction>,
}

#[component]
pub fn Analytics() -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();
    let data = create_rw_signal(LoadState::<History>::Loading);
    let range = create_rw_signal(TimeRange::Month);

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
                    transactions: gen.transactions(viewer, 60),
                }));
            },
        );
    };
    load();

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Analytics"</h1>
                <div class="flex space-x-2">
                    {TimeRange::ALL.iter().map(|&r| view! {
                        <button
                            on:click=move |_| range.set(r)
                            class=move || {
                                let base = "px-3 py-1 rounded-lg text-sm font-medium transition-colors";
                                if range.get() == r {
                                    format!("{} bg-blue-600 text-white", base)
                                } else {
                                    format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                                }
                            }
                        >
                            {r.label()}
                        </button>
                    }).collect_view()}
                </div>
            </div>

            <DemoBanner visible=Signal::derive(move || data.with(LoadState::is_demo)) />

            {move || match data.get() {
                LoadState::Loading | LoadState::SignedOut => view! { <Loading /> }.into_view(),
                LoadState::Failed(message) => view! {
                    <ErrorNotice message=message on_retry=move |_| load() />
                }.into_view(),
                LoadState::Ready { data: h, .. } => {
                    let now = Utc::now();
                    let in_range = range.get().apply(&h.transactions, now);
                    let report = AnalyticsReport::build(&in_range, h.viewer, now, ACTIVITY_DAYS);
                    view! { <AnalyticsPanel report=report /> }.into_view()
                }
            }}
        </div>
    }
}
