//! Money Requests Page
//!
//! Incoming requests can be approved or rejected, outgoing ones cancelled,
//! and only while still pending.

use chrono::Utc;
use leptos::*;
use payclone::format::{currency, relative_time};
use payclone::model::CreateMoneyRequest;
use payclone::validation::{parse_amount, validate_request};
use payclone::{Id, MoneyRequest, RequestStatus, Session};

use crate::api::{self, Decision};
use crate::components::{DemoBanner, ErrorNotice, Loading};
use crate::state::global::use_global_state;
use crate::state::session::use_session;
use crate::state::{resolve, settle, spawn_scoped, use_page_scope, LoadState};

#[derive(Debug, Clone)]
struct RequestBook {
    viewer: Id,
    requests: Vec<MoneyRequest>,
}

impl RequestBook {
    fn incoming(&self) -> Vec<MoneyRequest> {
        self.requests
            .iter()
            .filter(|r| r.is_incoming_for(self.viewer))
            .cloned()
            .collect()
    }

    fn outgoing(&self) -> Vec<MoneyRequest> {
        self.requests
            .iter()
            .filter(|r| r.is_outgoing_for(self.viewer))
            .cloned()
            .collect()
    }
}

#[component]
pub fn Requests() -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();
    let data = create_rw_signal(LoadState::<RequestBook>::Loading);

    let load = move || {
        let Some(current) = session.get_untracked() else { return };
        let viewer = current.user_id;
        let demo = state.demo_data.get_untracked();
        data.set(LoadState::Loading);

        spawn_scoped(
            scope,
            async move { api::user_requests(&current).await },
            move |result| {
                let result = result.map(|mut requests| {
                    requests.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                    RequestBook { viewer, requests }
                });
                settle(data, session, resolve(result, demo, |gen| RequestBook {
                    viewer,
                    requests: gen.requests(viewer, 8),
                }));
            },
        );
    };
    load();

    let respond = Callback::new(move |(id, decision): (Id, Decision)| {
        let Some(current) = session.get_untracked() else { return };
        spawn_scoped(
            scope,
            async move { api::respond_to_request(&current, id, decision).await },
            move |result| match result {
                Ok(()) => {
                    state.show_success(&format!("Request {}", decision.past_tense()));
                    state.notifications_changed();
                    load();
                }
                Err(e) => state.show_error(&e.message),
            },
        );
    });

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Requests"</h1>
                <p class="text-gray-400 mt-1">"Ask for money and answer requests from others"</p>
            </div>

            <DemoBanner visible=Signal::derive(move || data.with(LoadState::is_demo)) />

            <NewRequest on_done=move |_| load() />

            {move || match data.get() {
                LoadState::Loading | LoadState::SignedOut => view! { <Loading /> }.into_view(),
                LoadState::Failed(message) => view! {
                    <ErrorNotice message=message on_retry=move |_| load() />
                }.into_view(),
                LoadState::Ready { data: book, .. } => view! {
                    <RequestList
                        title="Incoming"
                        viewer=book.viewer
                        requests=book.incoming()
                        empty_text="Nobody has asked you for money"
                        respond=respond
                    />
                    <RequestList
                        title="Outgoing"
                        viewer=book.viewer
                        requests=book.outgoing()
                        empty_text="You have not requested money yet"
                        respond=respond
                    />
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn RequestList(
    title: &'static str,
    viewer: Id,
    requests: Vec<MoneyRequest>,
    empty_text: &'static str,
    respond: Callback<(Id, Decision)>,
) -> impl IntoView {
    let now = Utc::now();
    let body = if requests.is_empty() {
        view! { <p class="text-gray-400 py-4">{empty_text}</p> }.into_view()
    } else {
        requests.into_iter().map(|r| {
            let id = r.id;
            let who = if r.is_incoming_for(viewer) {
                r.requester_name.clone().unwrap_or_else(|| format!("User #{}", r.requester_id))
            } else {
                r.recipient_name.clone().unwrap_or_else(|| format!("User #{}", r.recipient_id))
            };
            let badge = match r.status {
                RequestStatus::Pending => "bg-yellow-900 text-yellow-300",
                RequestStatus::Approved => "bg-green-900 text-green-300",
                RequestStatus::Rejected => "bg-red-900 text-red-300",
            };
            let actions = if r.can_respond(viewer) {
                view! {
                    <button class="text-green-400 hover:underline" on:click=move |_| respond.call((id, Decision::Approve))>
                        "Approve"
                    </button>
                    <button class="text-red-400 hover:underline" on:click=move |_| respond.call((id, Decision::Reject))>
                        "Reject"
                    </button>
                }.into_view()
            } else if r.can_cancel(viewer) {
                view! {
                    <button class="text-gray-300 hover:underline" on:click=move |_| respond.call((id, Decision::Cancel))>
                        "Cancel"
                    </button>
                }.into_view()
            } else {
                ().into_view()
            };

            view! {
                <div class="flex items-center justify-between py-3 border-b border-gray-700">
                    <div>
                        <p class="font-medium">{who}</p>
                        <p class="text-sm text-gray-400">
                            {if r.message.is_empty() { "No message".to_string() } else { r.message.clone() }}
                            {format!(" · {}", relative_time(r.timestamp, now))}
                        </p>
                    </div>
                    <div class="flex items-center space-x-4">
                        <span class="font-semibold">{currency(r.amount)}</span>
                        <span class=format!("px-2 py-0.5 rounded text-xs {}", badge)>{r.status.as_str()}</span>
                        <div class="flex space-x-3 text-sm">{actions}</div>
                    </div>
                </div>
            }
        }).collect_view()
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-2">{title}</h2>
            {body}
        </section>
    }
}

/// Look the recipient up, then file the request
async fn create(session: Session, email: String, amount: f64, message: String) -> Result<String, String> {
    let recipient = api::find_user_by_email(&session, &email)
        .await
        .map_err(|e| e.message)?
        .ok_or_else(|| format!("No user found with email {}", email))?;

    let request = CreateMoneyRequest {
        requester_id: session.user_id,
        recipient_id: recipient.id,
        amount,
        message,
    };
    api::create_request(&session, &request)
        .await
        .map_err(|e| e.message)?;
    Ok(format!("Requested {} from {}", currency(amount), recipient.name))
}

#[component]
fn NewRequest(#[prop(into)] on_done: Callback<()>) -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();

    let (recipient, set_recipient) = create_signal(String::new());
    let (amount, set_amount) = create_signal(String::new());
    let (message, set_message) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = session.get_untracked() else { return };

        let checked = parse_amount(&amount.get_untracked()).and_then(|a| {
            validate_request(&recipient.get_untracked(), a, &current.email, &message.get_untracked())
        });
        let (email, amount, note) = match checked {
            Ok(valid) => valid,
            Err(e) => {
                state.show_error(&e.to_string());
                return;
            }
        };

        set_submitting.set(true);
        spawn_scoped(scope, create(current, email, amount, note), move |result| {
            set_submitting.set(false);
            match result {
                Ok(text) => {
                    state.show_success(&text);
                    set_recipient.set(String::new());
                    set_amount.set(String::new());
                    set_message.set(String::new());
                    on_done.call(());
                }
                Err(text) => state.show_error(&text),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 grid md:grid-cols-4 gap-3">
            <input
                type="email"
                placeholder="From (email)"
                class="px-3 py-2 rounded-lg bg-gray-700"
                prop:value=recipient
                on:input=move |ev| set_recipient.set(event_target_value(&ev))
            />
            <input
                type="text"
                inputmode="decimal"
                placeholder="Amount"
                class="px-3 py-2 rounded-lg bg-gray-700"
                prop:value=amount
                on:input=move |ev| set_amount.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="What's it for?"
                class="px-3 py-2 rounded-lg bg-gray-700"
                prop:value=message
                on:input=move |ev| set_message.set(event_target_value(&ev))
            />
            <button
                type="submit"
                class="py-2 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium disabled:opacity-50"
                disabled=submitting
            >
                "Request money"
            </button>
        </form>
    }
}
