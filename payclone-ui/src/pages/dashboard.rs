//! Dashboard Page
//!
//! Balance, headline numbers, the last seven days of activity, recent
//! transactions, and quick send / top-up forms.

use chrono::Utc;
use leptos::*;
use payclone::analytics::{daily_activity, newest_first, ActivityTotals, TransactionSummary};
use payclone::format::{currency, percent, signed_currency};
use payclone::model::SendMoneyRequest;
use payclone::validation::{parse_amount, validate_send};
use payclone::{Id, Notification, Placeholder, Session, Transaction, User, Wallet};

use crate::api::{self, ApiResult};
use crate::components::stat_card::Tone;
use crate::components::{ActivityChart, DemoBanner, ErrorNotice, Loading, StatCard, TransactionTable};
use crate::state::global::use_global_state;
use crate::state::session::use_session;
use crate::state::{resolve, settle, spawn_scoped, use_page_scope, LoadState};

const ACTIVITY_DAYS: usize = 7;
const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone)]
struct DashboardData {
    user: User,
    wallet: Wallet,
    transactions: Vec<Transaction>,
    notifications: Vec<Notification>,
}

impl DashboardData {
    fn placeholder(gen: &mut Placeholder, viewer: Id) -> Self {
        Self {
            user: gen.user(viewer),
            wallet: gen.wallet(viewer),
            transactions: gen.transactions(viewer, 20),
            notifications: gen.notifications(viewer, 5),
        }
    }
}

/// Current user first, then wallet, transactions and notifications together
async fn fetch_dashboard(session: Session) -> ApiResult<DashboardData> {
    let user = api::me(&session).await?;
    let (wallet, transactions, notifications) = futures_util::join!(
        api::get_or_create_wallet(&session),
        api::user_transactions(&session),
        api::user_notifications(&session),
    );

    Ok(DashboardData {
        user,
        wallet: wallet?,
        transactions: transactions?,
        notifications: notifications?,
    })
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();
    let data = create_rw_signal(LoadState::<DashboardData>::Loading);

    let load = move || {
        let Some(current) = session.get_untracked() else { return };
        let viewer = current.user_id;
        let demo = state.demo_data.get_untracked();
        data.set(LoadState::Loading);

        spawn_scoped(scope, fetch_dashboard(current), move |result| {
            settle(data, session, resolve(result, demo, |gen| DashboardData::placeholder(gen, viewer)));
        });
    };
    load();

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-400 mt-1">"Your money at a glance"</p>
            </div>

            <DemoBanner visible=Signal::derive(move || data.with(LoadState::is_demo)) />

            {move || match data.get() {
                LoadState::Loading | LoadState::SignedOut => view! { <Loading /> }.into_view(),
                LoadState::Failed(message) => view! {
                    <ErrorNotice message=message on_retry=move |_| load() />
                }.into_view(),
                LoadState::Ready { data: d, .. } => view! {
                    <Overview data=d />
                    <div class="grid md:grid-cols-2 gap-8">
                        <SendMoney on_done=move |_| load() />
                        <AddMoney on_done=move |_| load() />
                    </div>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn Overview(data: DashboardData) -> impl IntoView {
    let viewer = data.user.id;
    let summary = TransactionSummary::compute(&data.transactions, viewer);
    let activity = daily_activity(&data.transactions, viewer, ACTIVITY_DAYS, Utc::now().date_naive());
    let totals = ActivityTotals::from_buckets(&activity);
    let recent: Vec<Transaction> = newest_first(&data.transactions)
        .into_iter()
        .take(RECENT_LIMIT)
        .cloned()
        .collect();
    let unread = data.notifications.iter().filter(|n| !n.read).count();

    view! {
        <section>
            <h2 class="text-lg font-semibold mb-4">{format!("Hello, {}", data.user.name)}</h2>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <StatCard label="Balance" value=currency(data.wallet.balance) hint=data.wallet.currency.clone() />
                <StatCard label="Sent" value=currency(summary.total_sent) hint=format!("{} transfers", summary.sent_count) />
                <StatCard label="Received" value=currency(summary.total_received) hint=format!("{} transfers", summary.received_count) />
                <StatCard
                    label="Net flow"
                    value=signed_currency(summary.net_flow)
                    tone=Tone::for_amount(summary.net_flow)
                    hint=format!("{} unread notifications", unread)
                />
            </div>
        </section>

        <section class="bg-gray-800 rounded-xl p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold">"Last 7 days"</h2>
                <span class="text-sm text-gray-400">{format!("Trend {}", percent(totals.trend_percent))}</span>
            </div>
            <ActivityChart buckets=Signal::derive(move || activity.clone()) />
        </section>

        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Recent transactions"</h2>
            <TransactionTable viewer=viewer rows=recent empty_text="No transactions yet" />
        </section>
    }
}

#[component]
fn SendMoney(#[prop(into)] on_done: Callback<()>) -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();

    let (recipient, set_recipient) = create_signal(String::new());
    let (amount, set_amount) = create_signal(String::new());
    let (note, set_note) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = session.get_untracked() else { return };

        // Validate before touching the network
        let checked = parse_amount(&amount.get_untracked())
            .and_then(|a| validate_send(&recipient.get_untracked(), a, &current.email));
        let (email, amount) = match checked {
            Ok(valid) => valid,
            Err(e) => {
                state.show_error(&e.to_string());
                return;
            }
        };
        let note = note.get_untracked().trim().to_string();

        set_submitting.set(true);
        spawn_scoped(scope, send(current, email, amount, note), move |result| {
            set_submitting.set(false);
            match result {
                Ok(message) => {
                    state.show_success(&message);
                    state.notifications_changed();
                    set_recipient.set(String::new());
                    set_amount.set(String::new());
                    set_note.set(String::new());
                    on_done.call(());
                }
                Err(message) => state.show_error(&message),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-3">
            <h2 class="text-xl font-semibold">"Send money"</h2>
            <input
                type="email"
                placeholder="Recipient email"
                class="w-full px-3 py-2 rounded-lg bg-gray-700"
                prop:value=recipient
                on:input=move |ev| set_recipient.set(event_target_value(&ev))
            />
            <input
                type="text"
                inputmode="decimal"
                placeholder="Amount"
                class="w-full px-3 py-2 rounded-lg bg-gray-700"
                prop:value=amount
                on:input=move |ev| set_amount.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Note (optional)"
                class="w-full px-3 py-2 rounded-lg bg-gray-700"
                prop:value=note
                on:input=move |ev| set_note.set(event_target_value(&ev))
            />
            <button
                type="submit"
                class="w-full py-2 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium disabled:opacity-50"
                disabled=submitting
            >
                "Send"
            </button>
        </form>
    }
}

async fn send(session: Session, email: String, amount: f64, note: String) -> Result<String, String> {
    let recipient = api::find_user_by_email(&session, &email)
        .await
        .map_err(|e| e.message)?
        .ok_or_else(|| format!("No user found with email {}", email))?;

    let request = SendMoneyRequest {
        sender_id: session.user_id,
        recipient_id: recipient.id,
        amount,
        description: (!note.is_empty()).then_some(note),
    };
    api::send_money(&session, &request)
        .await
        .map_err(|e| e.message)?;
    Ok(format!("Sent {} to {}", currency(amount), recipient.name))
}

#[component]
fn AddMoney(#[prop(into)] on_done: Callback<()>) -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();

    let (amount, set_amount) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = session.get_untracked() else { return };
        let amount = match parse_amount(&amount.get_untracked()) {
            Ok(a) => a,
            Err(e) => {
                state.show_error(&e.to_string());
                return;
            }
        };

        set_submitting.set(true);
        spawn_scoped(
            scope,
            async move { api::add_money(&current, amount).await },
            move |result| {
                set_submitting.set(false);
                match result {
                    Ok(wallet) => {
                        state.show_success(&format!("Balance is now {}", currency(wallet.balance)));
                        set_amount.set(String::new());
                        on_done.call(());
                    }
                    Err(e) => state.show_error(&e.message),
                }
            },
        );
    };

    view! {
        <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-3">
            <h2 class="text-xl font-semibold">"Add money"</h2>
            <input
                type="text"
                inputmode="decimal"
                placeholder="Amount"
                class="w-full px-3 py-2 rounded-lg bg-gray-700"
                prop:value=amount
                on:input=move |ev| set_amount.set(event_target_value(&ev))
            />
            <button
                type="submit"
                class="w-full py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium disabled:opacity-50"
                disabled=submitting
            >
                "Add to wallet"
            </button>
        </form>
    }
}
