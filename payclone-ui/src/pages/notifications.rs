//! Notifications Page
//!
//! Filterable notification list. Read and delete changes show at once and
//! are undone if the server refuses them.

use chrono::Utc;
use leptos::*;
use payclone::filter::NotificationFilter;
use payclone::format::relative_time;
use payclone::{ChangeTicket, Id, NotificationCategory, NotificationInbox, PageScope, Session};
use std::future::Future;

use crate::api::{self, ApiResult};
use crate::components::{DemoBanner, ErrorNotice, Loading};
use crate::state::global::{use_global_state, GlobalState};
use crate::state::session::{use_session, SessionContext};
use crate::state::{resolve, settle, spawn_scoped, use_page_scope, LoadState};

/// Handles an optimistic change needs
#[derive(Clone, Copy)]
struct Reconciler {
    data: RwSignal<LoadState<NotificationInbox>>,
    scope: StoredValue<PageScope>,
    session: SessionContext,
    state: GlobalState,
}

impl Reconciler {
    /// Apply `change` locally, then confirm or roll it back on the server's answer
    fn run<Fut>(
        self,
        change: impl FnOnce(&mut NotificationInbox) -> Option<ChangeTicket>,
        call: impl FnOnce(Session) -> Fut,
    ) where
        Fut: Future<Output = ApiResult<()>> + 'static,
    {
        let Some(current) = self.session.get_untracked() else { return };
        let mut ticket: Option<ChangeTicket> = None;
        self.data.update(|d| {
            if let Some(inbox) = d.data_mut() {
                ticket = change(inbox);
            }
        });
        let Some(ticket) = ticket else { return };

        let Reconciler { data, state, .. } = self;
        spawn_scoped(self.scope, call(current), move |result| {
            let accepted = result.is_ok();
            data.update(|d| {
                if let Some(inbox) = d.data_mut() {
                    if accepted {
                        inbox.confirm(&ticket);
                    } else {
                        inbox.rollback(&ticket);
                    }
                }
            });
            match result {
                Ok(()) => state.notifications_changed(),
                Err(e) => state.show_error(&format!("Could not update notifications: {}", e)),
            }
        });
    }
}

#[component]
pub fn Notifications() -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();
    let data = create_rw_signal(LoadState::<NotificationInbox>::Loading);
    let filter = create_rw_signal(NotificationFilter::All);

    let load = move || {
        let Some(current) = session.get_untracked() else { return };
        let viewer = current.user_id;
        let demo = state.demo_data.get_untracked();
        data.set(LoadState::Loading);

        spawn_scoped(
            scope,
            async move { api::user_notifications(&current).await },
            move |result| {
                let result = result.map(|mut list| {
                    list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                    NotificationInbox::new(list)
                });
                settle(data, session, resolve(result, demo, |gen| {
                    NotificationInbox::new(gen.notifications(viewer, 12))
                }));
            },
        );
    };
    load();

    let reconciler = Reconciler { data, scope, session, state };

    let mark_read = move |id: Id| {
        reconciler.run(
            |inbox| inbox.mark_read(id),
            move |s| async move { api::mark_as_read(&s, id).await },
        )
    };

    let delete = move |id: Id| {
        reconciler.run(
            |inbox| inbox.delete(id),
            move |s| async move { api::delete_notification(&s, id).await },
        )
    };

    let mark_all = move |_| {
        reconciler.run(NotificationInbox::mark_all_read, |s| async move {
            api::mark_all_read(&s).await
        })
    };

    let unread = move || data.with(|d| d.data().map(NotificationInbox::unread_count).unwrap_or(0));

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Notifications"</h1>
                    <p class="text-gray-400 mt-1">{move || format!("{} unread", unread())}</p>
                </div>
                <button
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm disabled:opacity-50"
                    disabled=move || unread() == 0
                    on:click=mark_all
                >
                    "Mark all read"
                </button>
            </div>

            <DemoBanner visible=Signal::derive(move || data.with(LoadState::is_demo)) />

            <div class="flex flex-wrap gap-2">
                <FilterButton filter=filter value=NotificationFilter::All label="All" />
                <FilterButton filter=filter value=NotificationFilter::Unread label="Unread" />
                <FilterButton filter=filter value=NotificationFilter::Read label="Read" />
                {NotificationCategory::ALL.iter().map(|&c| view! {
                    <FilterButton filter=filter value=NotificationFilter::Category(c) label=c.as_str() />
                }).collect_view()}
            </div>

            {move || match data.get() {
                LoadState::Loading | LoadState::SignedOut => view! { <Loading /> }.into_view(),
                LoadState::Failed(message) => view! {
                    <ErrorNotice message=message on_retry=move |_| load() />
                }.into_view(),
                LoadState::Ready { data: inbox, .. } => {
                    let now = Utc::now();
                    let rows: Vec<_> = inbox
                        .filtered(&filter.get())
                        .into_iter()
                        .map(|n| (n.clone(), inbox.is_pending(n.id)))
                        .collect();
                    if rows.is_empty() {
                        return view! {
                            <p class="text-gray-400 text-center py-12">"No notifications"</p>
                        }.into_view();
                    }

                    rows.into_iter().map(|(n, pending)| {
                        let id = n.id;
                        let class = if n.read {
                            "bg-gray-800 rounded-lg p-4 flex justify-between items-center opacity-70"
                        } else {
                            "bg-gray-800 rounded-lg p-4 flex justify-between items-center border-l-4 border-blue-500"
                        };
                        let read_button = (!n.read).then(|| view! {
                            <button
                                class="text-blue-400 hover:underline disabled:opacity-50"
                                disabled=pending
                                on:click=move |_| mark_read(id)
                            >
                                "Mark read"
                            </button>
                        });
                        view! {
                            <div class=class>
                                <div>
                                    <p>{n.message.clone()}</p>
                                    <p class="text-xs text-gray-500 mt-1">
                                        {format!("{} · {}", n.effective_category().as_str(), relative_time(n.timestamp, now))}
                                    </p>
                                </div>
                                <div class="flex items-center space-x-3 text-sm">
                                    {read_button}
                                    <button
                                        class="text-red-400 hover:underline disabled:opacity-50"
                                        disabled=pending
                                        on:click=move |_| delete(id)
                                    >
                                        "Delete"
                                    </button>
                                </div>
                            </div>
                        }
                    }).collect_view()
                }
            }}
        </div>
    }
}

#[component]
fn FilterButton(
    filter: RwSignal<NotificationFilter>,
    value: NotificationFilter,
    label: &'static str,
) -> impl IntoView {
    view! {
        <button
            on:click=move |_| filter.set(value)
            class=move || {
                let base = "px-3 py-1 rounded-lg text-sm font-medium capitalize transition-colors";
                if filter.get() == value {
                    format!("{} bg-blue-600 text-white", base)
                } else {
                    format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                }
            }
        >
            {label}
        </button>
    }
}
