//! Notification Dropdown
//!
//! Bell with an unread badge and the newest notifications. Marking read is
//! applied immediately and rolled back if the server refuses.

use chrono::Utc;
use leptos::*;
use leptos_router::*;
use payclone::format::relative_time;
use payclone::{ChangeTicket, Id, NotificationInbox};

use crate::api;
use crate::state::global::use_global_state;
use crate::state::session::use_session;
use crate::state::{spawn_scoped, use_page_scope};

/// Items shown in the dropdown
const DROPDOWN_LIMIT: usize = 5;

#[component]
pub fn NotificationDropdown() -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();

    let inbox = create_rw_signal(NotificationInbox::default());
    let (open, set_open) = create_signal(false);

    // Refetch when the session or any page's notifications change
    create_effect(move |_| {
        let _ = state.notifications_version.get();
        let Some(current) = session.get() else {
            inbox.set(NotificationInbox::default());
            return;
        };
        spawn_scoped(
            scope,
            async move { api::user_notifications(&current).await },
            move |result| match result {
                Ok(mut list) => {
                    list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                    inbox.update(|i| i.replace(list));
                }
                Err(e) => web_sys::console::warn_1(&format!("Notifications: {}", e).into()),
            },
        );
    });

    let settle = move |ticket: ChangeTicket, result: api::ApiResult<()>| match result {
        Ok(()) => inbox.update(|i| i.confirm(&ticket)),
        Err(e) => {
            inbox.update(|i| i.rollback(&ticket));
            state.show_error(&format!("Could not update notifications: {}", e));
        }
    };

    let mark_read = move |id: Id| {
        let Some(current) = session.get_untracked() else { return };
        let mut ticket = None;
        inbox.update(|i| ticket = i.mark_read(id));
        let Some(ticket) = ticket else { return };

        spawn_scoped(
            scope,
            async move { api::mark_as_read(&current, id).await },
            move |result| settle(ticket, result),
        );
    };

    let mark_all = move |_| {
        let Some(current) = session.get_untracked() else { return };
        let mut ticket = None;
        inbox.update(|i| ticket = i.mark_all_read());
        let Some(ticket) = ticket else { return };

        spawn_scoped(
            scope,
            async move { api::mark_all_read(&current).await },
            move |result| settle(ticket, result),
        );
    };

    let unread = move || inbox.with(|i| i.unread_count());

    view! {
        <div class="relative">
            <button
                class="relative p-2 rounded-lg hover:bg-gray-700"
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                <span class="text-xl">"🔔"</span>
                <Show when=move || { unread() > 0 }>
                    <span class="absolute -top-1 -right-1 bg-red-600 text-xs rounded-full px-1.5">
                        {unread}
                    </span>
                </Show>
            </button>

            <Show when=move || open.get()>
                <div class="absolute right-0 mt-2 w-80 bg-gray-800 border border-gray-700 rounded-lg shadow-lg z-40">
                    <div class="flex items-center justify-between px-4 py-2 border-b border-gray-700">
                        <span class="font-semibold">"Notifications"</span>
                        <button class="text-xs text-blue-400 hover:underline" on:click=mark_all>
                            "Mark all read"
                        </button>
                    </div>

                    {move || {
                        let now = Utc::now();
                        let items: Vec<_> = inbox.with(|i| {
                            i.items().iter().take(DROPDOWN_LIMIT).cloned().collect()
                        });
                        if items.is_empty() {
                            return view! {
                                <p class="px-4 py-6 text-sm text-gray-400 text-center">"You're all caught up"</p>
                            }.into_view();
                        }
                        items.into_iter().map(|n| {
                            let id = n.id;
                            let class = if n.read {
                                "px-4 py-3 border-b border-gray-700 text-gray-400 cursor-pointer"
                            } else {
                                "px-4 py-3 border-b border-gray-700 bg-gray-700/40 cursor-pointer"
                            };
                            view! {
                                <div class=class on:click=move |_| mark_read(id)>
                                    <p class="text-sm">{n.message.clone()}</p>
                                    <p class="text-xs text-gray-500 mt-1">{relative_time(n.timestamp, now)}</p>
                                </div>
                            }
                        }).collect_view()
                    }}

                    <A href="/notifications" class="block px-4 py-2 text-center text-sm text-blue-400 hover:underline">
                        "View all"
                    </A>
                </div>
            </Show>
        </div>
    }
}
