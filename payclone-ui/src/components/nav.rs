//! Navigation Component
//!
//! Header navigation bar with links, notifications and sign-out.

use leptos::*;
use leptos_router::*;

use super::NotificationDropdown;
use crate::state::session::use_session;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let sign_out = move |_| {
        session.end();
        navigate("/login", Default::default());
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-xl font-bold text-white">"PayClone"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <NavLink href="/" label="Dashboard" />
                        <NavLink href="/transactions" label="Transactions" />
                        <NavLink href="/analytics" label="Analytics" />
                        <NavLink href="/requests" label="Requests" />
                        <NavLink href="/profile" label="Profile" />
                    </div>

                    <div class="flex items-center space-x-4">
                        <NotificationDropdown />
                        <span class="text-sm text-gray-400">
                            {move || session.get().map(|s| s.name).unwrap_or_default()}
                        </span>
                        <button
                            class="px-3 py-2 rounded-lg text-sm text-gray-300 hover:bg-gray-700"
                            on:click=sign_out
                        >
                            "Sign out"
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
            exact=true
        >
            {label}
        </A>
    }
}
