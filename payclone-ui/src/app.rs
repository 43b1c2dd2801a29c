//! App Root Component
//!
//! Routing, global providers and the signed-in guard.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, Toast};
use crate::pages::{Analytics, Dashboard, Login, Notifications, Profile, Register, Requests, Transactions};
use crate::state::session::use_session;
use crate::state::{provide_global_state, provide_session};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    provide_session();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Routes>
                    <Route path="/login" view=Login />
                    <Route path="/register" view=Register />
                    <Route path="/" view=|| view! { <Protected><Dashboard /></Protected> } />
                    <Route path="/transactions" view=|| view! { <Protected><Transactions /></Protected> } />
                    <Route path="/analytics" view=|| view! { <Protected><Analytics /></Protected> } />
                    <Route path="/notifications" view=|| view! { <Protected><Notifications /></Protected> } />
                    <Route path="/requests" view=|| view! { <Protected><Requests /></Protected> } />
                    <Route path="/profile" view=|| view! { <Protected><Profile /></Protected> } />
                    <Route path="/*any" view=NotFound />
                </Routes>

                <Toast />
            </div>
        </Router>
    }
}

/// Renders the page with navigation when signed in, otherwise sends the
/// user to the login page
#[component]
fn Protected(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    move || {
        if session.is_signed_in() {
            view! {
                <Nav />
                <main class="flex-1 container mx-auto px-4 py-8">
                    {children()}
                </main>
            }
            .into_view()
        } else {
            view! { <Redirect path="/login" /> }.into_view()
        }
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
