//! Profile Page
//!
//! Account details, password change, and the client-side settings kept in
//! local storage.

use leptos::*;
use payclone::model::{ChangePasswordRequest, UpdateProfileRequest};
use payclone::validation::{validate_email, validate_password};
use payclone::{Session, User, ValidationError};

use crate::api::{self, get_api_base, set_api_base, DEFAULT_API_BASE};
use crate::components::{DemoBanner, ErrorNotice, Loading};
use crate::state::global::use_global_state;
use crate::state::session::use_session;
use crate::state::{resolve, settle, spawn_scoped, use_page_scope, LoadState};

/// Only the fields that differ from `user`
fn profile_changes(user: &User, name: &str, email: &str) -> Result<UpdateProfileRequest, ValidationError> {
    let mut update = UpdateProfileRequest::default();

    let name = name.trim();
    if !name.is_empty() && name != user.name {
        update.name = Some(name.to_string());
    }
    if !email.trim().is_empty() {
        let email = validate_email(email)?;
        if !email.eq_ignore_ascii_case(&user.email) {
            update.email = Some(email);
        }
    }
    Ok(update)
}

#[component]
pub fn Profile() -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();
    let data = create_rw_signal(LoadState::<User>::Loading);

    let load = move || {
        let Some(current) = session.get_untracked() else { return };
        let viewer = current.user_id;
        let demo = state.demo_data.get_untracked();
        data.set(LoadState::Loading);

        spawn_scoped(
            scope,
            async move { api::me(&current).await },
            move |result| settle(data, session, resolve(result, demo, |gen| gen.user(viewer))),
        );
    };
    load();

    // The session caches the display name and email
    let on_updated = Callback::new(move |user: User| {
        if let Some(current) = session.get_untracked() {
            if let Err(e) = session.begin(Session::new(current.token, &user)) {
                state.show_error(&e.to_string());
            }
        }
        data.set(LoadState::Ready { data: user, demo: false });
    });

    view! {
        <div class="space-y-8 max-w-2xl">
            <h1 class="text-3xl font-bold">"Profile"</h1>

            <DemoBanner visible=Signal::derive(move || data.with(LoadState::is_demo)) />

            {move || match data.get() {
                LoadState::Loading | LoadState::SignedOut => view! { <Loading /> }.into_view(),
                LoadState::Failed(message) => view! {
                    <ErrorNotice message=message on_retry=move |_| load() />
                }.into_view(),
                LoadState::Ready { data: user, .. } => view! {
                    <AccountCard user=user.clone() />
                    <EditProfile user=user on_updated=on_updated />
                }.into_view(),
            }}

            <ChangePassword />
            <Settings />
        </div>
    }
}

#[component]
fn AccountCard(user: User) -> impl IntoView {
    let joined = user
        .join_date
        .map(|d| format!("Member since {}", d.format("%B %Y")))
        .unwrap_or_default();

    view! {
        <section class="bg-gray-800 rounded-xl p-6 flex items-center space-x-4">
            <div class="w-14 h-14 rounded-full bg-blue-600 flex items-center justify-center text-xl font-bold">
                {user.initials()}
            </div>
            <div>
                <p class="text-lg font-semibold">{user.name.clone()}</p>
                <p class="text-gray-400">{user.email.clone()}</p>
                <p class="text-xs text-gray-500">{joined}</p>
            </div>
        </section>
    }
}

#[component]
fn EditProfile(user: User, #[prop(into)] on_updated: Callback<User>) -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();

    let (name, set_name) = create_signal(user.name.clone());
    let (email, set_email) = create_signal(user.email.clone());
    let (submitting, set_submitting) = create_signal(false);
    let original = store_value(user);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = session.get_untracked() else { return };

        let update = match original.with_value(|u| {
            profile_changes(u, &name.get_untracked(), &email.get_untracked())
        }) {
            Ok(update) if update.is_empty() => {
                state.show_error("Nothing to update");
                return;
            }
            Ok(update) => update,
            Err(e) => {
                state.show_error(&e.to_string());
                return;
            }
        };

        set_submitting.set(true);
        spawn_scoped(
            scope,
            async move { api::update_profile(&current, &update).await },
            move |result| {
                set_submitting.set(false);
                match result {
                    Ok(user) => {
                        state.show_success("Profile updated");
                        on_updated.call(user);
                    }
                    Err(e) => state.show_error(&e.message),
                }
            },
        );
    };

    view! {
        <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-3">
            <h2 class="text-xl font-semibold">"Edit profile"</h2>
            <input
                type="text"
                placeholder="Name"
                class="w-full px-3 py-2 rounded-lg bg-gray-700"
                prop:value=name
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <input
                type="email"
                placeholder="Email"
                class="w-full px-3 py-2 rounded-lg bg-gray-700"
                prop:value=email
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <button
                type="submit"
                class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium disabled:opacity-50"
                disabled=submitting
            >
                "Save"
            </button>
        </form>
    }
}

#[component]
fn ChangePassword() -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let scope = use_page_scope();

    let (current_pw, set_current_pw) = create_signal(String::new());
    let (new_pw, set_new_pw) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = session.get_untracked() else { return };

        let current_password = current_pw.get_untracked();
        if current_password.is_empty() {
            state.show_error(&ValidationError::Required("Current password").to_string());
            return;
        }
        let new_password = new_pw.get_untracked();
        if let Err(e) = validate_password(&new_password, &confirm.get_untracked()) {
            state.show_error(&e.to_string());
            return;
        }

        let change = ChangePasswordRequest {
            current_password,
            new_password,
        };
        set_submitting.set(true);
        spawn_scoped(
            scope,
            async move { api::change_password(&current, &change).await },
            move |result| {
                set_submitting.set(false);
                match result {
                    Ok(()) => {
                        state.show_success("Password changed");
                        set_current_pw.set(String::new());
                        set_new_pw.set(String::new());
                        set_confirm.set(String::new());
                    }
                    Err(e) => state.show_error(&e.message),
                }
            },
        );
    };

    let field = |placeholder: &'static str, value: ReadSignal<String>, set: WriteSignal<String>| {
        view! {
            <input
                type="password"
                placeholder=placeholder
                class="w-full px-3 py-2 rounded-lg bg-gray-700"
                prop:value=value
                on:input=move |ev| set.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-3">
            <h2 class="text-xl font-semibold">"Change password"</h2>
            {field("Current password", current_pw, set_current_pw)}
            {field("New password (6+ characters)", new_pw, set_new_pw)}
            {field("Confirm new password", confirm, set_confirm)}
            <button
                type="submit"
                class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium disabled:opacity-50"
                disabled=submitting
            >
                "Change password"
            </button>
        </form>
    }
}

#[component]
fn Settings() -> impl IntoView {
    let state = use_global_state();
    let (api_url, set_api_url) = create_signal(get_api_base());

    let save_url = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let url = api_url.get_untracked();
        let url = if url.trim().is_empty() { DEFAULT_API_BASE.to_string() } else { url };
        set_api_base(&url);
        set_api_url.set(get_api_base());
        state.show_success("API URL saved");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Settings"</h2>

            <form on:submit=save_url class="flex space-x-3">
                <input
                    type="url"
                    class="flex-1 px-3 py-2 rounded-lg bg-gray-700"
                    prop:value=api_url
                    on:input=move |ev| set_api_url.set(event_target_value(&ev))
                />
                <button type="submit" class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg">
                    "Save URL"
                </button>
            </form>

            <label class="flex items-center space-x-3">
                <input
                    type="checkbox"
                    prop:checked=move || state.demo_data.get()
                    on:change=move |ev| state.set_demo_data(event_target_checked(&ev))
                />
                <span>"Show demo data when the server cannot be reached"</span>
            </label>
        </section>
    }
}
