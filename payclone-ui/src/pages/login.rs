//! Login Page

use leptos::*;
use leptos_router::*;
use payclone::validation::validate_email;
use payclone::{Session, ValidationError};

use crate::api::{self, ApiError};
use crate::state::global::use_global_state;
use crate::state::session::use_session;

/// Sign in, probing `/users/me` when the server answers with only a token
pub async fn sign_in(email: &str, password: &str) -> Result<Session, String> {
    let email = validate_email(email).map_err(|e| e.to_string())?;
    if password.is_empty() {
        return Err(ValidationError::Required("Password").to_string());
    }

    let response = api::login(&email, password).await.map_err(|e| match e {
        ApiError { status: 401 | 403, .. } => "Invalid email or password".to_string(),
        other => other.message,
    })?;

    let user = match response.user {
        Some(user) => user,
        None => {
            let probe = Session {
                token: response.token.clone(),
                user_id: 0,
                name: String::new(),
                email: email.clone(),
            };
            api::me(&probe).await.map_err(|e| e.message)?
        }
    };
    Ok(Session::new(response.token, &user))
}

#[component]
pub fn Login() -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    if session.get_untracked().is_some() {
        navigate("/", Default::default());
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            match sign_in(&email.get_untracked(), &password.get_untracked()).await {
                Ok(new_session) => match session.begin(new_session) {
                    Ok(()) => navigate("/", Default::default()),
                    Err(e) => state.show_error(&e.to_string()),
                },
                Err(message) => state.show_error(&message),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="flex items-center justify-center min-h-screen">
            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-8 w-full max-w-sm space-y-4">
                <h1 class="text-2xl font-bold">"Sign in to PayClone"</h1>
                <input
                    type="email"
                    placeholder="Email"
                    class="w-full px-3 py-2 rounded-lg bg-gray-700"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    class="w-full px-3 py-2 rounded-lg bg-gray-700"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class="w-full py-2 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium disabled:opacity-50"
                    disabled=submitting
                >
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
                <p class="text-sm text-gray-400 text-center">
                    "No account? "
                    <A href="/register" class="text-blue-400 hover:underline">"Register"</A>
                </p>
            </form>
        </div>
    }
}
