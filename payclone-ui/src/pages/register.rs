//! Registration Page

use leptos::*;
use leptos_router::*;
use payclone::model::RegisterRequest;
use payclone::validation::validate_registration;
use payclone::Session;

use super::login::sign_in;
use crate::api;
use crate::state::global::use_global_state;
use crate::state::session::use_session;

/// Register, sign in and open the wallet
async fn register(name: &str, email: &str, password: &str, confirm: &str) -> Result<Session, String> {
    let (name, email) =
        validate_registration(name, email, password, confirm).map_err(|e| e.to_string())?;

    api::register(&RegisterRequest {
        name,
        email: email.clone(),
        password: password.to_string(),
    })
    .await
    .map_err(|e| e.message)?;

    let session = sign_in(&email, password).await?;
    api::get_or_create_wallet(&session)
        .await
        .map_err(|e| e.message)?;
    Ok(session)
}

#[component]
pub fn Register() -> impl IntoView {
    let state = use_global_state();
    let session = use_session();
    let navigate = use_navigate();

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = register(
                &name.get_untracked(),
                &email.get_untracked(),
                &password.get_untracked(),
                &confirm.get_untracked(),
            )
            .await;
            set_submitting.set(false);

            match result {
                Ok(new_session) => match session.begin(new_session) {
                    Ok(()) => {
                        state.show_success("Welcome to PayClone!");
                        navigate("/", Default::default());
                    }
                    Err(e) => state.show_error(&e.to_string()),
                },
                Err(message) => state.show_error(&message),
            }
        });
    };

    let field = |kind: &'static str, placeholder: &'static str, value: ReadSignal<String>, set: WriteSignal<String>| {
        view! {
            <input
                type=kind
                placeholder=placeholder
                class="w-full px-3 py-2 rounded-lg bg-gray-700"
                prop:value=value
                on:input=move |ev| set.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="flex items-center justify-center min-h-screen">
            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-8 w-full max-w-sm space-y-4">
                <h1 class="text-2xl font-bold">"Create your account"</h1>
                {field("text", "Full name", name, set_name)}
                {field("email", "Email", email, set_email)}
                {field("password", "Password (6+ characters)", password, set_password)}
                {field("password", "Confirm password", confirm, set_confirm)}
                <button
                    type="submit"
                    class="w-full py-2 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium disabled:opacity-50"
                    disabled=submitting
                >
                    {move || if submitting.get() { "Creating account..." } else { "Register" }}
                </button>
                <p class="text-sm text-gray-400 text-center">
                    "Already registered? "
                    <A href="/login" class="text-blue-400 hover:underline">"Sign in"</A>
                </p>
            </form>
        </div>
    }
}
