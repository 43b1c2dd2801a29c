//! Global Application State
//!
//! Reactive state shared by every page: toasts, the busy flag and the
//! demo-data switch.

use leptos::*;

use super::storage;

const DEMO_DATA_KEY: &str = "payclone_demo_data";

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Some action is in flight
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    /// Show generated data when the API fails; off unless the user opts in
    pub demo_data: RwSignal<bool>,
    /// Bumped whenever notifications change so the nav badge refetches
    pub notifications_version: RwSignal<u32>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let demo = storage::read(DEMO_DATA_KEY).as_deref() == Some("true");

    let state = GlobalState {
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        demo_data: create_rw_signal(demo),
        notifications_version: create_rw_signal(0),
    };

    provide_context(state);
}

/// The global state; panics only if `App` did not provide it
pub fn use_global_state() -> GlobalState {
    expect_context::<GlobalState>()
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        web_sys::console::error_1(&message.into());
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    pub fn set_demo_data(&self, enabled: bool) {
        self.demo_data.set(enabled);
        if enabled {
            storage::write(DEMO_DATA_KEY, "true");
        } else {
            storage::remove(DEMO_DATA_KEY);
        }
    }

    pub fn notifications_changed(&self) {
        self.notifications_version.update(|v| *v = v.wrapping_add(1));
    }
}
