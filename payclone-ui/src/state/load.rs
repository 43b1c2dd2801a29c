//! Page Load State
//!
//! Each page owns a [`PageScope`] that is cancelled when the page unmounts,
//! so a response arriving after navigation is dropped instead of written
//! into signals that no longer exist.

use leptos::*;
use payclone::{Cancelled, PageScope, Placeholder};
use std::future::Future;

use super::session::SessionContext;
use crate::api::{ApiError, ApiResult};

/// Seed for demo data, fixed so the demo looks the same on every load
pub const DEMO_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub enum LoadState<T> {
    Loading,
    Ready { data: T, demo: bool },
    /// The server rejected the session
    SignedOut,
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Ready { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, LoadState::Ready { demo: true, .. })
    }
}

/// Turn a fetch result into load state.
///
/// Auth failures are never replaced; other failures become demo data only
/// when the user has switched demo data on.
pub fn resolve<T>(
    result: ApiResult<T>,
    demo_enabled: bool,
    generate: impl FnOnce(&mut Placeholder) -> T,
) -> LoadState<T> {
    match result {
        Ok(data) => LoadState::Ready { data, demo: false },
        Err(e) if e.is_auth() => LoadState::SignedOut,
        Err(ApiError { message, .. }) if demo_enabled => {
            web_sys::console::warn_1(&format!("Showing demo data: {}", message).into());
            let mut gen = Placeholder::new(DEMO_SEED, chrono::Utc::now());
            LoadState::Ready {
                data: generate(&mut gen),
                demo: true,
            }
        }
        Err(e) => LoadState::Failed(e.message),
    }
}

/// Store a resolved load; a rejected session signs the user out
pub fn settle<T: 'static>(target: RwSignal<LoadState<T>>, session: SessionContext, next: LoadState<T>) {
    if matches!(next, LoadState::SignedOut) {
        session.end();
    }
    target.set(next);
}

/// Page-owned cancellation scope, closed when the page unmounts
pub fn use_page_scope() -> StoredValue<PageScope> {
    let scope = PageScope::new();
    let for_cleanup = scope.clone();
    on_cleanup(move || for_cleanup.cancel());
    store_value(scope)
}

/// Run `fut` under the page scope and hand its output to `apply`, unless
/// the page closed first.
pub fn spawn_scoped<T: 'static>(
    scope: StoredValue<PageScope>,
    fut: impl Future<Output = T> + 'static,
    apply: impl FnOnce(T) + 'static,
) {
    let Some(scope) = scope.try_get_value() else {
        return;
    };
    spawn_local(async move {
        match scope.run(fut).await {
            Ok(value) => apply(value),
            Err(Cancelled) => web_sys::console::debug_1(&"Dropped response for closed page".into()),
        }
    });
}
