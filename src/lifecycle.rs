//! Page Lifecycle
//!
//! Ties in-flight requests to the page that started them. When the page
//! goes away its scope is cancelled: pending futures are aborted and any
//! response that still arrives resolves to [`Cancelled`] instead of being
//! applied to state that is no longer visible.

use futures_util::future::{AbortHandle, Abortable};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// The owning page scope was closed before the work finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Operation cancelled: page scope closed")]
pub struct Cancelled;

#[derive(Debug, Default)]
struct ScopeState {
    closed: bool,
    next_id: u64,
    in_flight: HashMap<u64, AbortHandle>,
}

/// Shared cancellation scope for one page instance
#[derive(Debug, Clone, Default)]
pub struct PageScope {
    state: Arc<Mutex<ScopeState>>,
}

impl PageScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ScopeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `fut` under this scope
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        let (handle, registration) = AbortHandle::new_pair();

        let id = {
            let mut state = self.lock();
            if state.closed {
                return Err(Cancelled);
            }
            let id = state.next_id;
            state.next_id += 1;
            state.in_flight.insert(id, handle);
            id
        };

        let result = Abortable::new(fut, registration).await;

        let mut state = self.lock();
        state.in_flight.remove(&id);
        if state.closed {
            return Err(Cancelled);
        }
        result.map_err(|_| Cancelled)
    }

    /// Abort everything in flight and refuse new work
    pub fn cancel(&self) {
        let handles: Vec<AbortHandle> = {
            let mut state = self.lock();
            state.closed = true;
            state.in_flight.drain().map(|(_, h)| h).collect()
        };

        if !handles.is_empty() {
            tracing::debug!("Cancelling {} in-flight requests", handles.len());
        }
        for handle in handles {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().closed
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }

    pub fn token(&self) -> ScopeToken {
        ScopeToken {
            scope: self.clone(),
        }
    }

    /// Cancels the scope when dropped
    pub fn guard(&self) -> ScopeGuard {
        ScopeGuard {
            scope: self.clone(),
        }
    }
}

/// Read-only view of a scope's cancellation state
#[derive(Debug, Clone)]
pub struct ScopeToken {
    scope: PageScope,
}

impl ScopeToken {
    pub fn is_cancelled(&self) -> bool {
        self.scope.is_cancelled()
    }
}

/// Drop guard returned by [`PageScope::guard`]
#[derive(Debug)]
pub struct ScopeGuard {
    scope: PageScope,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_completes_when_open() {
        let scope = PageScope::new();
        assert_eq!(scope.run(async { 7 }).await, Ok(7));
        assert_eq!(scope.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight() {
        let scope = PageScope::new();
        let worker = scope.clone();

        let task = tokio::spawn(async move {
            worker
                .run(async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    "late"
                })
                .await
        });

        while scope.in_flight() == 0 {
            tokio::task::yield_now().await;
        }
        scope.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result, Err(Cancelled));
    }

    #[tokio::test]
    async fn test_closed_scope_rejects_new_work() {
        let scope = PageScope::new();
        let token = scope.token();
        scope.cancel();

        assert!(token.is_cancelled());
        assert_eq!(scope.run(async { 1 }).await, Err(Cancelled));
    }

    #[tokio::test]
    async fn test_guard_cancels_on_drop() {
        let scope = PageScope::new();
        {
            let _guard = scope.guard();
            assert!(!scope.is_cancelled());
        }
        assert!(scope.is_cancelled());
    }
}
