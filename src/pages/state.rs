//! Page state machine and the placeholder fallback decision

use chrono::Utc;
use std::future::Future;
use thiserror::Error;

use crate::client::{ClientError, ClientResult};
use crate::export::ExportError;
use crate::lifecycle::{Cancelled, PageScope};
use crate::placeholder::Placeholder;
use crate::session::SessionError;
use crate::validation::ValidationError;

/// Where the data on screen came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Remote,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    pub source: DataSource,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    /// No session, or the server rejected it; the user has to sign in
    #[error("Please sign in to continue")]
    Unauthenticated,

    #[error("{0}")]
    Failed(String),

    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("Page was closed")]
    Cancelled,
}

impl From<ClientError> for PageError {
    fn from(e: ClientError) -> Self {
        if e.is_auth() {
            PageError::Unauthenticated
        } else {
            PageError::Failed(e.to_string())
        }
    }
}

impl From<Cancelled> for PageError {
    fn from(_: Cancelled) -> Self {
        PageError::Cancelled
    }
}

impl From<SessionError> for PageError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Missing => PageError::Unauthenticated,
            other => PageError::Failed(other.to_string()),
        }
    }
}

impl From<ExportError> for PageError {
    fn from(e: ExportError) -> Self {
        PageError::Failed(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Ready(Loaded<T>),
    Error(PageError),
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        PageState::Loading
    }
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn ready(&self) -> Option<&Loaded<T>> {
        match self {
            PageState::Ready(loaded) => Some(loaded),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.ready().map(|l| &l.data)
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            PageState::Ready(loaded) => Some(&mut loaded.data),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<DataSource> {
        self.ready().map(|l| l.source)
    }

    pub fn error(&self) -> Option<&PageError> {
        match self {
            PageState::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Loaded data, or an error for actions that need it
    pub fn require(&self) -> Result<&T, PageError> {
        self.data()
            .ok_or_else(|| PageError::Failed("Page is not loaded".to_string()))
    }

    pub fn require_mut(&mut self) -> Result<&mut T, PageError> {
        self.data_mut()
            .ok_or_else(|| PageError::Failed("Page is not loaded".to_string()))
    }
}

/// What a page shows when its primary fetch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    #[default]
    Error,
    Placeholder { seed: u64 },
}

/// Turn a fetch result into page state.
///
/// Auth failures and cancellation are never papered over; other failures
/// become placeholder data only when the policy asks for it.
pub fn resolve<T>(
    result: Result<T, PageError>,
    policy: FallbackPolicy,
    generate: impl FnOnce(&mut Placeholder) -> T,
) -> PageState<T> {
    match result {
        Ok(data) => PageState::Ready(Loaded {
            data,
            source: DataSource::Remote,
        }),
        Err(PageError::Failed(message)) => match policy {
            FallbackPolicy::Placeholder { seed } => {
                tracing::warn!("Showing placeholder data after failed fetch: {}", message);
                let mut gen = Placeholder::new(seed, Utc::now());
                PageState::Ready(Loaded {
                    data: generate(&mut gen),
                    source: DataSource::Placeholder,
                })
            }
            FallbackPolicy::Error => PageState::Error(PageError::Failed(message)),
        },
        Err(e) => PageState::Error(e),
    }
}

/// Run a client call under the page scope
pub async fn fetch<T>(
    scope: &PageScope,
    call: impl Future<Output = ClientResult<T>>,
) -> Result<T, PageError> {
    Ok(scope.run(call).await??)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_is_remote_regardless_of_policy() {
        let state = resolve(Ok(3), FallbackPolicy::Placeholder { seed: 1 }, |_| 9);
        assert_eq!(state.data(), Some(&3));
        assert_eq!(state.source(), Some(DataSource::Remote));
    }

    #[test]
    fn test_failure_without_opt_in_is_an_error() {
        let state: PageState<i32> = resolve(
            Err(PageError::Failed("boom".to_string())),
            FallbackPolicy::Error,
            |_| 9,
        );
        assert_eq!(state.error(), Some(&PageError::Failed("boom".to_string())));
    }

    #[test]
    fn test_failure_with_opt_in_is_tagged_placeholder() {
        let state = resolve(
            Err(PageError::Failed("boom".to_string())),
            FallbackPolicy::Placeholder { seed: 1 },
            |gen| gen.transactions(1, 3).len(),
        );
        assert_eq!(state.data(), Some(&3));
        assert_eq!(state.source(), Some(DataSource::Placeholder));
    }

    #[test]
    fn test_auth_and_cancel_never_fall_back() {
        let policy = FallbackPolicy::Placeholder { seed: 1 };
        let state: PageState<i32> = resolve(Err(PageError::Unauthenticated), policy, |_| 9);
        assert_eq!(state.error(), Some(&PageError::Unauthenticated));

        let state: PageState<i32> = resolve(Err(PageError::Cancelled), policy, |_| 9);
        assert_eq!(state.error(), Some(&PageError::Cancelled));
    }

    #[test]
    fn test_client_error_mapping() {
        assert_eq!(PageError::from(ClientError::Unauthorized), PageError::Unauthenticated);
        assert_eq!(PageError::from(ClientError::MissingSession), PageError::Unauthenticated);
        assert_eq!(
            PageError::from(ClientError::NotFound),
            PageError::Failed("Not found".to_string())
        );
    }
}
