//! # PayClone
//!
//! Client-side core of a peer-to-peer payments dashboard: typed access to
//! the payments REST API, analytics over a user's transaction history, and
//! the page containers a dashboard UI or the `payclone` CLI drives.
//!
//! ## Modules
//!
//! - [`model`]: Wire records exchanged with the REST API
//! - [`analytics`]: Totals, trends, chart series and insights
//! - [`filter`]: Time-range, search and notification filters
//! - [`export`]: CSV export of transaction lists
//! - [`inbox`]: Notification list with optimistic changes and rollback
//! - [`session`]: Explicit sign-in session and its persistence
//! - [`lifecycle`]: Per-page cancellation of in-flight requests
//! - [`client`]: REST API client (`native` feature)
//! - [`pages`]: Page containers and their load/error states (`native` feature)
//!
//! The `native` feature (on by default) pulls in the async HTTP stack. With
//! it disabled the remaining modules build for `wasm32-unknown-unknown` and
//! back the browser dashboard.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use payclone::{ApiClient, AuthFlow, Config, DashboardPage, MemorySessionStore, PageScope};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let mut client = ApiClient::new(&config.api)?;
//!
//!     let mut auth = AuthFlow::restore(MemorySessionStore::new());
//!     auth.login(&mut client, "ada@example.com", "secret1").await?;
//!
//!     let scope = PageScope::new();
//!     let mut page = DashboardPage::new(config.pages.fallback_policy(), 7);
//!     if let Some(view) = page.load(&client, &scope).await.data() {
//!         println!("Balance: {}", payclone::format::currency(view.wallet.balance));
//!     }
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod export;
pub mod filter;
pub mod format;
pub mod inbox;
pub mod lifecycle;
pub mod model;
pub mod placeholder;
pub mod session;
pub mod validation;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod pages;

#[cfg(all(test, feature = "native"))]
pub(crate) mod test_support;

// Re-export top-level types for convenience
pub use model::{
    Id, MoneyRequest, Notification, NotificationCategory, RequestStatus, Transaction,
    TransactionStatus, User, Wallet,
};

pub use analytics::{AnalyticsReport, Insights, TransactionSummary};

pub use filter::{NotificationFilter, TimeRange, TransactionFilter, TypeFilter};

pub use export::ExportError;

pub use inbox::{ChangeTicket, NotificationInbox};

pub use lifecycle::{Cancelled, PageScope, ScopeGuard};

pub use placeholder::Placeholder;

pub use session::{MemorySessionStore, Session, SessionError, SessionManager, SessionStore};

pub use validation::ValidationError;

#[cfg(feature = "native")]
pub use session::FileSessionStore;

#[cfg(feature = "native")]
pub use client::{ApiClient, ClientError, ClientResult};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};

#[cfg(feature = "native")]
pub use pages::{
    AnalyticsPage, AuthFlow, DashboardPage, DataSource, FallbackPolicy, NotificationsPage,
    PageError, PageState, ProfilePage, RequestsPage, TransactionsPage,
};
