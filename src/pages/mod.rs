//! Page Containers
//!
//! One container per screen. Each owns a [`PageState`], loads through an
//! [`ApiClient`](crate::client::ApiClient) under a
//! [`PageScope`](crate::lifecycle::PageScope), and refetches after a
//! successful action. Placeholder data only ever appears through
//! [`FallbackPolicy::Placeholder`].

pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod notifications;
pub mod profile;
pub mod requests;
pub mod state;
pub mod transactions;

pub use analytics::{AnalyticsPage, AnalyticsView};
pub use auth::AuthFlow;
pub use dashboard::{DashboardPage, DashboardView};
pub use notifications::NotificationsPage;
pub use profile::ProfilePage;
pub use requests::{RequestsPage, RequestsView};
pub use state::{fetch, resolve, DataSource, FallbackPolicy, Loaded, PageError, PageState};
pub use transactions::{TransactionQuery, TransactionSlice, TransactionsPage, TransactionsView};
