//! Pages
//!
//! Top-level page components for each route.

pub mod analytics;
pub mod dashboard;
pub mod login;
pub mod notifications;
pub mod profile;
pub mod register;
pub mod requests;
pub mod transactions;

pub use analytics::Analytics;
pub use dashboard::Dashboard;
pub use login::Login;
pub use notifications::Notifications;
pub use profile::Profile;
pub use register::Register;
pub use requests::Requests;
pub use transactions::Transactions;
