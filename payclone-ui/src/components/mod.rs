//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod activity_chart;
pub mod analytics_panel;
pub mod loading;
pub mod nav;
pub mod notification_dropdown;
pub mod stat_card;
pub mod toast;
pub mod transaction_table;

pub use activity_chart::ActivityChart;
pub use analytics_panel::AnalyticsPanel;
pub use loading::{DemoBanner, ErrorNotice, Loading};
pub use nav::Nav;
pub use notification_dropdown::NotificationDropdown;
pub use stat_card::StatCard;
pub use toast::Toast;
pub use transaction_table::TransactionTable;
