//! Analytics: charts and insights over a selectable time range

use chrono::{DateTime, Utc};

use super::state::{fetch, resolve, FallbackPolicy, PageError, PageState};
use crate::analytics::AnalyticsReport;
use crate::client::ApiClient;
use crate::filter::TimeRange;
use crate::lifecycle::PageScope;
use crate::model::{Id, Transaction, UserAnalytics};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsView {
    pub viewer: Id,
    pub transactions: Vec<Transaction>,
    /// Server-side figures; the page renders without them
    pub server: Option<UserAnalytics>,
}

pub struct AnalyticsPage {
    policy: FallbackPolicy,
    activity_days: usize,
    pub range: TimeRange,
    pub state: PageState<AnalyticsView>,
}

impl AnalyticsPage {
    pub fn new(policy: FallbackPolicy, activity_days: usize) -> Self {
        Self {
            policy,
            activity_days,
            range: TimeRange::Month,
            state: PageState::Loading,
        }
    }

    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = range;
        self
    }

    pub async fn load(&mut self, client: &ApiClient, scope: &PageScope) -> &PageState<AnalyticsView> {
        let viewer = match client.viewer() {
            Ok(viewer) => viewer,
            Err(_) => {
                self.state = PageState::Error(PageError::Unauthenticated);
                return &self.state;
            }
        };

        self.state = PageState::Loading;
        let (transactions, server) = tokio::join!(
            fetch(scope, client.get_user_transactions(viewer)),
            fetch(scope, client.get_user_analytics(viewer)),
        );

        let server = match server {
            Ok(analytics) => Some(analytics),
            Err(PageError::Cancelled) => {
                self.state = PageState::Error(PageError::Cancelled);
                return &self.state;
            }
            Err(e) => {
                tracing::debug!("Server analytics unavailable: {}", e);
                None
            }
        };

        let result = transactions.map(|transactions| AnalyticsView {
            viewer,
            transactions,
            server,
        });
        self.state = resolve(result, self.policy, |gen| AnalyticsView {
            viewer,
            transactions: gen.transactions(viewer, 60),
            server: None,
        });
        &self.state
    }

    /// Report over the selected range
    pub fn report(&self, now: DateTime<Utc>) -> Option<AnalyticsReport> {
        let view = self.state.data()?;
        let in_range = self.range.apply(&view.transactions, now);
        Some(AnalyticsReport::build(&in_range, view.viewer, now, self.activity_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::DataSource;
    use crate::test_support::StubServer;

    #[tokio::test]
    async fn test_report_over_range() {
        let stub = StubServer::start().await;
        let client = stub.signed_in_client(1);
        let mut page = AnalyticsPage::new(FallbackPolicy::Error, 7);
        page.load(&client, &PageScope::new()).await;

        let view = page.state.data().unwrap();
        assert!(view.server.is_some());

        let report = page.report(Utc::now()).unwrap();
        assert_eq!(report.summary.total_sent, 100.0);
        assert_eq!(report.daily.len(), 7);
        assert_eq!(report.insights.largest, 100.0);

        page.range = TimeRange::Today;
        let today = page.report(Utc::now()).unwrap();
        assert_eq!(today.summary.total_count, 0);
    }

    #[tokio::test]
    async fn test_server_analytics_are_optional() {
        let stub = StubServer::start().await;
        stub.fail_path("/users/analytics");
        let client = stub.signed_in_client(1);

        let mut page = AnalyticsPage::new(FallbackPolicy::Error, 7).with_range(TimeRange::All);
        page.load(&client, &PageScope::new()).await;
        assert_eq!(page.state.source(), Some(DataSource::Remote));
        assert!(page.state.data().unwrap().server.is_none());
    }

    #[tokio::test]
    async fn test_placeholder_report() {
        let stub = StubServer::start().await;
        stub.fail_path("/transactions");
        let client = stub.signed_in_client(1);

        let mut page = AnalyticsPage::new(FallbackPolicy::Placeholder { seed: 42 }, 7)
            .with_range(TimeRange::All);
        page.load(&client, &PageScope::new()).await;
        assert_eq!(page.state.source(), Some(DataSource::Placeholder));
        assert!(page.report(Utc::now()).unwrap().summary.total_count > 0);
    }
}
