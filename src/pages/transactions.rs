//! Transaction history: time range, search, type filter, paging and export

use chrono::{DateTime, Utc};
use std::io;

use super::state::{fetch, resolve, FallbackPolicy, PageError, PageState};
use crate::client::ApiClient;
use crate::export::{self, ExportError};
use crate::filter::{paginate, TimeRange, TransactionFilter};
use crate::lifecycle::PageScope;
use crate::model::{Id, Transaction};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    pub range: TimeRange,
    pub filter: TransactionFilter,
    /// Zero-based
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsView {
    pub viewer: Id,
    /// Newest first
    pub transactions: Vec<Transaction>,
}

/// One rendered page of the filtered list
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSlice {
    pub rows: Vec<Transaction>,
    pub page: usize,
    pub total_pages: usize,
    pub matching: usize,
}

pub struct TransactionsPage {
    policy: FallbackPolicy,
    page_size: usize,
    query: TransactionQuery,
    pub state: PageState<TransactionsView>,
}

impl TransactionsPage {
    pub fn new(policy: FallbackPolicy, page_size: usize) -> Self {
        Self {
            policy,
            page_size,
            query: TransactionQuery::default(),
            state: PageState::Loading,
        }
    }

    pub async fn load(&mut self, client: &ApiClient, scope: &PageScope) -> &PageState<TransactionsView> {
        let viewer = match client.viewer() {
            Ok(viewer) => viewer,
            Err(_) => {
                self.state = PageState::Error(PageError::Unauthenticated);
                return &self.state;
            }
        };

        self.state = PageState::Loading;
        let result = fetch(scope, client.get_user_transactions(viewer))
            .await
            .map(|list| TransactionsView::new(viewer, list));
        self.state = resolve(result, self.policy, |gen| {
            TransactionsView::new(viewer, gen.transactions(viewer, 45))
        });
        &self.state
    }

    pub fn query(&self) -> &TransactionQuery {
        &self.query
    }

    /// Replace the query; paging restarts when the filters change
    pub fn set_query(&mut self, query: TransactionQuery) {
        let filters_changed = query.range != self.query.range || query.filter != self.query.filter;
        self.query = query;
        if filters_changed {
            self.query.page = 0;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.page = page;
    }

    /// Range and filter applied, newest first
    pub fn visible(&self, now: DateTime<Utc>) -> Vec<Transaction> {
        match self.state.data() {
            Some(view) => {
                let in_range = self.query.range.apply(&view.transactions, now);
                self.query.filter.apply(&in_range, view.viewer)
            }
            None => Vec::new(),
        }
    }

    pub fn current_page(&self, now: DateTime<Utc>) -> TransactionSlice {
        let visible = self.visible(now);
        let (_, total_pages) = paginate(&visible, 0, self.page_size);
        // Past the end shows the last page
        let page = self.query.page.min(total_pages - 1);
        let (rows, _) = paginate(&visible, page, self.page_size);
        TransactionSlice {
            rows: rows.to_vec(),
            page,
            total_pages,
            matching: visible.len(),
        }
    }

    /// Write the filtered list (all pages) as CSV
    pub fn export_to<W: io::Write>(&self, writer: W, now: DateTime<Utc>) -> Result<usize, ExportError> {
        let viewer = self.state.data().map(|v| v.viewer).unwrap_or_default();
        export::write_csv(writer, &self.visible(now), viewer)
    }

    pub fn export_csv(&self, now: DateTime<Utc>) -> Result<String, PageError> {
        let view = self.state.require()?;
        Ok(export::to_csv_string(&self.visible(now), view.viewer)?)
    }
}

impl TransactionsView {
    pub fn new(viewer: Id, mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { viewer, transactions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::read_csv;
    use crate::filter::TypeFilter;
    use crate::test_support::StubServer;

    async fn loaded(stub: &StubServer, page_size: usize) -> TransactionsPage {
        let client = stub.signed_in_client(1);
        let mut page = TransactionsPage::new(FallbackPolicy::Error, page_size);
        page.load(&client, &PageScope::new()).await;
        page
    }

    #[tokio::test]
    async fn test_load_sorts_newest_first() {
        let stub = StubServer::start().await;
        let page = loaded(&stub, 10).await;
        let view = page.state.data().unwrap();
        assert_eq!(view.transactions.len(), 4);
        assert!(view
            .transactions
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_filters_and_paging() {
        let stub = StubServer::start().await;
        let mut page = loaded(&stub, 2).await;
        let now = Utc::now();

        let first = page.current_page(now);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.rows.len(), 2);

        page.set_page(1);
        page.set_query(TransactionQuery {
            filter: TransactionFilter::default().kind(TypeFilter::Received),
            ..page.query().clone()
        });
        assert_eq!(page.query().page, 0);
        let received = page.visible(now);
        assert_eq!(received.len(), 2);
        assert!(received.iter().all(|t| t.recipient_id == 1));

        page.set_query(TransactionQuery {
            filter: TransactionFilter::default().search("dinner"),
            ..Default::default()
        });
        assert_eq!(page.visible(now).len(), 1);
    }

    #[tokio::test]
    async fn test_page_past_end_shows_last_page() {
        let stub = StubServer::start().await;
        let mut page = loaded(&stub, 3).await;
        let now = Utc::now();

        page.set_page(7);
        let last = page.current_page(now);
        assert_eq!(last.total_pages, 2);
        assert_eq!(last.page, 1);
        assert_eq!(last.matching, 4);
        assert_eq!(last.rows.len(), 1);
        assert_eq!(last.rows[0].id, page.visible(now)[3].id);
    }

    #[tokio::test]
    async fn test_export_matches_filtered_list() {
        let stub = StubServer::start().await;
        let mut page = loaded(&stub, 10).await;
        let now = Utc::now();

        page.set_query(TransactionQuery {
            filter: TransactionFilter::default().kind(TypeFilter::Sent),
            ..Default::default()
        });
        let csv = page.export_csv(now).unwrap();
        let rows = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.kind == "DEBIT"));

        let mut buffer = Vec::new();
        assert_eq!(page.export_to(&mut buffer, now).unwrap(), 2);
    }

    #[tokio::test]
    async fn test_export_before_load_fails() {
        let page = TransactionsPage::new(FallbackPolicy::Error, 10);
        assert!(page.export_csv(Utc::now()).is_err());
        assert!(page.visible(Utc::now()).is_empty());
    }
}
