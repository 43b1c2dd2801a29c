//! Notification center
//!
//! Every change is applied locally first, then sent. A refused or failed
//! request rolls the local change back so the list never drifts from the
//! server.

use super::state::{fetch, resolve, FallbackPolicy, PageError, PageState};
use crate::client::{ApiClient, ClientResult};
use crate::filter::NotificationFilter;
use crate::inbox::{ChangeTicket, NotificationInbox};
use crate::lifecycle::PageScope;
use crate::model::{Id, Notification};
use std::future::Future;

pub struct NotificationsPage {
    policy: FallbackPolicy,
    pub filter: NotificationFilter,
    pub state: PageState<NotificationInbox>,
}

impl NotificationsPage {
    pub fn new(policy: FallbackPolicy) -> Self {
        Self {
            policy,
            filter: NotificationFilter::All,
            state: PageState::Loading,
        }
    }

    pub async fn load(&mut self, client: &ApiClient, scope: &PageScope) -> &PageState<NotificationInbox> {
        let viewer = match client.viewer() {
            Ok(viewer) => viewer,
            Err(_) => {
                self.state = PageState::Error(PageError::Unauthenticated);
                return &self.state;
            }
        };

        self.state = PageState::Loading;
        let result = fetch(scope, client.get_user_notifications(viewer))
            .await
            .map(|mut list| {
                list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                NotificationInbox::new(list)
            });
        self.state = resolve(result, self.policy, |gen| {
            NotificationInbox::new(gen.notifications(viewer, 12))
        });
        &self.state
    }

    /// Notifications passing the current filter
    pub fn visible(&self) -> Vec<&Notification> {
        self.state
            .data()
            .map(|inbox| inbox.filtered(&self.filter))
            .unwrap_or_default()
    }

    pub fn unread_count(&self) -> usize {
        self.state.data().map_or(0, NotificationInbox::unread_count)
    }

    pub async fn mark_read(&mut self, client: &ApiClient, scope: &PageScope, id: Id) -> Result<(), PageError> {
        let ticket = self.state.require_mut()?.mark_read(id);
        self.reconcile(scope, ticket, client.mark_as_read(id)).await
    }

    pub async fn mark_all_read(&mut self, client: &ApiClient, scope: &PageScope) -> Result<(), PageError> {
        let ticket = self.state.require_mut()?.mark_all_read();
        self.reconcile(scope, ticket, client.mark_all_read()).await
    }

    pub async fn delete(&mut self, client: &ApiClient, scope: &PageScope, id: Id) -> Result<(), PageError> {
        let ticket = self.state.require_mut()?.delete(id);
        self.reconcile(scope, ticket, client.delete_notification(id)).await
    }

    /// Send the server half of a local change, then confirm or undo it
    async fn reconcile(
        &mut self,
        scope: &PageScope,
        ticket: Option<ChangeTicket>,
        call: impl Future<Output = ClientResult<()>>,
    ) -> Result<(), PageError> {
        let Some(ticket) = ticket else {
            // Nothing changed locally, so there is nothing to tell the server
            return Ok(());
        };

        let outcome = fetch(scope, call).await;
        let inbox = self.state.require_mut()?;
        match outcome {
            Ok(()) => {
                inbox.confirm(&ticket);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Notification change {:?} failed: {}", ticket.ids(), e);
                inbox.rollback(&ticket);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationCategory;
    use crate::test_support::StubServer;
    use axum::http::Method;

    async fn loaded(stub: &StubServer) -> (ApiClient, NotificationsPage) {
        let client = stub.signed_in_client(1);
        let mut page = NotificationsPage::new(FallbackPolicy::Error);
        page.load(&client, &PageScope::new()).await;
        (client, page)
    }

    #[tokio::test]
    async fn test_filtering() {
        let stub = StubServer::start().await;
        let (_, mut page) = loaded(&stub).await;
        assert_eq!(page.visible().len(), 3);
        assert_eq!(page.unread_count(), 2);

        page.filter = NotificationFilter::Unread;
        assert_eq!(page.visible().len(), 2);

        page.filter = NotificationFilter::Category(NotificationCategory::Request);
        let requests = page.visible();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].id, 202);
    }

    #[tokio::test]
    async fn test_mark_all_read_confirms() {
        let stub = StubServer::start().await;
        let (client, mut page) = loaded(&stub).await;
        let scope = PageScope::new();

        page.mark_all_read(&client, &scope).await.unwrap();
        assert_eq!(page.unread_count(), 0);
        assert!(stub.state().notifications.iter().filter(|n| n.user_id == 1).all(|n| n.read));

        // Already read: no request goes out
        let before = stub.request_count();
        page.mark_all_read(&client, &scope).await.unwrap();
        page.mark_read(&client, &scope, 201).await.unwrap();
        assert_eq!(stub.request_count(), before);
    }

    #[tokio::test]
    async fn test_failed_delete_restores_item() {
        let stub = StubServer::start().await;
        let (client, mut page) = loaded(&stub).await;
        let scope = PageScope::new();
        let order: Vec<Id> = page.visible().iter().map(|n| n.id).collect();

        stub.fail_method(Method::DELETE, "/notifications");
        assert!(page.delete(&client, &scope, 202).await.is_err());
        let restored: Vec<Id> = page.visible().iter().map(|n| n.id).collect();
        assert_eq!(restored, order);

        stub.clear_failures();
        page.delete(&client, &scope, 202).await.unwrap();
        assert!(page.visible().iter().all(|n| n.id != 202));
        assert!(stub.state().notifications.iter().all(|n| n.id != 202));
    }

    #[tokio::test]
    async fn test_failed_mark_all_read_rolls_back() {
        let stub = StubServer::start().await;
        let (client, mut page) = loaded(&stub).await;

        stub.fail_method(Method::PATCH, "/notifications");
        assert!(page.mark_all_read(&client, &PageScope::new()).await.is_err());
        assert_eq!(page.unread_count(), 2);
    }
}
