//! Money requests: incoming and outgoing lists plus their actions

use super::state::{fetch, resolve, FallbackPolicy, PageError, PageState};
use crate::client::ApiClient;
use crate::lifecycle::PageScope;
use crate::model::{CreateMoneyRequest, Id, MoneyRequest};
use crate::validation::validate_request;

#[derive(Debug, Clone, PartialEq)]
pub struct RequestsView {
    pub viewer: Id,
    /// Asking the viewer to pay
    pub incoming: Vec<MoneyRequest>,
    /// Sent by the viewer
    pub outgoing: Vec<MoneyRequest>,
}

impl RequestsView {
    pub fn split(viewer: Id, all: Vec<MoneyRequest>) -> Self {
        let (incoming, outgoing): (Vec<_>, Vec<_>) = all
            .into_iter()
            .filter(|r| r.is_incoming_for(viewer) || r.is_outgoing_for(viewer))
            .partition(|r| r.is_incoming_for(viewer));
        Self {
            viewer,
            incoming,
            outgoing,
        }
    }

    pub fn find(&self, id: Id) -> Option<&MoneyRequest> {
        self.incoming.iter().chain(&self.outgoing).find(|r| r.id == id)
    }

    pub fn pending_incoming(&self) -> usize {
        self.incoming.iter().filter(|r| r.is_pending()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Approve,
    Reject,
    Cancel,
}

pub struct RequestsPage {
    policy: FallbackPolicy,
    pub state: PageState<RequestsView>,
}

impl RequestsPage {
    pub fn new(policy: FallbackPolicy) -> Self {
        Self {
            policy,
            state: PageState::Loading,
        }
    }

    pub async fn load(&mut self, client: &ApiClient, scope: &PageScope) -> &PageState<RequestsView> {
        let viewer = match client.viewer() {
            Ok(viewer) => viewer,
            Err(_) => {
                self.state = PageState::Error(PageError::Unauthenticated);
                return &self.state;
            }
        };

        self.state = PageState::Loading;
        // One fetch so both directions come from the same snapshot
        let result = fetch(scope, client.get_user_requests(viewer))
            .await
            .map(|all| RequestsView::split(viewer, all));
        self.state = resolve(result, self.policy, |gen| {
            RequestsView::split(viewer, gen.requests(viewer, 10))
        });
        &self.state
    }

    /// Ask another user (by email) for money
    pub async fn create(
        &mut self,
        client: &ApiClient,
        scope: &PageScope,
        recipient_email: &str,
        amount: f64,
        message: &str,
    ) -> Result<MoneyRequest, PageError> {
        let session = client.session().ok_or(PageError::Unauthenticated)?;
        let (email, amount, message) = validate_request(recipient_email, amount, &session.email, message)?;

        let recipient = fetch(scope, client.find_user_by_email(&email))
            .await?
            .ok_or_else(|| PageError::Failed(format!("No user found with email {}", email)))?;

        let body = CreateMoneyRequest {
            requester_id: session.user_id,
            recipient_id: recipient.id,
            amount,
            message,
        };
        let created = fetch(scope, client.create_request(&body)).await?;

        self.load(client, scope).await;
        Ok(created)
    }

    pub async fn approve(&mut self, client: &ApiClient, scope: &PageScope, id: Id) -> Result<(), PageError> {
        self.respond(client, scope, id, Decision::Approve).await
    }

    pub async fn reject(&mut self, client: &ApiClient, scope: &PageScope, id: Id) -> Result<(), PageError> {
        self.respond(client, scope, id, Decision::Reject).await
    }

    pub async fn cancel(&mut self, client: &ApiClient, scope: &PageScope, id: Id) -> Result<(), PageError> {
        self.respond(client, scope, id, Decision::Cancel).await
    }

    async fn respond(
        &mut self,
        client: &ApiClient,
        scope: &PageScope,
        id: Id,
        decision: Decision,
    ) -> Result<(), PageError> {
        let view = self.state.require()?;
        let request = view
            .find(id)
            .ok_or_else(|| PageError::Failed(format!("Request {} not found", id)))?;

        let allowed = match decision {
            Decision::Approve | Decision::Reject => request.can_respond(view.viewer),
            Decision::Cancel => request.can_cancel(view.viewer),
        };
        if !allowed {
            return Err(PageError::Failed(format!(
                "Request {} is {} and cannot be changed",
                id,
                request.status.as_str().to_lowercase()
            )));
        }

        let call = match decision {
            Decision::Approve => fetch(scope, client.approve_request(id)).await,
            Decision::Reject => fetch(scope, client.reject_request(id)).await,
            Decision::Cancel => fetch(scope, client.cancel_request(id)).await,
        };
        call?;

        self.load(client, scope).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RequestStatus;
    use crate::test_support::StubServer;
    use crate::validation::ValidationError;

    async fn loaded(stub: &StubServer, user: Id) -> (ApiClient, RequestsPage) {
        let client = stub.signed_in_client(user);
        let mut page = RequestsPage::new(FallbackPolicy::Error);
        page.load(&client, &PageScope::new()).await;
        (client, page)
    }

    #[tokio::test]
    async fn test_load_splits_directions() {
        let stub = StubServer::start().await;
        let (_, page) = loaded(&stub, 1).await;
        let view = page.state.data().unwrap();
        assert_eq!(view.incoming.len(), 1);
        assert_eq!(view.outgoing.len(), 2);
        assert_eq!(view.pending_incoming(), 1);
    }

    #[tokio::test]
    async fn test_load_fetches_once() {
        let stub = StubServer::start().await;
        let client = stub.signed_in_client(1);
        let mut page = RequestsPage::new(FallbackPolicy::Error);

        page.load(&client, &PageScope::new()).await;
        assert_eq!(stub.request_count(), 1);
        assert_eq!(stub.last_request().unwrap().path, "/requests/user/1");
    }

    #[tokio::test]
    async fn test_approve_pending_incoming() {
        let stub = StubServer::start().await;
        let (client, mut page) = loaded(&stub, 1).await;

        page.approve(&client, &PageScope::new(), 301).await.unwrap();
        let view = page.state.data().unwrap();
        assert_eq!(view.find(301).unwrap().status, RequestStatus::Approved);
        assert_eq!(view.pending_incoming(), 0);
    }

    #[tokio::test]
    async fn test_non_pending_is_refused_locally() {
        let stub = StubServer::start().await;
        let (client, mut page) = loaded(&stub, 1).await;
        let before = stub.request_count();

        // Already approved
        assert!(page.cancel(&client, &PageScope::new(), 303).await.is_err());
        // Outgoing requests cannot be approved by their sender
        assert!(page.approve(&client, &PageScope::new(), 302).await.is_err());
        assert_eq!(stub.request_count(), before);
    }

    #[tokio::test]
    async fn test_cancel_outgoing() {
        let stub = StubServer::start().await;
        let (client, mut page) = loaded(&stub, 1).await;

        page.cancel(&client, &PageScope::new(), 302).await.unwrap();
        assert!(page.state.data().unwrap().find(302).is_none());
    }

    #[tokio::test]
    async fn test_create() {
        let stub = StubServer::start().await;
        let (client, mut page) = loaded(&stub, 1).await;
        let scope = PageScope::new();

        let invalid = page.create(&client, &scope, "bob@example.com", -1.0, "").await;
        assert_eq!(invalid, Err(PageError::Invalid(ValidationError::NonPositiveAmount)));

        let created = page
            .create(&client, &scope, "cara@example.com", 12.5, " Books ")
            .await
            .unwrap();
        assert_eq!(created.recipient_id, 3);
        assert_eq!(created.message, "Books");
        assert_eq!(page.state.data().unwrap().outgoing.len(), 3);
    }
}
