//! Money request endpoints
//!
//! The backend only lists requests per user; incoming and outgoing views
//! are split client-side using the session user.

use reqwest::Method;

use super::{ApiClient, Auth, ClientResult};
use crate::model::{CreateMoneyRequest, Id, ItemEnvelope, ListEnvelope, MoneyRequest};

impl ApiClient {
    /// `POST /requests/create`
    pub async fn create_request(&self, request: &CreateMoneyRequest) -> ClientResult<MoneyRequest> {
        let created: ItemEnvelope<MoneyRequest> = self
            .send_json(Method::POST, "/requests/create", request, Auth::Required)
            .await?;
        Ok(created.into_inner())
    }

    /// `GET /requests/user/:id`
    pub async fn get_user_requests(&self, user_id: Id) -> ClientResult<Vec<MoneyRequest>> {
        let list: ListEnvelope<MoneyRequest> =
            self.get(&format!("/requests/user/{}", user_id)).await?;
        Ok(list.into_vec())
    }

    /// Requests asking the signed-in user to pay
    pub async fn get_incoming_requests(&self) -> ClientResult<Vec<MoneyRequest>> {
        let viewer = self.viewer()?;
        let mut list = self.get_user_requests(viewer).await?;
        list.retain(|r| r.is_incoming_for(viewer));
        Ok(list)
    }

    /// Requests the signed-in user sent
    pub async fn get_outgoing_requests(&self) -> ClientResult<Vec<MoneyRequest>> {
        let viewer = self.viewer()?;
        let mut list = self.get_user_requests(viewer).await?;
        list.retain(|r| r.is_outgoing_for(viewer));
        Ok(list)
    }

    /// `PUT /requests/:id/approve`
    pub async fn approve_request(&self, id: Id) -> ClientResult<()> {
        self.send_unit::<()>(Method::PUT, &format!("/requests/{}/approve", id), None)
            .await
    }

    /// `PUT /requests/:id/reject`
    pub async fn reject_request(&self, id: Id) -> ClientResult<()> {
        self.send_unit::<()>(Method::PUT, &format!("/requests/{}/reject", id), None)
            .await
    }

    /// `DELETE /requests/:id`
    pub async fn cancel_request(&self, id: Id) -> ClientResult<()> {
        self.send_unit::<()>(Method::DELETE, &format!("/requests/{}", id), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{CreateMoneyRequest, RequestStatus};
    use crate::test_support::StubServer;

    #[tokio::test]
    async fn test_incoming_outgoing_split() {
        let stub = StubServer::start().await;
        let client = stub.signed_in_client(1);

        let incoming = client.get_incoming_requests().await.unwrap();
        let outgoing = client.get_outgoing_requests().await.unwrap();
        assert!(!incoming.is_empty() && !outgoing.is_empty());
        assert!(incoming.iter().all(|r| r.recipient_id == 1));
        assert!(outgoing.iter().all(|r| r.requester_id == 1));
    }

    #[tokio::test]
    async fn test_create_and_respond() {
        let stub = StubServer::start().await;
        let bob = stub.signed_in_client(2);

        let created = bob
            .create_request(&CreateMoneyRequest {
                requester_id: 2,
                recipient_id: 1,
                amount: 15.0,
                message: "Cinema".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.status, RequestStatus::Pending);

        let ada = stub.signed_in_client(1);
        ada.approve_request(created.id).await.unwrap();
        let list = ada.get_user_requests(1).await.unwrap();
        let approved = list.iter().find(|r| r.id == created.id).unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);

        let outgoing = ada.get_outgoing_requests().await.unwrap();
        let pending = outgoing.iter().find(|r| r.is_pending()).unwrap();
        ada.cancel_request(pending.id).await.unwrap();
        assert!(ada
            .get_outgoing_requests()
            .await
            .unwrap()
            .iter()
            .all(|r| r.id != pending.id));
    }
}
