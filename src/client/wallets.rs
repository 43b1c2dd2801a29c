//! Wallet endpoints

use reqwest::Method;

use super::{ApiClient, Auth, ClientError, ClientResult};
use crate::model::{AmountRequest, CreateWalletRequest, Id, ItemEnvelope, Wallet};

impl ApiClient {
    /// `GET /wallets/user/:id`; `None` when the user has no wallet yet
    pub async fn get_user_wallet(&self, user_id: Id) -> ClientResult<Option<Wallet>> {
        match self.get(&format!("/wallets/user/{}", user_id)).await {
            Ok(wallet) => Ok(Some(wallet)),
            Err(ClientError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `POST /wallets`
    pub async fn create_wallet(&self, request: &CreateWalletRequest) -> ClientResult<Wallet> {
        let wallet: ItemEnvelope<Wallet> = self
            .send_json(Method::POST, "/wallets", request, Auth::Required)
            .await?;
        Ok(wallet.into_inner())
    }

    /// Existing wallet, or a new empty one in the default currency
    pub async fn get_or_create_wallet(&self, user_id: Id) -> ClientResult<Wallet> {
        if let Some(wallet) = self.get_user_wallet(user_id).await? {
            return Ok(wallet);
        }
        tracing::info!("Creating wallet for user {}", user_id);
        self.create_wallet(&CreateWalletRequest::empty(user_id)).await
    }

    /// `POST /wallets/credit`
    pub async fn credit_wallet(&self, user_id: Id, amount: f64) -> ClientResult<Wallet> {
        self.post_amount("/wallets/credit", user_id, amount).await
    }

    /// `POST /wallets/add`
    pub async fn add_money(&self, user_id: Id, amount: f64) -> ClientResult<Wallet> {
        self.post_amount("/wallets/add", user_id, amount).await
    }

    async fn post_amount(&self, path: &str, user_id: Id, amount: f64) -> ClientResult<Wallet> {
        let body = AmountRequest { user_id, amount };
        let wallet: ItemEnvelope<Wallet> = self
            .send_json(Method::POST, path, &body, Auth::Required)
            .await?;
        Ok(wallet.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::StubServer;

    #[tokio::test]
    async fn test_missing_wallet_is_none() {
        let stub = StubServer::start().await;
        let client = stub.signed_in_client(3);
        assert!(client.get_user_wallet(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_or_create_wallet() {
        let stub = StubServer::start().await;
        let client = stub.signed_in_client(3);

        let wallet = client.get_or_create_wallet(3).await.unwrap();
        assert_eq!(wallet.user_id, 3);
        assert_eq!(wallet.balance, 0.0);
        assert_eq!(wallet.currency, "INR");

        // Second call finds the wallet instead of creating another
        let again = client.get_or_create_wallet(3).await.unwrap();
        assert_eq!(again.id, wallet.id);
        assert_eq!(stub.wallet_count(), 3);
    }

    #[tokio::test]
    async fn test_add_and_credit() {
        let stub = StubServer::start().await;
        let client = stub.signed_in_client(1);

        let before = client.get_user_wallet(1).await.unwrap().unwrap().balance;
        let after = client.add_money(1, 25.5).await.unwrap();
        assert_eq!(after.balance, before + 25.5);

        let credited = client.credit_wallet(1, 4.5).await.unwrap();
        assert_eq!(credited.balance, before + 30.0);
    }
}
