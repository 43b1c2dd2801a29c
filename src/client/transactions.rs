//! Transaction endpoints

use reqwest::Method;

use super::{ApiClient, Auth, ClientResult};
use crate::model::{Id, ListEnvelope, Page, SendMoneyRequest, Transaction};

impl ApiClient {
    /// `GET /transactions/user/:id`
    pub async fn get_user_transactions(&self, user_id: Id) -> ClientResult<Vec<Transaction>> {
        let list: ListEnvelope<Transaction> =
            self.get(&format!("/transactions/user/{}", user_id)).await?;
        Ok(list.into_vec())
    }

    /// `GET /transactions?page=&size=`
    pub async fn list_transactions(&self, page: u32, size: u32) -> ClientResult<Page<Transaction>> {
        self.get(&format!("/transactions?page={}&size={}", page, size))
            .await
    }

    /// `POST /transactions`
    pub async fn create_transaction(&self, request: &SendMoneyRequest) -> ClientResult<Transaction> {
        self.send_json(Method::POST, "/transactions", request, Auth::Required)
            .await
    }

    /// `POST /transactions/send`
    pub async fn send_money(&self, request: &SendMoneyRequest) -> ClientResult<Transaction> {
        self.send_json(Method::POST, "/transactions/send", request, Auth::Required)
            .await
    }
}
