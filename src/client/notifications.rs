//! Notification endpoints

use reqwest::Method;

use super::{ApiClient, ClientResult};
use crate::model::{Id, ListEnvelope, Notification};

impl ApiClient {
    /// `GET /notifications/user?id=`
    pub async fn get_user_notifications(&self, user_id: Id) -> ClientResult<Vec<Notification>> {
        let list: ListEnvelope<Notification> =
            self.get(&format!("/notifications/user?id={}", user_id)).await?;
        Ok(list.into_vec())
    }

    /// `GET /notifications` for the signed-in user
    pub async fn list_notifications(&self) -> ClientResult<Vec<Notification>> {
        let list: ListEnvelope<Notification> = self.get("/notifications").await?;
        Ok(list.into_vec())
    }

    /// `PATCH /notifications/:id/read`
    pub async fn mark_as_read(&self, id: Id) -> ClientResult<()> {
        self.send_unit::<()>(Method::PATCH, &format!("/notifications/{}/read", id), None)
            .await
    }

    /// `PATCH /notifications/mark-all-read`
    pub async fn mark_all_read(&self) -> ClientResult<()> {
        self.send_unit::<()>(Method::PATCH, "/notifications/mark-all-read", None)
            .await
    }

    /// `DELETE /notifications/:id`
    pub async fn delete_notification(&self, id: Id) -> ClientResult<()> {
        self.send_unit::<()>(Method::DELETE, &format!("/notifications/{}", id), None)
            .await
    }
}
