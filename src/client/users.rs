//! User endpoints

use reqwest::Method;

use super::{ApiClient, Auth, ClientResult};
use crate::model::{ChangePasswordRequest, Id, UpdateProfileRequest, User, UserAnalytics};

impl ApiClient {
    /// `GET /users/search?q=`
    pub async fn search_users(&self, query: &str) -> ClientResult<Vec<User>> {
        self.get(&format!("/users/search?q={}", urlencoding::encode(query.trim())))
            .await
    }

    /// Exact (case-insensitive) email match among search results
    pub async fn find_user_by_email(&self, email: &str) -> ClientResult<Option<User>> {
        let users = self.search_users(email).await?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim())))
    }

    /// `GET /users/:id`
    pub async fn get_user(&self, id: Id) -> ClientResult<User> {
        self.get(&format!("/users/{}", id)).await
    }

    /// `GET /users/analytics/:id`
    pub async fn get_user_analytics(&self, id: Id) -> ClientResult<UserAnalytics> {
        self.get(&format!("/users/analytics/{}", id)).await
    }

    /// `PUT /users/:id`
    pub async fn update_profile(&self, id: Id, update: &UpdateProfileRequest) -> ClientResult<User> {
        self.send_json(Method::PUT, &format!("/users/{}", id), update, Auth::Required)
            .await
    }

    /// `PUT /users/:id/password`
    pub async fn change_password(&self, id: Id, change: &ChangePasswordRequest) -> ClientResult<()> {
        self.send_unit(Method::PUT, &format!("/users/{}/password", id), Some(change))
            .await
    }
}
