//! Authentication endpoints

use reqwest::Method;

use super::{ApiClient, Auth, ClientResult};
use crate::model::{LoginRequest, LoginResponse, RegisterRequest, User};

impl ApiClient {
    /// `POST /users/login`
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, "/users/login", &body, Auth::Anonymous)
            .await
    }

    /// `POST /users/register`
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        self.send_json(Method::POST, "/users/register", request, Auth::Anonymous)
            .await
    }

    /// `GET /users/me`
    pub async fn me(&self) -> ClientResult<User> {
        self.get("/users/me").await
    }
}
