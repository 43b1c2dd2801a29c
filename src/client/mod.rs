//! Payments API Client
//!
//! Typed facade over the payments REST API, one method per endpoint,
//! grouped by resource. Every request carries an `X-Request-Id`; everything
//! except login and registration also carries the session's bearer token.
//! There are no retries: a failed call is reported to the page that made it.

mod auth;
pub mod error;
mod notifications;
mod requests;
mod transactions;
mod users;
mod wallets;

pub use error::{ClientError, ClientResult};

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::model::Id;
use crate::session::Session;

/// Correlation header attached to every request
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Required,
    Anonymous,
}

/// Payments REST API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// Create a client without a session
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Id of the signed-in user
    pub fn viewer(&self) -> ClientResult<Id> {
        self.session
            .as_ref()
            .map(|s| s.user_id)
            .ok_or(ClientError::MissingSession)
    }

    fn request(&self, method: Method, path: &str, auth: Auth) -> ClientResult<RequestBuilder> {
        let mut builder = self
            .http
            .request(method.clone(), format!("{}{}", self.base_url, path));

        if auth == Auth::Required {
            let session = self.session.as_ref().ok_or(ClientError::MissingSession)?;
            builder = builder.header(reqwest::header::AUTHORIZATION, session.bearer());
        }

        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(%method, path, request_id = %request_id, "API request");
        Ok(builder.header(REQUEST_ID_HEADER, request_id))
    }

    async fn execute(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await.map_err(ClientError::from_transport)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("API error {}: {}", status, message);
            Err(ClientError::from_status(status, message))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let body = response.text().await.map_err(ClientError::from_transport)?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Authenticated GET returning JSON
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let builder = self.request(Method::GET, path, Auth::Required)?;
        Self::decode(self.execute(builder).await?).await
    }

    /// JSON body in, JSON body out
    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B, auth: Auth) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path, auth)?.json(body);
        Self::decode(self.execute(builder).await?).await
    }

    /// Authenticated call whose response body is ignored
    async fn send_unit<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<()> {
        let mut builder = self.request(method, path, Auth::Required)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder).await.map(|_| ())
    }
}
