//! HTTP API Client
//!
//! Functions for talking to the payments REST API. Every call except
//! login and registration takes the current [`Session`] and sends its
//! bearer token.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

use payclone::model::{
    AmountRequest, ChangePasswordRequest, CreateMoneyRequest, CreateWalletRequest, ItemEnvelope,
    ListEnvelope, LoginRequest, LoginResponse, RegisterRequest, SendMoneyRequest,
    UpdateProfileRequest,
};
use payclone::{Id, MoneyRequest, Notification, Session, Transaction, User, Wallet};

use crate::state::storage;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

const API_URL_KEY: &str = "payclone_api_url";

/// API base URL from local storage, or the default
pub fn get_api_base() -> String {
    let url = storage::read(API_URL_KEY).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

/// Persist an API base URL override
pub fn set_api_base(url: &str) {
    storage::write(API_URL_KEY, &normalize_base(url));
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ============ Errors ============

/// Failed API call. `status` is 0 when no HTTP response was received.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn network(error: impl fmt::Display) -> Self {
        Self {
            status: 0,
            message: format!("Network error: {}", error),
        }
    }

    fn decode(error: impl fmt::Display) -> Self {
        Self {
            status: 0,
            message: format!("Unexpected response: {}", error),
        }
    }

    /// Prefer the server's `message`/`error` field, then the raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        let from_json = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            });

        let message = match from_json {
            Some(message) => message,
            None if !body.trim().is_empty() => body.trim().to_string(),
            None => format!("Request failed ({})", status),
        };
        Self { status, message }
    }

    /// Session missing, expired or rejected
    pub fn is_auth(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ============ Plumbing ============

fn url(path: &str) -> String {
    format!("{}{}", get_api_base(), path)
}

fn authed(builder: RequestBuilder, session: &Session) -> RequestBuilder {
    builder.header("Authorization", &session.bearer())
}

async fn check(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    web_sys::console::warn_1(&format!("API error {}: {}", status, body).into());
    Err(ApiError::from_status(status, &body))
}

async fn send(builder: RequestBuilder) -> ApiResult<Response> {
    let response = builder.send().await.map_err(ApiError::network)?;
    check(response).await
}

async fn send_body<B: Serialize>(builder: RequestBuilder, body: &B) -> ApiResult<Response> {
    let request: Request = builder.json(body).map_err(ApiError::network)?;
    let response = request.send().await.map_err(ApiError::network)?;
    check(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await.map_err(ApiError::network)?;
    serde_json::from_str(&body).map_err(ApiError::decode)
}

async fn get<T: DeserializeOwned>(session: &Session, path: &str) -> ApiResult<T> {
    decode(send(authed(Request::get(&url(path)), session)).await?).await
}

// ============ Auth ============

pub async fn login(email: &str, password: &str) -> ApiResult<LoginResponse> {
    let body = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    decode(send_body(Request::post(&url("/users/login")), &body).await?).await
}

pub async fn register(request: &RegisterRequest) -> ApiResult<User> {
    decode(send_body(Request::post(&url("/users/register")), request).await?).await
}

pub async fn me(session: &Session) -> ApiResult<User> {
    get(session, "/users/me").await
}

// ============ Users ============

pub async fn find_user_by_email(session: &Session, email: &str) -> ApiResult<Option<User>> {
    let query = String::from(js_sys::encode_uri_component(email.trim()));
    let users: Vec<User> = get(session, &format!("/users/search?q={}", query)).await?;
    Ok(users
        .into_iter()
        .find(|u| u.email.eq_ignore_ascii_case(email.trim())))
}

pub async fn update_profile(session: &Session, update: &UpdateProfileRequest) -> ApiResult<User> {
    let builder = authed(Request::put(&url(&format!("/users/{}", session.user_id))), session);
    decode(send_body(builder, update).await?).await
}

pub async fn change_password(session: &Session, change: &ChangePasswordRequest) -> ApiResult<()> {
    let path = format!("/users/{}/password", session.user_id);
    send_body(authed(Request::put(&url(&path)), session), change).await?;
    Ok(())
}

// ============ Wallets ============

/// Existing wallet, or a new empty one
pub async fn get_or_create_wallet(session: &Session) -> ApiResult<Wallet> {
    match get(session, &format!("/wallets/user/{}", session.user_id)).await {
        Ok(wallet) => Ok(wallet),
        Err(e) if e.is_not_found() => {
            let body = CreateWalletRequest::empty(session.user_id);
            let created: ItemEnvelope<Wallet> =
                decode(send_body(authed(Request::post(&url("/wallets")), session), &body).await?).await?;
            Ok(created.into_inner())
        }
        Err(e) => Err(e),
    }
}

pub async fn add_money(session: &Session, amount: f64) -> ApiResult<Wallet> {
    let body = AmountRequest {
        user_id: session.user_id,
        amount,
    };
    let wallet: ItemEnvelope<Wallet> =
        decode(send_body(authed(Request::post(&url("/wallets/add")), session), &body).await?).await?;
    Ok(wallet.into_inner())
}

// ============ Transactions ============

pub async fn user_transactions(session: &Session) -> ApiResult<Vec<Transaction>> {
    let list: ListEnvelope<Transaction> =
        get(session, &format!("/transactions/user/{}", session.user_id)).await?;
    Ok(list.into_vec())
}

pub async fn send_money(session: &Session, request: &SendMoneyRequest) -> ApiResult<Transaction> {
    let builder = authed(Request::post(&url("/transactions/send")), session);
    decode(send_body(builder, request).await?).await
}

// ============ Notifications ============

pub async fn user_notifications(session: &Session) -> ApiResult<Vec<Notification>> {
    let list: ListEnvelope<Notification> =
        get(session, &format!("/notifications/user?id={}", session.user_id)).await?;
    Ok(list.into_vec())
}

pub async fn mark_as_read(session: &Session, id: Id) -> ApiResult<()> {
    let path = format!("/notifications/{}/read", id);
    send(authed(Request::patch(&url(&path)), session)).await?;
    Ok(())
}

pub async fn mark_all_read(session: &Session) -> ApiResult<()> {
    send(authed(Request::patch(&url("/notifications/mark-all-read")), session)).await?;
    Ok(())
}

pub async fn delete_notification(session: &Session, id: Id) -> ApiResult<()> {
    send(authed(Request::delete(&url(&format!("/notifications/{}", id))), session)).await?;
    Ok(())
}

// ============ Money requests ============

pub async fn user_requests(session: &Session) -> ApiResult<Vec<MoneyRequest>> {
    let list: ListEnvelope<MoneyRequest> =
        get(session, &format!("/requests/user/{}", session.user_id)).await?;
    Ok(list.into_vec())
}

pub async fn create_request(session: &Session, request: &CreateMoneyRequest) -> ApiResult<MoneyRequest> {
    let builder = authed(Request::post(&url("/requests/create")), session);
    let created: ItemEnvelope<MoneyRequest> = decode(send_body(builder, request).await?).await?;
    Ok(created.into_inner())
}

/// What the signed-in user does with a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
    Cancel,
}

impl Decision {
    pub fn past_tense(&self) -> &'static str {
        match self {
            Decision::Approve => "approved",
            Decision::Reject => "rejected",
            Decision::Cancel => "cancelled",
        }
    }
}

pub async fn respond_to_request(session: &Session, id: Id, decision: Decision) -> ApiResult<()> {
    let builder = match decision {
        Decision::Approve => Request::put(&url(&format!("/requests/{}/approve", id))),
        Decision::Reject => Request::put(&url(&format!("/requests/{}/reject", id))),
        Decision::Cancel => Request::delete(&url(&format!("/requests/{}", id))),
    };
    send(authed(builder, session)).await?;
    Ok(())
}
