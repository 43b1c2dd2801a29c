//! In-process stub of the payments REST API for client and page tests.
//!
//! Serves the same routes as the real backend from in-memory state on an
//! ephemeral port. Tests can inject failures per path prefix, add latency,
//! and inspect every request the stub received.

use axum::extract::{Path, Query, Request, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::model::{
    AmountRequest, ChangePasswordRequest, CreateMoneyRequest, CreateWalletRequest, Id,
    LoginRequest, MoneyRequest, Notification, NotificationCategory, RegisterRequest,
    RequestStatus, SendMoneyRequest, Transaction, TransactionStatus, UpdateProfileRequest, User,
    Wallet,
};
use crate::session::Session;

type Shared = Arc<Mutex<StubState>>;
type Reply = Result<Json<Value>, StatusCode>;

const TOKEN_PREFIX: &str = "dummy-jwt-token-for-";

#[derive(Debug, Clone)]
pub struct StubUser {
    pub user: User,
    pub password: String,
}

/// One request as the stub saw it
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
}

#[derive(Debug, Default)]
pub struct StubState {
    pub users: Vec<StubUser>,
    pub wallets: Vec<Wallet>,
    pub transactions: Vec<Transaction>,
    pub notifications: Vec<Notification>,
    pub requests: Vec<MoneyRequest>,
    pub log: Vec<RequestRecord>,
    failures: Vec<(Option<Method>, String)>,
    delay: Option<std::time::Duration>,
}

fn user(id: Id, name: &str, email: &str, now: DateTime<Utc>) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        profile_picture: None,
        join_date: Some(now - Duration::days(200)),
    }
}

fn transaction(
    id: Id,
    sender_id: Id,
    recipient_id: Id,
    amount: f64,
    status: &str,
    timestamp: DateTime<Utc>,
    description: Option<&str>,
) -> Transaction {
    Transaction {
        id,
        sender_id,
        recipient_id,
        amount,
        status: TransactionStatus::parse_lenient(status),
        timestamp,
        description: description.map(str::to_string),
        kind: None,
    }
}

fn notification(id: Id, user_id: Id, message: &str, read: bool, ts: DateTime<Utc>) -> Notification {
    Notification {
        id,
        user_id,
        message: message.to_string(),
        timestamp: ts,
        read,
        category: None,
    }
}

fn money_request(
    id: Id,
    requester_id: Id,
    recipient_id: Id,
    amount: f64,
    message: &str,
    status: RequestStatus,
    ts: DateTime<Utc>,
) -> MoneyRequest {
    MoneyRequest {
        id,
        requester_id,
        recipient_id,
        amount,
        message: message.to_string(),
        status,
        timestamp: ts,
        requester_name: None,
        recipient_name: None,
    }
}

impl StubState {
    /// Three users; Ada (1) and Bob (2) have wallets and history, Cara (3) has neither
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let day = Duration::days(1);
        let mut ada_note = notification(201, 1, "You received $40.00 from Bob Stone", false, now - day);
        ada_note.category = Some(NotificationCategory::Transaction);

        Self {
            users: vec![
                StubUser {
                    user: user(1, "Ada Lovelace", "ada@example.com", now),
                    password: "secret1".to_string(),
                },
                StubUser {
                    user: user(2, "Bob Stone", "bob@example.com", now),
                    password: "hunter22".to_string(),
                },
                StubUser {
                    user: user(3, "Cara Diaz", "cara@example.com", now),
                    password: "secret3".to_string(),
                },
            ],
            wallets: vec![
                Wallet {
                    id: Some(1),
                    user_id: 1,
                    balance: 500.0,
                    currency: "INR".to_string(),
                },
                Wallet {
                    id: Some(2),
                    user_id: 2,
                    balance: 100.0,
                    currency: "INR".to_string(),
                },
            ],
            transactions: vec![
                transaction(101, 1, 2, 100.0, "COMPLETED", now - day, Some("Dinner")),
                transaction(102, 2, 1, 40.0, "COMPLETED", now - day * 2, Some("Refund")),
                transaction(103, 1, 2, 20.0, "PENDING", now - day * 3, None),
                transaction(
                    104,
                    2,
                    1,
                    15.0,
                    "FAILED: insufficient funds",
                    now - day * 4,
                    Some("Taxi"),
                ),
                transaction(105, 2, 3, 5.0, "COMPLETED", now - day * 5, None),
            ],
            notifications: vec![
                ada_note,
                notification(
                    202,
                    1,
                    "Bob Stone sent you a money request for $25.00",
                    false,
                    now - day * 2,
                ),
                notification(203, 1, "Your password was changed", true, now - day * 3),
                notification(204, 2, "Ada Lovelace sent you $100.00", false, now - day),
            ],
            requests: vec![
                money_request(301, 2, 1, 25.0, "Concert", RequestStatus::Pending, now - day),
                money_request(302, 1, 2, 10.0, "Coffee", RequestStatus::Pending, now - day * 2),
                money_request(303, 1, 3, 30.0, "Books", RequestStatus::Approved, now - day * 6),
            ],
            ..Default::default()
        }
    }

    fn caller(&self, headers: &HeaderMap) -> Result<Id, StatusCode> {
        let id = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .and_then(|v| v.strip_prefix(TOKEN_PREFIX))
            .and_then(|v| v.parse::<Id>().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        if self.users.iter().any(|u| u.user.id == id) {
            Ok(id)
        } else {
            Err(StatusCode::UNAUTHORIZED)
        }
    }

    fn user_mut(&mut self, id: Id) -> Result<&mut StubUser, StatusCode> {
        self.users
            .iter_mut()
            .find(|u| u.user.id == id)
            .ok_or(StatusCode::NOT_FOUND)
    }

    fn wallet_mut(&mut self, user_id: Id) -> Result<&mut Wallet, StatusCode> {
        self.wallets
            .iter_mut()
            .find(|w| w.user_id == user_id)
            .ok_or(StatusCode::NOT_FOUND)
    }

    /// Move funds and record a completed transaction
    fn transfer(
        &mut self,
        sender_id: Id,
        recipient_id: Id,
        amount: f64,
        description: Option<String>,
    ) -> Result<Transaction, StatusCode> {
        if amount <= 0.0 || sender_id == recipient_id {
            return Err(StatusCode::BAD_REQUEST);
        }
        self.user_mut(recipient_id)?;

        let sender = self.wallet_mut(sender_id).map_err(|_| StatusCode::BAD_REQUEST)?;
        if sender.balance < amount {
            return Err(StatusCode::BAD_REQUEST);
        }
        sender.balance -= amount;
        if let Ok(recipient) = self.wallet_mut(recipient_id) {
            recipient.balance += amount;
        }

        let now = Utc::now();
        let id = self.transactions.iter().map(|t| t.id).max().unwrap_or(100) + 1;
        let tx = Transaction {
            id,
            sender_id,
            recipient_id,
            amount,
            status: TransactionStatus::Completed,
            timestamp: now,
            description,
            kind: None,
        };
        self.transactions.push(tx.clone());

        let note_id = self.notifications.iter().map(|n| n.id).max().unwrap_or(200) + 1;
        self.notifications.push(notification(
            note_id,
            recipient_id,
            &format!("You received ${:.2}", amount),
            false,
            now,
        ));
        Ok(tx)
    }
}

/// Running stub server; shut down on drop
pub struct StubServer {
    pub base_url: String,
    state: Shared,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(StubState::seeded(Utc::now())));
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: 5,
        }
    }

    /// Client without a session
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).unwrap()
    }

    pub fn session_for(&self, id: Id) -> Session {
        let state = self.state();
        let user = state.users.iter().find(|u| u.user.id == id).unwrap();
        Session::new(format!("{}{}", TOKEN_PREFIX, id), &user.user)
    }

    pub fn signed_in_client(&self, id: Id) -> ApiClient {
        self.client().with_session(self.session_for(id))
    }

    pub fn state(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap()
    }

    /// Answer 500 for every request under `prefix`
    pub fn fail_path(&self, prefix: &str) {
        self.state().failures.push((None, prefix.to_string()));
    }

    /// Answer 500 for `method` requests under `prefix`
    pub fn fail_method(&self, method: Method, prefix: &str) {
        self.state().failures.push((Some(method), prefix.to_string()));
    }

    pub fn clear_failures(&self) {
        self.state().failures.clear();
    }

    pub fn set_delay(&self, delay: std::time::Duration) {
        self.state().delay = Some(delay);
    }

    pub fn request_count(&self) -> usize {
        self.state().log.len()
    }

    pub fn last_request(&self) -> Option<RequestRecord> {
        self.state().log.last().cloned()
    }

    pub fn wallet_count(&self) -> usize {
        self.state().wallets.len()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn lock(state: &Shared) -> MutexGuard<'_, StubState> {
    state.lock().unwrap()
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/me", get(me))
        .route("/users/search", get(search_users))
        .route("/users/analytics/:id", get(user_analytics))
        .route("/users/:id", get(get_user).put(update_user))
        .route("/users/:id/password", put(change_password))
        .route("/wallets", post(create_wallet))
        .route("/wallets/user/:id", get(get_wallet))
        .route("/wallets/credit", post(add_to_wallet))
        .route("/wallets/add", post(add_to_wallet))
        .route("/transactions", get(list_transactions).post(send_money))
        .route("/transactions/send", post(send_money))
        .route("/transactions/user/:id", get(user_transactions))
        .route("/notifications", get(list_notifications))
        .route("/notifications/user", get(user_notifications))
        .route("/notifications/mark-all-read", patch(mark_all_read))
        .route("/notifications/:id/read", patch(mark_read))
        .route("/notifications/:id", delete(delete_notification))
        .route("/requests/create", post(create_request))
        .route("/requests/user/:id", get(user_requests))
        .route("/requests/:id/approve", put(approve_request))
        .route("/requests/:id/reject", put(reject_request))
        .route("/requests/:id", delete(cancel_request))
        .layer(middleware::from_fn_with_state(state.clone(), observe))
        .with_state(state)
}

/// Records the request, then applies injected latency and failures
async fn observe(State(state): State<Shared>, request: Request, next: Next) -> Response {
    // Nothing borrowing the request may live across the await below
    let record = {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        RequestRecord {
            method: request.method().clone(),
            path: request.uri().path().to_string(),
            query: request.uri().query().unwrap_or_default().to_string(),
            authorization: header("authorization"),
            request_id: header("x-request-id"),
        }
    };

    let (delay, failing) = {
        let mut s = lock(&state);
        let failing = s.failures.iter().any(|(method, prefix)| {
            method.as_ref().map_or(true, |m| *m == record.method) && record.path.starts_with(prefix)
        });
        s.log.push(record);
        (s.delay, failing)
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if failing {
        return (StatusCode::INTERNAL_SERVER_ERROR, "injected failure").into_response();
    }
    next.run(request).await
}

async fn register(State(state): State<Shared>, Json(body): Json<RegisterRequest>) -> Reply {
    let mut s = lock(&state);
    if s.users.iter().any(|u| u.user.email.eq_ignore_ascii_case(&body.email)) {
        return Err(StatusCode::CONFLICT);
    }
    let id = s.users.iter().map(|u| u.user.id).max().unwrap_or(0) + 1;
    let created = user(id, &body.name, &body.email, Utc::now());
    s.users.push(StubUser {
        user: created.clone(),
        password: body.password,
    });
    Ok(Json(json!(created)))
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginRequest>) -> Reply {
    let s = lock(&state);
    let found = s
        .users
        .iter()
        .find(|u| u.user.email.eq_ignore_ascii_case(&body.email) && u.password == body.password)
        .ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Json(json!({
        "token": format!("{}{}", TOKEN_PREFIX, found.user.id),
        "user": found.user,
    })))
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let mut s = lock(&state);
    let id = s.caller(&headers)?;
    Ok(Json(json!(s.user_mut(id)?.user)))
}

async fn search_users(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    let s = lock(&state);
    let found: Vec<&User> = s
        .users
        .iter()
        .map(|u| &u.user)
        .filter(|u| u.email.to_lowercase().contains(&q) || u.name.to_lowercase().contains(&q))
        .collect();
    Ok(Json(json!(found)))
}

async fn get_user(State(state): State<Shared>, Path(id): Path<Id>) -> Reply {
    let mut s = lock(&state);
    Ok(Json(json!(s.user_mut(id)?.user)))
}

async fn user_analytics(State(state): State<Shared>, Path(id): Path<Id>) -> Reply {
    let mut s = lock(&state);
    s.user_mut(id)?;
    let mine: Vec<&Transaction> = s
        .transactions
        .iter()
        .filter(|t| t.sender_id == id || t.recipient_id == id)
        .collect();
    let sent: f64 = mine.iter().filter(|t| t.sender_id == id).map(|t| t.amount).sum();
    let received: f64 = mine.iter().filter(|t| t.recipient_id == id).map(|t| t.amount).sum();
    Ok(Json(json!({
        "transactionCount": mine.len(),
        "totalSent": sent,
        "totalReceived": received,
    })))
}

async fn update_user(
    State(state): State<Shared>,
    Path(id): Path<Id>,
    headers: HeaderMap,
    Json(body): Json<UpdateProfileRequest>,
) -> Reply {
    let mut s = lock(&state);
    if s.caller(&headers)? != id {
        return Err(StatusCode::FORBIDDEN);
    }
    let entry = s.user_mut(id)?;
    if let Some(name) = body.name {
        entry.user.name = name;
    }
    if let Some(email) = body.email {
        entry.user.email = email;
    }
    if let Some(picture) = body.profile_picture {
        entry.user.profile_picture = Some(picture);
    }
    Ok(Json(json!(entry.user)))
}

async fn change_password(
    State(state): State<Shared>,
    Path(id): Path<Id>,
    headers: HeaderMap,
    Json(body): Json<ChangePasswordRequest>,
) -> Reply {
    let mut s = lock(&state);
    if s.caller(&headers)? != id {
        return Err(StatusCode::FORBIDDEN);
    }
    let entry = s.user_mut(id)?;
    if entry.password != body.current_password {
        return Err(StatusCode::BAD_REQUEST);
    }
    entry.password = body.new_password;
    Ok(Json(json!({ "message": "Password updated" })))
}

async fn get_wallet(State(state): State<Shared>, Path(id): Path<Id>) -> Reply {
    let mut s = lock(&state);
    Ok(Json(json!(s.wallet_mut(id)?)))
}

async fn create_wallet(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<CreateWalletRequest>,
) -> Reply {
    let mut s = lock(&state);
    s.caller(&headers)?;
    if s.wallets.iter().any(|w| w.user_id == body.user_id) {
        return Err(StatusCode::CONFLICT);
    }
    let wallet = Wallet {
        id: Some(s.wallets.len() as Id + 1),
        user_id: body.user_id,
        balance: body.balance,
        currency: body.currency,
    };
    s.wallets.push(wallet.clone());
    Ok(Json(json!({ "message": "Wallet created", "wallet": wallet })))
}

async fn add_to_wallet(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<AmountRequest>,
) -> Reply {
    let mut s = lock(&state);
    s.caller(&headers)?;
    if body.amount <= 0.0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    let wallet = s.wallet_mut(body.user_id)?;
    wallet.balance += body.amount;
    Ok(Json(json!(wallet)))
}

async fn list_transactions(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    let s = lock(&state);
    let id = s.caller(&headers)?;
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = params.get("size").and_then(|p| p.parse().ok()).unwrap_or(10).max(1);

    let mut mine: Vec<&Transaction> = s
        .transactions
        .iter()
        .filter(|t| t.sender_id == id || t.recipient_id == id)
        .collect();
    mine.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let content: Vec<&Transaction> = mine.iter().skip(page * size).take(size).copied().collect();
    Ok(Json(json!({
        "content": content,
        "totalElements": mine.len(),
        "totalPages": mine.len().div_ceil(size),
        "number": page,
        "size": size,
    })))
}

async fn send_money(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<SendMoneyRequest>,
) -> Reply {
    let mut s = lock(&state);
    if s.caller(&headers)? != body.sender_id {
        return Err(StatusCode::FORBIDDEN);
    }
    let tx = s.transfer(body.sender_id, body.recipient_id, body.amount, body.description)?;
    Ok(Json(json!(tx)))
}

async fn user_transactions(State(state): State<Shared>, Path(id): Path<Id>) -> Reply {
    let s = lock(&state);
    let mine: Vec<&Transaction> = s
        .transactions
        .iter()
        .filter(|t| t.sender_id == id || t.recipient_id == id)
        .collect();
    Ok(Json(json!(mine)))
}

async fn list_notifications(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let s = lock(&state);
    let id = s.caller(&headers)?;
    let mine: Vec<&Notification> = s.notifications.iter().filter(|n| n.user_id == id).collect();
    Ok(Json(json!(mine)))
}

async fn user_notifications(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    let id: Id = params
        .get("id")
        .and_then(|v| v.parse().ok())
        .ok_or(StatusCode::BAD_REQUEST)?;
    let s = lock(&state);
    let mine: Vec<&Notification> = s.notifications.iter().filter(|n| n.user_id == id).collect();
    Ok(Json(json!({ "notifications": mine })))
}

async fn mark_read(State(state): State<Shared>, Path(id): Path<Id>) -> Reply {
    let mut s = lock(&state);
    let note = s
        .notifications
        .iter_mut()
        .find(|n| n.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    note.read = true;
    Ok(Json(json!({ "message": "Marked as read" })))
}

async fn mark_all_read(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let mut s = lock(&state);
    let id = s.caller(&headers)?;
    for note in s.notifications.iter_mut().filter(|n| n.user_id == id) {
        note.read = true;
    }
    Ok(Json(json!({ "message": "All marked as read" })))
}

async fn delete_notification(State(state): State<Shared>, Path(id): Path<Id>) -> Reply {
    let mut s = lock(&state);
    let index = s
        .notifications
        .iter()
        .position(|n| n.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    s.notifications.remove(index);
    Ok(Json(json!({ "message": "Deleted" })))
}

async fn create_request(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<CreateMoneyRequest>,
) -> Reply {
    let mut s = lock(&state);
    if s.caller(&headers)? != body.requester_id {
        return Err(StatusCode::FORBIDDEN);
    }
    if body.amount <= 0.0 || body.requester_id == body.recipient_id {
        return Err(StatusCode::BAD_REQUEST);
    }
    s.user_mut(body.recipient_id)?;

    let id = s.requests.iter().map(|r| r.id).max().unwrap_or(300) + 1;
    let created = money_request(
        id,
        body.requester_id,
        body.recipient_id,
        body.amount,
        &body.message,
        RequestStatus::Pending,
        Utc::now(),
    );
    s.requests.push(created.clone());
    Ok(Json(json!({ "message": "Request created", "request": created })))
}

async fn user_requests(State(state): State<Shared>, Path(id): Path<Id>) -> Reply {
    let s = lock(&state);
    let mine: Vec<&MoneyRequest> = s
        .requests
        .iter()
        .filter(|r| r.requester_id == id || r.recipient_id == id)
        .collect();
    Ok(Json(json!(mine)))
}

/// Pending request addressed to the caller
fn respondable(s: &StubState, headers: &HeaderMap, id: Id) -> Result<MoneyRequest, StatusCode> {
    let caller = s.caller(headers)?;
    let request = s
        .requests
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)?;
    if request.recipient_id != caller {
        return Err(StatusCode::FORBIDDEN);
    }
    if !request.is_pending() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(request)
}

fn set_status(s: &mut StubState, id: Id, status: RequestStatus) {
    if let Some(r) = s.requests.iter_mut().find(|r| r.id == id) {
        r.status = status;
    }
}

async fn approve_request(State(state): State<Shared>, Path(id): Path<Id>, headers: HeaderMap) -> Reply {
    let mut s = lock(&state);
    let request = respondable(&s, &headers, id)?;
    s.transfer(
        request.recipient_id,
        request.requester_id,
        request.amount,
        Some(request.message.clone()),
    )?;
    set_status(&mut s, id, RequestStatus::Approved);
    Ok(Json(json!({ "message": "Request approved" })))
}

async fn reject_request(State(state): State<Shared>, Path(id): Path<Id>, headers: HeaderMap) -> Reply {
    let mut s = lock(&state);
    respondable(&s, &headers, id)?;
    set_status(&mut s, id, RequestStatus::Rejected);
    Ok(Json(json!({ "message": "Request rejected" })))
}

async fn cancel_request(State(state): State<Shared>, Path(id): Path<Id>, headers: HeaderMap) -> Reply {
    let mut s = lock(&state);
    let caller = s.caller(&headers)?;
    let index = s
        .requests
        .iter()
        .position(|r| r.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if s.requests[index].requester_id != caller {
        return Err(StatusCode::FORBIDDEN);
    }
    if !s.requests[index].is_pending() {
        return Err(StatusCode::BAD_REQUEST);
    }
    s.requests.remove(index);
    Ok(Json(json!({ "message": "Request cancelled" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delayed_request_is_logged_and_served() {
        let stub = StubServer::start().await;
        stub.set_delay(std::time::Duration::from_millis(20));
        let client = stub.signed_in_client(1);

        let me = client.me().await.unwrap();
        assert_eq!(me.id, 1);

        let record = stub.last_request().unwrap();
        assert_eq!(record.method, Method::GET);
        assert_eq!(record.authorization.as_deref(), Some("Bearer dummy-jwt-token-for-1"));
        assert!(record.request_id.is_some());
    }
}
