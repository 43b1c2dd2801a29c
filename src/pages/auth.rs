//! Sign-in, registration and sign-out

use super::state::PageError;
use crate::client::{ApiClient, ClientError};
use crate::model::RegisterRequest;
use crate::session::{Session, SessionManager, SessionStore};
use crate::validation::{validate_email, validate_registration, ValidationError};

/// Owns the session lifecycle and keeps the client's session in step
pub struct AuthFlow<S: SessionStore> {
    sessions: SessionManager<S>,
}

impl<S: SessionStore> AuthFlow<S> {
    pub fn new(sessions: SessionManager<S>) -> Self {
        Self { sessions }
    }

    /// Resume whatever session the store holds
    pub fn restore(store: S) -> Self {
        Self::new(SessionManager::restore(store))
    }

    pub fn sessions(&self) -> &SessionManager<S> {
        &self.sessions
    }

    pub fn current(&self) -> Option<&Session> {
        self.sessions.current()
    }

    /// Give `client` the current session (or none)
    pub fn attach(&self, client: &mut ApiClient) {
        client.set_session(self.sessions.current().cloned());
    }

    pub async fn login(
        &mut self,
        client: &mut ApiClient,
        email: &str,
        password: &str,
    ) -> Result<Session, PageError> {
        let email = validate_email(email)?;
        if password.is_empty() {
            return Err(ValidationError::Required("Password").into());
        }

        let response = client.login(&email, password).await.map_err(|e| match e {
            ClientError::Unauthorized => PageError::Failed("Invalid email or password".to_string()),
            other => other.into(),
        })?;

        let user = match response.user {
            Some(user) => user,
            None => {
                // Token-only login response; ask the server who this is
                let probe = client.clone().with_session(Session {
                    token: response.token.clone(),
                    user_id: 0,
                    name: String::new(),
                    email: email.clone(),
                });
                probe.me().await?
            }
        };

        let session = Session::new(response.token, &user);
        self.sessions.begin(session.clone())?;
        client.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Register, sign in, and make sure the new account has a wallet
    pub async fn register(
        &mut self,
        client: &mut ApiClient,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Session, PageError> {
        let (name, email) = validate_registration(name, email, password, confirm)?;

        let user = client
            .register(&RegisterRequest {
                name,
                email: email.clone(),
                password: password.to_string(),
            })
            .await?;
        tracing::info!("Registered user {}", user.id);

        let session = self.login(client, &email, password).await?;
        client.get_or_create_wallet(session.user_id).await?;
        Ok(session)
    }

    pub fn logout(&mut self, client: &mut ApiClient) -> Result<(), PageError> {
        client.set_session(None);
        self.sessions.end()?;
        Ok(())
    }
}
