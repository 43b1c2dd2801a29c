//! Profile: account details and password change

use super::state::{fetch, resolve, FallbackPolicy, PageError, PageState};
use crate::client::ApiClient;
use crate::lifecycle::PageScope;
use crate::model::{ChangePasswordRequest, UpdateProfileRequest, User};
use crate::validation::{validate_email, validate_password, ValidationError};

pub struct ProfilePage {
    policy: FallbackPolicy,
    pub state: PageState<User>,
}

impl ProfilePage {
    pub fn new(policy: FallbackPolicy) -> Self {
        Self {
            policy,
            state: PageState::Loading,
        }
    }

    pub async fn load(&mut self, client: &ApiClient, scope: &PageScope) -> &PageState<User> {
        let viewer = match client.viewer() {
            Ok(viewer) => viewer,
            Err(_) => {
                self.state = PageState::Error(PageError::Unauthenticated);
                return &self.state;
            }
        };

        self.state = PageState::Loading;
        let result = fetch(scope, client.me()).await;
        self.state = resolve(result, self.policy, |gen| gen.user(viewer));
        &self.state
    }

    /// Change name and/or email; blank fields are left as they are
    pub async fn update_profile(
        &mut self,
        client: &ApiClient,
        scope: &PageScope,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, PageError> {
        let viewer = client.viewer()?;

        let name = name.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string);
        let email = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) => Some(validate_email(email)?),
            None => None,
        };
        let update = UpdateProfileRequest {
            name,
            email,
            profile_picture: None,
        };
        if update.is_empty() {
            return Err(PageError::Failed("Nothing to update".to_string()));
        }

        let user = fetch(scope, client.update_profile(viewer, &update)).await?;
        tracing::info!("Updated profile for user {}", viewer);
        self.load(client, scope).await;
        Ok(user)
    }

    pub async fn change_password(
        &mut self,
        client: &ApiClient,
        scope: &PageScope,
        current: &str,
        new_password: &str,
        confirm: &str,
    ) -> Result<(), PageError> {
        let viewer = client.viewer()?;
        if current.is_empty() {
            return Err(ValidationError::Required("Current password").into());
        }
        validate_password(new_password, confirm)?;

        let change = ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new_password.to_string(),
        };
        fetch(scope, client.change_password(viewer, &change)).await
    }
}
