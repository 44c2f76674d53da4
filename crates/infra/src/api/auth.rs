//! Authentication API
//!
//! Login, registration and logout on top of [`ApiClient`]. A successful
//! login writes the credential pair and the user identity in one store
//! write; logout removes all three.

use blogc_common::auth::CredentialPair;
use blogc_domain::constants::{LOGIN_PATH, REGISTER_PATH};
use blogc_domain::{LoginRequest, LoginResponse, RegisterRequest, RegisteredUser, User};
use tracing::{info, instrument};

use super::client::ApiClient;
use super::errors::ApiError;

/// Session lifecycle operations
#[derive(Clone, Debug)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create an account. Does not sign in.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser, ApiError> {
        let user = self.client.post_json(REGISTER_PATH, request).await?.json()?;
        info!("Account registered");
        Ok(user)
    }

    /// Exchange username (or e-mail) and password for a credential pair and
    /// persist the new session.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.client.post_json(LOGIN_PATH, request).await?.json()?;

        if response.access.is_empty() || response.refresh.is_empty() {
            return Err(ApiError::Decode("login response is missing a credential".into()));
        }

        self.client.session().store_session(
            &CredentialPair::new(response.access.clone(), response.refresh.clone()),
            &response.user,
        )?;

        info!(user_id = response.user.id, "Logged in");
        Ok(response)
    }

    /// Register, then sign in with the same credentials.
    pub async fn register_and_login(
        &self,
        request: &RegisterRequest,
    ) -> Result<LoginResponse, ApiError> {
        self.register(request).await?;
        self.login(&LoginRequest::new(request.username.clone(), request.password.clone())).await
    }

    /// Forget the local session. The backend keeps no session state to end.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.session().clear()?;
        Ok(())
    }

    /// Cached identity of the signed-in user.
    pub fn current_user(&self) -> Result<Option<User>, ApiError> {
        Ok(self.client.session().identity()?)
    }

    pub fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.client.session().is_authenticated()?)
    }

    /// Refresh the access credential now.
    pub async fn refresh(&self) -> Result<String, ApiError> {
        self.client.refresh_access_token().await
    }
}
