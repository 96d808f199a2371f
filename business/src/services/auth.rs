use log::{error, info};

use crate::error::ApiError;
use crate::gateway::ApiClient;
use crate::models::{LoginData, LoginRequest};
use crate::session::Session;

pub const AUTH_FALLBACK: &str = "Authentication failed";

const LOGIN_PATH: &str = "/Auth/Login";

#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a session and persists it.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let request = LoginRequest { email, password };

        let data: LoginData = self
            .client
            .post_json(LOGIN_PATH, &request, AUTH_FALLBACK)
            .await
            .inspect_err(|e| error!("login failed: {} (status {})", e.message, e.status))?;

        self.client
            .session()
            .set_session(&data.token, &data.user)
            .map_err(|e| {
                error!("failed to persist session: {e}");
                ApiError::client_setup(format!("Could not save session: {e}"))
            })?;

        info!("logged in as user {}", data.user.id);
        Ok(Session {
            token: data.token,
            user: data.user,
        })
    }

    /// Forgets the stored session. No request is made.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.session().clear().map_err(|e| {
            error!("failed to clear session: {e}");
            ApiError::client_setup(format!("Could not clear session: {e}"))
        })?;
        info!("logged out");
        Ok(())
    }
}
