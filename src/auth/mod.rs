//! Authentication and account management

mod session;
mod types;

use log::{info, warn};

use crate::client::ApiClient;
use crate::error::Result;
use crate::messages::{self, StatusMessages};

pub use session::*;
pub use types::*;

const PASSWORD_MESSAGES: StatusMessages = StatusMessages {
    not_found: "Profil nie istnieje",
    unauthorized: "Obecne hasło jest nieprawidłowe",
    server_error: messages::SERVER_ERROR,
};

/// Client for the credential endpoints
#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Sign in with email and password and keep the returned session
    pub async fn login(&self, form: &LoginForm) -> Result<AuthUser> {
        form.check()?;

        let response = self
            .api
            .post("/api/v1/auth/login", messages::LOGIN)?
            .json(form)?
            .execute::<AuthResponse>()
            .await?;

        self.store_session(&response)?;
        info!("logged in as {}", response.user.id);
        Ok(response.user)
    }

    /// Create an account. A session is stored only when the backend returns
    /// one; otherwise the user must confirm their email first.
    pub async fn signup(&self, form: &SignupForm) -> Result<AuthResponse> {
        form.check()?;

        let response = self
            .api
            .post("/api/v1/auth/signup", messages::LOGIN)?
            .json(form)?
            .execute::<AuthResponse>()
            .await?;

        self.store_session(&response)?;
        Ok(response)
    }

    /// Sign out. The local session is cleared whatever the backend says.
    pub async fn logout(&self) -> Result<()> {
        let result = match self.api.post("/api/v1/auth/logout", messages::GENERIC) {
            Ok(request) => request.execute_empty().await,
            Err(e) => Err(e),
        };

        self.api.sessions().clear();

        if let Err(ref e) = result {
            warn!("logout request failed, local session cleared anyway: {}", e);
        }
        result
    }

    /// The account behind the current session
    pub async fn current_user(&self) -> Result<AuthUser> {
        self.api
            .get("/api/v1/auth/user", messages::AUTH_USER)?
            .execute::<AuthUser>()
            .await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        change.check()?;

        self.api
            .patch("/api/v1/profile/password", PASSWORD_MESSAGES)?
            .json(change)?
            .execute_empty()
            .await
    }

    pub fn session(&self) -> Option<Session> {
        self.api.sessions().current()
    }

    pub fn is_logged_in(&self) -> bool {
        self.api.sessions().access_token().is_some()
    }

    fn store_session(&self, response: &AuthResponse) -> Result<()> {
        if let Some(session) = Session::from_response(response) {
            self.api.sessions().save(session)?;
        }
        Ok(())
    }
}
