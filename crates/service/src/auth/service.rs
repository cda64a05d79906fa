use chrono::Utc;
use tracing::{info, instrument, warn};

use super::domain::{LoginInput, ProviderSession};
use super::errors::AuthError;

/// Validates the single demo provider account.
#[derive(Clone)]
pub struct DemoAuth {
    username: String,
    password: String,
}

impl DemoAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Check the submitted credentials.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{DemoAuth, domain::LoginInput};
    /// let auth = DemoAuth::new("provider123", "service2024");
    /// let session = auth.login(LoginInput { username: "provider123".into(), password: "service2024".into() }).unwrap();
    /// assert!(session.logged_in);
    /// assert!(auth.login(LoginInput { username: "provider123".into(), password: "nope".into() }).is_err());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub fn login(&self, input: LoginInput) -> Result<ProviderSession, AuthError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("username and password are required".into()));
        }
        if input.username != self.username || input.password != self.password {
            warn!("provider login rejected");
            return Err(AuthError::Unauthorized);
        }
        info!("provider logged in");
        Ok(ProviderSession { username: input.username, logged_in: true, logged_in_at: Utc::now() })
    }
}
