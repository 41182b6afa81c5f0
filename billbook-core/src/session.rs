use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use crate::error::{BillingError, ValidationError};
use crate::transport::client::BillingApi;
use crate::transport::types::{LoginOutcome, LoginRequest};

/// Authentication state of the console session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Anonymous => write!(f, "anonymous"),
            SessionState::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Route guard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("login required")]
    LoginRequired,
}

/// Explicit session object passed to route-guard logic.
///
/// Starts Anonymous, becomes Authenticated on a successful login and
/// returns to Anonymous on logout. Protected routes call `authorize` at
/// entry; there is no ambient storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    state: SessionState,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// Route-entry check for protected surfaces.
    pub fn authorize(&self) -> Result<(), SessionError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(SessionError::LoginRequired)
        }
    }

    /// Attempts a login against the backend.
    ///
    /// Empty credentials are rejected locally before any transport
    /// call. Failure outcomes are ordinary return values; only
    /// transport problems are errors.
    pub async fn login(
        &mut self,
        api: &dyn BillingApi,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, BillingError> {
        let username = username.trim();
        let password = password.trim();

        let mut missing = Vec::new();
        if username.is_empty() {
            missing.push("userName".to_string());
        }
        if password.is_empty() {
            missing.push("userPassword".to_string());
        }
        if !missing.is_empty() {
            return Err(ValidationError::new(missing).into());
        }

        let reply = api
            .login(&LoginRequest {
                user_name: username.to_string(),
                user_password: password.to_string(),
            })
            .await?;

        let outcome = LoginOutcome::from_reply(reply);
        if outcome.is_success() {
            self.state = SessionState::Authenticated;
            info!("user {} logged in", username);
        } else {
            warn!("login for {} failed: {:?}", username, outcome);
        }
        Ok(outcome)
    }

    /// Clears the session.
    pub fn logout(&mut self) {
        self.state = SessionState::Anonymous;
        info!("session logged out");
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
