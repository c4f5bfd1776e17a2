//! Session context and pluggable authentication.
//!
//! The login gate is not a security boundary. [`StaticCredentials`] compares
//! against one fixed pair; a real check implements [`Authenticator`] without
//! touching the views.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Authentication backend unavailable: {0}")]
    Unavailable(String),
}

/// Username/password pair submitted at the login gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Credential check strategy.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify credentials, returning the principal's username.
    async fn authenticate(&self, credentials: &Credentials) -> Result<String, AuthError>;
}

/// Accepts exactly one fixed credential pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    expected: Credentials,
}

impl StaticCredentials {
    pub fn new(expected: Credentials) -> Self {
        Self { expected }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(Credentials::new("test", "123456"))
    }
}

#[async_trait]
impl Authenticator for StaticCredentials {
    async fn authenticate(&self, credentials: &Credentials) -> Result<String, AuthError> {
        if credentials == &self.expected {
            Ok(credentials.username.clone())
        } else {
            Err(AuthError::InvalidCredentials(format!(
                "Invalid credentials. Use {} / {}.",
                self.expected.username, self.expected.password
            )))
        }
    }
}

/// Who is using the dashboard. Passed explicitly to the router and views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionContext {
    #[default]
    Anonymous,
    Authenticated {
        username: String,
        since: DateTime<Utc>,
    },
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionContext::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            SessionContext::Authenticated { username, .. } => Some(username.as_str()),
            SessionContext::Anonymous => None,
        }
    }

    /// Context after a login attempt. `self` is left unchanged either way.
    pub async fn login(
        &self,
        authenticator: &dyn Authenticator,
        credentials: &Credentials,
    ) -> Result<SessionContext, AuthError> {
        match authenticator.authenticate(credentials).await {
            Ok(username) => {
                info!(%username, "Signed in");
                Ok(SessionContext::Authenticated {
                    username,
                    since: Utc::now(),
                })
            }
            Err(e) => {
                warn!(username = %credentials.username, "Sign-in rejected");
                Err(e)
            }
        }
    }

    /// Context after logging out.
    pub fn logout(&self) -> SessionContext {
        if let Some(username) = self.username() {
            info!(%username, "Signed out");
        }
        SessionContext::Anonymous
    }
}
