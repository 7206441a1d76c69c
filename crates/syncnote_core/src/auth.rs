//! Authentication seam.
//!
//! # Responsibility
//! - Model the external authenticator that must grant a session before
//!   any gateway call is permitted.
//! - Keep authentication itself out of scope: this crate consumes grants,
//!   it never verifies credentials.
//!
//! # Invariants
//! - Gateway clients are constructed from an `AuthSession`, so an
//!   unauthenticated call path does not exist in the type system.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Credentials presented to the external authenticator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Identity requesting access.
    pub username: String,
}

/// Granted, authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    username: String,
}

impl AuthSession {
    /// Wraps an identity the authenticator has already granted.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Identity this session was granted for; becomes `Note::owner` on
    /// creation.
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Authentication failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Username missing or blank after trimming.
    BlankUsername,
    /// Authenticator refused the request.
    Denied(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankUsername => write!(f, "username must not be blank"),
            Self::Denied(reason) => write!(f, "authentication denied: {reason}"),
        }
    }
}

impl Error for AuthError {}

/// External collaborator that grants authenticated sessions.
pub trait Authenticator {
    /// Exchanges credentials for a session grant.
    fn authenticate(&self, request: &AuthRequest) -> Result<AuthSession, AuthError>;
}

/// Authenticator that grants any non-blank username.
///
/// Stands in for the managed identity service in the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthenticator;

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, request: &AuthRequest) -> Result<AuthSession, AuthError> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(AuthError::BlankUsername);
        }
        Ok(AuthSession::new(username))
    }
}
