//! Authenticated session

use super::errors::{Result, SDKError};
use std::fmt;
use std::sync::Arc;

/// Authorization scheme the service expects in front of the token
pub const AUTH_SCHEME: &str = "JWT";

/// Bearer credential obtained from a single successful authentication.
///
/// The token is fixed at construction and never empty. Clones share the same
/// allocation, so handing a session to every batch worker is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: Arc<str>,
    authenticated: bool,
}

impl Session {
    /// Wraps a token, rejecting an empty one
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SDKError::AuthError(
                "service returned an empty access token".to_string(),
            ));
        }
        Ok(Self {
            token: Arc::from(token),
            authenticated: true,
        })
    }

    pub(crate) fn with_flag(token: impl Into<String>, authenticated: bool) -> Result<Self> {
        let mut session = Self::new(token)?;
        session.authenticated = authenticated;
        Ok(session)
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("{} {}", AUTH_SCHEME, self.token)
    }

    /// The `isAuth` flag the service reported alongside the token
    pub fn reported_authenticated(&self) -> bool {
        self.authenticated
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("authenticated", &self.authenticated)
            .finish()
    }
}
