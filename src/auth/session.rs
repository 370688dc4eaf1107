//! Admin session held for the lifetime of a run

use std::fmt;

use super::types::AdminRecord;

/// Token obtained from the password grant. There is no refresh or expiry tracking.
#[derive(Clone)]
pub struct AdminSession {
    token: String,

    /// The admin the token was issued to, when the server reported it
    pub admin: Option<AdminRecord>,
}

impl AdminSession {
    /// Create a new session
    pub fn new(token: impl Into<String>, admin: Option<AdminRecord>) -> Self {
        Self {
            token: token.into(),
            admin,
        }
    }

    /// Raw token, sent verbatim as the `Authorization` header
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSession")
            .field("token", &"<redacted>")
            .field("admin", &self.admin)
            .finish()
    }
}
