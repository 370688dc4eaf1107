//! Types for admin authentication

use serde::{Deserialize, Serialize};
use std::fmt;

/// Admin email/password pair. Never written anywhere.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Admin email, sent as `identity`
    #[serde(rename = "identity")]
    pub email: String,

    /// Admin password
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of a successful `auth-with-password` response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// The admin token
    pub token: Option<String>,

    /// The authenticated admin
    pub admin: Option<AdminRecord>,
}

/// Admin account metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecord {
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub created: Option<String>,

    #[serde(default)]
    pub updated: Option<String>,
}
