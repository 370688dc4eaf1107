//! Admin authentication against PocketBase

mod session;
mod types;

use log::{info, warn};
use reqwest::Client;

use crate::error::{Error, Result};
use crate::fetch::Fetch;

pub use session::*;
pub use types::*;

/// Client for the admin password grant
pub struct AdminAuth {
    /// Base URL of the PocketBase instance
    url: String,

    /// HTTP client used for requests
    client: Client,
}

impl AdminAuth {
    /// Create a new AdminAuth client
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    /// Exchange admin credentials for a token.
    ///
    /// Any status other than 200 is an [`Error::Auth`] carrying the raw body.
    pub async fn auth_with_password(&self, credentials: &Credentials) -> Result<AdminSession> {
        let url = format!("{}/api/admins/auth-with-password", self.url);

        let response = Fetch::post(&self.client, &url)
            .json(credentials)?
            .execute_raw()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await?;
            warn!("admin authentication for {} rejected with {}", credentials.email, status);
            return Err(Error::Auth {
                status: status.as_u16(),
                body,
            });
        }

        let body: AuthResponse = response.json().await?;
        let token = body.token.filter(|t| !t.is_empty()).ok_or(Error::MissingToken)?;

        info!("authenticated as admin {}", credentials.email);
        Ok(AdminSession::new(token, body.admin))
    }
}
