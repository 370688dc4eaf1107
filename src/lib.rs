//! PocketBase admin provisioning
//!
//! Authenticates against a PocketBase instance as an admin, inspects its
//! collections and re-creates the app's collection set with typed schemas.

pub mod auth;
pub mod cli;
pub mod collections;
pub mod config;
pub mod error;
pub mod fetch;
pub mod provision;
pub mod report;
pub mod schema;

use std::io::{self, Write};

use reqwest::Client;

use crate::auth::{AdminAuth, AdminSession, Credentials};
use crate::collections::CollectionsClient;
use crate::config::Config;
use crate::error::Result;

/// Entry point holding the configuration and the shared HTTP client
pub struct PocketBase {
    config: Config,
    http_client: Client,
}

impl PocketBase {
    /// Create a client for the instance described by `config`
    ///
    /// # Example
    ///
    /// ```
    /// use pocketbase_provision::{config::Config, PocketBase};
    ///
    /// let pb = PocketBase::new(Config::default()).unwrap();
    /// assert_eq!(pb.config().base_url, "http://localhost:8090");
    /// ```
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Client for the admin password grant
    pub fn admins(&self) -> AdminAuth {
        AdminAuth::new(&self.config.base_url, self.http_client.clone())
    }

    /// Collections client authorized by `session`
    pub fn collections(&self, session: AdminSession) -> CollectionsClient {
        CollectionsClient::new(&self.config.base_url, self.http_client.clone(), session)
    }

    /// Authenticate with console narration on stdout and return an
    /// authorized collections client
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<CollectionsClient> {
        self.authenticate_with(credentials, &mut io::stdout()).await
    }

    /// Like [`PocketBase::authenticate`], narrating to `out`.
    ///
    /// On rejection the raw response body is written before the error is returned.
    pub async fn authenticate_with<W: Write>(
        &self,
        credentials: &Credentials,
        out: &mut W,
    ) -> Result<CollectionsClient> {
        report::info(out, "🔐 Authenticating as admin...")?;

        match self.admins().auth_with_password(credentials).await {
            Ok(session) => {
                report::success(out, "Authenticated successfully")?;
                Ok(self.collections(session))
            }
            Err(e) => {
                report::error(out, "Authentication failed")?;
                if let Some(body) = e.response_body() {
                    writeln!(out, "{}", body)?;
                }
                Err(e)
            }
        }
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::Credentials;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::provision::{ProvisionReport, Provisioner};
    pub use crate::PocketBase;
}
