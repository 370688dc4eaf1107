//! Configuration options for the provisioning tools

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8090";

/// File the `users` collection identifier is written to
pub const DEFAULT_USERS_ID_FILE: &str = "users_id.txt";

/// Immutable configuration shared by every component of a run
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the PocketBase instance, without a trailing slash
    pub base_url: String,

    /// Where `pb-users-id` stores the discovered identifier
    pub users_id_file: PathBuf,

    /// Per-request timeout. `None` waits forever.
    pub request_timeout: Option<Duration>,

    /// Abort on the first failed optional collection as well
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            users_id_file: PathBuf::from(DEFAULT_USERS_ID_FILE),
            request_timeout: None,
            strict: false,
        }
    }
}

impl Config {
    /// Build a configuration for the given base URL, validating it
    pub fn new(base_url: &str) -> Result<Self> {
        Self::default().with_base_url(base_url)
    }

    /// Read overrides from `POCKETBASE_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("POCKETBASE_URL") {
            config = config.with_base_url(&url)?;
        }
        if let Ok(path) = env::var("POCKETBASE_USERS_ID_FILE") {
            config = config.with_users_id_file(path);
        }
        if let Ok(secs) = env::var("POCKETBASE_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| {
                    Error::config(format!("POCKETBASE_TIMEOUT_SECS is not a number: {}", secs))
                })?;
            config = config.with_request_timeout(Some(Duration::from_secs(secs)));
        }
        if let Ok(strict) = env::var("POCKETBASE_STRICT") {
            config = config.with_strict(parse_flag(&strict));
        }

        Ok(config)
    }

    /// Set the base URL. Must be an absolute http(s) URL.
    pub fn with_base_url(mut self, value: &str) -> Result<Self> {
        let url = Url::parse(value)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::config(format!("unsupported URL scheme: {}", url.scheme())));
        }
        self.base_url = value.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Set the identifier output file
    pub fn with_users_id_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.users_id_file = path.into();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the optional-collection failure policy
    pub fn with_strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Absolute URL for an API path such as `/api/collections`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Location of the admin dashboard
    pub fn admin_ui_url(&self) -> String {
        format!("{}/_/", self.base_url)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_instance() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8090");
        assert_eq!(config.users_id_file, PathBuf::from("users_id.txt"));
        assert!(config.request_timeout.is_none());
        assert!(!config.strict);
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = Config::new("http://pb.internal:8090/").unwrap();
        assert_eq!(
            config.api_url("/api/collections"),
            "http://pb.internal:8090/api/collections"
        );
        assert_eq!(config.admin_ui_url(), "http://pb.internal:8090/_/");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(Config::new("ftp://example.com"), Err(Error::Config(_))));
        assert!(matches!(Config::new("not a url"), Err(Error::Url(_))));
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }
}
