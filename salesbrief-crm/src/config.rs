//! Configuration for the Salesforce connection.

use salesbrief_core::{BriefError, Result};

/// Salesforce REST API version used for all requests.
pub const API_VERSION: &str = "v59.0";

/// Default OAuth login URL for production orgs.
pub const LOGIN_URL: &str = "https://login.salesforce.com";

/// Credentials for the Salesforce org.
#[derive(Debug, Clone)]
pub enum CrmAuth {
    /// A pre-issued access token, used as-is.
    AccessToken(String),
    /// OAuth2 username-password flow. The security token is appended to the
    /// password when present, as Salesforce requires outside trusted IP
    /// ranges.
    Password {
        client_id: String,
        client_secret: String,
        username: String,
        password: String,
        security_token: Option<String>,
    },
}

/// Connection settings for the Salesforce org.
#[derive(Debug, Clone)]
pub struct CrmConfig {
    /// Org instance URL, e.g. `https://mycompany.my.salesforce.com`.
    /// Required with a pre-issued token; with password auth the token
    /// response reports it and this field acts as an override.
    pub instance_url: Option<String>,
    pub auth: CrmAuth,
    /// Override for the OAuth login host (sandboxes, tests).
    pub login_url: Option<String>,
}

impl CrmConfig {
    pub fn new(auth: CrmAuth) -> Self {
        Self { instance_url: None, auth, login_url: None }
    }

    /// Set the org instance URL.
    pub fn with_instance_url(mut self, instance_url: impl Into<String>) -> Self {
        self.instance_url = Some(instance_url.into());
        self
    }

    /// Set a custom OAuth login host.
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = Some(login_url.into());
        self
    }

    /// Get the effective OAuth login host.
    pub fn effective_login_url(&self) -> &str {
        self.login_url.as_deref().unwrap_or(LOGIN_URL)
    }

    /// Build a config from `SALESFORCE_*` environment variables.
    ///
    /// `SALESFORCE_ACCESS_TOKEN` plus `SALESFORCE_INSTANCE_URL` selects token
    /// auth; otherwise the username-password variables are required.
    pub fn from_env() -> Result<Self> {
        let instance_url = std::env::var("SALESFORCE_INSTANCE_URL").ok();
        let login_url = std::env::var("SALESFORCE_LOGIN_URL").ok();

        let config = if let Ok(token) = std::env::var("SALESFORCE_ACCESS_TOKEN") {
            let instance_url = instance_url.ok_or_else(|| {
                BriefError::Config(
                    "SALESFORCE_INSTANCE_URL must be set when using SALESFORCE_ACCESS_TOKEN"
                        .to_string(),
                )
            })?;
            Self::new(CrmAuth::AccessToken(token)).with_instance_url(instance_url)
        } else {
            let require = |var: &str| {
                std::env::var(var).map_err(|_| BriefError::Config(format!("{} is not set", var)))
            };

            let config = Self::new(CrmAuth::Password {
                client_id: require("SALESFORCE_CLIENT_ID")?,
                client_secret: require("SALESFORCE_CLIENT_SECRET")?,
                username: require("SALESFORCE_USERNAME")?,
                password: require("SALESFORCE_PASSWORD")?,
                security_token: std::env::var("SALESFORCE_SECURITY_TOKEN").ok(),
            });
            match instance_url {
                Some(url) => config.with_instance_url(url),
                None => config,
            }
        };

        Ok(match login_url {
            Some(url) => config.with_login_url(url),
            None => config,
        })
    }
}
