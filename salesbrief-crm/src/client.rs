//! Salesforce REST client implementation.

use crate::config::{API_VERSION, CrmAuth, CrmConfig};
use crate::records::{QueryResponse, QueryResult};
use reqwest::Client;
use salesbrief_core::{BriefError, Result};
use serde::Deserialize;

/// Wire shape of the OAuth token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    instance_url: String,
}

/// Authenticated client for the Salesforce REST API.
///
/// # Example
///
/// ```rust,ignore
/// use salesbrief_crm::{CrmClient, CrmConfig};
///
/// let client = CrmClient::connect(CrmConfig::from_env()?).await?;
/// let result = client.query_all(salesbrief_crm::OPPORTUNITY_QUERY).await?;
/// ```
#[derive(Debug)]
pub struct CrmClient {
    client: Client,
    instance_url: String,
    access_token: String,
}

impl CrmClient {
    /// Create a client, performing the OAuth username-password exchange when
    /// the config does not carry a ready access token.
    pub async fn connect(config: CrmConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| BriefError::Crm(format!("Failed to create HTTP client: {}", e)))?;

        match &config.auth {
            CrmAuth::AccessToken(token) => {
                let instance_url = config.instance_url.clone().ok_or_else(|| {
                    BriefError::Config(
                        "instance URL is required with a pre-issued access token".to_string(),
                    )
                })?;
                Ok(Self {
                    client,
                    instance_url: instance_url.trim_end_matches('/').to_string(),
                    access_token: token.clone(),
                })
            }
            CrmAuth::Password { client_id, client_secret, username, password, security_token } => {
                let token_url = format!(
                    "{}/services/oauth2/token",
                    config.effective_login_url().trim_end_matches('/')
                );

                // Salesforce expects the security token concatenated onto the
                // password for the username-password grant.
                let mut password = password.clone();
                if let Some(token) = security_token {
                    password.push_str(token);
                }

                let params = [
                    ("grant_type", "password"),
                    ("client_id", client_id.as_str()),
                    ("client_secret", client_secret.as_str()),
                    ("username", username.as_str()),
                    ("password", password.as_str()),
                ];

                let response = client.post(&token_url).form(&params).send().await.map_err(
                    |e| BriefError::Crm(format!("Salesforce login request failed: {}", e)),
                )?;

                if !response.status().is_success() {
                    let status = response.status();
                    let error_text = response.text().await.unwrap_or_default();
                    return Err(BriefError::Crm(format!(
                        "Salesforce login error ({}): {}",
                        status, error_text
                    )));
                }

                let token: TokenResponse = response.json().await.map_err(|e| {
                    BriefError::Crm(format!("Failed to parse login response: {}", e))
                })?;

                let instance_url = config.instance_url.clone().unwrap_or(token.instance_url);
                tracing::debug!(instance = %instance_url, "authenticated with Salesforce");

                Ok(Self {
                    client,
                    instance_url: instance_url.trim_end_matches('/').to_string(),
                    access_token: token.access_token,
                })
            }
        }
    }

    /// Instance URL the client is bound to.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Execute a SOQL query, following `nextRecordsUrl` until all pages are
    /// collected.
    pub async fn query_all(&self, soql: &str) -> Result<QueryResult> {
        let url = format!("{}/services/data/{}/query", self.instance_url, API_VERSION);

        let mut page = self.get_page(self.client.get(&url).query(&[("q", soql)])).await?;
        let total_size = page.total_size;
        let mut records = std::mem::take(&mut page.records);

        while !page.done {
            let next = page.next_records_url.take().ok_or_else(|| {
                BriefError::Crm("query page not done but no nextRecordsUrl given".to_string())
            })?;
            let next_url = format!("{}{}", self.instance_url, next);
            page = self.get_page(self.client.get(&next_url)).await?;
            records.append(&mut page.records);
        }

        tracing::debug!(total = total_size, fetched = records.len(), "fetched query records");
        Ok(QueryResult { total_size, records })
    }

    async fn get_page(&self, request: reqwest::RequestBuilder) -> Result<QueryResponse> {
        let response = request
            .header("Authorization", format!("Bearer {}", self.access_token))
            .send()
            .await
            .map_err(|e| BriefError::Crm(format!("Salesforce API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BriefError::Crm(format!(
                "Salesforce API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BriefError::Crm(format!("Failed to parse query response: {}", e)))
    }
}
