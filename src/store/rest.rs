//! PostgREST-style HTTP adapter for the remote catalog and lead stores.
//!
//! Tables are addressed as `{url}/rest/v1/{table}` and every request carries
//! the anonymous key both as `apikey` and as a bearer token.

use super::{CatalogStore, LeadStore, StoreError};
use crate::config::RemoteConfig;
use crate::model::{CatalogEntry, ContactLead};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Error body returned by PostgREST on a rejected request.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// HTTP-backed store.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    anon_key: String,
    collections_table: String,
    contacts_table: String,
}

impl RestStore {
    /// Builds the adapter from resolved remote configuration.
    pub fn new(config: &RemoteConfig) -> Result<Self, StoreError> {
        if !config.is_configured() {
            return Err(StoreError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            collections_table: config.collections_table.clone(),
            contacts_table: config.contacts_table.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn select(&self, filters: &[(&str, String)]) -> Result<Vec<CatalogEntry>, StoreError> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().cloned());

        let response = self
            .authorized(self.client.get(self.table_url(&self.collections_table)))
            .query(&query)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let response = ensure_success(response).await?;
        let rows: Vec<CatalogEntry> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        debug!(rows = rows.len(), "Select ok");
        Ok(rows)
    }
}

/// Turns a non-2xx response into [`StoreError::Query`].
async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            message: Some(message),
            code,
        }) => match code {
            Some(code) => format!("{message} ({code})"),
            None => message,
        },
        _ if body.is_empty() => status.to_string(),
        _ => body,
    };

    Err(StoreError::Query {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl CatalogStore for RestStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        debug!("Sending request");
        self.select(&[]).await
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Option<CatalogEntry>, StoreError> {
        debug!("Sending request");
        let mut rows = self
            .select(&[("id", format!("eq.{id}")), ("limit", "2".to_string())])
            .await?;
        if rows.len() > 1 {
            return Err(StoreError::Query {
                status: 406,
                message: format!("multiple rows returned for id {id}"),
            });
        }
        Ok(rows.pop())
    }

    #[instrument(skip(self))]
    async fn list_featured(&self, limit: usize) -> Result<Vec<CatalogEntry>, StoreError> {
        debug!("Sending request");
        self.select(&[
            ("is_featured", "eq.true".to_string()),
            ("limit", limit.to_string()),
        ])
        .await
    }
}

#[async_trait]
impl LeadStore for RestStore {
    #[instrument(skip(self, lead), fields(email = %lead.email))]
    async fn insert_lead(&self, lead: &ContactLead) -> Result<(), StoreError> {
        debug!("Sending request");
        let response = self
            .authorized(self.client.post(self.table_url(&self.contacts_table)))
            .header("Prefer", "return=minimal")
            .json(lead)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let config = RemoteConfig {
            url: "https://example.supabase.co/".to_string(),
            anon_key: "key".to_string(),
            ..RemoteConfig::default()
        };
        let store = RestStore::new(&config).unwrap();
        assert_eq!(
            store.table_url("collections"),
            "https://example.supabase.co/rest/v1/collections"
        );
    }

    #[test]
    fn test_incomplete_config_is_rejected() {
        let config = RemoteConfig {
            url: "https://example.supabase.co".to_string(),
            ..RemoteConfig::default()
        };
        assert!(matches!(RestStore::new(&config), Err(StoreError::NotConfigured)));
    }
}
