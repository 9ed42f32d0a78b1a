//! HTTP layout source for a JSON gateway in front of the recloser RPC service.
//!
//! Each RPC is a `POST {base}/recloser.RecloserService/{Method}` with a JSON
//! request body and a JSON response body, field names as in the service's
//! messages. No retries: the loaders already degrade on failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LayoutSource, SourceError};
use crate::model::{Recloser, ServiceNode, ServiceSummary};

/// Fully qualified RPC service name, used as the path prefix.
const SERVICE_PATH: &str = "recloser.RecloserService";

#[derive(Debug, Serialize)]
struct FullInventoryRequest {}

#[derive(Debug, Deserialize)]
struct FullInventoryResponse {
    #[serde(default)]
    reclosers: Vec<Recloser>,
}

#[derive(Debug, Serialize)]
struct ServiceTreeRequest {
    firmware_id: i64,
}

#[derive(Debug, Deserialize)]
struct ServiceTreeResponse {
    #[serde(default)]
    top_level_services: Vec<ServiceSummary>,
}

#[derive(Debug, Serialize)]
struct ScreenLayoutRequest {
    service_id: i64,
}

#[derive(Debug, Deserialize)]
struct ScreenLayoutResponse {
    #[serde(default)]
    service_layout: Option<ServiceNode>,
}

/// Layout source talking JSON over HTTP.
#[derive(Debug)]
pub struct HttpSource {
    http: Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source with reqwest's default client settings.
    ///
    /// `endpoint` may omit the scheme (`localhost:50051`); `http://` is assumed.
    pub fn new(endpoint: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: normalize_endpoint(endpoint),
        }
    }

    /// Create a source whose requests time out after `timeout`.
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, SourceError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: normalize_endpoint(endpoint),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{SERVICE_PATH}/{method}", self.base_url)
    }

    async fn call<Req, Resp>(&self, method: &str, body: &Req) -> Result<Resp, SourceError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.method_url(method);
        debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(SourceError::ApiError {
                status,
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(format!("{method}: {e}")))
    }
}

#[async_trait]
impl LayoutSource for HttpSource {
    async fn fetch_inventory(&self) -> Result<Vec<Recloser>, SourceError> {
        let resp: FullInventoryResponse = self.call("GetFullInventory", &FullInventoryRequest {}).await?;
        Ok(resp.reclosers)
    }

    async fn fetch_service_summaries(
        &self,
        firmware_id: i64,
    ) -> Result<Vec<ServiceSummary>, SourceError> {
        let resp: ServiceTreeResponse = self
            .call("GetServiceTree", &ServiceTreeRequest { firmware_id })
            .await?;
        Ok(resp.top_level_services)
    }

    async fn fetch_service_layout(
        &self,
        service_id: i64,
    ) -> Result<Option<ServiceNode>, SourceError> {
        let resp: ScreenLayoutResponse = self
            .call("GetScreenLayout", &ScreenLayoutRequest { service_id })
            .await?;
        Ok(resp.service_layout)
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
