//! Layout sources — where inventory, service lists and layouts come from.
//!
//! The configurator never talks to a backend directly. It holds a
//! `LayoutSource` and goes through the loader functions below, which turn
//! every failure into an empty/absent result plus a log line. Two sources:
//! - `FixtureSource`: an in-memory inventory document (YAML/JSON, or the
//!   embedded sample)
//! - `HttpSource`: JSON gateway in front of the recloser RPC service

pub mod fixture;
pub mod http;

use async_trait::async_trait;
use tracing::warn;

use crate::model::{Recloser, ServiceNode, ServiceSummary};

pub use fixture::FixtureSource;
pub use http::HttpSource;

/// Errors from layout sources. Never reach the renderer; see the loaders.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("fixture I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fixture parse error: {0}")]
    Parse(String),

    #[error("unknown firmware: {0}")]
    UnknownFirmware(i64),
}

/// Data-access collaborator for the configurator.
#[async_trait]
pub trait LayoutSource: Send + Sync {
    /// All reclosers with their firmware versions.
    async fn fetch_inventory(&self) -> Result<Vec<Recloser>, SourceError>;

    /// Top-level services of one firmware version.
    async fn fetch_service_summaries(
        &self,
        firmware_id: i64,
    ) -> Result<Vec<ServiceSummary>, SourceError>;

    /// Full layout tree of one service. `Ok(None)` means the backend has none.
    async fn fetch_service_layout(
        &self,
        service_id: i64,
    ) -> Result<Option<ServiceNode>, SourceError>;
}

/// Inventory, or an empty list if the source failed.
pub async fn load_inventory(source: &dyn LayoutSource) -> Vec<Recloser> {
    match source.fetch_inventory().await {
        Ok(reclosers) => reclosers,
        Err(e) => {
            warn!("failed to fetch inventory: {e}");
            Vec::new()
        }
    }
}

/// Service summaries, or an empty list if the source failed.
pub async fn load_service_summaries(
    source: &dyn LayoutSource,
    firmware_id: i64,
) -> Vec<ServiceSummary> {
    match source.fetch_service_summaries(firmware_id).await {
        Ok(services) => services,
        Err(e) => {
            warn!("failed to fetch service tree for firmware {firmware_id}: {e}");
            Vec::new()
        }
    }
}

/// Layout tree, or `None` if the source failed or had nothing.
pub async fn load_service_layout(source: &dyn LayoutSource, service_id: i64) -> Option<ServiceNode> {
    match source.fetch_service_layout(service_id).await {
        Ok(layout) => layout,
        Err(e) => {
            warn!("failed to fetch screen layout for service {service_id}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that fails every call.
    struct DownSource;

    #[async_trait]
    impl LayoutSource for DownSource {
        async fn fetch_inventory(&self) -> Result<Vec<Recloser>, SourceError> {
            Err(SourceError::ApiError {
                status: 503,
                message: "unavailable".into(),
            })
        }

        async fn fetch_service_summaries(
            &self,
            firmware_id: i64,
        ) -> Result<Vec<ServiceSummary>, SourceError> {
            Err(SourceError::UnknownFirmware(firmware_id))
        }

        async fn fetch_service_layout(
            &self,
            _service_id: i64,
        ) -> Result<Option<ServiceNode>, SourceError> {
            Err(SourceError::InvalidResponse("garbage".into()))
        }
    }

    #[tokio::test]
    async fn loaders_degrade_on_failure() {
        assert!(load_inventory(&DownSource).await.is_empty());
        assert!(load_service_summaries(&DownSource, 1).await.is_empty());
        assert!(load_service_layout(&DownSource, 1).await.is_none());
    }

    #[tokio::test]
    async fn loaders_pass_through_success() {
        let source = FixtureSource::sample();
        assert!(!load_inventory(&source).await.is_empty());
        assert_eq!(load_service_summaries(&source, 1).await.len(), 2);
        assert!(load_service_layout(&source, 1).await.is_some());
    }

    #[test]
    fn error_display() {
        let err = SourceError::ApiError {
            status: 500,
            message: "boom".into(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));
        assert!(SourceError::UnknownFirmware(9).to_string().contains('9'));
    }
}
