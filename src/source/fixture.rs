//! In-memory layout source backed by an inventory document.
//!
//! The document nests full service trees under each firmware. Summaries are
//! the top-level nodes of a firmware; layouts are found by service id in any
//! tree. YAML is a superset of JSON, so one parser covers both file types.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use super::{LayoutSource, SourceError};
use crate::model::{Firmware, Recloser, ServiceNode, ServiceSummary, Translation};

/// Built-in inventory used when no endpoint or fixture is configured.
const SAMPLE_INVENTORY: &str = include_str!("../../fixtures/sample_inventory.yaml");

#[derive(Debug, Clone, Deserialize)]
struct InventoryDocument {
    #[serde(default)]
    reclosers: Vec<RecloserEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct RecloserEntry {
    id: i64,
    #[serde(default)]
    description_key: String,
    #[serde(default)]
    translations: Vec<Translation>,
    #[serde(default)]
    firmwares: Vec<FirmwareEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct FirmwareEntry {
    id: i64,
    #[serde(default)]
    version: String,
    #[serde(default)]
    services: Vec<ServiceNode>,
}

/// Layout source over a parsed inventory document.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    reclosers: Vec<RecloserEntry>,
}

impl FixtureSource {
    /// Parse an inventory document (YAML or JSON text).
    pub fn parse(text: &str) -> Result<Self, SourceError> {
        let doc: InventoryDocument =
            serde_yaml::from_str(text).map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(Self {
            reclosers: doc.reclosers,
        })
    }

    /// Read and parse an inventory file.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The embedded sample inventory.
    pub fn sample() -> Self {
        // Embedded at compile time and covered by tests.
        Self::parse(SAMPLE_INVENTORY).unwrap_or(Self {
            reclosers: Vec::new(),
        })
    }

    fn firmware(&self, firmware_id: i64) -> Option<&FirmwareEntry> {
        self.reclosers
            .iter()
            .flat_map(|r| r.firmwares.iter())
            .find(|f| f.id == firmware_id)
    }

    fn layout(&self, service_id: i64) -> Option<&ServiceNode> {
        self.reclosers
            .iter()
            .flat_map(|r| r.firmwares.iter())
            .flat_map(|f| f.services.iter())
            .find_map(|s| s.find(service_id))
    }
}

#[async_trait]
impl LayoutSource for FixtureSource {
    async fn fetch_inventory(&self) -> Result<Vec<Recloser>, SourceError> {
        Ok(self
            .reclosers
            .iter()
            .map(|r| Recloser {
                id: r.id,
                description_key: r.description_key.clone(),
                translations: r.translations.clone(),
                firmwares: r
                    .firmwares
                    .iter()
                    .map(|f| Firmware {
                        id: f.id,
                        version: f.version.clone(),
                        services: f.services.iter().map(ServiceNode::summary).collect(),
                    })
                    .collect(),
            })
            .collect())
    }

    async fn fetch_service_summaries(
        &self,
        firmware_id: i64,
    ) -> Result<Vec<ServiceSummary>, SourceError> {
        let firmware = self
            .firmware(firmware_id)
            .ok_or(SourceError::UnknownFirmware(firmware_id))?;
        Ok(firmware.services.iter().map(ServiceNode::summary).collect())
    }

    async fn fetch_service_layout(
        &self,
        service_id: i64,
    ) -> Result<Option<ServiceNode>, SourceError> {
        Ok(self.layout(service_id).cloned())
    }
}
