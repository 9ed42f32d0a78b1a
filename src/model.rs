//! Wire types for inventory, service summaries and layout trees.
//!
//! Serde-deserializable from the backend's JSON (snake_case field names) and
//! from YAML fixtures. Every list defaults to empty so partial metadata never
//! fails to load; the renderer degrades instead.

use serde::{Deserialize, Serialize};

/// One language-tagged label entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub language_code: String,
    #[serde(default)]
    pub value: String,
}

impl Translation {
    pub fn new(language_code: &str, value: &str) -> Self {
        Self {
            language_code: language_code.to_string(),
            value: value.to_string(),
        }
    }
}

/// A named constraint or default attached to a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Limit {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// A single configurable setting within a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub feature_id: i64,
    /// Declared control category, e.g. `"Integer"`. Compared case-insensitively.
    #[serde(default)]
    pub component_type: String,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub limits: Vec<Limit>,
}

/// A configuration section. Owns its features and sub-sections outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceNode {
    pub service_id: i64,
    #[serde(default)]
    pub description_key: String,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub children: Vec<ServiceNode>,
}

impl ServiceNode {
    /// Depth-first search for a node by id, including `self`.
    pub fn find(&self, service_id: i64) -> Option<&ServiceNode> {
        if self.service_id == service_id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(service_id))
    }

    /// Flat sidebar entry for this node (features and children dropped).
    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary {
            id: self.service_id,
            description_key: self.description_key.clone(),
            translations: self.translations.clone(),
        }
    }
}

/// Flat top-level service entry used by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub id: i64,
    #[serde(default)]
    pub description_key: String,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// A firmware version installed on a recloser model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Firmware {
    pub id: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub services: Vec<ServiceSummary>,
}

/// A recloser model and its firmware versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recloser {
    pub id: i64,
    #[serde(default)]
    pub description_key: String,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub firmwares: Vec<Firmware>,
}

impl Recloser {
    pub fn firmware(&self, firmware_id: i64) -> Option<&Firmware> {
        self.firmwares.iter().find(|f| f.id == firmware_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_deserializes_with_missing_lists() {
        let json = r#"{
            "service_id": 7,
            "description_key": "DATE_TIME",
            "features": [
                {"feature_id": 1, "component_type": "Date"},
                {"feature_id": 2}
            ]
        }"#;

        let node: ServiceNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.service_id, 7);
        assert!(node.translations.is_empty());
        assert!(node.children.is_empty());
        assert_eq!(node.features.len(), 2);
        assert_eq!(node.features[0].component_type, "Date");
        assert!(node.features[0].limits.is_empty());
        assert_eq!(node.features[1].component_type, "");
    }

    #[test]
    fn limit_without_key_still_deserializes() {
        let json = r#"{
            "feature_id": 3,
            "component_type": "Integer",
            "limits": [{"value": "5"}, {"key": "MIN_VALUE", "value": "1"}]
        }"#;

        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.limits.len(), 2);
        assert_eq!(feature.limits[0].key, "");
        assert_eq!(feature.limits[1], Limit::new("MIN_VALUE", "1"));
    }

    #[test]
    fn find_walks_nested_children() {
        let node = ServiceNode {
            service_id: 1,
            description_key: "ROOT".into(),
            translations: vec![],
            features: vec![],
            children: vec![ServiceNode {
                service_id: 2,
                description_key: "A".into(),
                translations: vec![],
                features: vec![],
                children: vec![ServiceNode {
                    service_id: 3,
                    description_key: "B".into(),
                    translations: vec![],
                    features: vec![],
                    children: vec![],
                }],
            }],
        };

        assert_eq!(node.find(1).map(|n| n.description_key.as_str()), Some("ROOT"));
        assert_eq!(node.find(3).map(|n| n.description_key.as_str()), Some("B"));
        assert!(node.find(4).is_none());
    }

    #[test]
    fn summary_keeps_id_and_labels() {
        let node = ServiceNode {
            service_id: 9,
            description_key: "MEAS".into(),
            translations: vec![Translation::new("enUs", "Measurement")],
            features: vec![],
            children: vec![],
        };
        let summary = node.summary();
        assert_eq!(summary.id, 9);
        assert_eq!(summary.description_key, "MEAS");
        assert_eq!(summary.translations[0].value, "Measurement");
    }

    #[test]
    fn recloser_firmware_lookup() {
        let yaml = "
id: 1
description_key: ZEUS_NG_3P4W
firmwares:
  - id: 1
    version: v1.0.0
  - id: 2
    version: v2.0.0
";
        let recloser: Recloser = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(recloser.firmware(2).map(|f| f.version.as_str()), Some("v2.0.0"));
        assert!(recloser.firmware(3).is_none());
    }
}
