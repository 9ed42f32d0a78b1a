//! Tree renderer — service layout to a nested block description.
//!
//! Pure and UI-agnostic: the output says *what* to show (headers, feature
//! grids, placeholders, indentation), and the TUI or outline printer decides
//! how. Recursion is bounded by the tree's depth; layouts are acyclic.

use serde::Serialize;

use crate::control::{map_control, ControlSpec};
use crate::i18n::{self, DEFAULT_LANGUAGE};
use crate::model::{Feature, ServiceNode, Translation};

/// Shown when the selected root service has nothing to configure.
pub const EMPTY_SERVICE_MESSAGE: &str = "No interactive features or sub-sections defined.";

/// Section title for a nested service (depth > 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionHeader {
    pub label: String,
}

/// One setting: label, raw component-type badge, mapped control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRow {
    pub feature_id: i64,
    pub label: String,
    pub badge: String,
    pub control: ControlSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureGrid {
    pub rows: Vec<FeatureRow>,
}

/// Root-only marker for a service with neither features nor children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyPlaceholder {
    pub message: String,
}

/// Rendered description of one service node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBlock {
    pub service_id: i64,
    pub depth: usize,
    /// Indentation level relative to the content area. Children of the root
    /// sit flush; each deeper level adds one.
    pub indent: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<SectionHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<FeatureGrid>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderedBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<EmptyPlaceholder>,
}

impl RenderedBlock {
    /// Pre-order traversal: self, then each child subtree in order.
    pub fn walk(&self) -> Vec<&RenderedBlock> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }

    pub fn header_count(&self) -> usize {
        self.walk().iter().filter(|b| b.header.is_some()).count()
    }

    pub fn grid_count(&self) -> usize {
        self.walk().iter().filter(|b| b.grid.is_some()).count()
    }

    pub fn placeholder_count(&self) -> usize {
        self.walk().iter().filter(|b| b.empty.is_some()).count()
    }
}

/// A rendered layout with its caller-emitted title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    /// Raw description key of the root service.
    pub badge: String,
    pub title: String,
    pub body: RenderedBlock,
}

/// Sidebar icon category, derived from the service's description key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceIcon {
    Protection,
    Measurement,
    Settings,
}

impl ServiceIcon {
    pub fn for_key(description_key: &str) -> Self {
        if description_key.contains("PROT") {
            ServiceIcon::Protection
        } else if description_key.contains("MEAS") {
            ServiceIcon::Measurement
        } else {
            ServiceIcon::Settings
        }
    }
}

/// Renders layouts with a fixed preferred language.
#[derive(Debug, Clone)]
pub struct Renderer {
    language: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl Renderer {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Render `node` as if it sits at `depth` in the tree.
    pub fn render(&self, node: &ServiceNode, depth: usize) -> RenderedBlock {
        let has_features = !node.features.is_empty();
        let has_children = !node.children.is_empty();

        let header = (depth > 0).then(|| SectionHeader {
            label: self.label(&node.translations),
        });

        let grid = has_features.then(|| FeatureGrid {
            rows: node.features.iter().map(|f| self.row(f)).collect(),
        });

        let children = node
            .children
            .iter()
            .map(|child| self.render(child, depth + 1))
            .collect();

        let empty = (!has_features && !has_children && depth == 0).then(|| EmptyPlaceholder {
            message: EMPTY_SERVICE_MESSAGE.to_string(),
        });

        RenderedBlock {
            service_id: node.service_id,
            depth,
            indent: depth.saturating_sub(1),
            header,
            grid,
            children,
            empty,
        }
    }

    /// Render a fetched layout with its title and description-key badge.
    pub fn render_page(&self, layout: &ServiceNode) -> RenderedPage {
        RenderedPage {
            badge: layout.description_key.clone(),
            title: self.label(&layout.translations),
            body: self.render(layout, 0),
        }
    }

    fn row(&self, feature: &Feature) -> FeatureRow {
        FeatureRow {
            feature_id: feature.feature_id,
            label: self.label(&feature.translations),
            badge: feature.component_type.clone(),
            control: map_control(feature),
        }
    }

    fn label(&self, translations: &[Translation]) -> String {
        i18n::resolve(translations, &self.language).to_string()
    }
}

/// Render with the default language.
pub fn render(node: &ServiceNode, depth: usize) -> RenderedBlock {
    Renderer::default().render(node, depth)
}
