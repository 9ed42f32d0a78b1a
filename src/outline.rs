//! Plain-text output for the non-interactive commands.
//!
//! `render` prints a page outline:
//!
//! ```text
//! Protection [PROTECTION]
//!   Phase Overcurrent
//!     Pickup current  number(decimal, min=0.5, step=0.01)  <Decimal>
//!   Ground Overcurrent
//!     Sensitive Earth Fault
//!       Enabled  checkbox(checked=true)  <CheckBox>
//! ```

use crate::i18n;
use crate::model::{Recloser, ServiceSummary};
use crate::render::{RenderedBlock, RenderedPage};
use crate::tui::box_drawing::{display_width, pad_right};

const INDENT: &str = "  ";

/// Render `page` as indented text, one line per header, row, or placeholder.
pub fn outline(page: &RenderedPage) -> String {
    let mut lines = vec![format!("{} [{}]", page.title, page.badge)];
    write_block(&page.body, &mut lines);
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One line per recloser, then one indented line per firmware version.
pub fn inventory_listing(reclosers: &[Recloser], language: &str) -> String {
    if reclosers.is_empty() {
        return "No reclosers detected. Verify server status.\n".to_string();
    }
    let mut out = String::new();
    for recloser in reclosers {
        out.push_str(&format!(
            "{} [{}] (id {})\n",
            i18n::resolve(&recloser.translations, language),
            recloser.description_key,
            recloser.id
        ));
        for firmware in &recloser.firmwares {
            out.push_str(&format!(
                "{INDENT}{} (firmware {}): {} services\n",
                firmware.version,
                firmware.id,
                firmware.services.len()
            ));
        }
    }
    out
}

/// One line per top-level service: id, label, description key.
pub fn service_listing(services: &[ServiceSummary], language: &str) -> String {
    let labels: Vec<&str> = services
        .iter()
        .map(|s| i18n::resolve(&s.translations, language))
        .collect();
    let width = labels.iter().map(|l| display_width(l)).max().unwrap_or(0);
    services
        .iter()
        .zip(labels)
        .map(|(service, label)| {
            format!(
                "{:>4}  {}  [{}]\n",
                service.id,
                pad_right(label, width),
                service.description_key
            )
        })
        .collect()
}

fn write_block(block: &RenderedBlock, lines: &mut Vec<String>) {
    let header_level = block.indent + 1;
    if let Some(header) = &block.header {
        lines.push(format!("{}{}", INDENT.repeat(header_level), header.label));
    }

    // Content sits one level under this block's header; the root has none.
    let content_level = if block.header.is_some() {
        header_level + 1
    } else {
        1
    };
    let prefix = INDENT.repeat(content_level);

    if let Some(grid) = &block.grid {
        let width = grid
            .rows
            .iter()
            .map(|r| display_width(&r.label))
            .max()
            .unwrap_or(0);
        for row in &grid.rows {
            lines.push(format!(
                "{prefix}{}  {}  <{}>",
                pad_right(&row.label, width),
                row.control,
                row.badge
            ));
        }
    }

    for child in &block.children {
        write_block(child, lines);
    }

    if let Some(empty) = &block.empty {
        lines.push(format!("{prefix}({})", empty.message));
    }
}
