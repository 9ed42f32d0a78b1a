//! Inventory and firmware pickers.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::shared::{highlight, message_line};
use crate::tui::app::TuiApp;
use crate::tui::box_drawing::{pad_right, truncate};

pub const NO_RECLOSERS_MESSAGE: &str = "No reclosers detected. Verify server status.";
pub const NO_FIRMWARE_MESSAGE: &str = "No firmware versions registered for this model.";

const LABEL_WIDTH: usize = 28;

/// Screen 1: one row per recloser model.
pub(super) fn draw_inventory(f: &mut Frame, app: &TuiApp, area: Rect) {
    let block = Block::default()
        .title(" Recloser Management ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines: Vec<Line> = if !app.inventory_loaded {
        vec![message_line("Loading inventory...")]
    } else if app.inventory.is_empty() {
        vec![message_line(NO_RECLOSERS_MESSAGE)]
    } else {
        app.inventory
            .iter()
            .enumerate()
            .map(|(i, recloser)| {
                let selected = i == app.recloser_index;
                let label = truncate(app.label(&recloser.translations), LABEL_WIDTH);
                let count = recloser.firmwares.len();
                let noun = if count == 1 { "version" } else { "versions" };
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", pad_right(&label, LABEL_WIDTH)),
                        highlight(selected),
                    ),
                    Span::styled(
                        format!("  {}", recloser.description_key),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(format!("  {count} firmware {noun}"), Style::default().fg(Color::Yellow)),
                ])
            })
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Screen 2: firmware versions of the chosen recloser.
pub(super) fn draw_firmware(f: &mut Frame, app: &TuiApp, area: Rect) {
    let Some(recloser) = app.selected_recloser() else {
        return;
    };
    let block = Block::default()
        .title(format!(
            " Select Firmware Version: {} ",
            app.label(&recloser.translations)
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines: Vec<Line> = if recloser.firmwares.is_empty() {
        vec![message_line(NO_FIRMWARE_MESSAGE)]
    } else {
        recloser
            .firmwares
            .iter()
            .enumerate()
            .map(|(i, firmware)| {
                let selected = i == app.firmware_index;
                let count = firmware.services.len();
                let noun = if count == 1 { "service" } else { "services" };
                Line::from(vec![
                    Span::styled(format!(" {} ", pad_right(&firmware.version, 12)), highlight(selected)),
                    Span::styled(format!("  {count} {noun}"), Style::default().fg(Color::Yellow)),
                ])
            })
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}
