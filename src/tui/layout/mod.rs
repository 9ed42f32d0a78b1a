//! Screen layout: title bar, active screen, status bar.
//!
//! ```text
//! ┌ Recloser Configurator ─────────────── Recloser Management ┐
//! │                                                           │
//! │  (inventory list, firmware list, or sidebar + content)    │
//! │                                                           │
//! ├───────────────────────────────────────────────────────────┤
//! │ [enUs] ↑↓:Move  Enter:Open  Esc:Back  l:Language  q:Quit  │
//! └───────────────────────────────────────────────────────────┘
//! ```

mod configurator;
mod inventory;
mod shared;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::app::{Screen, TuiApp};

/// Screen title as shown in the title bar.
pub fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Inventory => "Recloser Management",
        Screen::Firmware => "Select Firmware Version",
        Screen::Configurator => "Configuration",
    }
}

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &TuiApp) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Min(3),    // screen
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    draw_title_bar(f, app, outer[0]);

    match app.screen {
        Screen::Inventory => inventory::draw_inventory(f, app, outer[1]),
        Screen::Firmware => inventory::draw_firmware(f, app, outer[1]),
        Screen::Configurator => configurator::draw_configurator(f, app, outer[1]),
    }

    shared::draw_status(f, app, outer[2]);
}

fn draw_title_bar(f: &mut Frame, app: &TuiApp, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " Recloser Configurator ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            screen_title(app.screen),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
