//! Shared layout helpers: status bar, list rows, centered messages.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::super::app::{Screen, TuiApp};

/// Style for the highlighted row of a list.
pub(super) fn highlight(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Dim single-line message, used for loading and empty states.
pub(super) fn message_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {text}"),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ))
}

pub(super) fn draw_status(f: &mut Frame, app: &TuiApp, area: Rect) {
    let mut spans = vec![
        Span::styled(" [", Style::default().fg(Color::DarkGray)),
        Span::styled(app.language().to_string(), Style::default().fg(Color::Green)),
        Span::styled("]", Style::default().fg(Color::DarkGray)),
    ];

    if let Some(state) = &app.configurator {
        let controller = &state.controller;
        let status = if !state.services_loaded || controller.is_loading() {
            Span::styled("loading...", Style::default().fg(Color::Yellow))
        } else {
            Span::styled(
                format!("{} services", controller.services().len()),
                Style::default().fg(Color::Cyan),
            )
        };
        spans.extend([
            Span::raw("  "),
            Span::styled("[", Style::default().fg(Color::DarkGray)),
            status,
            Span::styled("]", Style::default().fg(Color::DarkGray)),
        ]);
    }

    let shortcuts = match app.screen {
        Screen::Inventory => "\u{2191}\u{2193}:Move  Enter:Open  l:Language  q:Quit",
        Screen::Firmware => "\u{2191}\u{2193}:Move  Enter:Open  Esc:Back  l:Language  q:Quit",
        Screen::Configurator => {
            "\u{2191}\u{2193}:Service  Enter:Reload  PgUp/PgDn:Scroll  Esc:Back  l:Language  q:Quit"
        }
    };
    spans.push(Span::raw("  "));
    spans.push(Span::styled(shortcuts, Style::default().fg(Color::DarkGray)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
