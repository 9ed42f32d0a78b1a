//! Configurator screen: service sidebar plus the rendered layout.
//!
//! ```text
//! Zeus NG 1P/2W / v1.1.0
//! ┌ Services ──────────────┐┌ Protection ─────────────────────────────┐
//! │▶ ◆ Protection          ││ PROTECTION                              │
//! │      PROTECTION        ││ ▍Phase Overcurrent                      │
//! │  ≈ Measurements        ││   Pickup current (A)   100  ±0.5 ...   │
//! └────────────────────────┘└─────────────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::shared::message_line;
use crate::controller::ConfiguratorView;
use crate::render::{RenderedBlock, RenderedPage, ServiceIcon};
use crate::tui::app::{ConfiguratorState, TuiApp};
use crate::tui::box_drawing::{display_width, pad_right, rule, truncate};
use crate::tui::controls::control_spans;

pub const LOADING_MESSAGE: &str = "Loading Configuration...";
pub const NO_LAYOUT_MESSAGE: &str = "Select a service to begin configuration";

const SIDEBAR_WIDTH: u16 = 30;

fn icon(kind: ServiceIcon) -> &'static str {
    match kind {
        ServiceIcon::Protection => "◆",
        ServiceIcon::Measurement => "≈",
        ServiceIcon::Settings => "⚙",
    }
}

pub(super) fn draw_configurator(f: &mut Frame, app: &TuiApp, area: Rect) {
    let Some(state) = &app.configurator else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let header = Line::from(vec![
        Span::styled(
            format!(" {}", state.recloser_label),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" / ", Style::default().fg(Color::DarkGray)),
        Span::styled(state.version.clone(), Style::default().fg(Color::Yellow)),
    ]);
    f.render_widget(Paragraph::new(header), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(rows[1]);

    draw_sidebar(f, app, state, columns[0]);
    draw_content(f, app, state, columns[1]);
}

fn draw_sidebar(f: &mut Frame, app: &TuiApp, state: &ConfiguratorState, area: Rect) {
    let block = Block::default()
        .title(" Services ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    // Marker, icon and spaces take 4 columns; borders take 2.
    let label_width = (area.width as usize).saturating_sub(6);

    let controller = &state.controller;
    let lines: Vec<Line> = if !state.services_loaded {
        vec![message_line("Loading...")]
    } else {
        controller
            .services()
            .iter()
            .flat_map(|service| {
                let active = controller.selected_service_id() == Some(service.id);
                let marker = if active { "▶ " } else { "  " };
                let label_style = if active {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let glyph = icon(ServiceIcon::for_key(&service.description_key));
                [
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(Color::Cyan)),
                        Span::styled(format!("{glyph} "), label_style),
                        Span::styled(
                            truncate(app.label(&service.translations), label_width),
                            label_style,
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("    {}", truncate(&service.description_key, label_width)),
                        Style::default().fg(Color::DarkGray),
                    )),
                ]
            })
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_content(f: &mut Frame, app: &TuiApp, state: &ConfiguratorState, area: Rect) {
    let page = app.rendered_page();
    let title = match (&page, state.controller.view()) {
        (Some(page), ConfiguratorView::Layout(_)) => format!(" {} ", page.title),
        _ => " Configuration ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner_width = block.inner(area).width as usize;

    let lines = if !state.services_loaded {
        vec![message_line(LOADING_MESSAGE)]
    } else {
        match (state.controller.view(), &page) {
            (ConfiguratorView::Loading, _) => vec![message_line(LOADING_MESSAGE)],
            (ConfiguratorView::Layout(_), Some(page)) => page_lines(page, inner_width),
            _ => vec![message_line(NO_LAYOUT_MESSAGE)],
        }
    };

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((app.content_scroll, 0)),
        area,
    );
}

/// Styled lines of a rendered page: badge, rule, then each block in order.
pub fn page_lines(page: &RenderedPage, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", page.badge),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
        Line::from(Span::styled(rule(width), Style::default().fg(Color::DarkGray))),
    ];
    block_lines(&page.body, &mut lines);
    lines
}

fn block_lines(block: &RenderedBlock, lines: &mut Vec<Line<'static>>) {
    let indent = "  ".repeat(block.indent);

    if let Some(header) = &block.header {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled("▍", Style::default().fg(Color::Cyan)),
            Span::styled(
                header.label.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let row_indent = if block.header.is_some() {
        format!("{indent}  ")
    } else {
        indent
    };

    if let Some(grid) = &block.grid {
        let label_width = grid
            .rows
            .iter()
            .map(|r| display_width(&r.label))
            .max()
            .unwrap_or(0);
        for row in &grid.rows {
            let mut spans = vec![
                Span::raw(row_indent.clone()),
                Span::styled(
                    pad_right(&row.label, label_width),
                    Style::default().fg(Color::White),
                ),
                Span::raw("  "),
            ];
            spans.extend(control_spans(&row.control));
            spans.push(Span::styled(
                format!("  {}", row.badge),
                Style::default().fg(Color::DarkGray),
            ));
            lines.push(Line::from(spans));
        }
    }

    for child in &block.children {
        block_lines(child, lines);
    }

    if let Some(empty) = &block.empty {
        lines.push(message_line(&empty.message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::controller::LayoutResponse;
    use crate::render::EMPTY_SERVICE_MESSAGE;
    use crate::source::{FixtureSource, LayoutSource};
    use crate::tui::app::{AppEvent, Effect};
    use crate::tui::layout::test_support::render_to_text;

    /// Open the configurator for recloser `recloser`, firmware `firmware`
    /// (indices), delivering the service list but no layout.
    async fn open(recloser: usize, firmware: usize) -> (TuiApp, FixtureSource) {
        let source = FixtureSource::sample();
        let mut app = TuiApp::new(&Config::default());
        app.apply_event(AppEvent::Inventory(source.fetch_inventory().await.unwrap()));
        for _ in 0..recloser {
            app.move_down();
        }
        app.open();
        for _ in 0..firmware {
            app.move_down();
        }
        app.open();
        app.drain_effects();
        let firmware_id = app.configurator.as_ref().unwrap().firmware_id;
        let services = source.fetch_service_summaries(firmware_id).await.unwrap();
        app.apply_event(AppEvent::Services {
            firmware_id,
            services,
        });
        (app, source)
    }

    /// Perform every queued layout fetch against `source`.
    async fn settle(app: &mut TuiApp, source: &FixtureSource) {
        for effect in app.drain_effects() {
            if let Effect::FetchLayout(request) = effect {
                let layout = source.fetch_service_layout(request.service_id).await.unwrap();
                app.apply_event(AppEvent::Layout(LayoutResponse {
                    request_id: request.request_id,
                    layout,
                }));
            }
        }
    }

    #[tokio::test]
    async fn header_and_sidebar() {
        let (mut app, source) = open(1, 0).await;
        settle(&mut app, &source).await;
        let text = render_to_text(&app, 110, 30);
        assert!(text.contains("Zeus NG 1P/2W / v1.1.0"));
        assert!(text.contains("▶ ◆ Protection"));
        assert!(text.contains("≈ Measurements"));
        assert!(text.contains("COMMUNICATION"));
    }

    #[tokio::test]
    async fn loading_until_layout_arrives() {
        let (app, _source) = open(0, 0).await;
        let text = render_to_text(&app, 110, 20);
        assert!(text.contains(LOADING_MESSAGE));
    }

    #[tokio::test]
    async fn nested_layout_renders_sections_and_controls() {
        let (mut app, source) = open(1, 0).await;
        settle(&mut app, &source).await;
        let text = render_to_text(&app, 120, 30);
        assert!(text.contains("PROTECTION"));
        assert!(text.contains("▍Phase Overcurrent"));
        assert!(text.contains("▍Sensitive Earth Fault"));
        assert!(text.contains("[x]"));
        assert!(text.contains("Min: 10"));
    }

    #[tokio::test]
    async fn empty_service_shows_placeholder() {
        let (mut app, source) = open(1, 0).await;
        settle(&mut app, &source).await;
        app.move_down();
        settle(&mut app, &source).await;
        let text = render_to_text(&app, 110, 20);
        assert!(text.contains("▶ ≈ Measurements"));
        assert!(text.contains(EMPTY_SERVICE_MESSAGE));
    }

    #[tokio::test]
    async fn missing_layout_prompts_for_selection() {
        let (mut app, _source) = open(0, 0).await;
        let Effect::FetchLayout(request) = app.drain_effects()[0] else {
            panic!("expected a layout fetch");
        };
        app.apply_event(AppEvent::Layout(LayoutResponse {
            request_id: request.request_id,
            layout: None,
        }));
        let text = render_to_text(&app, 110, 20);
        assert!(text.contains(NO_LAYOUT_MESSAGE));
    }

    #[tokio::test]
    async fn language_switch_relabels_without_refetch() {
        let (mut app, source) = open(0, 0).await;
        settle(&mut app, &source).await;
        app.cycle_language();
        assert!(app.drain_effects().is_empty());
        let text = render_to_text(&app, 110, 20);
        assert!(text.contains("Data e Hora"));
    }

    #[test]
    fn page_lines_indent_nested_rows() {
        use crate::model::{Feature, ServiceNode, Translation};

        fn node(id: i64, key: &str, features: Vec<Feature>, children: Vec<ServiceNode>) -> ServiceNode {
            ServiceNode {
                service_id: id,
                description_key: key.to_uppercase(),
                translations: vec![Translation::new("enUs", key)],
                features,
                children,
            }
        }

        let toggle = Feature {
            feature_id: 1,
            component_type: "Toggle".into(),
            translations: vec![Translation::new("enUs", "On")],
            limits: vec![],
        };
        let root = node(1, "Root", vec![], vec![node(2, "A", vec![], vec![node(3, "B", vec![toggle], vec![])])]);
        let page = crate::render::Renderer::default().render_page(&root);

        let text: Vec<String> = page_lines(&page, 20)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text[0], " ROOT ");
        assert!(text.contains(&"▍A".to_string()));
        assert!(text.contains(&"  ▍B".to_string()));
        assert!(text.contains(&"    On  (○  ) off  Toggle".to_string()));
    }
}
