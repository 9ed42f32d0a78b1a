//! One-line terminal affordances for mapped controls.
//!
//! The TUI is a viewer: controls show their pre-filled value (or a dim
//! placeholder) plus any constraints, but are not editable.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::control::{ControlSpec, NumericKind};

const FIELD: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
const PLACEHOLDER: Style = Style::new().fg(Color::Gray).bg(Color::DarkGray);
const HINT: Style = Style::new().fg(Color::DarkGray);

/// Spans for one control, left to right.
pub fn control_spans(control: &ControlSpec) -> Vec<Span<'static>> {
    match control {
        ControlSpec::Select { default, .. } => {
            let mut spans = field(default.as_deref(), "Select...");
            spans.push(Span::styled("▾ ", FIELD));
            spans
        }
        ControlSpec::Number {
            numeric,
            step,
            default,
            hints,
            ..
        } => {
            let placeholder = match numeric {
                NumericKind::Integer => "0",
                NumericKind::Decimal => "0.00",
            };
            let mut spans = field(default.as_deref(), placeholder);
            spans.push(Span::styled(format!(" ±{step}"), HINT));
            if !hints.is_empty() {
                spans.push(Span::styled(format!("  {}", hints.join("  ")), HINT));
            }
            spans
        }
        ControlSpec::Text {
            min_length,
            max_length,
            default,
        } => {
            let mut spans = field(default.as_deref(), "Enter text");
            if let Some(hint) = length_hint(*min_length, *max_length) {
                spans.push(Span::styled(format!("  {hint}"), HINT));
            }
            spans
        }
        ControlSpec::Toggle => vec![Span::styled(
            "(○  ) off",
            Style::default().fg(Color::Gray),
        )],
        ControlSpec::Checkbox { checked } => {
            if *checked {
                vec![Span::styled(
                    "[x]",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )]
            } else {
                vec![Span::styled("[ ]", Style::default().fg(Color::Gray))]
            }
        }
        ControlSpec::Date { default } => field(default.as_deref(), "YYYY-MM-DD"),
        ControlSpec::Time { default } => field(default.as_deref(), "HH:MM:SS"),
        ControlSpec::DateTime { default } => field(default.as_deref(), "YYYY-MM-DD HH:MM"),
        ControlSpec::FreeText { default } => field(default.as_deref(), "Enter value"),
    }
}

/// Plain text of `control_spans`, for tests and width calculations.
pub fn control_text(control: &ControlSpec) -> String {
    control_spans(control)
        .iter()
        .map(|s| s.content.as_ref())
        .collect()
}

fn field(value: Option<&str>, placeholder: &str) -> Vec<Span<'static>> {
    match value {
        Some(v) => vec![Span::styled(format!(" {v} "), FIELD)],
        None => vec![Span::styled(format!(" {placeholder} "), PLACEHOLDER)],
    }
}

fn length_hint(min: Option<usize>, max: Option<usize>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) => Some(format!("{min}-{max} chars")),
        (Some(min), None) => Some(format!("at least {min} chars")),
        (None, Some(max)) => Some(format!("up to {max} chars")),
        (None, None) => None,
    }
}
