//! Control mapper — feature metadata to an interactive control description.
//!
//! The declared `component_type` is a free-form string from the backend. It is
//! normalized once into the closed [`ComponentType`] set, with `Unknown` as the
//! catch-all, so every feature maps to exactly one [`ControlSpec`]. Malformed
//! limits degrade to "unset", never to an error.

use std::fmt;

use serde::Serialize;

use crate::model::{Feature, Limit};

/// Step used by integer steppers when `STEP` is unset.
pub const INTEGER_STEP: &str = "1";
/// Step used by decimal/float steppers when `STEP` is unset.
pub const DECIMAL_STEP: &str = "0.01";

/// Normalized component category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    ComboBox,
    Integer,
    Decimal,
    Float,
    TextField,
    Toggle,
    CheckBox,
    Date,
    Time,
    DateTime,
    Unknown,
}

impl ComponentType {
    /// Case-insensitive parse. Anything unrecognized (including `""`) is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "COMBOBOX" => ComponentType::ComboBox,
            "INTEGER" => ComponentType::Integer,
            "DECIMAL" => ComponentType::Decimal,
            "FLOAT" => ComponentType::Float,
            "TEXTFIELD" => ComponentType::TextField,
            "TOGGLE" => ComponentType::Toggle,
            "CHECKBOX" => ComponentType::CheckBox,
            "DATE" => ComponentType::Date,
            "TIME" => ComponentType::Time,
            "DATETIME" => ComponentType::DateTime,
            _ => ComponentType::Unknown,
        }
    }
}

/// The fixed limit vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKey {
    MinValue,
    MaxValue,
    DefaultValue,
    Step,
    MaxChar,
    MinChar,
}

impl LimitKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "MIN_VALUE" => Some(LimitKey::MinValue),
            "MAX_VALUE" => Some(LimitKey::MaxValue),
            "DEFAULT_VALUE" => Some(LimitKey::DefaultValue),
            "STEP" => Some(LimitKey::Step),
            "MAX_CHAR" => Some(LimitKey::MaxChar),
            "MIN_CHAR" => Some(LimitKey::MinChar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LimitKey::MinValue => "MIN_VALUE",
            LimitKey::MaxValue => "MAX_VALUE",
            LimitKey::DefaultValue => "DEFAULT_VALUE",
            LimitKey::Step => "STEP",
            LimitKey::MaxChar => "MAX_CHAR",
            LimitKey::MinChar => "MIN_CHAR",
        }
    }
}

impl fmt::Display for LimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named limits extracted from a feature. Blank values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Limits {
    min_value: Option<String>,
    max_value: Option<String>,
    default_value: Option<String>,
    step: Option<String>,
    max_char: Option<String>,
    min_char: Option<String>,
}

impl Limits {
    /// First occurrence of each known key wins; unknown keys are ignored.
    pub fn from_entries(entries: &[Limit]) -> Self {
        let mut limits = Limits::default();
        for entry in entries {
            let Some(key) = LimitKey::from_key(&entry.key) else {
                continue;
            };
            if entry.value.trim().is_empty() {
                continue;
            }
            let slot = limits.slot_mut(key);
            if slot.is_none() {
                *slot = Some(entry.value.clone());
            }
        }
        limits
    }

    pub fn get(&self, key: LimitKey) -> Option<&str> {
        match key {
            LimitKey::MinValue => self.min_value.as_deref(),
            LimitKey::MaxValue => self.max_value.as_deref(),
            LimitKey::DefaultValue => self.default_value.as_deref(),
            LimitKey::Step => self.step.as_deref(),
            LimitKey::MaxChar => self.max_char.as_deref(),
            LimitKey::MinChar => self.min_char.as_deref(),
        }
    }

    fn slot_mut(&mut self, key: LimitKey) -> &mut Option<String> {
        match key {
            LimitKey::MinValue => &mut self.min_value,
            LimitKey::MaxValue => &mut self.max_value,
            LimitKey::DefaultValue => &mut self.default_value,
            LimitKey::Step => &mut self.step,
            LimitKey::MaxChar => &mut self.max_char,
            LimitKey::MinChar => &mut self.min_char,
        }
    }

    fn default_value(&self) -> Option<String> {
        self.default_value.clone()
    }

    /// A numeric limit, or `None` if unset or not a finite number.
    fn numeric(&self, key: LimitKey) -> Option<String> {
        self.get(key)
            .map(str::trim)
            .filter(|v| is_number(v))
            .map(str::to_string)
    }

    /// A length limit parsed as a non-negative integer.
    fn length(&self, key: LimitKey) -> Option<usize> {
        self.get(key).and_then(parse_length)
    }
}

/// Integer vs. fractional stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericKind {
    Integer,
    Decimal,
}

/// Description of one interactive control. Rendering is the UI layer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlSpec {
    /// Selection list. Options come from an external contract; always empty here.
    Select {
        default: Option<String>,
        options: Vec<String>,
    },
    /// Numeric stepper. `hints` lists only the limits that were explicitly set.
    Number {
        numeric: NumericKind,
        min: Option<String>,
        max: Option<String>,
        step: String,
        default: Option<String>,
        hints: Vec<String>,
    },
    /// Single-line text with optional length bounds.
    Text {
        min_length: Option<usize>,
        max_length: Option<usize>,
        default: Option<String>,
    },
    Toggle,
    Checkbox {
        checked: bool,
    },
    Date {
        default: Option<String>,
    },
    Time {
        default: Option<String>,
    },
    DateTime {
        default: Option<String>,
    },
    /// Fallback for unknown or missing component types.
    FreeText {
        default: Option<String>,
    },
}

impl ControlSpec {
    /// Short kind name, stable across variants' parameters.
    pub fn kind(&self) -> &'static str {
        match self {
            ControlSpec::Select { .. } => "select",
            ControlSpec::Number { .. } => "number",
            ControlSpec::Text { .. } => "text",
            ControlSpec::Toggle => "toggle",
            ControlSpec::Checkbox { .. } => "checkbox",
            ControlSpec::Date { .. } => "date",
            ControlSpec::Time { .. } => "time",
            ControlSpec::DateTime { .. } => "date_time",
            ControlSpec::FreeText { .. } => "free_text",
        }
    }

    /// Pre-filled value, if the control has one.
    pub fn default_value(&self) -> Option<&str> {
        match self {
            ControlSpec::Select { default, .. }
            | ControlSpec::Number { default, .. }
            | ControlSpec::Text { default, .. }
            | ControlSpec::Date { default }
            | ControlSpec::Time { default }
            | ControlSpec::DateTime { default }
            | ControlSpec::FreeText { default } => default.as_deref(),
            ControlSpec::Toggle | ControlSpec::Checkbox { .. } => None,
        }
    }
}

impl fmt::Display for ControlSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params: Vec<String> = Vec::new();
        match self {
            ControlSpec::Number {
                numeric,
                min,
                max,
                step,
                ..
            } => {
                if *numeric == NumericKind::Decimal {
                    params.push("decimal".into());
                }
                if let Some(min) = min {
                    params.push(format!("min={min}"));
                }
                if let Some(max) = max {
                    params.push(format!("max={max}"));
                }
                params.push(format!("step={step}"));
            }
            ControlSpec::Text {
                min_length,
                max_length,
                ..
            } => {
                if let Some(n) = min_length {
                    params.push(format!("min_length={n}"));
                }
                if let Some(n) = max_length {
                    params.push(format!("max_length={n}"));
                }
            }
            ControlSpec::Checkbox { checked } => params.push(format!("checked={checked}")),
            _ => {}
        }
        if let Some(default) = self.default_value() {
            params.push(format!("default={default}"));
        }

        if params.is_empty() {
            write!(f, "{}", self.kind())
        } else {
            write!(f, "{}({})", self.kind(), params.join(", "))
        }
    }
}

/// Map a feature to its control. Total and deterministic.
pub fn map_control(feature: &Feature) -> ControlSpec {
    let limits = Limits::from_entries(&feature.limits);

    match ComponentType::parse(&feature.component_type) {
        ComponentType::ComboBox => ControlSpec::Select {
            default: limits.default_value(),
            options: Vec::new(),
        },
        ComponentType::Integer => number(&limits, NumericKind::Integer, INTEGER_STEP),
        ComponentType::Decimal | ComponentType::Float => {
            number(&limits, NumericKind::Decimal, DECIMAL_STEP)
        }
        ComponentType::TextField => ControlSpec::Text {
            min_length: limits.length(LimitKey::MinChar),
            max_length: limits.length(LimitKey::MaxChar),
            default: limits.default_value(),
        },
        ComponentType::Toggle => ControlSpec::Toggle,
        ComponentType::CheckBox => ControlSpec::Checkbox {
            checked: limits.get(LimitKey::DefaultValue) == Some("true"),
        },
        ComponentType::Date => ControlSpec::Date {
            default: limits.default_value(),
        },
        ComponentType::Time => ControlSpec::Time {
            default: limits.default_value(),
        },
        ComponentType::DateTime => ControlSpec::DateTime {
            default: limits.default_value(),
        },
        ComponentType::Unknown => ControlSpec::FreeText {
            default: limits.default_value(),
        },
    }
}

fn number(limits: &Limits, numeric: NumericKind, fallback_step: &str) -> ControlSpec {
    let min = limits.numeric(LimitKey::MinValue);
    let max = limits.numeric(LimitKey::MaxValue);
    let explicit_step = limits.numeric(LimitKey::Step);

    let mut hints = Vec::new();
    if let Some(v) = &min {
        hints.push(format!("Min: {v}"));
    }
    if let Some(v) = &max {
        hints.push(format!("Max: {v}"));
    }
    if let Some(v) = &explicit_step {
        hints.push(format!("Step: {v}"));
    }

    ControlSpec::Number {
        numeric,
        min,
        max,
        step: explicit_step.unwrap_or_else(|| fallback_step.to_string()),
        default: limits.default_value(),
        hints,
    }
}

fn is_number(s: &str) -> bool {
    s.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

/// Leading-digits integer parse: `"12"` and `"12px"` give 12, `"abc"` and
/// `"-3"` give `None`.
fn parse_length(s: &str) -> Option<usize> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().ok()
}
