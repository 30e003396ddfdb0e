use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NsValue {
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<NsValue>),
    Record(Vec<(String, NsValue)>),
    Undefined,
}

impl NsValue {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Record(_) => "record",
            Self::Undefined => "undefined",
        }
    }

    pub fn record_field(&self, key: &str) -> Option<&NsValue> {
        match self {
            Self::Record(fields) => fields
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn to_display_text(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => number_to_text(*value),
            Self::String(value) => value.clone(),
            Self::Array(items) => items
                .iter()
                .map(array_item_text)
                .collect::<Vec<_>>()
                .join(","),
            Self::Record(fields) => {
                let body = fields
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value.to_display_text()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", body)
            }
            Self::Undefined => "undefined".to_string(),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::String(value) => !value.is_empty(),
            Self::Array(_) | Self::Record(_) => true,
            Self::Undefined => false,
        }
    }

    pub fn loose_eq(&self, other: &NsValue) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) => true,
            (Self::Undefined, _) | (_, Self::Undefined) => false,
            (Self::Bool(a), b) => Self::Number(bool_to_number(*a)).loose_eq(b),
            (a, Self::Bool(b)) => a.loose_eq(&Self::Number(bool_to_number(*b))),
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::String(b)) => *a == coerce_text_to_number(b),
            (Self::String(a), Self::Number(b)) => coerce_text_to_number(a) == *b,
            (Self::Array(_), Self::String(b)) => self.to_display_text() == *b,
            (Self::String(a), Self::Array(_)) => *a == other.to_display_text(),
            (Self::Array(_), Self::Number(b)) => {
                coerce_text_to_number(&self.to_display_text()) == *b
            }
            (Self::Number(a), Self::Array(_)) => {
                *a == coerce_text_to_number(&other.to_display_text())
            }
            // Arrays and records compare by reference in the source
            // language; two separately evaluated literals never match.
            _ => false,
        }
    }
}

pub fn coerce_text_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn bool_to_number(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn number_to_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    format!("{}", value)
}

// Undefined entries inside an array render as empty segments.
fn array_item_text(value: &NsValue) -> String {
    match value {
        NsValue::Undefined => String::new(),
        other => other.to_display_text(),
    }
}
