use std::sync::OnceLock;

use ns_core::NsValue;
use regex::Regex;

use crate::{Interpreter, LocalOverlay};

// Recognition order is a semantic contract: each rule only runs when every
// earlier rule failed to match the whole trimmed expression.
impl Interpreter {
    pub(crate) fn evaluate(&self, expr: &str, locals: &LocalOverlay) -> NsValue {
        let expr = expr.trim();

        if expr.len() >= 2 && expr.starts_with('"') && expr.ends_with('"') {
            return NsValue::String(unescape_string_literal(&expr[1..expr.len() - 1]));
        }

        if number_literal_regex().is_match(expr) {
            return NsValue::Number(expr.parse::<f64>().unwrap_or(f64::NAN));
        }

        if expr.len() >= 2 && expr.starts_with('[') && expr.ends_with(']') {
            return self.evaluate_array_literal(&expr[1..expr.len() - 1], locals);
        }

        if expr.len() >= 2 && expr.starts_with('{') && expr.ends_with('}') {
            return self.evaluate_record_literal(&expr[1..expr.len() - 1], locals);
        }

        if let Some(caps) = index_access_regex().captures(expr) {
            let base = self.read_variable(locals, &caps[1]);
            let index = self.evaluate(&caps[2], locals);
            return index_value(&base, &index);
        }

        if let Some(caps) = property_access_regex().captures(expr) {
            let base = self.read_variable(locals, &caps[1]);
            return property_value(&base, &caps[2]);
        }

        if identifier_regex().is_match(expr) {
            return self.read_variable(locals, expr);
        }

        if expr.contains('+') {
            return self.evaluate_additive(expr, locals);
        }

        if expr.contains("==") {
            let mut sides = expr.splitn(2, "==");
            let left = self.evaluate(sides.next().unwrap_or_default(), locals);
            let right = self.evaluate(sides.next().unwrap_or_default(), locals);
            return NsValue::Bool(left.loose_eq(&right));
        }

        NsValue::String(expr.to_string())
    }

    fn evaluate_array_literal(&self, content: &str, locals: &LocalOverlay) -> NsValue {
        if content.trim().is_empty() {
            return NsValue::Array(Vec::new());
        }
        // Split on every comma; a comma inside a nested literal ends the
        // element early.
        NsValue::Array(
            content
                .split(',')
                .map(|item| self.evaluate(item, locals))
                .collect(),
        )
    }

    fn evaluate_record_literal(&self, content: &str, locals: &LocalOverlay) -> NsValue {
        let mut fields: Vec<(String, NsValue)> = Vec::new();
        if content.trim().is_empty() {
            return NsValue::Record(fields);
        }
        for pair in content.split(',') {
            // Key is the literal text before the first colon; pairs
            // without a colon are dropped.
            let Some(colon) = pair.find(':') else {
                continue;
            };
            let key = pair[..colon].trim().to_string();
            let value = self.evaluate(&pair[colon + 1..], locals);
            if let Some(slot) = fields.iter_mut().find(|(name, _)| *name == key) {
                slot.1 = value;
            } else {
                fields.push((key, value));
            }
        }
        NsValue::Record(fields)
    }

    fn evaluate_additive(&self, expr: &str, locals: &LocalOverlay) -> NsValue {
        let mut parts = expr.split('+');
        let mut accumulator = self.evaluate(parts.next().unwrap_or_default(), locals);
        for part in parts {
            let operand = self.evaluate(part, locals);
            accumulator = add_values(accumulator, operand);
        }
        accumulator
    }
}

fn add_values(left: NsValue, right: NsValue) -> NsValue {
    if matches!(left, NsValue::String(_)) || matches!(right, NsValue::String(_)) {
        return NsValue::String(format!(
            "{}{}",
            left.to_display_text(),
            right.to_display_text()
        ));
    }
    NsValue::Number(numeric_operand(&left) + numeric_operand(&right))
}

fn numeric_operand(value: &NsValue) -> f64 {
    match value {
        NsValue::Number(number) => *number,
        NsValue::Bool(true) => 1.0,
        NsValue::Bool(false) => 0.0,
        _ => f64::NAN,
    }
}

fn index_value(base: &NsValue, index: &NsValue) -> NsValue {
    match (base, index) {
        (NsValue::Array(items), NsValue::Number(position)) => array_element(items, *position),
        (NsValue::Array(items), NsValue::String(key)) => {
            if key == "length" {
                return NsValue::Number(items.len() as f64);
            }
            match key.parse::<f64>() {
                Ok(position) => array_element(items, position),
                Err(_) => NsValue::Undefined,
            }
        }
        (NsValue::String(text), NsValue::Number(position)) => string_char(text, *position),
        (NsValue::String(text), NsValue::String(key)) => {
            if key == "length" {
                NsValue::Number(text.chars().count() as f64)
            } else {
                match key.parse::<f64>() {
                    Ok(position) => string_char(text, position),
                    Err(_) => NsValue::Undefined,
                }
            }
        }
        (NsValue::Record(_), key) => base
            .record_field(&key.to_display_text())
            .cloned()
            .unwrap_or(NsValue::Undefined),
        _ => NsValue::Undefined,
    }
}

fn property_value(base: &NsValue, field: &str) -> NsValue {
    match base {
        NsValue::Record(_) => base
            .record_field(field)
            .cloned()
            .unwrap_or(NsValue::Undefined),
        NsValue::Array(items) if field == "length" => NsValue::Number(items.len() as f64),
        NsValue::String(text) if field == "length" => {
            NsValue::Number(text.chars().count() as f64)
        }
        _ => NsValue::Undefined,
    }
}

fn array_element(items: &[NsValue], position: f64) -> NsValue {
    if position < 0.0 || position.fract() != 0.0 {
        return NsValue::Undefined;
    }
    items
        .get(position as usize)
        .cloned()
        .unwrap_or(NsValue::Undefined)
}

fn string_char(text: &str, position: f64) -> NsValue {
    if position < 0.0 || position.fract() != 0.0 {
        return NsValue::Undefined;
    }
    text.chars()
        .nth(position as usize)
        .map(|ch| NsValue::String(ch.to_string()))
        .unwrap_or(NsValue::Undefined)
}

// `\n`, `\t`, `\\`, replaced in that order; no other escapes exist.
fn unescape_string_literal(raw: &str) -> String {
    raw.replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\\\", "\\")
}

fn number_literal_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^-?\d+\.?\d*$").expect("number literal regex must compile"))
}

fn index_access_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\w+)\[(.+)\]$").expect("index access regex must compile"))
}

fn property_access_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX
        .get_or_init(|| Regex::new(r"^(\w+)\.(\w+)$").expect("property access regex must compile"))
}

fn identifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\w+$").expect("identifier regex must compile"))
}
