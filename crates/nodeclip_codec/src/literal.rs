// SPDX-License-Identifier: MIT OR Apache-2.0
//! Literal values in text form.
//!
//! Writing goes through small formatters so the output is stable byte for
//! byte; reading takes parsed YAML scalars and coerces them to the kind the
//! host declares for the target slot.

use nodeclip_graph::{Value, ValueKind};
use serde_yaml::Value as Yaml;

/// Decimal places for node properties
pub const PROPERTY_DIGITS: i32 = 4;
/// Decimal places for socket defaults and interface bounds
pub const SOCKET_DIGITS: i32 = 6;
/// Decimal places for curve mapping points
pub const CURVE_DIGITS: i32 = 2;

/// Round to `digits` decimal places, folding `-0.0` into `0.0`
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a float rounded to `digits` places
pub fn format_float(value: f64, digits: i32) -> String {
    if value.is_nan() {
        return ".nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { ".inf" } else { "-.inf" }.to_string();
    }
    format!("{:?}", round_to(value, digits))
}

/// Format a list of floats as `[a, b, c]`
pub fn format_list(values: &[f64], digits: i32) -> String {
    let items: Vec<String> = values.iter().map(|v| format_float(*v, digits)).collect();
    format!("[{}]", items.join(", "))
}

/// Format values rounded to the nearest integer as `[a, b]`
pub fn format_int_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format_int(*v)).collect();
    format!("[{}]", items.join(", "))
}

/// Format a float rounded to the nearest integer
pub fn format_int(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Format a boolean
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Format a string, quoting it when it would not read back as that string
pub fn format_str(value: &str) -> String {
    if value.chars().any(char::is_control) {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        for c in value.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\t' => out.push_str("\\t"),
                '\r' => out.push_str("\\r"),
                c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    } else if needs_quotes(value) {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        value.to_string()
    }
}

fn needs_quotes(value: &str) -> bool {
    const INDICATORS: &str = "-?:,[]{}#&*!|>'\"%@`";
    value.is_empty()
        || value.trim() != value
        || value.starts_with(|c: char| INDICATORS.contains(c))
        || value.contains(": ")
        || value.contains(" #")
        || value.ends_with(':')
        || reads_as_non_string(value)
}

fn reads_as_non_string(value: &str) -> bool {
    matches!(
        value,
        "~" | "null" | "Null" | "NULL" | "true" | "True" | "TRUE" | "false" | "False" | "FALSE"
    ) || value.parse::<f64>().is_ok()
        || value.starts_with("0x")
        || value.starts_with("0o")
        || value
            .to_ascii_lowercase()
            .trim_start_matches(|c| c == '+' || c == '-')
            .starts_with(".inf")
        || value.eq_ignore_ascii_case(".nan")
}

/// Format a value, or `None` when it has no text form.
///
/// Empty object/material references count as having no text form.
pub fn format_value(value: &Value, digits: i32) -> Option<String> {
    match value {
        Value::Float(v) => Some(format_float(*v, digits)),
        Value::Int(v) => Some(v.to_string()),
        Value::Bool(v) => Some(format_bool(*v).to_string()),
        Value::String(s) => Some(format_str(s)),
        Value::Vector(components) => Some(format_list(components, digits)),
        Value::Object(Some(name)) | Value::Material(Some(name)) => Some(format_str(name)),
        Value::Object(None) | Value::Material(None) | Value::Unsupported => None,
    }
}

/// Text of a scalar, for slots that hold names or enum identifiers
pub fn scalar_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(format_bool(*b).to_string()),
        _ => None,
    }
}

/// Read a number
pub fn number(value: &Yaml) -> Option<f64> {
    value.as_f64()
}

/// Read a list of numbers
pub fn numbers(value: &Yaml) -> Option<Vec<f64>> {
    value.as_sequence()?.iter().map(Yaml::as_f64).collect()
}

/// Coerce a parsed literal to a value of `kind`
pub fn coerce(value: &Yaml, kind: ValueKind) -> Result<Value, String> {
    let mismatch = || format!("expected {kind:?}, found {}", describe(value));
    match kind {
        ValueKind::Float => number(value).map(Value::Float).ok_or_else(mismatch),
        ValueKind::Int => value
            .as_i64()
            .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .map(Value::Int)
            .ok_or_else(mismatch),
        ValueKind::Bool => value.as_bool().map(Value::Bool).ok_or_else(mismatch),
        ValueKind::Vector | ValueKind::Color => numbers(value).map(Value::Vector).ok_or_else(mismatch),
        ValueKind::String => scalar_text(value).map(Value::String).ok_or_else(mismatch),
        ValueKind::Object => scalar_text(value).map(|s| Value::Object(Some(s))).ok_or_else(mismatch),
        ValueKind::Material => scalar_text(value)
            .map(|s| Value::Material(Some(s)))
            .ok_or_else(mismatch),
        ValueKind::Unsupported => Err("slot has no literal form".to_string()),
    }
}

fn describe(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a list",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}
