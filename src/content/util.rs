// src/content/util.rs
//!
//! Readers for content maps. Missing or mistyped fields fall back to defaults.

use serde_json::Value;

fn as_u64(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

pub fn read_identifier(content: &Value) -> String {
    content
        .get("identifier")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub fn read_origin(content: &Value) -> String {
    content
        .pointer("/contentMetadata/virality/origin")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub fn read_transfer_count(content: &Value) -> u64 {
    as_u64(content.pointer("/contentMetadata/virality/transferCount"))
}

pub fn read_size(content: &Value) -> u64 {
    as_u64(content.get("size"))
}

/// `pkgVersion` arrives as a number or a numeric string
pub fn read_pkg_version(content: &Value) -> f64 {
    match content.get("pkgVersion") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
