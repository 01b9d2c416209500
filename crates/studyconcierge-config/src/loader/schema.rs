//! Schema validation helpers for StudyConcierge JSON5 configuration.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Validate a single config layer against the schema.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    ensure_allowed_keys(
        map,
        &[
            "$schema",
            "use_external_llm",
            "model_name",
            "chunk_size",
            "summarizer",
            "planner",
            "quiz",
            "memory",
            "tools",
        ],
        layer,
        "",
    )?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("use_external_llm") {
        expect_bool(value, layer, "use_external_llm")?;
    }
    if let Some(value) = map.get("model_name") {
        expect_string(value, layer, "model_name")?;
    }
    if let Some(value) = map.get("chunk_size") {
        expect_u64(value, layer, "chunk_size")?;
    }
    if let Some(value) = map.get("summarizer") {
        validate_u64_block(
            value,
            layer,
            "summarizer",
            &[
                "chunk_summary_chars",
                "final_summary_chars",
                "chunk_delay_ms",
            ],
        )?;
    }
    if let Some(value) = map.get("planner") {
        validate_planner(value, layer, "planner")?;
    }
    if let Some(value) = map.get("quiz") {
        validate_u64_block(
            value,
            layer,
            "quiz",
            &[
                "default_num_questions",
                "max_key_terms",
                "choices_per_question",
            ],
        )?;
    }
    if let Some(value) = map.get("memory") {
        validate_u64_block(value, layer, "memory", &["recall_limit", "search_top_k"])?;
    }
    if let Some(value) = map.get("tools") {
        validate_u64_block(value, layer, "tools", &["latency_ms"])?;
    }
    Ok(())
}

/// Validate the "planner" block.
fn validate_planner(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(
        map,
        &["default_hours_per_day", "default_horizon_days"],
        layer,
        path,
    )?;
    if let Some(value) = map.get("default_hours_per_day") {
        expect_f64(value, layer, &join_path(path, "default_hours_per_day"))?;
    }
    if let Some(value) = map.get("default_horizon_days") {
        expect_u64(value, layer, &join_path(path, "default_horizon_days"))?;
    }
    Ok(())
}

/// Validate a block whose fields are all non-negative integers.
fn validate_u64_block(
    value: &Value,
    layer: &str,
    path: &str,
    fields: &[&str],
) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, fields, layer, path)?;
    for (key, value) in map {
        expect_u64(value, layer, &join_path(path, key))?;
    }
    Ok(())
}

/// Expect a JSON object or return a typed error.
fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(layer, path, "expected object")),
    }
}

/// Expect a JSON string or return a typed error.
fn expect_string(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_string() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected string"))
    }
}

/// Expect a JSON boolean or return a typed error.
fn expect_bool(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected bool"))
    }
}

/// Expect a non-negative JSON integer.
fn expect_u64(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_u64() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected non-negative integer"))
    }
}

/// Expect any JSON number.
fn expect_f64(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_number() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected number"))
    }
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    match map.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(invalid_field(layer, &join_path(path, key), "unknown key")),
        None => Ok(()),
    }
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{normalized_path}"),
        message: message.to_string(),
    }
}
