//! Operator table and value normalization shared by every strategy.

use serde_json::Value;

use crate::technical::{CubeOperator, DateRange};

/// Prefixes that mark a relative range the engine resolves itself ("last 7 days", "this month").
const RELATIVE_RANGE_KEYWORDS: &[&str] = &["last", "this", "next", "today", "yesterday"];

/// Map a UI operator token to the engine operator. Unknown tokens fall back to `equals`.
pub fn translate_operator(operator: &str) -> CubeOperator {
    match operator.trim().to_ascii_lowercase().as_str() {
        "eq" | "equals" => CubeOperator::Equals,
        "ne" | "notequals" => CubeOperator::NotEquals,
        "gt" | "greaterthan" => CubeOperator::Gt,
        "gte" | "greaterthanorequal" => CubeOperator::Gte,
        "lt" | "lessthan" => CubeOperator::Lt,
        "lte" | "lessthanorequal" => CubeOperator::Lte,
        "contains" => CubeOperator::Contains,
        "notcontains" => CubeOperator::NotContains,
        "startswith" => CubeOperator::StartsWith,
        "endswith" => CubeOperator::EndsWith,
        "in" => CubeOperator::Equals,
        "notin" => CubeOperator::NotEquals,
        _ => CubeOperator::Equals,
    }
}

/// Flatten a filter value into the engine's string list.
pub fn normalize_values(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(element_to_string)
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) if s.contains(',') => split_list(s),
        Value::String(s) => vec![s.clone()],
        Value::Number(n) => vec![n.to_string()],
        Value::Bool(b) => vec![b.to_string()],
        Value::Null | Value::Object(_) => Vec::new(),
    }
}

fn element_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn is_relative_range(s: &str) -> bool {
    let lowered = s.trim_start().to_ascii_lowercase();
    RELATIVE_RANGE_KEYWORDS
        .iter()
        .any(|keyword| lowered.starts_with(keyword))
}

/// Normalize the value of a Time filter into a time-dimension date range.
///
/// Relative expressions pass through, `"a,b"` becomes `["a", "b"]` (extra parts are
/// ignored), and anything else is forwarded as given.
pub fn normalize_date_range(value: &Value) -> DateRange {
    match value {
        Value::String(s) if is_relative_range(s) => DateRange::Expression(s.clone()),
        Value::String(s) if s.contains(',') => DateRange::Bounds(
            s.split(',')
                .take(2)
                .map(|part| part.trim().to_string())
                .collect(),
        ),
        Value::String(s) => DateRange::Expression(s.clone()),
        Value::Array(items) if items.iter().all(Value::is_string) => DateRange::Bounds(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        other => DateRange::Raw(other.clone()),
    }
}
