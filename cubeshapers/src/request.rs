//! UI-level query request, expressed in business ids.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_PAGE_LIMIT: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub dataset_id: String,
    #[serde(default)]
    pub kpis: Vec<String>,
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub filters: Vec<FilterRequest>,
    #[serde(default)]
    pub filter_groups: Vec<FilterGroup>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub page: Page,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterRequest {
    pub field: String,
    pub operator: String,
    /// Scalar, array of scalars, or comma-separated string.
    #[serde(default)]
    pub value: Value,
}

impl FilterRequest {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value,
        }
    }
}

/// Filters combined with `and` / `or`. The logic token is checked by the validator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterGroup {
    pub logic: String,
    #[serde(default)]
    pub filters: Vec<FilterRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupLogic {
    And,
    Or,
}

impl GroupLogic {
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("and") {
            Some(GroupLogic::And)
        } else if token.eq_ignore_ascii_case("or") {
            Some(GroupLogic::Or)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SortSpec {
    pub by: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

fn default_direction() -> String {
    "asc".to_string()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}
