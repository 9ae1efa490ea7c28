use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CubeshapeError>;

#[derive(Debug, Error)]
pub enum CubeshapeError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("execution error: {0}")]
    Execution(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Which rule a rejected request broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    DatasetNotFound,
    UnknownMeasure,
    UnknownDimension,
    UnknownFilterField,
    OperatorNotAllowed,
    DateRangeExceeded,
    InvalidPagination,
    LimitExceeded,
    InvalidSort,
    InvalidGroupLogic,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationKind::DatasetNotFound => "DatasetNotFound",
            ValidationKind::UnknownMeasure => "UnknownMeasure",
            ValidationKind::UnknownDimension => "UnknownDimension",
            ValidationKind::UnknownFilterField => "UnknownFilterField",
            ValidationKind::OperatorNotAllowed => "OperatorNotAllowed",
            ValidationKind::DateRangeExceeded => "DateRangeExceeded",
            ValidationKind::InvalidPagination => "InvalidPagination",
            ValidationKind::LimitExceeded => "LimitExceeded",
            ValidationKind::InvalidSort => "InvalidSort",
            ValidationKind::InvalidGroupLogic => "InvalidGroupLogic",
        };
        f.write_str(name)
    }
}

/// A rejected UI request. The reason is meant to be shown to the report author.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub reason: String,
}

impl ValidationError {
    pub fn new(kind: ValidationKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    pub fn dataset_not_found(id: &str) -> Self {
        Self::new(
            ValidationKind::DatasetNotFound,
            format!("dataset '{id}' not found"),
        )
    }

    pub fn unknown_measure(dataset: &str, id: &str) -> Self {
        Self::new(
            ValidationKind::UnknownMeasure,
            format!("KPI '{id}' is not available on dataset '{dataset}'"),
        )
    }

    pub fn unknown_dimension(dataset: &str, id: &str) -> Self {
        Self::new(
            ValidationKind::UnknownDimension,
            format!("dimension '{id}' is not available on dataset '{dataset}'"),
        )
    }

    pub fn unknown_filter_field(dataset: &str, field: &str) -> Self {
        Self::new(
            ValidationKind::UnknownFilterField,
            format!("filter field '{field}' is not available on dataset '{dataset}'"),
        )
    }

    pub fn operator_not_allowed(field: &str, operator: &str, allowed: &[String]) -> Self {
        Self::new(
            ValidationKind::OperatorNotAllowed,
            format!(
                "operator '{operator}' is not allowed for filter '{field}' (allowed: {})",
                allowed.join(", ")
            ),
        )
    }

    pub fn date_range_exceeded(field: &str, span_days: f64, max_days: u32) -> Self {
        Self::new(
            ValidationKind::DateRangeExceeded,
            format!(
                "date range on '{field}' spans {span_days:.1} days, maximum is {max_days}"
            ),
        )
    }

    pub fn invalid_pagination(reason: impl Into<String>) -> Self {
        Self::new(ValidationKind::InvalidPagination, reason)
    }

    pub fn limit_exceeded(limit: i64, max_limit: u32) -> Self {
        Self::new(
            ValidationKind::LimitExceeded,
            format!("limit {limit} exceeds the maximum of {max_limit} rows"),
        )
    }

    pub fn invalid_sort(reason: impl Into<String>) -> Self {
        Self::new(ValidationKind::InvalidSort, reason)
    }

    pub fn invalid_group_logic(logic: &str) -> Self {
        Self::new(
            ValidationKind::InvalidGroupLogic,
            format!("filter group logic '{logic}' must be 'and' or 'or'"),
        )
    }
}
