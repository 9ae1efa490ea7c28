//! Request validation against a dataset definition.
//!
//! Checks run in a fixed order and stop at the first violation:
//! dataset, KPIs, dimensions, filters (field, operator, date-range cap),
//! filter groups (logic, then each member's field and operator), pagination, sort.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::datasets::{DatasetDefinition, FilterDefinition};
use crate::error::ValidationError;
use crate::registry::DatasetRegistry;
use crate::request::{FilterRequest, GroupLogic, Page, QueryRequest, SortSpec};

type Check = std::result::Result<(), ValidationError>;

#[derive(Debug, Default, Clone, Copy)]
pub struct QueryValidator;

impl QueryValidator {
    pub fn new() -> Self {
        Self
    }

    /// Look the dataset up in `registry`, then validate against it.
    pub fn validate_in(&self, registry: &DatasetRegistry, request: &QueryRequest) -> Check {
        self.validate(request, registry.get(&request.dataset_id))
    }

    pub fn validate(&self, request: &QueryRequest, dataset: Option<&DatasetDefinition>) -> Check {
        let dataset =
            dataset.ok_or_else(|| ValidationError::dataset_not_found(&request.dataset_id))?;

        for kpi in &request.kpis {
            check(dataset.measures.contains_key(kpi), || {
                ValidationError::unknown_measure(&dataset.id, kpi)
            })?;
        }

        for dimension in &request.group_by {
            check(dataset.dimensions.contains_key(dimension), || {
                ValidationError::unknown_dimension(&dataset.id, dimension)
            })?;
        }

        for filter in &request.filters {
            let definition = self.validate_filter(filter, dataset)?;
            if definition.is_time() {
                self.validate_date_span(filter, dataset)?;
            }
        }

        for group in &request.filter_groups {
            check(GroupLogic::parse(&group.logic).is_some(), || {
                ValidationError::invalid_group_logic(&group.logic)
            })?;
            for filter in &group.filters {
                self.validate_filter(filter, dataset)?;
            }
        }

        self.validate_page(&request.page, dataset)?;

        if let Some(sort) = &request.sort {
            self.validate_sort(sort, dataset)?;
        }

        Ok(())
    }

    fn validate_filter<'a>(
        &self,
        filter: &FilterRequest,
        dataset: &'a DatasetDefinition,
    ) -> std::result::Result<&'a FilterDefinition, ValidationError> {
        let definition = dataset
            .filters
            .get(&filter.field)
            .ok_or_else(|| ValidationError::unknown_filter_field(&dataset.id, &filter.field))?;
        check(definition.allows_operator(&filter.operator), || {
            ValidationError::operator_not_allowed(
                &filter.field,
                &filter.operator,
                &definition.allowed_operators,
            )
        })?;
        Ok(definition)
    }

    /// Values that do not parse as a two-date range are not bounded ranges and pass.
    fn validate_date_span(&self, filter: &FilterRequest, dataset: &DatasetDefinition) -> Check {
        let Some(max_days) = dataset.max_date_range_days() else {
            return Ok(());
        };
        let Some((start, end)) = parse_date_range(&filter.value) else {
            return Ok(());
        };
        let span_days = (end - start).num_seconds() as f64 / 86_400.0;
        check(span_days <= f64::from(max_days), || {
            ValidationError::date_range_exceeded(&filter.field, span_days, max_days)
        })
    }

    fn validate_page(&self, page: &Page, dataset: &DatasetDefinition) -> Check {
        check(page.limit >= 1, || {
            ValidationError::invalid_pagination(format!(
                "limit must be at least 1, got {}",
                page.limit
            ))
        })?;
        check(page.offset >= 0, || {
            ValidationError::invalid_pagination(format!(
                "offset must not be negative, got {}",
                page.offset
            ))
        })?;
        if let Some(max_limit) = dataset.max_limit() {
            check(page.limit <= i64::from(max_limit), || {
                ValidationError::limit_exceeded(page.limit, max_limit)
            })?;
        }
        Ok(())
    }

    fn validate_sort(&self, sort: &SortSpec, dataset: &DatasetDefinition) -> Check {
        check(
            dataset.measures.contains_key(&sort.by) || dataset.dimensions.contains_key(&sort.by),
            || {
                ValidationError::invalid_sort(format!(
                    "sort field '{}' is neither a KPI nor a dimension of dataset '{}'",
                    sort.by, dataset.id
                ))
            },
        )?;
        check(
            sort.direction.eq_ignore_ascii_case("asc") || sort.direction.eq_ignore_ascii_case("desc"),
            || {
                ValidationError::invalid_sort(format!(
                    "sort direction '{}' must be 'asc' or 'desc'",
                    sort.direction
                ))
            },
        )
    }
}

fn check(condition: bool, error: impl FnOnce() -> ValidationError) -> Check {
    if condition {
        Ok(())
    } else {
        Err(error())
    }
}

/// Parse a two-endpoint range from `["start", "end"]` or `"start,end"`.
/// Only the first two endpoints are considered.
pub fn parse_date_range(value: &Value) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (start, end) = match value {
        Value::Array(items) if items.len() >= 2 => (items[0].as_str()?, items[1].as_str()?),
        Value::String(s) => {
            let mut parts = s.split(',');
            (parts.next()?, parts.next()?)
        }
        _ => return None,
    };
    Some((parse_date(start)?, parse_date(end)?))
}

fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
