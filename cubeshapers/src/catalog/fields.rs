//! Reusable field factories.
//!
//! A logical field such as `created_at` is defined once here and stamped onto each
//! cube that exposes it, so its operators and type stay identical across datasets.

use crate::datasets::{
    DimensionDefinition, FilterDefinition, FilterType, MeasureDefinition, SecurityPolicy,
    ValueType,
};

pub const STRING_OPERATORS: &[&str] = &[
    "equals",
    "notEquals",
    "contains",
    "notContains",
    "startsWith",
    "endsWith",
    "in",
    "notIn",
];
pub const ENUM_OPERATORS: &[&str] = &["equals", "notEquals", "in", "notIn"];
pub const NUMBER_OPERATORS: &[&str] = &["equals", "notEquals", "gt", "gte", "lt", "lte"];
pub const TIME_OPERATORS: &[&str] = &["inDateRange", "notInDateRange", "beforeDate", "afterDate"];
pub const BOOLEAN_OPERATORS: &[&str] = &["equals", "notEquals"];

pub fn member(cube: &str, field: &str) -> String {
    format!("{cube}.{field}")
}

pub fn record_count(cube: &str, label: &str) -> MeasureDefinition {
    MeasureDefinition::new(member(cube, "count"), label)
}

pub fn text_dimension(cube: &str, field: &str, label: &str) -> DimensionDefinition {
    DimensionDefinition::new(member(cube, field), label, ValueType::String)
}

pub fn time_dimension(cube: &str, field: &str, label: &str) -> DimensionDefinition {
    DimensionDefinition::new(member(cube, field), label, ValueType::Time)
}

pub fn text_filter(cube: &str, field: &str) -> FilterDefinition {
    FilterDefinition::new(
        member(cube, field),
        FilterType::String,
        STRING_OPERATORS.iter().copied(),
    )
}

/// Closed value set, offered as a picker in the UI.
pub fn enum_filter(cube: &str, field: &str, values: &[&str]) -> FilterDefinition {
    FilterDefinition::new(
        member(cube, field),
        FilterType::String,
        ENUM_OPERATORS.iter().copied(),
    )
    .with_allowed_values(values.iter().copied())
}

pub fn number_filter(cube: &str, field: &str) -> FilterDefinition {
    FilterDefinition::new(
        member(cube, field),
        FilterType::Number,
        NUMBER_OPERATORS.iter().copied(),
    )
}

pub fn time_filter(cube: &str, field: &str) -> FilterDefinition {
    FilterDefinition::new(
        member(cube, field),
        FilterType::Time,
        TIME_OPERATORS.iter().copied(),
    )
}

pub fn boolean_filter(cube: &str, field: &str) -> FilterDefinition {
    FilterDefinition::new(
        member(cube, field),
        FilterType::Boolean,
        BOOLEAN_OPERATORS.iter().copied(),
    )
    .with_allowed_values(["true", "false"])
}

pub fn created_at_filter(cube: &str) -> FilterDefinition {
    time_filter(cube, "createdAt")
}

pub fn created_at_dimension(cube: &str) -> DimensionDefinition {
    time_dimension(cube, "createdAt", "Created at")
}

pub fn updated_at_filter(cube: &str) -> FilterDefinition {
    time_filter(cube, "updatedAt")
}

pub fn status_dimension(cube: &str) -> DimensionDefinition {
    text_dimension(cube, "status", "Status")
}

pub fn status_filter(cube: &str, statuses: &[&str]) -> FilterDefinition {
    enum_filter(cube, "status", statuses)
}

/// Tenant-scoped policy; every cube carries its tenant in a `tenant` member.
pub fn tenant_policy(cube: &str, max_limit: u32, max_date_range_days: u32) -> SecurityPolicy {
    SecurityPolicy {
        tenant_filter_member: member(cube, "tenant"),
        user_filter_member: String::new(),
        max_limit: Some(max_limit),
        max_date_range_days: Some(max_date_range_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_field_is_identical_across_cubes() {
        let events = created_at_filter("EventsView");
        let items = created_at_filter("ItemsView");
        assert_eq!(events.cube_member, "EventsView.createdAt");
        assert_eq!(items.cube_member, "ItemsView.createdAt");
        assert_eq!(events.allowed_operators, items.allowed_operators);
        assert!(events.is_time());
    }

    #[test]
    fn boolean_filter_has_closed_values() {
        let filter = boolean_filter("ItemsView", "isActive");
        assert_eq!(
            filter.allowed_values,
            Some(vec!["true".to_string(), "false".to_string()])
        );
    }
}
