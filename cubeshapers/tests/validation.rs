//! Integration tests for request validation.

use cubeshape::datasets::{
    DatasetDefinition, DimensionDefinition, FilterDefinition, FilterType, MeasureDefinition,
    SecurityPolicy, ValueType,
};
use cubeshape::registry::DatasetRegistry;
use cubeshape::request::{FilterGroup, FilterRequest, Page, QueryRequest, SortSpec};
use cubeshape::validation::QueryValidator;
use cubeshape::ValidationKind;
use serde_json::json;

// ============================================================================
// Fixtures
// ============================================================================

fn dataset_with_caps(max_limit: Option<u32>, max_date_range_days: Option<u32>) -> DatasetDefinition {
    DatasetDefinition::new("events", "Events")
        .measure("event_count", MeasureDefinition::new("EventsView.count", "Events"))
        .dimension(
            "event_type",
            DimensionDefinition::new("EventsView.eventType", "Type", ValueType::String),
        )
        .filter(
            "created_at",
            FilterDefinition::new("EventsView.createdAt", FilterType::Time, ["inDateRange"]),
        )
        .filter(
            "status",
            FilterDefinition::new(
                "EventsView.status",
                FilterType::String,
                ["equals", "in", "notIn"],
            ),
        )
        .secured_by(SecurityPolicy {
            tenant_filter_member: "EventsView.tenant".to_string(),
            user_filter_member: String::new(),
            max_limit,
            max_date_range_days,
        })
}

fn request() -> QueryRequest {
    QueryRequest {
        dataset_id: "events".to_string(),
        kpis: vec!["event_count".to_string()],
        group_by: vec!["event_type".to_string()],
        ..Default::default()
    }
}

fn kind_of(request: &QueryRequest, dataset: &DatasetDefinition) -> Option<ValidationKind> {
    QueryValidator::new()
        .validate(request, Some(dataset))
        .err()
        .map(|e| e.kind)
}

// ============================================================================
// Happy paths
// ============================================================================

#[test]
fn known_ids_validate() {
    let dataset = dataset_with_caps(Some(1000), Some(365));
    let mut req = request();
    req.filters = vec![
        FilterRequest::new("status", "IN", json!(["open", "closed"])),
        FilterRequest::new("created_at", "inDateRange", json!("2024-01-01,2024-01-31")),
    ];
    req.filter_groups = vec![FilterGroup {
        logic: "OR".to_string(),
        filters: vec![FilterRequest::new("status", "equals", json!("open"))],
    }];
    req.sort = Some(SortSpec {
        by: "event_type".to_string(),
        direction: "DESC".to_string(),
    });
    assert!(QueryValidator::new().validate(&req, Some(&dataset)).is_ok());
}

#[test]
fn every_builtin_member_is_accepted() {
    let registry = DatasetRegistry::builtin();
    let validator = QueryValidator::new();
    for dataset in registry.list_all() {
        let req = QueryRequest {
            dataset_id: dataset.id.clone(),
            kpis: dataset.measures.keys().cloned().collect(),
            group_by: dataset.dimensions.keys().cloned().collect(),
            ..Default::default()
        };
        assert!(validator.validate_in(&registry, &req).is_ok(), "{}", dataset.id);
    }
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn missing_dataset_is_rejected() {
    let err = QueryValidator::new().validate(&request(), None).unwrap_err();
    assert_eq!(err.kind, ValidationKind::DatasetNotFound);

    let registry = DatasetRegistry::builtin();
    let mut req = request();
    req.dataset_id = "nope".to_string();
    let err = QueryValidator::new().validate_in(&registry, &req).unwrap_err();
    assert_eq!(err.kind, ValidationKind::DatasetNotFound);
    assert!(err.reason.contains("nope"));
}

#[test]
fn unknown_kpi_is_rejected() {
    let dataset = dataset_with_caps(None, None);
    let mut req = request();
    req.kpis.push("revenue".to_string());
    let err = QueryValidator::new()
        .validate(&req, Some(&dataset))
        .unwrap_err();
    assert_eq!(err.kind, ValidationKind::UnknownMeasure);
    assert!(err.reason.contains("revenue"));
}

#[test]
fn measures_are_checked_before_dimensions() {
    let dataset = dataset_with_caps(None, None);
    let mut req = request();
    req.kpis = vec!["revenue".to_string()];
    req.group_by = vec!["country".to_string()];
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::UnknownMeasure));
}

#[test]
fn unknown_dimension_is_rejected() {
    let dataset = dataset_with_caps(None, None);
    let mut req = request();
    req.group_by = vec!["country".to_string()];
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::UnknownDimension));
}

#[test]
fn unknown_filter_field_is_rejected() {
    let dataset = dataset_with_caps(None, None);
    let mut req = request();
    req.filters = vec![FilterRequest::new("priority", "equals", json!("high"))];
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::UnknownFilterField));
}

#[test]
fn disallowed_operator_is_rejected() {
    let dataset = dataset_with_caps(None, None);
    let mut req = request();
    req.filters = vec![FilterRequest::new("status", "contains", json!("op"))];
    let err = QueryValidator::new()
        .validate(&req, Some(&dataset))
        .unwrap_err();
    assert_eq!(err.kind, ValidationKind::OperatorNotAllowed);
    assert!(err.reason.contains("contains"));
}

#[test]
fn date_range_over_cap_is_rejected() {
    let mut req = request();
    req.filters = vec![FilterRequest::new(
        "created_at",
        "inDateRange",
        json!("2024-01-01,2024-01-05"),
    )];

    let tight = dataset_with_caps(None, Some(3));
    assert_eq!(kind_of(&req, &tight), Some(ValidationKind::DateRangeExceeded));

    let loose = dataset_with_caps(None, Some(30));
    assert_eq!(kind_of(&req, &loose), None);
}

#[test]
fn date_range_array_is_checked() {
    let mut req = request();
    req.filters = vec![FilterRequest::new(
        "created_at",
        "inDateRange",
        json!(["2023-01-01", "2024-06-01"]),
    )];
    let dataset = dataset_with_caps(None, Some(365));
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::DateRangeExceeded));
}

#[test]
fn unparseable_date_range_is_not_flagged() {
    let mut req = request();
    req.filters = vec![FilterRequest::new(
        "created_at",
        "inDateRange",
        json!("last 900 days"),
    )];
    let dataset = dataset_with_caps(None, Some(3));
    assert_eq!(kind_of(&req, &dataset), None);
}

#[test]
fn date_range_without_cap_is_not_checked() {
    let mut req = request();
    req.filters = vec![FilterRequest::new(
        "created_at",
        "inDateRange",
        json!("2000-01-01,2024-01-01"),
    )];
    let dataset = dataset_with_caps(None, None);
    assert_eq!(kind_of(&req, &dataset), None);
}

#[test]
fn group_logic_must_be_and_or() {
    let dataset = dataset_with_caps(None, None);
    let mut req = request();
    req.filter_groups = vec![FilterGroup {
        logic: "xor".to_string(),
        filters: vec![FilterRequest::new("status", "equals", json!("open"))],
    }];
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::InvalidGroupLogic));
}

#[test]
fn group_members_are_checked() {
    let dataset = dataset_with_caps(None, None);
    let mut req = request();
    req.filter_groups = vec![FilterGroup {
        logic: "and".to_string(),
        filters: vec![
            FilterRequest::new("status", "equals", json!("open")),
            FilterRequest::new("status", "startsWith", json!("op")),
        ],
    }];
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::OperatorNotAllowed));

    req.filter_groups[0].filters[1] = FilterRequest::new("owner", "equals", json!("me"));
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::UnknownFilterField));
}

#[test]
fn pagination_bounds() {
    let dataset = dataset_with_caps(Some(1000), None);
    let mut req = request();

    req.page = Page { limit: 0, offset: 0 };
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::InvalidPagination));

    req.page = Page { limit: 10, offset: -1 };
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::InvalidPagination));

    req.page = Page { limit: 1001, offset: 0 };
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::LimitExceeded));

    req.page = Page { limit: 1000, offset: 5000 };
    assert_eq!(kind_of(&req, &dataset), None);
}

#[test]
fn large_limit_without_cap_is_accepted() {
    let dataset = dataset_with_caps(None, None);
    let mut req = request();
    req.page = Page {
        limit: 50_000,
        offset: 0,
    };
    assert_eq!(kind_of(&req, &dataset), None);
}

#[test]
fn sort_must_reference_known_field_and_direction() {
    let dataset = dataset_with_caps(None, None);
    let mut req = request();

    req.sort = Some(SortSpec {
        by: "created_at".to_string(),
        direction: "asc".to_string(),
    });
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::InvalidSort));

    req.sort = Some(SortSpec {
        by: "event_count".to_string(),
        direction: "up".to_string(),
    });
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::InvalidSort));

    req.sort = Some(SortSpec {
        by: "event_count".to_string(),
        direction: "Desc".to_string(),
    });
    assert_eq!(kind_of(&req, &dataset), None);
}

#[test]
fn pagination_is_checked_before_sort() {
    let dataset = dataset_with_caps(Some(10), None);
    let mut req = request();
    req.page = Page {
        limit: 20,
        offset: 0,
    };
    req.sort = Some(SortSpec {
        by: "missing".to_string(),
        direction: "asc".to_string(),
    });
    assert_eq!(kind_of(&req, &dataset), Some(ValidationKind::LimitExceeded));
}
