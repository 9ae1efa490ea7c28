//! Integration tests for the DatasetRegistry lookup and introspection API.

use cubeshape::catalog::{events_dataset, items_dataset};
use cubeshape::datasets::{DisplayFormat, FilterType};
use cubeshape::registry::DatasetRegistry;

#[test]
fn builtin_registry_holds_every_family() {
    let registry = DatasetRegistry::builtin();
    assert_eq!(registry.len(), 3);
    for id in ["events", "suppliers", "items"] {
        assert!(registry.get(id).is_some(), "missing {id}");
    }
}

#[test]
fn lookup_returns_definition_with_matching_id() {
    let registry = DatasetRegistry::builtin();
    for dataset in registry.list_all() {
        let found = registry.get(&dataset.id).expect("registered dataset");
        assert_eq!(found.id, dataset.id);
    }
}

#[test]
fn unknown_dataset_is_none() {
    let registry = DatasetRegistry::builtin();
    assert!(registry.get("warehouses").is_none());
    assert!(registry.dataset_schema("warehouses", None).is_none());
}

#[test]
fn duplicate_ids_keep_last_definition() {
    let mut relabeled = items_dataset();
    relabeled.label = "Inventory".to_string();
    let registry = DatasetRegistry::from_definitions(vec![items_dataset(), relabeled]);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("items").unwrap().label, "Inventory");
}

#[test]
fn summaries_are_sorted_by_id() {
    let registry = DatasetRegistry::builtin();
    let ids: Vec<_> = registry
        .list_dataset_summaries()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["events", "items", "suppliers"]);
}

#[test]
fn schema_omits_hidden_measures() {
    let registry = DatasetRegistry::builtin();
    let schema = registry.dataset_schema("events", None).expect("schema");

    let measure_ids: Vec<_> = schema.measures.iter().map(|m| m.id.as_str()).collect();
    assert!(measure_ids.contains(&"event_count"));
    assert!(!measure_ids.contains(&"distinct_sites"));

    // Hidden measures stay part of the definition and remain queryable.
    assert!(registry
        .get("events")
        .unwrap()
        .measures
        .contains_key("distinct_sites"));
}

#[test]
fn schema_exposes_formats_operators_and_limits() {
    let registry = DatasetRegistry::builtin();
    let schema = registry.dataset_schema("events", None).expect("schema");

    let cost = schema.measures.iter().find(|m| m.id == "total_cost").unwrap();
    assert_eq!(cost.format, DisplayFormat::Currency);

    let created_at = schema.filters.iter().find(|f| f.id == "created_at").unwrap();
    assert_eq!(created_at.filter_type, FilterType::Time);
    assert!(created_at.operators.iter().any(|o| o == "inDateRange"));

    assert_eq!(schema.max_limit, Some(1000));
    assert_eq!(schema.max_date_range_days, Some(365));
}

#[test]
fn schema_scoped_to_event_type() {
    let registry = DatasetRegistry::from_definitions(vec![events_dataset()]);

    let maintenance = registry
        .dataset_schema("events", Some("maintenance"))
        .expect("schema");
    let dims: Vec<_> = maintenance.dimensions.iter().map(|d| d.id.as_str()).collect();
    assert!(dims.contains(&"technical_contact"));
    assert!(!dims.contains(&"severity"));
    assert!(!maintenance
        .measures
        .iter()
        .any(|m| m.id == "avg_resolution_days"));

    let incident = registry
        .dataset_schema("events", Some("incident"))
        .expect("schema");
    assert!(incident.dimensions.iter().any(|d| d.id == "severity"));
    assert!(incident.filters.iter().any(|f| f.id == "severity"));
    assert!(!incident.dimensions.iter().any(|d| d.id == "technical_contact"));
}

#[test]
fn schema_serializes_with_ui_field_names() {
    let registry = DatasetRegistry::builtin();
    let schema = registry.dataset_schema("items", None).expect("schema");
    let json = serde_json::to_value(&schema).unwrap();
    assert_eq!(json["maxLimit"], 1000);
    let is_active = json["filters"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["id"] == "is_active")
        .unwrap();
    assert_eq!(is_active["type"], "Boolean");
    assert_eq!(is_active["allowedValues"], serde_json::json!(["true", "false"]));
}
