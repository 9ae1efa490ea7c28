//! Events dataset: quality events (incidents, non-conformities, complaints, maintenance, audits).

use crate::datasets::{DatasetDefinition, DisplayFormat, MeasureDefinition};

use super::fields::{
    boolean_filter, created_at_dimension, created_at_filter, enum_filter, member, number_filter,
    record_count, status_dimension, status_filter, tenant_policy, text_dimension, text_filter,
    time_dimension, time_filter,
};

pub const DATASET_ID: &str = "events";
const CUBE: &str = "EventsView";

pub const EVENT_TYPES: &[&str] = &[
    "incident",
    "nonconformity",
    "complaint",
    "maintenance",
    "audit",
];
const STATUSES: &[&str] = &["open", "in_progress", "closed", "cancelled"];
const PRIORITIES: &[&str] = &["low", "medium", "high", "critical"];

/// Event types that carry a root cause and a resolution lifecycle.
const CORRECTIVE_TYPES: &[&str] = &["incident", "nonconformity", "complaint"];

pub fn events_dataset() -> DatasetDefinition {
    DatasetDefinition::new(DATASET_ID, "Events")
        .measure("event_count", record_count(CUBE, "Number of events"))
        .measure(
            "open_event_count",
            MeasureDefinition::new(member(CUBE, "openCount"), "Open events"),
        )
        .measure(
            "closed_event_count",
            MeasureDefinition::new(member(CUBE, "closedCount"), "Closed events"),
        )
        .measure(
            "overdue_event_count",
            MeasureDefinition::new(member(CUBE, "overdueCount"), "Overdue events"),
        )
        .measure(
            "closure_rate",
            MeasureDefinition::new(member(CUBE, "closureRate"), "Closure rate")
                .format(DisplayFormat::Percent),
        )
        .measure(
            "avg_resolution_days",
            MeasureDefinition::new(
                member(CUBE, "avgResolutionDays"),
                "Average resolution time (days)",
            )
            .for_event_types(CORRECTIVE_TYPES.iter().copied()),
        )
        .measure(
            "total_cost",
            MeasureDefinition::new(member(CUBE, "totalCost"), "Total cost")
                .format(DisplayFormat::Currency),
        )
        .measure(
            "distinct_sites",
            MeasureDefinition::new(member(CUBE, "distinctSites"), "Distinct sites").hidden(),
        )
        .dimension("event_type", text_dimension(CUBE, "eventType", "Event type"))
        .dimension("status", status_dimension(CUBE))
        .dimension("priority", text_dimension(CUBE, "priority", "Priority"))
        .dimension(
            "severity",
            text_dimension(CUBE, "severity", "Severity")
                .for_event_types(CORRECTIVE_TYPES.iter().copied()),
        )
        .dimension("site", text_dimension(CUBE, "siteName", "Site"))
        .dimension("department", text_dimension(CUBE, "department", "Department"))
        .dimension("created_by", text_dimension(CUBE, "createdBy", "Created by"))
        .dimension(
            "technical_contact",
            text_dimension(CUBE, "technicalContact", "Technical contact")
                .for_event_types(["maintenance"]),
        )
        .dimension("created_at", created_at_dimension(CUBE))
        .dimension("due_date", time_dimension(CUBE, "dueDate", "Due date"))
        .filter("created_at", created_at_filter(CUBE))
        .filter("due_date", time_filter(CUBE, "dueDate"))
        .filter("closed_at", time_filter(CUBE, "closedAt"))
        .filter("event_type", enum_filter(CUBE, "eventType", EVENT_TYPES))
        .filter("status", status_filter(CUBE, STATUSES))
        .filter("priority", enum_filter(CUBE, "priority", PRIORITIES))
        .filter(
            "severity",
            enum_filter(CUBE, "severity", &["minor", "major", "critical"])
                .for_event_types(CORRECTIVE_TYPES.iter().copied()),
        )
        .filter("site", text_filter(CUBE, "siteName"))
        .filter("department", text_filter(CUBE, "department"))
        .filter("created_by", text_filter(CUBE, "createdBy"))
        .filter("is_overdue", boolean_filter(CUBE, "isOverdue"))
        .filter("cost", number_filter(CUBE, "cost"))
        .secured_by(tenant_policy(CUBE, 1000, 365))
}
