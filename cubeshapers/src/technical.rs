//! Technical query shape handed to the OLAP engine client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalQuery {
    pub dataset: String,
    pub measures: Vec<String>,
    pub dimensions: Vec<String>,
    pub time_dimensions: Vec<TimeDimension>,
    pub filters: Vec<TechnicalFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<BTreeMap<String, String>>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeDimension {
    pub dimension: String,
    pub date_range: DateRange,
    pub granularity: Option<String>,
}

/// A normalized date range: explicit bounds, a relative expression, or an untouched value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DateRange {
    Bounds(Vec<String>),
    Expression(String),
    Raw(Value),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TechnicalFilter {
    Member {
        member: String,
        operator: CubeOperator,
        values: Vec<String>,
    },
    And {
        and: Vec<TechnicalFilter>,
    },
    Or {
        or: Vec<TechnicalFilter>,
    },
}

impl TechnicalFilter {
    pub fn equals(member: impl Into<String>, value: impl Into<String>) -> Self {
        TechnicalFilter::Member {
            member: member.into(),
            operator: CubeOperator::Equals,
            values: vec![value.into()],
        }
    }
}

/// Operators understood by the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CubeOperator {
    Equals,
    NotEquals,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_engine_shape() {
        let query = TechnicalQuery {
            dataset: "events".to_string(),
            measures: vec!["EventsView.count".to_string()],
            dimensions: vec![],
            time_dimensions: vec![TimeDimension {
                dimension: "EventsView.createdAt".to_string(),
                date_range: DateRange::Expression("last 7 days".to_string()),
                granularity: None,
            }],
            filters: vec![TechnicalFilter::Or {
                or: vec![TechnicalFilter::equals("EventsView.status", "open")],
            }],
            order: Some(BTreeMap::from([(
                "EventsView.count".to_string(),
                "desc".to_string(),
            )])),
            limit: 10,
            offset: 0,
        };

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "dataset": "events",
                "measures": ["EventsView.count"],
                "dimensions": [],
                "timeDimensions": [{
                    "dimension": "EventsView.createdAt",
                    "dateRange": "last 7 days",
                    "granularity": null
                }],
                "filters": [{"or": [{
                    "member": "EventsView.status",
                    "operator": "equals",
                    "values": ["open"]
                }]}],
                "order": {"EventsView.count": "desc"},
                "limit": 10,
                "offset": 0
            })
        );
    }

    #[test]
    fn operator_names_follow_engine_casing() {
        assert_eq!(
            serde_json::to_value(CubeOperator::NotContains).unwrap(),
            json!("notContains")
        );
        assert_eq!(
            serde_json::to_value(CubeOperator::StartsWith).unwrap(),
            json!("startsWith")
        );
    }
}
