//! Dataset definition model.
//!
//! A dataset is the unit a report author picks in the UI. It maps stable business ids
//! (KPIs, dimensions, filter fields) to cube members understood by the OLAP engine.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDefinition {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub measures: BTreeMap<String, MeasureDefinition>,
    #[serde(default)]
    pub dimensions: BTreeMap<String, DimensionDefinition>,
    #[serde(default)]
    pub filters: BTreeMap<String, FilterDefinition>,
    #[serde(default)]
    pub security: Option<SecurityPolicy>,
}

impl DatasetDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            measures: BTreeMap::new(),
            dimensions: BTreeMap::new(),
            filters: BTreeMap::new(),
            security: None,
        }
    }

    pub fn measure(mut self, id: impl Into<String>, measure: MeasureDefinition) -> Self {
        self.measures.insert(id.into(), measure);
        self
    }

    pub fn dimension(mut self, id: impl Into<String>, dimension: DimensionDefinition) -> Self {
        self.dimensions.insert(id.into(), dimension);
        self
    }

    pub fn filter(mut self, id: impl Into<String>, filter: FilterDefinition) -> Self {
        self.filters.insert(id.into(), filter);
        self
    }

    pub fn secured_by(mut self, policy: SecurityPolicy) -> Self {
        self.security = Some(policy);
        self
    }

    pub fn max_limit(&self) -> Option<u32> {
        self.security.as_ref().and_then(|s| s.max_limit)
    }

    pub fn max_date_range_days(&self) -> Option<u32> {
        self.security.as_ref().and_then(|s| s.max_date_range_days)
    }

    /// Copy of this dataset keeping only the members that apply to `event_type`.
    pub fn scoped_to(&self, event_type: &str) -> DatasetDefinition {
        DatasetDefinition {
            id: self.id.clone(),
            label: self.label.clone(),
            measures: retain_applicable(&self.measures, event_type),
            dimensions: retain_applicable(&self.dimensions, event_type),
            filters: retain_applicable(&self.filters, event_type),
            security: self.security.clone(),
        }
    }
}

fn retain_applicable<T: EventTypeScoped + Clone>(
    members: &BTreeMap<String, T>,
    event_type: &str,
) -> BTreeMap<String, T> {
    members
        .iter()
        .filter(|(_, member)| member.applies_to(event_type))
        .map(|(id, member)| (id.clone(), member.clone()))
        .collect()
}

/// Shared by measures, dimensions and filters: an optional restriction to event types.
pub trait EventTypeScoped {
    fn applicable_event_types(&self) -> &BTreeSet<String>;

    /// An empty set means the member applies everywhere.
    fn applies_to(&self, event_type: &str) -> bool {
        let types = self.applicable_event_types();
        types.is_empty() || types.iter().any(|t| t.eq_ignore_ascii_case(event_type))
    }
}

/// Semantic kind of the values a measure or dimension produces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Number,
    String,
    Time,
    Boolean,
}

/// Display hint for the charting layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayFormat {
    #[default]
    Number,
    Currency,
    Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasureDefinition {
    pub cube_member: String,
    pub label: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub format: DisplayFormat,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub applicable_event_types: BTreeSet<String>,
    /// Left out of schema listings, still accepted in queries.
    #[serde(default)]
    pub hidden: bool,
}

impl MeasureDefinition {
    pub fn new(cube_member: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            cube_member: cube_member.into(),
            label: label.into(),
            value_type: ValueType::Number,
            format: DisplayFormat::Number,
            applicable_event_types: BTreeSet::new(),
            hidden: false,
        }
    }

    pub fn format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn for_event_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applicable_event_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

impl EventTypeScoped for MeasureDefinition {
    fn applicable_event_types(&self) -> &BTreeSet<String> {
        &self.applicable_event_types
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DimensionDefinition {
    pub cube_member: String,
    pub label: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub applicable_event_types: BTreeSet<String>,
}

impl DimensionDefinition {
    pub fn new(
        cube_member: impl Into<String>,
        label: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            cube_member: cube_member.into(),
            label: label.into(),
            value_type,
            applicable_event_types: BTreeSet::new(),
        }
    }

    pub fn for_event_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applicable_event_types = types.into_iter().map(Into::into).collect();
        self
    }
}

impl EventTypeScoped for DimensionDefinition {
    fn applicable_event_types(&self) -> &BTreeSet<String> {
        &self.applicable_event_types
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FilterType {
    String,
    Number,
    Time,
    Boolean,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterDefinition {
    pub cube_member: String,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    /// Operator tokens accepted for this field, in display order.
    pub allowed_operators: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub applicable_event_types: BTreeSet<String>,
}

impl FilterDefinition {
    pub fn new<I, S>(cube_member: impl Into<String>, filter_type: FilterType, operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut allowed_operators: Vec<String> = Vec::new();
        for op in operators.into_iter().map(Into::into) {
            if !allowed_operators.iter().any(|o| o.eq_ignore_ascii_case(&op)) {
                allowed_operators.push(op);
            }
        }
        Self {
            cube_member: cube_member.into(),
            filter_type,
            allowed_operators,
            allowed_values: None,
            applicable_event_types: BTreeSet::new(),
        }
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn for_event_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applicable_event_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_time(&self) -> bool {
        self.filter_type == FilterType::Time
    }

    pub fn allows_operator(&self, operator: &str) -> bool {
        self.allowed_operators
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(operator))
    }
}

impl EventTypeScoped for FilterDefinition {
    fn applicable_event_types(&self) -> &BTreeSet<String> {
        &self.applicable_event_types
    }
}

/// Tenant/user scoping plus hard caps for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SecurityPolicy {
    /// Empty means no tenant scoping.
    #[serde(default)]
    pub tenant_filter_member: String,
    /// Empty means no user scoping.
    #[serde(default)]
    pub user_filter_member: String,
    #[serde(default)]
    pub max_limit: Option<u32>,
    #[serde(default)]
    pub max_date_range_days: Option<u32>,
}
