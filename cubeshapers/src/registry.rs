use std::collections::HashMap;

use serde::Serialize;

use crate::catalog;
use crate::datasets::{DatasetDefinition, DisplayFormat, FilterType, ValueType};

/// Read-only catalog of datasets keyed by id.
///
/// Built once by the composition root and shared by reference; there is no way to
/// add or replace a dataset after construction.
#[derive(Debug, Default, Clone)]
pub struct DatasetRegistry {
    datasets: HashMap<String, DatasetDefinition>,
}

impl DatasetRegistry {
    /// Registry holding every built-in dataset family.
    pub fn builtin() -> Self {
        Self::from_definitions(catalog::builtin_datasets())
    }

    pub fn from_definitions(definitions: Vec<DatasetDefinition>) -> Self {
        let mut datasets = HashMap::with_capacity(definitions.len());
        for definition in definitions {
            if datasets.contains_key(&definition.id) {
                tracing::warn!(dataset = %definition.id, "duplicate dataset id, keeping the last definition");
            }
            datasets.insert(definition.id.clone(), definition);
        }
        Self { datasets }
    }

    pub fn get(&self, id: &str) -> Option<&DatasetDefinition> {
        self.datasets.get(id)
    }

    /// All datasets, in no particular order.
    pub fn list_all(&self) -> Vec<&DatasetDefinition> {
        self.datasets.values().collect()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn list_dataset_summaries(&self) -> Vec<DatasetSummary> {
        let mut summaries: Vec<_> = self
            .datasets
            .values()
            .map(|d| DatasetSummary {
                id: d.id.clone(),
                label: d.label.clone(),
            })
            .collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    /// Schema shown to report authors. Hidden measures are omitted; when an event type is
    /// given, members that do not apply to it are omitted too.
    pub fn dataset_schema(&self, id: &str, event_type: Option<&str>) -> Option<DatasetSchema> {
        let dataset = self.get(id)?;
        let scoped;
        let dataset = match event_type {
            Some(event_type) => {
                scoped = dataset.scoped_to(event_type);
                &scoped
            }
            None => dataset,
        };

        let measures = dataset
            .measures
            .iter()
            .filter(|(_, m)| !m.hidden)
            .map(|(id, m)| MeasureSchema {
                id: id.clone(),
                label: m.label.clone(),
                value_type: m.value_type,
                format: m.format,
            })
            .collect();

        let dimensions = dataset
            .dimensions
            .iter()
            .map(|(id, d)| DimensionSchema {
                id: id.clone(),
                label: d.label.clone(),
                value_type: d.value_type,
            })
            .collect();

        let filters = dataset
            .filters
            .iter()
            .map(|(id, f)| FilterSchema {
                id: id.clone(),
                filter_type: f.filter_type,
                operators: f.allowed_operators.clone(),
                allowed_values: f.allowed_values.clone(),
            })
            .collect();

        Some(DatasetSchema {
            id: dataset.id.clone(),
            label: dataset.label.clone(),
            measures,
            dimensions,
            filters,
            max_limit: dataset.max_limit(),
            max_date_range_days: dataset.max_date_range_days(),
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DatasetSummary {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSchema {
    pub id: String,
    pub label: String,
    pub measures: Vec<MeasureSchema>,
    pub dimensions: Vec<DimensionSchema>,
    pub filters: Vec<FilterSchema>,
    pub max_limit: Option<u32>,
    pub max_date_range_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeasureSchema {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub format: DisplayFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionSchema {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSchema {
    pub id: String,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    pub operators: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}
