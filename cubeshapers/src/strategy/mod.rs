//! Translation strategies for the different dataset families.
//!
//! The trait carries the shared translation algorithm as default methods; each
//! family gets its own implementation so it can diverge without touching the others.
//! Translation is total: ids that do not resolve are dropped with a warning, never
//! reported as errors (rejection is the validator's job).

use std::collections::BTreeMap;

use crate::config::DEFAULT_ROW_LIMIT;
use crate::datasets::DatasetDefinition;
use crate::identity::CallerIdentity;
use crate::request::{FilterGroup, FilterRequest, GroupLogic, SortSpec};
use crate::technical::{TechnicalFilter, TimeDimension};

mod events;
mod items;
pub mod normalize;
mod suppliers;

pub use events::EventsStrategy;
pub use items::ItemsStrategy;
pub use normalize::{normalize_date_range, normalize_values, translate_operator};
pub use suppliers::SuppliersStrategy;

/// Dataset family, derived from the dataset id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Events,
    Suppliers,
    Items,
}

impl StrategyKind {
    /// Unknown prefixes fall back to the events family.
    pub fn for_dataset(dataset_id: &str) -> Self {
        let id = dataset_id.to_ascii_lowercase();
        if id.starts_with("events") {
            StrategyKind::Events
        } else if id.starts_with("supplier") {
            StrategyKind::Suppliers
        } else if id.starts_with("item") {
            StrategyKind::Items
        } else {
            StrategyKind::Events
        }
    }

    pub fn strategy(self) -> &'static dyn TranslationStrategy {
        static EVENTS: EventsStrategy = EventsStrategy;
        static SUPPLIERS: SuppliersStrategy = SuppliersStrategy;
        static ITEMS: ItemsStrategy = ItemsStrategy;
        match self {
            StrategyKind::Events => &EVENTS,
            StrategyKind::Suppliers => &SUPPLIERS,
            StrategyKind::Items => &ITEMS,
        }
    }
}

/// Select the strategy for a dataset.
pub fn strategy_for(dataset: &DatasetDefinition) -> &'static dyn TranslationStrategy {
    StrategyKind::for_dataset(&dataset.id).strategy()
}

/// Effective row limit: the request, capped by the dataset policy or by 1000 when
/// the dataset declares none.
pub fn apply_limit_policy(requested: i64, dataset: &DatasetDefinition) -> i64 {
    apply_limit_policy_with(requested, dataset, DEFAULT_ROW_LIMIT)
}

pub fn apply_limit_policy_with(requested: i64, dataset: &DatasetDefinition, fallback: i64) -> i64 {
    let cap = dataset.max_limit().map(i64::from).unwrap_or(fallback);
    requested.min(cap)
}

/// Converts business-level query pieces into engine query fragments.
pub trait TranslationStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn translate_measures(&self, kpis: &[String], dataset: &DatasetDefinition) -> Vec<String> {
        kpis.iter()
            .filter_map(|id| match dataset.measures.get(id) {
                Some(measure) => Some(measure.cube_member.clone()),
                None => {
                    tracing::warn!(dataset = %dataset.id, measure = %id, "skipping unknown measure");
                    None
                }
            })
            .collect()
    }

    fn translate_dimensions(&self, group_by: &[String], dataset: &DatasetDefinition) -> Vec<String> {
        group_by
            .iter()
            .filter_map(|id| match dataset.dimensions.get(id) {
                Some(dimension) => Some(dimension.cube_member.clone()),
                None => {
                    tracing::warn!(dataset = %dataset.id, dimension = %id, "skipping unknown dimension");
                    None
                }
            })
            .collect()
    }

    /// One time dimension per top-level filter on a Time field.
    fn translate_time_dimensions(
        &self,
        filters: &[FilterRequest],
        dataset: &DatasetDefinition,
    ) -> Vec<TimeDimension> {
        filters
            .iter()
            .filter_map(|filter| {
                let definition = dataset.filters.get(&filter.field)?;
                if !definition.is_time() {
                    return None;
                }
                Some(TimeDimension {
                    dimension: definition.cube_member.clone(),
                    date_range: normalize_date_range(&filter.value),
                    granularity: None,
                })
            })
            .collect()
    }

    /// Plain member filters for every non-Time field.
    fn translate_plain_filters(
        &self,
        filters: &[FilterRequest],
        dataset: &DatasetDefinition,
    ) -> Vec<TechnicalFilter> {
        filters
            .iter()
            .filter_map(|filter| {
                let Some(definition) = dataset.filters.get(&filter.field) else {
                    tracing::warn!(dataset = %dataset.id, field = %filter.field, "skipping unknown filter field");
                    return None;
                };
                if definition.is_time() {
                    return None;
                }
                Some(TechnicalFilter::Member {
                    member: definition.cube_member.clone(),
                    operator: translate_operator(&filter.operator),
                    values: normalize_values(&filter.value),
                })
            })
            .collect()
    }

    /// Tenant and user scoping filters for the caller. No identity, no injection.
    fn security_filters(
        &self,
        dataset: &DatasetDefinition,
        identity: Option<&dyn CallerIdentity>,
    ) -> Vec<TechnicalFilter> {
        let (Some(policy), Some(identity)) = (dataset.security.as_ref(), identity) else {
            return Vec::new();
        };

        let mut injected = Vec::new();
        if !policy.tenant_filter_member.is_empty() {
            if let Some(tenant) = identity.tenant_id().filter(|t| !t.is_empty()) {
                tracing::debug!(dataset = %dataset.id, member = %policy.tenant_filter_member, "injecting tenant filter");
                injected.push(TechnicalFilter::equals(&policy.tenant_filter_member, tenant));
            }
        }
        if !policy.user_filter_member.is_empty() {
            if let Some(user) = identity.user_id().filter(|u| !u.is_empty()) {
                tracing::debug!(dataset = %dataset.id, member = %policy.user_filter_member, "injecting user filter");
                injected.push(TechnicalFilter::equals(&policy.user_filter_member, user));
            }
        }
        injected
    }

    /// Plain filters followed by the security filters.
    fn translate_filters(
        &self,
        filters: &[FilterRequest],
        dataset: &DatasetDefinition,
        identity: Option<&dyn CallerIdentity>,
    ) -> Vec<TechnicalFilter> {
        let mut translated = self.translate_plain_filters(filters, dataset);
        translated.extend(self.security_filters(dataset, identity));
        translated
    }

    /// Each group becomes one composite filter. Groups that end up empty are dropped.
    fn translate_filter_groups(
        &self,
        groups: &[FilterGroup],
        dataset: &DatasetDefinition,
    ) -> Vec<TechnicalFilter> {
        groups
            .iter()
            .filter_map(|group| {
                let Some(logic) = GroupLogic::parse(&group.logic) else {
                    tracing::warn!(dataset = %dataset.id, logic = %group.logic, "skipping filter group with unknown logic");
                    return None;
                };
                let members = self.translate_plain_filters(&group.filters, dataset);
                if members.is_empty() {
                    return None;
                }
                Some(match logic {
                    GroupLogic::And => TechnicalFilter::And { and: members },
                    GroupLogic::Or => TechnicalFilter::Or { or: members },
                })
            })
            .collect()
    }

    /// Sort-by resolves against measures first, then dimensions.
    fn translate_order(
        &self,
        sort: Option<&SortSpec>,
        dataset: &DatasetDefinition,
    ) -> Option<BTreeMap<String, String>> {
        let sort = sort?;
        let member = dataset
            .measures
            .get(&sort.by)
            .map(|m| m.cube_member.clone())
            .or_else(|| dataset.dimensions.get(&sort.by).map(|d| d.cube_member.clone()));
        match member {
            Some(member) => Some(BTreeMap::from([(member, sort.direction.to_lowercase())])),
            None => {
                tracing::warn!(dataset = %dataset.id, sort_by = %sort.by, "skipping unresolvable sort field");
                None
            }
        }
    }

    fn apply_limit_policy(&self, requested: i64, dataset: &DatasetDefinition, fallback: i64) -> i64 {
        apply_limit_policy_with(requested, dataset, fallback)
    }

    fn translate_offset(&self, offset: i64) -> i64 {
        offset
    }
}
