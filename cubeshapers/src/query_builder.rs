use crate::config::{QueryConfig, DEFAULT_ROW_LIMIT};
use crate::datasets::DatasetDefinition;
use crate::identity::CallerIdentity;
use crate::request::QueryRequest;
use crate::strategy::{StrategyKind, TranslationStrategy};
use crate::technical::TechnicalQuery;

/// Composes strategy translation into the final engine query.
///
/// Performs no validation; run [`crate::validation::QueryValidator`] first.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    default_row_limit: i64,
    strategy_override: Option<StrategyKind>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            default_row_limit: DEFAULT_ROW_LIMIT,
            strategy_override: None,
        }
    }
}

impl QueryBuilder {
    pub fn new(config: &QueryConfig) -> Self {
        Self {
            default_row_limit: config.default_row_limit,
            strategy_override: None,
        }
    }

    /// Force a strategy instead of dispatching on the dataset id.
    pub fn with_strategy(mut self, kind: StrategyKind) -> Self {
        self.strategy_override = Some(kind);
        self
    }

    fn strategy_for(&self, dataset: &DatasetDefinition) -> &'static dyn TranslationStrategy {
        let kind = self
            .strategy_override
            .unwrap_or_else(|| StrategyKind::for_dataset(&dataset.id));
        tracing::debug!(dataset = %dataset.id, strategy = ?kind, "selected translation strategy");
        kind.strategy()
    }

    pub fn build(
        &self,
        request: &QueryRequest,
        dataset: &DatasetDefinition,
        identity: Option<&dyn CallerIdentity>,
    ) -> TechnicalQuery {
        tracing::info!(dataset = %dataset.id, "building technical query");
        let strategy = self.strategy_for(dataset);

        let mut filters = strategy.translate_filters(&request.filters, dataset, identity);
        filters.extend(strategy.translate_filter_groups(&request.filter_groups, dataset));

        TechnicalQuery {
            dataset: dataset.id.clone(),
            measures: strategy.translate_measures(&request.kpis, dataset),
            dimensions: strategy.translate_dimensions(&request.group_by, dataset),
            time_dimensions: strategy.translate_time_dimensions(&request.filters, dataset),
            filters,
            order: strategy.translate_order(request.sort.as_ref(), dataset),
            limit: strategy.apply_limit_policy(request.page.limit, dataset, self.default_row_limit),
            offset: strategy.translate_offset(request.page.offset),
        }
    }
}
