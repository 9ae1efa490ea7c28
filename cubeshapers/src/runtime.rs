use futures::future::try_join_all;

use crate::config::CubeshapeConfig;
use crate::error::{Result, ValidationError};
use crate::executor::{OlapClient, QueryResult};
use crate::identity::CallerIdentity;
use crate::query_builder::QueryBuilder;
use crate::registry::DatasetRegistry;
use crate::request::QueryRequest;
use crate::technical::TechnicalQuery;
use crate::validation::QueryValidator;

/// Composition root: owns the registry and runs validate-then-build for each request.
///
/// Immutable after construction, so one instance can be shared across any number of
/// concurrent tasks.
#[derive(Debug, Clone)]
pub struct QueryPipeline {
    registry: DatasetRegistry,
    validator: QueryValidator,
    builder: QueryBuilder,
}

impl QueryPipeline {
    pub fn new(registry: DatasetRegistry, config: &CubeshapeConfig) -> Self {
        Self {
            registry,
            validator: QueryValidator::new(),
            builder: QueryBuilder::new(&config.query),
        }
    }

    /// Pipeline over the built-in datasets.
    pub fn builtin(config: &CubeshapeConfig) -> Self {
        Self::new(DatasetRegistry::builtin(), config)
    }

    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    /// Validate `request` and translate it into the engine query.
    pub fn prepare(
        &self,
        request: &QueryRequest,
        identity: Option<&dyn CallerIdentity>,
    ) -> Result<TechnicalQuery> {
        let dataset = self
            .registry
            .get(&request.dataset_id)
            .ok_or_else(|| ValidationError::dataset_not_found(&request.dataset_id))?;
        if let Err(e) = self.validator.validate(request, Some(dataset)) {
            tracing::info!(dataset = %dataset.id, kind = %e.kind, reason = %e.reason, "rejected query request");
            return Err(e.into());
        }
        Ok(self.builder.build(request, dataset, identity))
    }

    pub async fn run_query(
        &self,
        client: &dyn OlapClient,
        request: &QueryRequest,
        identity: Option<&dyn CallerIdentity>,
    ) -> Result<QueryResult> {
        let query = self.prepare(request, identity)?;
        client.load(&query).await
    }

    /// Prepare every request up front, then load them concurrently.
    /// Fails on the first invalid request before anything is sent to the engine.
    pub async fn run_queries(
        &self,
        client: &dyn OlapClient,
        requests: &[QueryRequest],
        identity: Option<&dyn CallerIdentity>,
    ) -> Result<Vec<QueryResult>> {
        let queries = requests
            .iter()
            .map(|request| self.prepare(request, identity))
            .collect::<Result<Vec<_>>>()?;
        try_join_all(queries.iter().map(|query| client.load(query))).await
    }
}
