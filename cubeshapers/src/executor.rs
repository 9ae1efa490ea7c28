use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::technical::TechnicalQuery;

/// Rows returned by the OLAP engine, keyed by cube member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<Map<String, Value>>,
}

/// Client for the external OLAP engine. Execution, caching and aggregation all
/// happen behind this trait.
#[async_trait]
pub trait OlapClient: Send + Sync {
    async fn load(&self, query: &TechnicalQuery) -> Result<QueryResult>;
}
