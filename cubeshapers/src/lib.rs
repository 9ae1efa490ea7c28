pub mod catalog;
pub mod config;
pub mod datasets;
pub mod error;
pub mod executor;
pub mod identity;
pub mod query_builder;
pub mod registry;
pub mod request;
pub mod runtime;
pub mod strategy;
pub mod technical;
pub mod validation;

pub use config::CubeshapeConfig;
pub use datasets::{
    DatasetDefinition, DimensionDefinition, FilterDefinition, FilterType, MeasureDefinition,
    SecurityPolicy,
};
pub use error::{CubeshapeError, Result, ValidationError, ValidationKind};
pub use executor::{OlapClient, QueryResult};
pub use identity::{CallerIdentity, ClaimsIdentity};
pub use query_builder::QueryBuilder;
pub use registry::DatasetRegistry;
pub use request::{FilterGroup, FilterRequest, Page, QueryRequest, SortSpec};
pub use runtime::QueryPipeline;
pub use strategy::{StrategyKind, TranslationStrategy};
pub use technical::{CubeOperator, DateRange, TechnicalFilter, TechnicalQuery, TimeDimension};
pub use validation::QueryValidator;
