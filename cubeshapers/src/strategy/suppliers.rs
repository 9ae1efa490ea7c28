//! Suppliers family strategy. Uses the shared algorithm as is.

use super::{StrategyKind, TranslationStrategy};

#[derive(Debug, Default, Clone, Copy)]
pub struct SuppliersStrategy;

impl TranslationStrategy for SuppliersStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Suppliers
    }
}
