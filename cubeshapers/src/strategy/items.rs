use super::{StrategyKind, TranslationStrategy};

#[derive(Debug, Default, Clone, Copy)]
pub struct ItemsStrategy;

impl TranslationStrategy for ItemsStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Items
    }
}
