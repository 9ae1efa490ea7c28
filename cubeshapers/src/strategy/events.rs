//! Events family strategy.

use super::{StrategyKind, TranslationStrategy};

#[derive(Debug, Default, Clone, Copy)]
pub struct EventsStrategy;

impl TranslationStrategy for EventsStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Events
    }
}
