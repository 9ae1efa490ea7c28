//! Built-in dataset definitions, one builder per dataset family.
//!
//! Builders are pure: calling one twice yields equal definitions. Public keys
//! (KPI, dimension and filter ids) are referenced by saved reports and must not be renamed.

pub mod events;
pub mod fields;
pub mod items;
pub mod suppliers;

use crate::datasets::DatasetDefinition;

pub use events::events_dataset;
pub use items::items_dataset;
pub use suppliers::suppliers_dataset;

/// Every built-in dataset.
pub fn builtin_datasets() -> Vec<DatasetDefinition> {
    vec![events_dataset(), suppliers_dataset(), items_dataset()]
}
