use crate::datasets::{
    DatasetDefinition, DimensionDefinition, DisplayFormat, MeasureDefinition, ValueType,
};

use super::fields::{
    boolean_filter, created_at_dimension, created_at_filter, member, number_filter, record_count,
    tenant_policy, text_dimension, text_filter, updated_at_filter,
};

pub const DATASET_ID: &str = "items";
const CUBE: &str = "ItemsView";

pub fn items_dataset() -> DatasetDefinition {
    DatasetDefinition::new(DATASET_ID, "Items")
        .measure("item_count", record_count(CUBE, "Number of items"))
        .measure(
            "total_stock",
            MeasureDefinition::new(member(CUBE, "totalStock"), "Units in stock"),
        )
        .measure(
            "stock_value",
            MeasureDefinition::new(member(CUBE, "stockValue"), "Stock value")
                .format(DisplayFormat::Currency),
        )
        .measure(
            "avg_unit_price",
            MeasureDefinition::new(member(CUBE, "avgUnitPrice"), "Average unit price")
                .format(DisplayFormat::Currency),
        )
        .measure(
            "below_reorder_count",
            MeasureDefinition::new(member(CUBE, "belowReorderCount"), "Below reorder point")
                .hidden(),
        )
        .dimension("item_name", text_dimension(CUBE, "name", "Item"))
        .dimension("category", text_dimension(CUBE, "category", "Category"))
        .dimension("unit", text_dimension(CUBE, "unit", "Unit"))
        .dimension("supplier_name", text_dimension(CUBE, "supplierName", "Supplier"))
        .dimension(
            "is_active",
            DimensionDefinition::new(member(CUBE, "isActive"), "Active", ValueType::Boolean),
        )
        .dimension("created_at", created_at_dimension(CUBE))
        .filter("created_at", created_at_filter(CUBE))
        .filter("updated_at", updated_at_filter(CUBE))
        .filter("item_name", text_filter(CUBE, "name"))
        .filter("category", text_filter(CUBE, "category"))
        .filter("supplier_name", text_filter(CUBE, "supplierName"))
        .filter("is_active", boolean_filter(CUBE, "isActive"))
        .filter("unit_price", number_filter(CUBE, "unitPrice"))
        .filter("stock", number_filter(CUBE, "stock"))
        .secured_by(tenant_policy(CUBE, 1000, 365))
}
