use crate::datasets::{DatasetDefinition, DisplayFormat, MeasureDefinition};

use super::fields::{
    created_at_dimension, created_at_filter, enum_filter, member, number_filter, record_count,
    status_dimension, status_filter, tenant_policy, text_dimension, text_filter,
};

pub const DATASET_ID: &str = "suppliers";
const CUBE: &str = "SuppliersView";

pub fn suppliers_dataset() -> DatasetDefinition {
    DatasetDefinition::new(DATASET_ID, "Suppliers")
        .measure("supplier_count", record_count(CUBE, "Number of suppliers"))
        .measure(
            "avg_rating",
            MeasureDefinition::new(member(CUBE, "avgRating"), "Average rating"),
        )
        .measure(
            "total_spend",
            MeasureDefinition::new(member(CUBE, "totalSpend"), "Total spend")
                .format(DisplayFormat::Currency),
        )
        .measure(
            "on_time_delivery_rate",
            MeasureDefinition::new(member(CUBE, "onTimeDeliveryRate"), "On-time delivery")
                .format(DisplayFormat::Percent),
        )
        .measure(
            "open_claim_count",
            MeasureDefinition::new(member(CUBE, "openClaimCount"), "Open claims"),
        )
        .dimension("supplier_name", text_dimension(CUBE, "name", "Supplier"))
        .dimension("category", text_dimension(CUBE, "category", "Category"))
        .dimension("country", text_dimension(CUBE, "country", "Country"))
        .dimension("status", status_dimension(CUBE))
        .dimension("rating_band", text_dimension(CUBE, "ratingBand", "Rating band"))
        .dimension("created_at", created_at_dimension(CUBE))
        .filter("created_at", created_at_filter(CUBE))
        .filter("supplier_name", text_filter(CUBE, "name"))
        .filter("category", text_filter(CUBE, "category"))
        .filter("country", text_filter(CUBE, "country"))
        .filter(
            "status",
            status_filter(CUBE, &["approved", "pending", "blocked"]),
        )
        .filter(
            "rating_band",
            enum_filter(CUBE, "ratingBand", &["A", "B", "C", "D"]),
        )
        .filter("rating", number_filter(CUBE, "rating"))
        .secured_by(tenant_policy(CUBE, 500, 730))
}
