//! Sample Terra models used to exercise `terra_core` end-to-end.
//!
//! The models mirror the shape of the Terra v2 payloads (activities, samples, users) closely
//! enough to cover nested models, lists of models, enumerations and opaque maps.
pub mod enums;
pub mod v2;

use terra_core::Catalog;

/// A catalog with every model of this crate registered.
pub fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.register::<v2::activity::Activity>();
    catalog.register::<v2::activity::ActivityMetadata>();
    catalog.register::<v2::activity::HeartRateData>();
    catalog.register::<v2::samples::HeartRateDataSample>();
    catalog.register::<v2::samples::HeartRateSummary>();
    catalog.register::<v2::samples::DistanceSample>();
    catalog.register::<v2::user::User>();
    catalog
}
