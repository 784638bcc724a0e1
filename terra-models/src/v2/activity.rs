use super::samples::HeartRateSummary;
use terra_core::{FieldType, FieldValue};

terra_core::model! {
    pub struct ActivityMetadata("terra.models.v2.activity.ActivityMetadata") {
        name: FieldType::Str,
        summary_id: FieldType::Str,
        start_time: FieldType::Str,
        end_time: FieldType::Str,
        activity_type: FieldType::Enum("terra.models.enums.ActivityType"),
        upload_type: FieldType::Enum("terra.models.enums.UploadType"),
    }
}

terra_core::model! {
    pub struct HeartRateData("terra.models.v2.activity.HeartRateData") {
        summary: FieldType::Model("models.v2.samples.HeartRateSummary")
            => FieldValue::model(HeartRateSummary::default()),
        detailed: FieldType::List("models.v2.samples.HeartRateDataSample")
            => FieldValue::List(Vec::new()),
    }
}

terra_core::model! {
    /// A workout session as reported by a wearable provider.
    pub struct Activity("terra.models.v2.activity.Activity") {
        metadata: FieldType::Model("models.v2.activity.ActivityMetadata")
            => FieldValue::model(ActivityMetadata::default()),
        heart_rate_data: FieldType::Model("models.v2.activity.HeartRateData")
            => FieldValue::model(HeartRateData::default()),
        distance_samples: FieldType::List("models.v2.samples.DistanceSample")
            => FieldValue::List(Vec::new()),
        device_tags: FieldType::List("str") => FieldValue::List(Vec::new()),
        calories: FieldType::Float,
        is_manual: FieldType::Bool,
        /// Provider-specific payload, never interpreted.
        raw: FieldType::Map,
        _etag: FieldType::Str,
    }
}
