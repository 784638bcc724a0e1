use terra_core::FieldType;

terra_core::model! {
    /// A single heart rate reading.
    pub struct HeartRateDataSample("terra.models.v2.samples.HeartRateDataSample") {
        timestamp: FieldType::Str,
        bpm: FieldType::Float,
    }
}

terra_core::model! {
    pub struct HeartRateSummary("terra.models.v2.samples.HeartRateSummary") {
        avg_hr_bpm: FieldType::Float,
        max_hr_bpm: FieldType::Float,
        min_hr_bpm: FieldType::Float,
        resting_hr_bpm: FieldType::Float,
    }
}

terra_core::model! {
    pub struct DistanceSample("terra.models.v2.samples.DistanceSample") {
        timestamp: FieldType::Str,
        distance_meters: FieldType::Float,
    }
}
