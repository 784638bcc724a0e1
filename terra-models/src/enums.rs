use terra_core::IntEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    InVehicle = 0,
    Biking = 1,
    Still = 3,
    Unknown = 4,
    Walking = 7,
    Running = 8,
}

impl IntEnum for ActivityType {
    fn type_path() -> &'static str {
        "terra.models.enums.ActivityType"
    }

    fn to_i64(self) -> i64 {
        self as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadType {
    Unknown = 0,
    Automatic = 1,
    Manual = 2,
}

impl IntEnum for UploadType {
    fn type_path() -> &'static str {
        "terra.models.enums.UploadType"
    }

    fn to_i64(self) -> i64 {
        self as i64
    }
}
