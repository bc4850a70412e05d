use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrayerError {
    #[error("unknown calculation method `{0}`")]
    UnknownMethod(String),

    #[error("invalid value `{value}` for parameter `{key}`: {reason}")]
    InvalidParameterFormat {
        key: String,
        value: String,
        reason: &'static str,
    },

    #[error("unknown time name `{0}`")]
    InvalidOrdinate(String),

    #[error("invalid date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("unsupported time format `{0}`")]
    InvalidFormat(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PrayerError {
    pub(crate) fn parameter(key: &str, value: impl ToString, reason: &'static str) -> Self {
        PrayerError::InvalidParameterFormat {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}
