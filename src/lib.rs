pub mod angles;
pub mod config;
pub mod error;
pub mod methods;
pub mod settings;
pub mod times;
pub mod types;

pub use angles::{
    asr_angle, compute_time, darccos, darcsin, darctan, darctan2, dcos, deg_to_rad, dsin, dtan,
    julian_date, midday, normalize_angle, normalize_hour, rad_to_deg, rise_set_angle, solar_noon,
    sun_position, time_diff, DEGREES_PER_HOUR, HORIZON_DIP, J2000,
};

pub use config::Profile;

pub use error::PrayerError;

pub use methods::{lookup, CalculationMethod, DEFAULT_METHOD, METHODS};

pub use settings::{parse_value, ParamValue, ParsedValue, Settings};

pub use times::{format_time, minutes_to_time, PrayTimes, ITERATIONS};

pub use types::{
    Coordinates, DayTimes, Direction, HighLatitudeRule, IntoDate, MidnightRule, Ordinate,
    SunPosition, TimeFormat, TimeTable, TimeValue, TwilightRule, NO_EVENT,
};
