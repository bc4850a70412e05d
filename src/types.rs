use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PrayerError;

/// The nine named times of a prayer day, in the order they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordinate {
    Imsak,
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
    Midnight,
}

impl Ordinate {
    pub const ALL: [Ordinate; 9] = [
        Ordinate::Imsak,
        Ordinate::Fajr,
        Ordinate::Sunrise,
        Ordinate::Dhuhr,
        Ordinate::Asr,
        Ordinate::Sunset,
        Ordinate::Maghrib,
        Ordinate::Isha,
        Ordinate::Midnight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Ordinate::Imsak => "imsak",
            Ordinate::Fajr => "fajr",
            Ordinate::Sunrise => "sunrise",
            Ordinate::Dhuhr => "dhuhr",
            Ordinate::Asr => "asr",
            Ordinate::Sunset => "sunset",
            Ordinate::Maghrib => "maghrib",
            Ordinate::Isha => "isha",
            Ordinate::Midnight => "midnight",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Ordinate::Imsak => "Imsak",
            Ordinate::Fajr => "Fajr",
            Ordinate::Sunrise => "Sunrise",
            Ordinate::Dhuhr => "Dhuhr",
            Ordinate::Asr => "Asr",
            Ordinate::Sunset => "Sunset",
            Ordinate::Maghrib => "Maghrib",
            Ordinate::Isha => "Isha",
            Ordinate::Midnight => "Midnight",
        }
    }
}

impl fmt::Display for Ordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ordinate {
    type Err = PrayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ordinate::ALL
            .into_iter()
            .find(|o| o.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PrayerError::InvalidOrdinate(s.to_string()))
    }
}

/// Side of solar noon an event falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Morning,
    Afternoon,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Degrees.
    pub declination: f64,
    /// Minutes, mean minus apparent solar time.
    pub equation_of_time: f64,
}

/// Either a sun depression angle in degrees or a fixed number of minutes
/// relative to a neighbouring time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwilightRule {
    Angle(f64),
    Minutes(f64),
}

impl fmt::Display for TwilightRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwilightRule::Angle(a) => write!(f, "{}", a),
            TwilightRule::Minutes(m) => write!(f, "{} min", m),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MidnightRule {
    /// Midpoint of sunset and sunrise.
    #[default]
    Standard,
    /// Midpoint of sunset and Fajr.
    Jafari,
}

impl MidnightRule {
    pub fn name(self) -> &'static str {
        match self {
            MidnightRule::Standard => "Standard",
            MidnightRule::Jafari => "Jafari",
        }
    }
}

impl FromStr for MidnightRule {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(MidnightRule::Standard),
            "jafari" => Ok(MidnightRule::Jafari),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HighLatitudeRule {
    None,
    #[default]
    NightMiddle,
    OneSeventh,
    AngleBased,
}

impl HighLatitudeRule {
    pub fn name(self) -> &'static str {
        match self {
            HighLatitudeRule::None => "None",
            HighLatitudeRule::NightMiddle => "NightMiddle",
            HighLatitudeRule::OneSeventh => "OneSeventh",
            HighLatitudeRule::AngleBased => "AngleBased",
        }
    }

    /// Longest allowed gap, in hours, between a twilight time and the
    /// sunrise or sunset it is measured from.
    pub fn night_portion(self, angle: f64, night: f64) -> Option<f64> {
        match self {
            HighLatitudeRule::None => None,
            HighLatitudeRule::NightMiddle => Some(night / 2.0),
            HighLatitudeRule::OneSeventh => Some(night / 7.0),
            HighLatitudeRule::AngleBased => Some(angle / 60.0 * night),
        }
    }
}

impl FromStr for HighLatitudeRule {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(HighLatitudeRule::None),
            "nightmiddle" => Ok(HighLatitudeRule::NightMiddle),
            "oneseventh" => Ok(HighLatitudeRule::OneSeventh),
            "anglebased" => Ok(HighLatitudeRule::AngleBased),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level.
    pub elevation: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: 0.0,
        }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Coordinates::new(latitude, longitude)
    }
}

impl From<(f64, f64, f64)> for Coordinates {
    fn from((latitude, longitude, elevation): (f64, f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }
}

/// Anything that names a Gregorian calendar day.
pub trait IntoDate {
    fn into_date(self) -> Result<NaiveDate, PrayerError>;
}

impl IntoDate for NaiveDate {
    fn into_date(self) -> Result<NaiveDate, PrayerError> {
        Ok(self)
    }
}

impl IntoDate for (i32, u32, u32) {
    fn into_date(self) -> Result<NaiveDate, PrayerError> {
        let (year, month, day) = self;
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(PrayerError::InvalidDate { year, month, day })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[default]
    Hours24,
    Hours12,
    /// 12-hour clock without the am/pm suffix.
    Hours12NoSuffix,
    Float,
}

impl FromStr for TimeFormat {
    type Err = PrayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "24h" => Ok(TimeFormat::Hours24),
            "12h" => Ok(TimeFormat::Hours12),
            "12hns" => Ok(TimeFormat::Hours12NoSuffix),
            "float" => Ok(TimeFormat::Float),
            _ => Err(PrayerError::InvalidFormat(s.to_string())),
        }
    }
}

pub const NO_EVENT: &str = "-----";

#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    Clock(String),
    /// Minutes past local midnight.
    Minutes(f64),
    NoEvent,
}

impl TimeValue {
    pub fn as_minutes(&self) -> Option<f64> {
        match self {
            TimeValue::Minutes(m) => Some(*m),
            _ => None,
        }
    }

    pub fn is_event(&self) -> bool {
        !matches!(self, TimeValue::NoEvent)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Clock(s) => f.write_str(s),
            TimeValue::Minutes(m) => write!(f, "{}", m),
            TimeValue::NoEvent => f.write_str(NO_EVENT),
        }
    }
}

/// Unformatted result of one day's computation: minutes past local midnight,
/// `None` where the sun never reaches the required position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayTimes {
    pub(crate) minutes: [Option<f64>; 9],
}

impl DayTimes {
    pub fn get(&self, ordinate: Ordinate) -> Option<f64> {
        self.minutes[ordinate.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ordinate, Option<f64>)> + '_ {
        Ordinate::ALL.into_iter().map(move |o| (o, self.get(o)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeTable {
    pub(crate) values: [TimeValue; 9],
}

impl TimeTable {
    pub fn get(&self, ordinate: Ordinate) -> &TimeValue {
        &self.values[ordinate.index()]
    }

    pub fn get_by_name(&self, name: &str) -> Option<&TimeValue> {
        name.parse::<Ordinate>().ok().map(|o| self.get(o))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ordinate, &TimeValue)> + '_ {
        Ordinate::ALL.into_iter().zip(self.values.iter())
    }
}

impl Index<Ordinate> for TimeTable {
    type Output = TimeValue;

    fn index(&self, ordinate: Ordinate) -> &TimeValue {
        self.get(ordinate)
    }
}
