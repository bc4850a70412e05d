use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use chrono::{Datelike, NaiveDate};
use log::{debug, trace};

use crate::angles::{
    asr_angle, compute_time, julian_date, rise_set_angle, solar_noon, sun_position, time_diff,
    DEGREES_PER_HOUR,
};
use crate::error::PrayerError;
use crate::methods::{CalculationMethod, METHODS};
use crate::settings::{ParamValue, Settings};
use crate::types::{
    Coordinates, DayTimes, Direction, IntoDate, MidnightRule, Ordinate, TimeFormat, TimeTable,
    TimeValue, TwilightRule,
};

/// Refinement passes over the per-time estimates.
pub const ITERATIONS: usize = 2;

/// First guesses, in local mean hours, for each time of the day.
const INITIAL_ESTIMATES: [f64; 9] = [5.0, 5.0, 6.0, 12.0, 13.0, 18.0, 18.0, 18.0, 0.0];

#[derive(Debug, Clone, Copy)]
struct Hours([Option<f64>; 9]);

impl Hours {
    fn initial() -> Self {
        Hours(INITIAL_ESTIMATES.map(Some))
    }

    fn estimate(&self, ordinate: Ordinate) -> f64 {
        self[ordinate].unwrap_or(INITIAL_ESTIMATES[ordinate.index()])
    }
}

impl Index<Ordinate> for Hours {
    type Output = Option<f64>;

    fn index(&self, ordinate: Ordinate) -> &Option<f64> {
        &self.0[ordinate.index()]
    }
}

impl IndexMut<Ordinate> for Hours {
    fn index_mut(&mut self, ordinate: Ordinate) -> &mut Option<f64> {
        &mut self.0[ordinate.index()]
    }
}

/// Prayer time calculator. Owns its settings; separate instances are
/// independent.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayTimes {
    settings: Settings,
}

impl Default for PrayTimes {
    fn default() -> Self {
        Self::from_settings(Settings::from_method(&METHODS[0]))
    }
}

impl PrayTimes {
    pub fn new(method: &str) -> Result<Self, PrayerError> {
        Ok(Self::from_settings(Settings::new(method)?))
    }

    pub(crate) fn from_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn set_method(&mut self, method: &str) -> Result<(), PrayerError> {
        self.settings.set_method(method)
    }

    pub fn adjust<I, K, V>(&mut self, overrides: I) -> Result<(), PrayerError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        self.settings.adjust(overrides)
    }

    pub fn tune<I, K>(&mut self, offsets: I) -> Result<(), PrayerError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        self.settings.tune(offsets)
    }

    pub fn get_method(&self) -> &str {
        &self.settings.method
    }

    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    pub fn get_offsets(&self) -> &BTreeMap<Ordinate, f64> {
        &self.settings.offsets
    }

    pub fn get_defaults() -> &'static [CalculationMethod] {
        &METHODS
    }

    /// Prayer times for `date` at `coords`. `timezone` and `dst` are hours
    /// added to UTC; `format` is one of `24h`, `12h`, `12hNS` or `float`.
    pub fn get_times<D, C>(
        &self,
        date: D,
        coords: C,
        timezone: f64,
        dst: f64,
        format: &str,
    ) -> Result<TimeTable, PrayerError>
    where
        D: IntoDate,
        C: Into<Coordinates>,
    {
        let date = date.into_date()?;
        let format: TimeFormat = format.parse()?;
        Ok(self
            .compute_day(date, coords.into(), timezone, dst)
            .format(format))
    }

    /// Unformatted times in minutes past local midnight.
    pub fn compute_day(
        &self,
        date: NaiveDate,
        coords: Coordinates,
        timezone: f64,
        dst: f64,
    ) -> DayTimes {
        let s = &self.settings;
        // local mean midnight
        let jd = julian_date(date.year(), date.month(), date.day())
            - coords.longitude / (DEGREES_PER_HOUR * 24.0);

        let mut estimates = Hours::initial();
        for pass in 1..=ITERATIONS {
            estimates = self.solar_pass(jd, &coords, &estimates);
            trace!("pass {} for {}: {:?}", pass, date, estimates.0);
        }

        let shift = timezone - coords.longitude / DEGREES_PER_HOUR;
        let mut times = Hours(estimates.0.map(|t| t.map(|h| h + shift)));

        self.adjust_high_latitudes(&mut times);
        self.apply_minute_rules(&mut times);
        times[Ordinate::Dhuhr] = times[Ordinate::Dhuhr].map(|h| h + s.dhuhr / 60.0);
        times[Ordinate::Midnight] = self.midnight(&times);

        let mut minutes = [None; 9];
        for ordinate in Ordinate::ALL {
            minutes[ordinate.index()] =
                times[ordinate].map(|h| (h + dst) * 60.0 + s.offset(ordinate));
        }
        DayTimes { minutes }
    }

    fn solar_pass(&self, jd: f64, coords: &Coordinates, prev: &Hours) -> Hours {
        let s = &self.settings;
        let lat = coords.latitude;
        let sun = |o: Ordinate| sun_position(jd + prev.estimate(o) / 24.0);
        let at_angle = |o: Ordinate, angle: f64, direction: Direction| {
            let pos = sun(o);
            compute_time(angle, pos.declination, lat, pos.equation_of_time, direction)
        };
        let twilight = |o: Ordinate, rule: TwilightRule, direction: Direction| match rule {
            TwilightRule::Angle(angle) => at_angle(o, angle, direction),
            TwilightRule::Minutes(_) => None,
        };
        let horizon = rise_set_angle(coords.elevation);

        let mut next = Hours([None; 9]);
        next[Ordinate::Imsak] = twilight(Ordinate::Imsak, s.imsak, Direction::Morning);
        next[Ordinate::Fajr] = at_angle(Ordinate::Fajr, s.fajr, Direction::Morning);
        next[Ordinate::Sunrise] = at_angle(Ordinate::Sunrise, horizon, Direction::Morning);
        next[Ordinate::Dhuhr] = Some(solar_noon(sun(Ordinate::Dhuhr).equation_of_time));
        next[Ordinate::Asr] = {
            let pos = sun(Ordinate::Asr);
            let altitude = asr_angle(s.asr, lat, pos.declination);
            compute_time(
                -altitude,
                pos.declination,
                lat,
                pos.equation_of_time,
                Direction::Afternoon,
            )
        };
        next[Ordinate::Sunset] = at_angle(Ordinate::Sunset, horizon, Direction::Afternoon);
        next[Ordinate::Maghrib] = twilight(Ordinate::Maghrib, s.maghrib, Direction::Afternoon);
        next[Ordinate::Isha] = twilight(Ordinate::Isha, s.isha, Direction::Afternoon);
        next
    }

    fn adjust_high_latitudes(&self, times: &mut Hours) {
        let s = &self.settings;
        let (Some(sunrise), Some(sunset)) = (times[Ordinate::Sunrise], times[Ordinate::Sunset])
        else {
            return;
        };
        let night = time_diff(sunset, sunrise);

        let mut clamp = |ordinate: Ordinate, base: f64, angle: f64, direction: Direction| {
            let Some(portion) = s.high_latitude.night_portion(angle, night) else {
                return;
            };
            let bound = match direction {
                Direction::Morning => base - portion,
                Direction::Afternoon => base + portion,
            };
            let within = times[ordinate].is_some_and(|t| {
                let gap = match direction {
                    Direction::Morning => time_diff(t, base),
                    Direction::Afternoon => time_diff(base, t),
                };
                gap <= portion
            });
            if !within {
                debug!(
                    "{} moved to {:.3}h by {} rule",
                    ordinate,
                    bound,
                    s.high_latitude.name()
                );
                times[ordinate] = Some(bound);
            }
        };

        if let TwilightRule::Angle(angle) = s.imsak {
            clamp(Ordinate::Imsak, sunrise, angle, Direction::Morning);
        }
        clamp(Ordinate::Fajr, sunrise, s.fajr, Direction::Morning);
        if let TwilightRule::Angle(angle) = s.maghrib {
            clamp(Ordinate::Maghrib, sunset, angle, Direction::Afternoon);
        }
        if let TwilightRule::Angle(angle) = s.isha {
            clamp(Ordinate::Isha, sunset, angle, Direction::Afternoon);
        }
    }

    fn apply_minute_rules(&self, times: &mut Hours) {
        let s = &self.settings;
        if let TwilightRule::Minutes(m) = s.imsak {
            times[Ordinate::Imsak] = times[Ordinate::Fajr].map(|h| h - m / 60.0);
        }
        if let TwilightRule::Minutes(m) = s.maghrib {
            times[Ordinate::Maghrib] = times[Ordinate::Sunset].map(|h| h + m / 60.0);
        }
        if let TwilightRule::Minutes(m) = s.isha {
            times[Ordinate::Isha] = times[Ordinate::Sunset].map(|h| h + m / 60.0);
        }
    }

    fn midnight(&self, times: &Hours) -> Option<f64> {
        let sunset = times[Ordinate::Sunset]?;
        let until = match self.settings.midnight {
            MidnightRule::Standard => times[Ordinate::Sunrise]?,
            MidnightRule::Jafari => times[Ordinate::Fajr]?,
        };
        Some(sunset + time_diff(sunset, until) / 2.0)
    }
}

/// Rounds to the nearest minute and wraps into a day: (hours, minutes).
pub fn minutes_to_time(minutes: f64) -> (u32, u32) {
    let total = (minutes + 0.5).floor().rem_euclid(1440.0) as u32;
    (total / 60, total % 60)
}

pub fn format_time(minutes: Option<f64>, format: TimeFormat) -> TimeValue {
    let Some(minutes) = minutes else {
        return TimeValue::NoEvent;
    };
    let (hours, mins) = minutes_to_time(minutes);
    match format {
        TimeFormat::Float => TimeValue::Minutes(minutes),
        TimeFormat::Hours24 => TimeValue::Clock(format!("{:02}:{:02}", hours, mins)),
        TimeFormat::Hours12 => {
            let suffix = if hours < 12 { "am" } else { "pm" };
            TimeValue::Clock(format!("{}:{:02} {}", (hours + 11) % 12 + 1, mins, suffix))
        }
        TimeFormat::Hours12NoSuffix => {
            TimeValue::Clock(format!("{}:{:02}", (hours + 11) % 12 + 1, mins))
        }
    }
}

impl DayTimes {
    pub fn format(&self, format: TimeFormat) -> TimeTable {
        TimeTable {
            values: self.minutes.map(|m| format_time(m, format)),
        }
    }
}
