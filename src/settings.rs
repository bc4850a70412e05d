use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::PrayerError;
use crate::methods::{self, CalculationMethod};
use crate::types::{HighLatitudeRule, MidnightRule, Ordinate, TwilightRule};

pub const DEFAULT_IMSAK: TwilightRule = TwilightRule::Minutes(10.0);
pub const SHADOW_STANDARD: f64 = 1.0;
pub const SHADOW_HANAFI: f64 = 2.0;

/// Raw override value as a caller or a profile file supplies it:
/// `18`, `"18"`, `"4 min"`, `"Jafari"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<TwilightRule> for ParamValue {
    fn from(rule: TwilightRule) -> Self {
        match rule {
            TwilightRule::Angle(a) => ParamValue::Number(a),
            TwilightRule::Minutes(_) => ParamValue::Text(rule.to_string()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    Angle(f64),
    Minutes(f64),
    Named(String),
}

pub fn parse_value(key: &str, value: &ParamValue) -> Result<ParsedValue, PrayerError> {
    let text = match value {
        ParamValue::Number(n) if n.is_finite() => return Ok(ParsedValue::Angle(*n)),
        ParamValue::Number(n) => return Err(PrayerError::parameter(key, n, "not a finite number")),
        ParamValue::Text(s) => s.trim(),
    };

    if let Some(number) = text.strip_suffix("min") {
        return match number.trim().parse::<f64>() {
            Ok(m) if m.is_finite() => Ok(ParsedValue::Minutes(m)),
            _ => Err(PrayerError::parameter(key, text, "expected a number before `min`")),
        };
    }
    if let Ok(a) = text.parse::<f64>() {
        if a.is_finite() {
            return Ok(ParsedValue::Angle(a));
        }
    }
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic()) {
        return Ok(ParsedValue::Named(text.to_string()));
    }
    Err(PrayerError::parameter(
        key,
        text,
        "expected an angle, a minute offset or a rule name",
    ))
}

/// Effective calculation parameters of one engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub method: String,
    pub imsak: TwilightRule,
    pub fajr: f64,
    /// Minutes added to Dhuhr.
    pub dhuhr: f64,
    /// Asr shadow factor.
    pub asr: f64,
    pub maghrib: TwilightRule,
    pub isha: TwilightRule,
    pub midnight: MidnightRule,
    pub high_latitude: HighLatitudeRule,
    /// Minutes added to each time after computation.
    pub offsets: BTreeMap<Ordinate, f64>,
}

impl Settings {
    pub fn new(method: &str) -> Result<Self, PrayerError> {
        methods::lookup(method).map(Settings::from_method)
    }

    pub fn from_method(m: &CalculationMethod) -> Self {
        let mut settings = Settings {
            method: String::new(),
            imsak: DEFAULT_IMSAK,
            fajr: 0.0,
            dhuhr: 0.0,
            asr: SHADOW_STANDARD,
            maghrib: TwilightRule::Minutes(0.0),
            isha: TwilightRule::Minutes(0.0),
            midnight: MidnightRule::Standard,
            high_latitude: HighLatitudeRule::default(),
            offsets: Ordinate::ALL.into_iter().map(|o| (o, 0.0)).collect(),
        };
        settings.apply_method(m);
        settings
    }

    fn apply_method(&mut self, m: &CalculationMethod) {
        self.method = m.id.to_string();
        self.fajr = m.fajr;
        self.maghrib = m.maghrib;
        self.isha = m.isha;
        self.midnight = m.midnight;
    }

    /// Replaces the method-defined rules (Fajr, Maghrib, Isha, midnight).
    /// Imsak, Dhuhr, Asr, the high latitude rule and offsets are kept.
    pub fn set_method(&mut self, method: &str) -> Result<(), PrayerError> {
        let m = methods::lookup(method)?;
        self.apply_method(m);
        debug!("calculation method set to {} ({})", m.id, m.name);
        Ok(())
    }

    /// Applies all overrides or none of them.
    pub fn adjust<I, K, V>(&mut self, overrides: I) -> Result<(), PrayerError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        let mut next = self.clone();
        for (key, value) in overrides {
            next.apply(key.as_ref(), &value.into())?;
        }
        *self = next;
        Ok(())
    }

    fn apply(&mut self, key: &str, value: &ParamValue) -> Result<(), PrayerError> {
        let invalid = |reason| PrayerError::parameter(key, value, reason);
        match key.to_ascii_lowercase().as_str() {
            "imsak" => self.imsak = twilight_rule(key, value)?,
            "fajr" => match parse_value(key, value)? {
                ParsedValue::Angle(a) => self.fajr = a,
                _ => return Err(invalid("expected an angle")),
            },
            "dhuhr" => match parse_value(key, value)? {
                ParsedValue::Angle(m) | ParsedValue::Minutes(m) => self.dhuhr = m,
                ParsedValue::Named(_) => return Err(invalid("expected minutes")),
            },
            "asr" => {
                self.asr = match parse_value(key, value)? {
                    ParsedValue::Named(n) if n.eq_ignore_ascii_case("standard") => SHADOW_STANDARD,
                    ParsedValue::Named(n) if n.eq_ignore_ascii_case("hanafi") => SHADOW_HANAFI,
                    ParsedValue::Angle(factor) if factor > 0.0 => factor,
                    _ => {
                        return Err(invalid(
                            "expected Standard, Hanafi or a positive shadow factor",
                        ))
                    }
                }
            }
            "maghrib" => self.maghrib = twilight_rule(key, value)?,
            "isha" => self.isha = twilight_rule(key, value)?,
            "midnight" => {
                self.midnight = match parse_value(key, value)? {
                    ParsedValue::Named(n) => n.parse().ok(),
                    _ => None,
                }
                .ok_or_else(|| invalid("expected Standard or Jafari"))?
            }
            "highlatitude" | "highlats" => {
                self.high_latitude = match parse_value(key, value)? {
                    ParsedValue::Named(n) => n.parse().ok(),
                    _ => None,
                }
                .ok_or_else(|| invalid("expected None, NightMiddle, OneSeventh or AngleBased"))?
            }
            _ => return Err(invalid("unknown parameter")),
        }
        debug!("adjusted {} to {}", key, value);
        Ok(())
    }

    /// Merges per-time minute offsets; unnamed times keep theirs.
    pub fn tune<I, K>(&mut self, offsets: I) -> Result<(), PrayerError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let parsed = offsets
            .into_iter()
            .map(|(name, minutes)| {
                let ordinate: Ordinate = name.as_ref().parse()?;
                if !minutes.is_finite() {
                    return Err(PrayerError::parameter(
                        name.as_ref(),
                        minutes,
                        "not a finite number of minutes",
                    ));
                }
                Ok((ordinate, minutes))
            })
            .collect::<Result<Vec<_>, PrayerError>>()?;
        for (ordinate, minutes) in parsed {
            debug!("tuned {} by {} min", ordinate, minutes);
            self.offsets.insert(ordinate, minutes);
        }
        Ok(())
    }

    pub fn offset(&self, ordinate: Ordinate) -> f64 {
        self.offsets.get(&ordinate).copied().unwrap_or(0.0)
    }
}

fn twilight_rule(key: &str, value: &ParamValue) -> Result<TwilightRule, PrayerError> {
    match parse_value(key, value)? {
        ParsedValue::Angle(a) => Ok(TwilightRule::Angle(a)),
        ParsedValue::Minutes(m) => Ok(TwilightRule::Minutes(m)),
        ParsedValue::Named(_) => Err(PrayerError::parameter(
            key,
            value,
            "expected an angle or a minute offset",
        )),
    }
}
