//! Engine configuration stored as TOML.
//!
//! ```toml
//! method = "Tehran"
//!
//! [adjust]
//! maghrib = "4 min"
//! highLatitude = "AngleBased"
//!
//! [tune]
//! fajr = 2
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PrayerError;
use crate::methods::DEFAULT_METHOD;
use crate::settings::{ParamValue, Settings, SHADOW_HANAFI, SHADOW_STANDARD};
use crate::times::PrayTimes;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub adjust: BTreeMap<String, ParamValue>,
    #[serde(default)]
    pub tune: BTreeMap<String, f64>,
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            method: default_method(),
            adjust: BTreeMap::new(),
            tune: BTreeMap::new(),
        }
    }
}

impl Profile {
    pub fn from_toml_str(text: &str) -> Result<Self, PrayerError> {
        toml::from_str(text).map_err(|e| PrayerError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PrayerError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| PrayerError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, PrayerError> {
        toml::to_string(self).map_err(|e| PrayerError::Config(e.to_string()))
    }

    /// Every setting spelled out as an `adjust` entry, so that loading the
    /// profile reproduces `settings` exactly.
    pub fn from_settings(settings: &Settings) -> Self {
        let asr = if settings.asr == SHADOW_STANDARD {
            ParamValue::from("Standard")
        } else if settings.asr == SHADOW_HANAFI {
            ParamValue::from("Hanafi")
        } else {
            ParamValue::Number(settings.asr)
        };
        let adjust = BTreeMap::from([
            ("imsak".to_string(), settings.imsak.into()),
            ("fajr".to_string(), ParamValue::Number(settings.fajr)),
            ("dhuhr".to_string(), format!("{} min", settings.dhuhr).into()),
            ("asr".to_string(), asr),
            ("maghrib".to_string(), settings.maghrib.into()),
            ("isha".to_string(), settings.isha.into()),
            ("midnight".to_string(), settings.midnight.name().into()),
            (
                "highLatitude".to_string(),
                settings.high_latitude.name().into(),
            ),
        ]);
        let tune = settings
            .offsets
            .iter()
            .filter(|(_, minutes)| **minutes != 0.0)
            .map(|(ordinate, minutes)| (ordinate.name().to_string(), *minutes))
            .collect();
        Self {
            method: settings.method.clone(),
            adjust,
            tune,
        }
    }
}

impl PrayTimes {
    /// Applies the profile's method, then its adjustments, then its tuning.
    pub fn from_profile(profile: &Profile) -> Result<Self, PrayerError> {
        let mut engine = PrayTimes::new(&profile.method)?;
        engine.adjust(profile.adjust.iter().map(|(k, v)| (k, v.clone())))?;
        engine.tune(profile.tune.iter().map(|(k, v)| (k, *v)))?;
        Ok(engine)
    }

    pub fn profile(&self) -> Profile {
        Profile::from_settings(self.get_settings())
    }
}
