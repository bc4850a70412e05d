use crate::types::{Direction, SunPosition};

pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const J2000: f64 = 2451545.0;
/// Depression of the sun's upper limb at apparent sunrise and sunset.
pub const HORIZON_DIP: f64 = 0.833;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn dsin(deg: f64) -> f64 {
    deg_to_rad(deg).sin()
}

pub fn dcos(deg: f64) -> f64 {
    deg_to_rad(deg).cos()
}

pub fn dtan(deg: f64) -> f64 {
    deg_to_rad(deg).tan()
}

pub fn darcsin(x: f64) -> f64 {
    rad_to_deg(x.asin())
}

pub fn darccos(x: f64) -> f64 {
    rad_to_deg(x.acos())
}

pub fn darctan(x: f64) -> f64 {
    rad_to_deg(x.atan())
}

pub fn darctan2(y: f64, x: f64) -> f64 {
    rad_to_deg(y.atan2(x))
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

pub fn normalize_hour(hour: f64) -> f64 {
    hour.rem_euclid(24.0)
}

/// Hours from `from` forward to `to`, wrapping past midnight.
pub fn time_diff(from: f64, to: f64) -> f64 {
    normalize_hour(to - from)
}

/// Julian day at 0h UT of a proleptic Gregorian date (Meeus, ch. 7).
pub fn julian_date(year: i32, month: u32, day: u32) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
}

/// Low precision solar coordinates (USNO), good to about a minute of time
/// between 1950 and 2050.
pub fn sun_position(julian_date: f64) -> SunPosition {
    let d = julian_date - J2000;
    let g = normalize_angle(357.529 + 0.98560028 * d);
    let q = normalize_angle(280.459 + 0.98564736 * d);
    let l = normalize_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2.0 * g));
    let e = 23.439 - 0.00000036 * d;

    let ra = darctan2(dcos(e) * dsin(l), dcos(l)) / DEGREES_PER_HOUR;
    // q and ra straddle 0h near the March equinox
    let eqt = (q / DEGREES_PER_HOUR - normalize_hour(ra) + 12.0).rem_euclid(24.0) - 12.0;
    SunPosition {
        declination: darcsin(dsin(e) * dsin(l)),
        equation_of_time: eqt * 60.0,
    }
}

/// Local mean time of solar noon for the given equation of time (minutes).
pub fn solar_noon(equation_of_time: f64) -> f64 {
    normalize_hour(12.0 - equation_of_time / 60.0)
}

/// Local mean time at which the sun is `angle` degrees below the horizon
/// (negative for above), before or after solar noon. `None` when the sun
/// never gets there on this date at this latitude.
pub fn compute_time(
    angle: f64,
    declination: f64,
    latitude: f64,
    equation_of_time: f64,
    direction: Direction,
) -> Option<f64> {
    let cos_ha = (-dsin(angle) - dsin(declination) * dsin(latitude))
        / (dcos(declination) * dcos(latitude));
    if !(-1.0..=1.0).contains(&cos_ha) {
        return None;
    }
    let t = darccos(cos_ha) / DEGREES_PER_HOUR;
    let noon = solar_noon(equation_of_time);
    Some(match direction {
        Direction::Morning => noon - t,
        Direction::Afternoon => noon + t,
    })
}

/// Solar noon in UT hours at `longitude` on the day starting at
/// `julian_date`, refined twice for the equation of time at noon itself.
pub fn midday(longitude: f64, julian_date: f64) -> f64 {
    let mean_noon = 12.0 - longitude / DEGREES_PER_HOUR;
    let mut noon = mean_noon;
    for _ in 0..2 {
        let eqt = sun_position(julian_date + noon / 24.0).equation_of_time;
        noon = mean_noon - eqt / 60.0;
    }
    noon
}

/// Altitude of the sun when an object's shadow is `factor` times its length
/// plus the noon shadow. Shafii and the majority use 1, Hanafi uses 2.
pub fn asr_angle(factor: f64, latitude: f64, declination: f64) -> f64 {
    darctan(1.0 / (factor + dtan((latitude - declination).abs())))
}

pub fn rise_set_angle(elevation: f64) -> f64 {
    HORIZON_DIP + 0.0347 * elevation.max(0.0).sqrt()
}
