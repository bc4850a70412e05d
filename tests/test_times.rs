use chrono::NaiveDate;

use pray_times::angles::{julian_date, midday};
use pray_times::times::{format_time, minutes_to_time};
use pray_times::types::{Coordinates, Ordinate, TimeFormat, TimeValue, NO_EVENT};
use pray_times::{PrayTimes, PrayerError};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

const QOM: (f64, f64) = (34.641159, 50.877456);
const NEW_YORK: (f64, f64) = (40.7128, -74.006);
const MAKKAH: (f64, f64) = (21.4225, 39.8262);
const KARACHI: (f64, f64) = (24.8607, 67.0011);

fn clock(pt: &PrayTimes, date: (i32, u32, u32), coords: (f64, f64), tz: f64) -> Vec<String> {
    let table = pt.get_times(date, coords, tz, 0.0, "24h").unwrap();
    table.iter().map(|(_, v)| v.to_string()).collect()
}

fn minutes(pt: &PrayTimes, date: (i32, u32, u32), coords: (f64, f64), tz: f64) -> Vec<Option<f64>> {
    let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
    pt.compute_day(date, coords.into(), tz, 0.0)
        .iter()
        .map(|(_, m)| m)
        .collect()
}

// ── Reference days ──

#[test]
fn test_tehran_method_qom() {
    let pt = PrayTimes::new("Tehran").unwrap();
    assert_eq!(
        clock(&pt, (2024, 3, 15), QOM, 3.5),
        [
            "04:45", "04:55", "06:17", "12:15", "15:40", "18:14", "18:32", "19:19", "23:34"
        ]
    );
}

#[test]
fn test_mwl_new_york() {
    let pt = PrayTimes::default();
    assert_eq!(
        clock(&pt, (2024, 3, 15), NEW_YORK, -5.0),
        [
            "04:26", "04:36", "06:07", "12:05", "15:26", "18:03", "18:03", "19:29", "00:05"
        ]
    );
}

#[test]
fn test_makkah_isha_is_ninety_minutes_after_sunset() {
    let pt = PrayTimes::new("Makkah").unwrap();
    let table = pt.get_times((2024, 3, 15), MAKKAH, 3.0, 0.0, "24h").unwrap();
    assert_eq!(table[Ordinate::Fajr].to_string(), "05:13");
    assert_eq!(table[Ordinate::Sunset].to_string(), "18:30");
    assert_eq!(table[Ordinate::Isha].to_string(), "20:00");

    let m = minutes(&pt, (2024, 3, 15), MAKKAH, 3.0);
    let (sunset, isha) = (m[Ordinate::Sunset.index()].unwrap(), m[Ordinate::Isha.index()].unwrap());
    assert_approx!(isha - sunset, 90.0, 1e-9);
}

#[test]
fn test_hanafi_asr_is_later() {
    let mut pt = PrayTimes::new("Karachi").unwrap();
    let standard = pt.get_times((2024, 3, 15), KARACHI, 5.0, 0.0, "24h").unwrap();
    pt.adjust([("asr", "Hanafi")]).unwrap();
    let hanafi = pt.get_times((2024, 3, 15), KARACHI, 5.0, 0.0, "24h").unwrap();

    assert_eq!(standard[Ordinate::Asr].to_string(), "16:06");
    assert_eq!(hanafi[Ordinate::Asr].to_string(), "17:00");
    for o in Ordinate::ALL.into_iter().filter(|&o| o != Ordinate::Asr) {
        assert_eq!(standard[o], hanafi[o], "{}", o);
    }
}

#[test]
fn test_elevation_widens_the_day() {
    let pt = PrayTimes::default();
    let sea = pt.get_times((2024, 3, 15), NEW_YORK, -5.0, 0.0, "24h").unwrap();
    let high = pt
        .get_times((2024, 3, 15), (NEW_YORK.0, NEW_YORK.1, 100.0), -5.0, 0.0, "24h")
        .unwrap();
    assert_eq!(high[Ordinate::Sunrise].to_string(), "06:05");
    assert_eq!(high[Ordinate::Sunset].to_string(), "18:05");
    assert_eq!(sea[Ordinate::Fajr], high[Ordinate::Fajr]);
    assert_eq!(sea[Ordinate::Dhuhr], high[Ordinate::Dhuhr]);
}

#[test]
fn test_dhuhr_matches_midday() {
    let pt = PrayTimes::default();
    let m = minutes(&pt, (2024, 3, 15), QOM, 3.5);
    let noon = midday(QOM.1, julian_date(2024, 3, 15)) + 3.5;
    assert_approx!(m[Ordinate::Dhuhr.index()].unwrap() / 60.0, noon, 1.0 / 60.0);
}

// ── Maghrib offset ──

#[test]
fn test_maghrib_minutes_after_sunset() {
    let mut pt = PrayTimes::default();
    pt.set_method("Tehran").unwrap();
    pt.adjust([("maghrib", "4 min")]).unwrap();

    let table = pt.get_times((2024, 3, 15), QOM, 3.5, 0.0, "24h").unwrap();
    assert_eq!(table[Ordinate::Dhuhr].to_string(), "12:15");
    assert_eq!(table[Ordinate::Sunrise].to_string(), "06:17");
    assert_eq!(table[Ordinate::Sunset].to_string(), "18:14");
    assert_eq!(table[Ordinate::Maghrib].to_string(), "18:18");

    let m = minutes(&pt, (2024, 3, 15), QOM, 3.5);
    let (sunset, maghrib) = (
        m[Ordinate::Sunset.index()].unwrap(),
        m[Ordinate::Maghrib.index()].unwrap(),
    );
    assert_approx!(maghrib - sunset, 4.0, 1e-9);
}

// ── Table shape ──

#[test]
fn test_table_has_nine_ordinates_in_order() {
    let pt = PrayTimes::default();
    for format in ["24h", "12h", "12hNS", "float"] {
        let table = pt.get_times((2024, 3, 15), NEW_YORK, -5.0, 0.0, format).unwrap();
        assert_eq!(table.len(), 9);
        let names: Vec<&str> = table.iter().map(|(o, _)| o.name()).collect();
        assert_eq!(
            names,
            ["imsak", "fajr", "sunrise", "dhuhr", "asr", "sunset", "maghrib", "isha", "midnight"]
        );
        assert!(table.iter().all(|(_, v)| v.is_event()));
    }
}

#[test]
fn test_lookup_by_name() {
    let pt = PrayTimes::default();
    let table = pt.get_times((2024, 3, 15), NEW_YORK, -5.0, 0.0, "24h").unwrap();
    assert_eq!(table.get_by_name("Sunrise").unwrap().to_string(), "06:07");
    assert!(table.get_by_name("noon").is_none());
}

#[test]
fn test_get_times_is_idempotent() {
    let pt = PrayTimes::new("ISNA").unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 8, 9).unwrap();
    let a = pt.get_times(date, (-6.2, 106.8), 7.0, 0.0, "float").unwrap();
    let b = pt.get_times(date, (-6.2, 106.8), 7.0, 0.0, "float").unwrap();
    assert_eq!(a, b);
}

// ── Formats ──

#[test]
fn test_twelve_hour_format() {
    let pt = PrayTimes::default();
    let table = pt.get_times((2024, 3, 15), NEW_YORK, -5.0, 0.0, "12h").unwrap();
    assert_eq!(table[Ordinate::Fajr].to_string(), "4:36 am");
    assert_eq!(table[Ordinate::Dhuhr].to_string(), "12:05 pm");
    assert_eq!(table[Ordinate::Isha].to_string(), "7:29 pm");
    assert_eq!(table[Ordinate::Midnight].to_string(), "12:05 am");

    let bare = pt.get_times((2024, 3, 15), NEW_YORK, -5.0, 0.0, "12hNS").unwrap();
    assert_eq!(bare[Ordinate::Isha].to_string(), "7:29");
}

#[test]
fn test_float_format_is_minutes() {
    let pt = PrayTimes::default();
    let table = pt.get_times((2024, 3, 15), NEW_YORK, -5.0, 0.0, "float").unwrap();
    let fajr = table[Ordinate::Fajr].as_minutes().unwrap();
    assert_approx!(fajr, 275.535, 0.01);
    // midnight falls after 24:00 and is not wrapped
    let midnight = table[Ordinate::Midnight].as_minutes().unwrap();
    assert_approx!(midnight, 1445.075, 0.01);
}

#[test]
fn test_format_time_rounding() {
    assert_eq!(minutes_to_time(0.0), (0, 0));
    assert_eq!(minutes_to_time(59.4), (0, 59));
    assert_eq!(minutes_to_time(59.5), (1, 0));
    assert_eq!(minutes_to_time(1439.6), (0, 0));
    assert_eq!(minutes_to_time(-30.0), (23, 30));
    assert_eq!(
        format_time(Some(754.0), TimeFormat::Hours24),
        TimeValue::Clock("12:34".to_string())
    );
    assert_eq!(
        format_time(Some(30.0), TimeFormat::Hours12),
        TimeValue::Clock("12:30 am".to_string())
    );
    assert_eq!(format_time(None, TimeFormat::Hours24), TimeValue::NoEvent);
    assert_eq!(TimeValue::NoEvent.to_string(), NO_EVENT);
}

// ── Tuning and DST ──

#[test]
fn test_tune_shifts_only_that_time() {
    let mut pt = PrayTimes::default();
    let before = minutes(&pt, (2024, 3, 15), NEW_YORK, -5.0);
    pt.tune([("fajr", 5.0)]).unwrap();
    let after = minutes(&pt, (2024, 3, 15), NEW_YORK, -5.0);

    for o in Ordinate::ALL {
        let (b, a) = (before[o.index()].unwrap(), after[o.index()].unwrap());
        let expected = if o == Ordinate::Fajr { 5.0 } else { 0.0 };
        assert_approx!(a - b, expected, 1e-9);
    }
}

#[test]
fn test_dst_shifts_every_time_by_an_hour() {
    let pt = PrayTimes::default();
    let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let standard = pt.compute_day(date, NEW_YORK.into(), -5.0, 0.0);
    let summer = pt.compute_day(date, NEW_YORK.into(), -5.0, 1.0);
    for o in Ordinate::ALL {
        assert_approx!(summer.get(o).unwrap() - standard.get(o).unwrap(), 60.0, 1e-9);
    }
    let table = pt.get_times(date, NEW_YORK, -5.0, 1.0, "24h").unwrap();
    assert_eq!(table[Ordinate::Dhuhr].to_string(), "13:00");
    assert_eq!(table[Ordinate::Sunset].to_string(), "20:31");
}

#[test]
fn test_dhuhr_minute_adjustment() {
    let mut pt = PrayTimes::default();
    let before = minutes(&pt, (2024, 3, 15), NEW_YORK, -5.0);
    pt.adjust([("dhuhr", "3 min")]).unwrap();
    let after = minutes(&pt, (2024, 3, 15), NEW_YORK, -5.0);
    let i = Ordinate::Dhuhr.index();
    assert_approx!(after[i].unwrap() - before[i].unwrap(), 3.0, 1e-9);
}

// ── Ordering ──

#[test]
fn test_times_are_ordered_at_moderate_latitudes() {
    let cases: &[((i32, u32, u32), (f64, f64), f64)] = &[
        ((2024, 3, 15), NEW_YORK, -5.0),
        ((2024, 6, 21), (47.0, 8.0), 1.0),
        ((2024, 12, 21), (-33.87, 151.21), 11.0),
        ((2024, 9, 1), MAKKAH, 3.0),
        ((2024, 1, 10), (1.29, 103.85), 8.0),
        ((2024, 7, 4), (-45.0, 170.0), 12.0),
        ((2024, 6, 21), (47.5, -122.3), -7.0),
    ];
    for method in ["MWL", "ISNA", "Egypt", "Makkah", "Karachi", "Tehran", "Jafari"] {
        let pt = PrayTimes::new(method).unwrap();
        for &(date, coords, tz) in cases {
            let m: Vec<f64> = minutes(&pt, date, coords, tz)
                .into_iter()
                .map(|v| v.unwrap())
                .collect();
            for pair in m[..8].windows(2) {
                assert!(pair[0] <= pair[1], "{} {:?} {:?}: {:?}", method, date, coords, m);
            }
            let (sunrise, sunset, midnight) = (m[2], m[5], m[8]);
            assert!(midnight > sunset, "{} {:?}: {:?}", method, date, m);
            assert!(midnight < sunrise + 1440.0, "{} {:?}: {:?}", method, date, m);
        }
    }
}

#[test]
fn test_jafari_midnight_is_earlier_than_standard() {
    let mut pt = PrayTimes::default();
    let standard = minutes(&pt, (2024, 3, 15), QOM, 3.5);
    pt.adjust([("midnight", "Jafari")]).unwrap();
    let jafari = minutes(&pt, (2024, 3, 15), QOM, 3.5);
    let i = Ordinate::Midnight.index();
    assert!(jafari[i].unwrap() < standard[i].unwrap());
}

#[test]
fn test_jafari_midnight_is_halfway_from_sunset_to_fajr() {
    let pt = PrayTimes::new("Tehran").unwrap();
    let m = minutes(&pt, (2024, 3, 15), QOM, 3.5);
    let get = |o: Ordinate| m[o.index()].unwrap();
    // same-day Fajr carried past midnight
    let expected = get(Ordinate::Sunset) + (get(Ordinate::Fajr) + 1440.0 - get(Ordinate::Sunset)) / 2.0;
    assert_approx!(get(Ordinate::Midnight), expected, 1e-9);
    assert!(get(Ordinate::Midnight) > 1380.0 && get(Ordinate::Midnight) < 1440.0);
}

// ── High latitudes ──

fn far_north(rule: &str) -> Vec<String> {
    let mut pt = PrayTimes::default();
    pt.adjust([("highLatitude", rule)]).unwrap();
    clock(&pt, (2024, 6, 21), (65.0, 25.0), 3.0)
}

#[test]
fn test_high_latitude_without_rule_reports_no_event() {
    let t = far_north("None");
    assert_eq!(t[0], NO_EVENT);
    assert_eq!(t[1], NO_EVENT);
    assert_eq!(t[7], NO_EVENT);
    assert_eq!(t[2], "02:21");
    assert_eq!(t[5], "00:23");
}

#[test]
fn test_high_latitude_rules() {
    assert_eq!(far_north("NightMiddle")[1], "01:22");
    assert_eq!(far_north("NightMiddle")[7], "01:22");
    assert_eq!(far_north("OneSeventh")[1], "02:04");
    assert_eq!(far_north("OneSeventh")[7], "00:40");
    assert_eq!(far_north("AngleBased")[1], "01:45");
    assert_eq!(far_north("AngleBased")[7], "00:56");
}

#[test]
fn test_high_latitude_clamp_is_bounded() {
    for rule in ["NightMiddle", "OneSeventh", "AngleBased"] {
        let mut pt = PrayTimes::default();
        pt.adjust([("highLatitude", rule)]).unwrap();
        let m = minutes(&pt, (2024, 6, 21), (65.0, 25.0), 3.0);
        let get = |o: Ordinate| m[o.index()].unwrap();
        let (fajr, sunrise, dhuhr, sunset, isha) = (
            get(Ordinate::Fajr),
            get(Ordinate::Sunrise),
            get(Ordinate::Dhuhr),
            get(Ordinate::Sunset),
            get(Ordinate::Isha),
        );
        assert!(fajr < sunrise && sunrise < dhuhr, "{}: {:?}", rule, m);
        assert!(dhuhr < sunset && sunset < isha, "{}: {:?}", rule, m);
        assert!(isha < sunrise + 1440.0, "{}: {:?}", rule, m);
    }
}

#[test]
fn test_polar_night_never_fails() {
    let pt = PrayTimes::default();
    let table = pt.get_times((2024, 12, 21), (78.2, 15.6), 1.0, 0.0, "24h").unwrap();
    assert_eq!(table.len(), 9);
    assert!(!table[Ordinate::Sunrise].is_event());
    assert!(table[Ordinate::Dhuhr].is_event());
}

// ── Failures ──

#[test]
fn test_invalid_date() {
    let pt = PrayTimes::default();
    assert_eq!(
        pt.get_times((2023, 2, 30), NEW_YORK, -5.0, 0.0, "24h"),
        Err(PrayerError::InvalidDate {
            year: 2023,
            month: 2,
            day: 30
        })
    );
    assert!(pt.get_times((2024, 13, 1), NEW_YORK, -5.0, 0.0, "24h").is_err());
    assert!(pt.get_times((2024, 2, 29), NEW_YORK, -5.0, 0.0, "24h").is_ok());
}

#[test]
fn test_invalid_format() {
    let pt = PrayTimes::default();
    assert_eq!(
        pt.get_times((2024, 3, 15), NEW_YORK, -5.0, 0.0, "25h"),
        Err(PrayerError::InvalidFormat("25h".to_string()))
    );
}

#[test]
fn test_coordinates_from_tuples() {
    let c: Coordinates = (1.0, 2.0).into();
    assert_eq!(c.elevation, 0.0);
    let c: Coordinates = (1.0, 2.0, 30.0).into();
    assert_eq!(c.elevation, 30.0);
}
