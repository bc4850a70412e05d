use chrono::{Local, Offset, TimeZone};
use chrono_tz::Asia::Tehran;

use pray_times::{Ordinate, PrayTimes};

fn main() {
    env_logger::init();

    let latitude = 34.641159;
    let longitude = 50.877456;

    let date = Local::now().date_naive();
    let timezone = Tehran.offset_from_utc_date(&date).fix().local_minus_utc() as f64 / 3600.0;

    let mut pt = PrayTimes::default();
    pt.set_method("Tehran").expect("Tehran is a known method");
    let times = pt
        .get_times(date, (latitude, longitude), timezone, 0.0, "24h")
        .expect("valid date and format");

    println!("=== Prayer Times ===");
    println!("Location: Qom ({:.4}°N, {:.4}°E)", latitude, longitude);
    println!("Date: {} (UTC{:+})", date, timezone);
    println!("Method: {}", pt.get_method());
    println!();
    for ordinate in Ordinate::ALL {
        println!("{}: {}", ordinate.label(), times[ordinate]);
    }
}
