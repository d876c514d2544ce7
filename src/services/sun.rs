// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sunrise and sunset for a civil date at a location.

use crate::services::ephemeris::sun_equatorial;
use crate::time_utils::julian_day_ut;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Solar zenith at rise/set: refraction plus the solar semi-diameter.
const RISE_SET_ZENITH_DEG: f64 = 90.833;
const REFINEMENT_PASSES: usize = 3;

/// Sun events for one civil day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl SunTimes {
    pub fn day_length(&self) -> Duration {
        self.sunset - self.sunrise
    }
}

/// Errors for locations where the Sun does not cross the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SunError {
    #[error("Sun never rises on this date at this latitude (polar night)")]
    NeverRises,

    #[error("Sun never sets on this date at this latitude (polar day)")]
    NeverSets,
}

#[derive(Clone, Copy)]
enum Event {
    Rise,
    Set,
}

/// Minutes after `midnight` (00:00 UTC of the reference day) at which the
/// event occurs, refined by re-evaluating the Sun at the previous estimate.
fn event_minutes(
    midnight: DateTime<Utc>,
    lat: f64,
    lon: f64,
    event: Event,
) -> Result<f64, SunError> {
    let mut minutes = 720.0 - 4.0 * lon;

    for _ in 0..REFINEMENT_PASSES {
        let t = midnight + Duration::milliseconds((minutes * 60_000.0) as i64);
        let (_, dec, eot) = sun_equatorial(julian_day_ut(t));

        let (phi, delta) = (lat.to_radians(), dec.to_radians());
        let cos_h = (RISE_SET_ZENITH_DEG.to_radians().cos() - phi.sin() * delta.sin())
            / (phi.cos() * delta.cos());
        if cos_h > 1.0 {
            return Err(SunError::NeverRises);
        }
        if cos_h < -1.0 {
            return Err(SunError::NeverSets);
        }
        let hour_angle = cos_h.acos().to_degrees();

        let solar_noon = 720.0 - 4.0 * lon - eot;
        minutes = match event {
            Event::Rise => solar_noon - 4.0 * hour_angle,
            Event::Set => solar_noon + 4.0 * hour_angle,
        };
    }
    Ok(minutes)
}

/// 00:00 UTC of the UTC day whose solar noon at `lon` lies closest to
/// local noon of `date` in `tz`.
fn reference_midnight(date: NaiveDate, lon: f64, tz: Tz) -> DateTime<Utc> {
    let local_noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
    let noon_utc = tz
        .from_local_datetime(&local_noon)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| local_noon.and_utc());

    let midnight = noon_utc.date_naive().and_time(NaiveTime::MIN).and_utc();
    let solar_noon = midnight + Duration::milliseconds(((720.0 - 4.0 * lon) * 60_000.0) as i64);
    let day_shift = ((noon_utc - solar_noon).num_minutes() as f64 / 1440.0).round() as i64;
    midnight + Duration::days(day_shift)
}

fn times_from(midnight: DateTime<Utc>, lat: f64, lon: f64) -> Result<SunTimes, SunError> {
    let at = |minutes: f64| midnight + Duration::milliseconds((minutes * 60_000.0).round() as i64);
    let rise = event_minutes(midnight, lat, lon, Event::Rise)?;
    let set = event_minutes(midnight, lat, lon, Event::Set)?;
    Ok(SunTimes {
        sunrise: at(rise),
        sunset: at(set),
    })
}

/// Sunrise and sunset on the civil `date` in `tz` at (`lat`, `lon`),
/// east positive. The sunrise falls on `date` in local time.
pub fn sun_times(date: NaiveDate, lat: f64, lon: f64, tz: Tz) -> Result<SunTimes, SunError> {
    let mut midnight = reference_midnight(date, lon, tz);
    let mut times = times_from(midnight, lat, lon)?;

    let local_day = times.sunrise.with_timezone(&tz).date_naive();
    if local_day != date {
        midnight += Duration::days((date - local_day).num_days());
        times = times_from(midnight, lat, lon)?;
    }
    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_minutes(actual: DateTime<Utc>, expected: DateTime<Utc>, minutes: i64) {
        let diff = (actual - expected).num_seconds().abs();
        assert!(
            diff <= minutes * 60,
            "expected {expected}, got {actual} ({diff}s off)"
        );
    }

    #[test]
    fn test_london_midsummer() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let times = sun_times(date, 51.5074, -0.1278, chrono_tz::Europe::London).unwrap();
        // 04:43 and 21:21 BST.
        within_minutes(
            times.sunrise,
            Utc.with_ymd_and_hms(2024, 6, 21, 3, 43, 0).unwrap(),
            3,
        );
        within_minutes(
            times.sunset,
            Utc.with_ymd_and_hms(2024, 6, 21, 20, 21, 0).unwrap(),
            3,
        );
        assert!(times.day_length() > Duration::hours(16));
    }

    #[test]
    fn test_equator_equinox_day_is_about_twelve_hours() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let times = sun_times(date, 0.0, 0.0, chrono_tz::UTC).unwrap();
        let minutes = times.day_length().num_minutes();
        assert!((725..=735).contains(&minutes), "{minutes}");
    }

    #[test]
    fn test_polar_day_and_night() {
        let summer = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let winter = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
        assert_eq!(sun_times(summer, 69.65, 18.96, chrono_tz::Europe::Oslo), Err(SunError::NeverSets));
        assert_eq!(sun_times(winter, 69.65, 18.96, chrono_tz::Europe::Oslo), Err(SunError::NeverRises));
    }

    #[test]
    fn test_sunrise_falls_on_local_date_far_east_of_longitude() {
        // Samoa keeps UTC+13 while lying at 172°W.
        let date = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let tz = chrono_tz::Pacific::Apia;
        let times = sun_times(date, -13.8333, -171.7667, tz).unwrap();

        let sunrise = times.sunrise.with_timezone(&tz);
        let sunset = times.sunset.with_timezone(&tz);
        assert_eq!(sunrise.date_naive(), date);
        assert_eq!(sunset.date_naive(), date);
        // About 06:50 and 18:08 local.
        within_minutes(
            times.sunrise,
            Utc.with_ymd_and_hms(2024, 6, 19, 17, 50, 0).unwrap(),
            5,
        );
    }

    #[test]
    fn test_sunrise_falls_on_local_date_across_zones() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let cases = [
            (-21.1394, -175.2049, chrono_tz::Pacific::Tongatapu),
            (1.8721, -157.4278, chrono_tz::Pacific::Kiritimati),
            (-36.8485, 174.7633, chrono_tz::Pacific::Auckland),
            (21.3069, -157.8583, chrono_tz::Pacific::Honolulu),
            (28.6139, 77.2090, chrono_tz::Asia::Kolkata),
        ];
        for (lat, lon, tz) in cases {
            let times = sun_times(date, lat, lon, tz).unwrap();
            assert_eq!(
                times.sunrise.with_timezone(&tz).date_naive(),
                date,
                "sunrise in {tz}"
            );
            assert!(times.sunset > times.sunrise);
        }
    }
}
