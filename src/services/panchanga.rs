// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Panchanga computation: tithi, nakshatra, yoga, karana and vara at
//! sunrise, with end times and the inauspicious day segments.

use crate::models::names::{
    karana_name, sign_name, weekday_lord, weekday_name, NAKSHATRA_NAMES, TITHI_NAMES, YOGA_NAMES,
};
use crate::models::panchanga::{Limb, Location, Nakshatra, Panchanga, Tithi, TimeWindow, Vara};
use crate::models::Ayanamsha;
use crate::services::dasha::nakshatra_lord;
use crate::services::ephemeris::{nakshatra_and_pada, norm360, sign_index, Ephemeris, SEG_27};
use crate::services::sun::{sun_times, SunError, SunTimes};
use crate::time_utils::{format_local_rfc3339, julian_day_ut};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use dashmap::DashMap;
use std::sync::Arc;

pub const TITHI_DEG: f64 = 12.0;
pub const KARANA_DEG: f64 = 6.0;

const SEARCH_WINDOW_HOURS: i64 = 48;
const COARSE_STEP_MINUTES: i64 = 10;
const REFINE_TO_SECONDS: i64 = 30;

/// Day-segment index (1..8) of Rahu Kalam by weekday.
fn rahu_segment(day: Weekday) -> u32 {
    match day {
        Weekday::Sun => 8,
        Weekday::Mon => 2,
        Weekday::Tue => 7,
        Weekday::Wed => 5,
        Weekday::Thu => 6,
        Weekday::Fri => 4,
        Weekday::Sat => 3,
    }
}

/// Day-segment index (1..8) of Yamaganda by weekday.
fn yama_segment(day: Weekday) -> u32 {
    match day {
        Weekday::Sun => 5,
        Weekday::Mon => 3,
        Weekday::Tue => 6,
        Weekday::Wed => 2,
        Weekday::Thu => 7,
        Weekday::Fri => 5,
        Weekday::Sat => 4,
    }
}

/// Day-segment index (1..8) of Gulika Kalam by weekday.
fn gulika_segment(day: Weekday) -> u32 {
    match day {
        Weekday::Sun => 7,
        Weekday::Mon => 6,
        Weekday::Tue => 5,
        Weekday::Wed => 4,
        Weekday::Thu => 3,
        Weekday::Fri => 2,
        Weekday::Sat => 1,
    }
}

/// Step forward from `start` until `crosses` holds, then bisect.
///
/// Returns `None` when no crossing happens within the search window.
pub fn find_event_end_time<F>(start: DateTime<Utc>, crosses: F) -> Option<DateTime<Utc>>
where
    F: Fn(DateTime<Utc>) -> bool,
{
    let end = start + Duration::hours(SEARCH_WINDOW_HOURS);
    let step = Duration::minutes(COARSE_STEP_MINUTES);

    let mut t = start;
    while t <= end && !crosses(t) {
        t += step;
    }
    if t > end {
        return None;
    }

    let mut lo = (t - step).max(start);
    let mut hi = t;
    while (hi - lo) > Duration::seconds(REFINE_TO_SECONDS) {
        let mid = lo + (hi - lo) / 2;
        if crosses(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Some(hi)
}

/// Current segment (0-based) of a cyclic angular quantity and when it ends.
///
/// The last segment ends when the value wraps past 360°.
fn segment_and_end<F>(
    start: DateTime<Utc>,
    value_at: F,
    segment_deg: f64,
    count: usize,
) -> (usize, Option<DateTime<Utc>>)
where
    F: Fn(DateTime<Utc>) -> f64,
{
    let index = ((value_at(start) / segment_deg).floor() as usize).min(count - 1);
    let ends_at = if index == count - 1 {
        find_event_end_time(start, |t| value_at(t) < segment_deg)
    } else {
        let target = (index + 1) as f64 * segment_deg;
        find_event_end_time(start, |t| value_at(t) >= target)
    };
    (index, ends_at)
}

/// The nth (1-based) of `parts` equal segments of daytime.
fn day_segment(sun: &SunTimes, parts: i32, nth: u32) -> (DateTime<Utc>, DateTime<Utc>) {
    let part = sun.day_length() / parts;
    let start = sun.sunrise + part * (nth as i32 - 1);
    (start, start + part)
}

/// Panchanga limbs in UTC, before formatting for a zone.
#[derive(Debug, Clone)]
pub struct PanchangaDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub sun: SunTimes,
    pub ayanamsha_deg: f64,
    pub sun_longitude: f64,
    pub moon_longitude: f64,
    /// 1..30
    pub tithi: u8,
    pub tithi_end: Option<DateTime<Utc>>,
    /// 1..27
    pub nakshatra: u8,
    pub pada: u8,
    pub nakshatra_end: Option<DateTime<Utc>>,
    /// 1..27
    pub yoga: u8,
    pub yoga_end: Option<DateTime<Utc>>,
    /// 0..60 counted from the new moon
    pub karana: u8,
    pub karana_end: Option<DateTime<Utc>>,
    pub rahu_kalam: (DateTime<Utc>, DateTime<Utc>),
    pub yamaganda: (DateTime<Utc>, DateTime<Utc>),
    pub gulika_kalam: (DateTime<Utc>, DateTime<Utc>),
    pub abhijit: (DateTime<Utc>, DateTime<Utc>),
}

impl PanchangaDay {
    /// Compute the limbs at sunrise of the civil `date` in `tz` at the
    /// given location.
    pub fn compute(
        date: NaiveDate,
        lat: f64,
        lon: f64,
        tz: Tz,
        ayanamsha: Ayanamsha,
    ) -> Result<Self, SunError> {
        let eph = Ephemeris::new(ayanamsha);
        let sun = sun_times(date, lat, lon, tz)?;
        let sunrise = sun.sunrise;
        let jd = julian_day_ut(sunrise);
        let (sun_lon, moon_lon) = eph.sun_moon(jd);

        let elongation = |t: DateTime<Utc>| {
            let (s, m) = eph.sun_moon(julian_day_ut(t));
            norm360(m - s)
        };
        let moon = |t: DateTime<Utc>| eph.sun_moon(julian_day_ut(t)).1;
        let sum = |t: DateTime<Utc>| {
            let (s, m) = eph.sun_moon(julian_day_ut(t));
            norm360(s + m)
        };

        let (tithi, tithi_end) = segment_and_end(sunrise, elongation, TITHI_DEG, 30);
        let (nak, nakshatra_end) = segment_and_end(sunrise, moon, SEG_27, 27);
        let (yoga, yoga_end) = segment_and_end(sunrise, sum, SEG_27, 27);
        let (karana, karana_end) = segment_and_end(sunrise, elongation, KARANA_DEG, 60);
        let (_, pada) = nakshatra_and_pada(moon_lon);

        let weekday = date.weekday();
        Ok(Self {
            date,
            weekday,
            sun,
            ayanamsha_deg: eph.ayanamsha_deg(jd),
            sun_longitude: sun_lon,
            moon_longitude: moon_lon,
            tithi: tithi as u8 + 1,
            tithi_end,
            nakshatra: nak as u8 + 1,
            pada,
            nakshatra_end,
            yoga: yoga as u8 + 1,
            yoga_end,
            karana: karana as u8,
            karana_end,
            rahu_kalam: day_segment(&sun, 8, rahu_segment(weekday)),
            yamaganda: day_segment(&sun, 8, yama_segment(weekday)),
            gulika_kalam: day_segment(&sun, 8, gulika_segment(weekday)),
            abhijit: day_segment(&sun, 15, 8),
        })
    }

    pub fn tithi_name(&self) -> &'static str {
        TITHI_NAMES[usize::from(self.tithi - 1)]
    }

    pub fn paksha(&self) -> &'static str {
        if self.tithi <= 15 {
            "Shukla"
        } else {
            "Krishna"
        }
    }

    pub fn nakshatra_name(&self) -> &'static str {
        NAKSHATRA_NAMES[usize::from(self.nakshatra - 1)]
    }

    pub fn karana_name(&self) -> &'static str {
        karana_name(usize::from(self.karana))
    }

    /// Format into the response model for a zone.
    pub fn to_panchanga(&self, lat: f64, lon: f64, tz: Tz, ayanamsha: Ayanamsha) -> Panchanga {
        let fmt = |t: DateTime<Utc>| format_local_rfc3339(t, tz);
        let window = |(start, end): (DateTime<Utc>, DateTime<Utc>)| TimeWindow {
            start: fmt(start),
            end: fmt(end),
        };

        Panchanga {
            date: self.date.format("%Y-%m-%d").to_string(),
            location: Location {
                lat,
                lon,
                tz: tz.name().to_string(),
            },
            ayanamsha,
            ayanamsha_deg: self.ayanamsha_deg,
            sunrise: fmt(self.sun.sunrise),
            sunset: fmt(self.sun.sunset),
            vara: Vara {
                name: weekday_name(self.weekday).to_string(),
                lord: weekday_lord(self.weekday),
            },
            tithi: Tithi {
                index: self.tithi,
                name: self.tithi_name().to_string(),
                paksha: self.paksha().to_string(),
                ends_at: self.tithi_end.map(fmt),
            },
            nakshatra: Nakshatra {
                index: self.nakshatra,
                name: self.nakshatra_name().to_string(),
                pada: self.pada,
                lord: nakshatra_lord(self.nakshatra),
                ends_at: self.nakshatra_end.map(fmt),
            },
            yoga: Limb {
                index: self.yoga,
                name: YOGA_NAMES[usize::from(self.yoga - 1)].to_string(),
                ends_at: self.yoga_end.map(fmt),
            },
            karana: Limb {
                index: self.karana,
                name: self.karana_name().to_string(),
                ends_at: self.karana_end.map(fmt),
            },
            sun_longitude: self.sun_longitude,
            moon_longitude: self.moon_longitude,
            moon_sign: sign_name(sign_index(self.moon_longitude)).to_string(),
            rahu_kalam: window(self.rahu_kalam),
            yamaganda: window(self.yamaganda),
            gulika_kalam: window(self.gulika_kalam),
            abhijit_muhurta: window(self.abhijit),
        }
    }
}

/// Cache key: coordinates are rounded to 1e-4° (about 11 m).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PanchangaKey {
    date: NaiveDate,
    lat_e4: i64,
    lon_e4: i64,
    tz: Tz,
    ayanamsha: Ayanamsha,
}

/// Panchanga service with a bounded in-memory memo of responses.
#[derive(Clone)]
pub struct PanchangaService {
    cache: Arc<DashMap<PanchangaKey, Arc<Panchanga>>>,
    capacity: usize,
}

impl Default for PanchangaService {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl PanchangaService {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            capacity,
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Panchanga for a civil day, served from the memo when possible.
    pub fn panchanga(
        &self,
        date: NaiveDate,
        lat: f64,
        lon: f64,
        tz: Tz,
        ayanamsha: Ayanamsha,
    ) -> Result<Arc<Panchanga>, SunError> {
        let key = PanchangaKey {
            date,
            lat_e4: (lat * 1e4).round() as i64,
            lon_e4: (lon * 1e4).round() as i64,
            tz,
            ayanamsha,
        };
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(date = %date, "Panchanga cache hit");
            return Ok(hit.clone());
        }

        let day = PanchangaDay::compute(date, lat, lon, tz, ayanamsha)?;
        let result = Arc::new(day.to_panchanga(lat, lon, tz, ayanamsha));

        if self.capacity > 0 {
            if self.cache.len() >= self.capacity {
                tracing::info!(entries = self.cache.len(), "Panchanga cache full, clearing");
                self.cache.clear();
            }
            self.cache.insert(key, result.clone());
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HRISHIKESH: (f64, f64) = (30.0869, 78.2676);

    fn day_at_hrishikesh(date: NaiveDate) -> PanchangaDay {
        PanchangaDay::compute(
            date,
            HRISHIKESH.0,
            HRISHIKESH.1,
            chrono_tz::Asia::Kolkata,
            Ayanamsha::Lahiri,
        )
        .unwrap()
    }

    #[test]
    fn test_find_event_end_time_refines_to_thirty_seconds() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let event = start + Duration::minutes(137) + Duration::seconds(13);
        let found = find_event_end_time(start, |t| t >= event).unwrap();
        assert!(found >= event);
        assert!(found - event <= Duration::seconds(REFINE_TO_SECONDS));
    }

    #[test]
    fn test_find_event_end_time_gives_up_after_window() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(find_event_end_time(start, |_| false).is_none());
    }

    #[test]
    fn test_full_moon_day_is_purnima_or_adjacent() {
        // Full moon on 2024-01-25 at 17:54 UTC.
        let date = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let day = day_at_hrishikesh(date);
        assert!(day.tithi == 14 || day.tithi == 15, "tithi {}", day.tithi);
        assert_eq!(day.paksha(), "Shukla");
        // The tithi current at sunrise ends later that day.
        let end = day.tithi_end.unwrap();
        assert!(end > day.sun.sunrise);
        assert!(end - day.sun.sunrise < Duration::hours(27));
    }

    #[test]
    fn test_new_moon_day() {
        // New moon on 2024-04-08 at 18:21 UTC.
        let date = NaiveDate::from_ymd_opt(2024, 4, 8).unwrap();
        let day = day_at_hrishikesh(date);
        assert!(day.tithi == 29 || day.tithi == 30, "tithi {}", day.tithi);
        assert_eq!(day.paksha(), "Krishna");
        // Karana at sunrise belongs to the same tithi.
        assert_eq!(u32::from(day.karana) / 2 + 1, u32::from(day.tithi));
    }

    #[test]
    fn test_kalam_segments_follow_weekday_tables() {
        // 2024-06-16 is a Sunday: Rahu Kalam is the last eighth of daytime.
        let date = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        let day = day_at_hrishikesh(date);
        assert_eq!(day.weekday, Weekday::Sun);
        let diff = (day.rahu_kalam.1 - day.sun.sunset).num_milliseconds().abs();
        assert!(diff <= 1, "rahu kalam should end at sunset");
        assert!(day.abhijit.0 < day.abhijit.1);
        assert!(day.yamaganda.0 > day.sun.sunrise);
    }

    #[test]
    fn test_vara_follows_local_date_in_zone_ahead_of_longitude() {
        // Apia is UTC+13 at 172°W, so local sunrise on 2024-06-20 is
        // still 2024-06-19 in UTC.
        let tz = chrono_tz::Pacific::Apia;
        let date = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let day = PanchangaDay::compute(date, -13.8333, -171.7667, tz, Ayanamsha::Lahiri)
            .unwrap();
        assert_eq!(day.weekday, Weekday::Thu);
        assert_eq!(day.sun.sunrise.with_timezone(&tz).date_naive(), date);
        assert_eq!(day.sun.sunrise.date_naive(), date.pred_opt().unwrap());

        let panchanga = day.to_panchanga(-13.8333, -171.7667, tz, Ayanamsha::Lahiri);
        assert!(panchanga.sunrise.starts_with("2024-06-20T06:"));
        assert_eq!(panchanga.vara.name, "Thursday");
    }

    #[test]
    fn test_panchanga_response_is_cached() {
        let service = PanchangaService::new(4);
        let tz: Tz = "Asia/Kolkata".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let a = service
            .panchanga(date, HRISHIKESH.0, HRISHIKESH.1, tz, Ayanamsha::Lahiri)
            .unwrap();
        let b = service
            .panchanga(date, HRISHIKESH.0, HRISHIKESH.1, tz, Ayanamsha::Lahiri)
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(service.cached_entries(), 1);
        assert_eq!(a.vara.name, "Friday");
        assert!(a.sunrise.ends_with("+05:30"));
    }

    #[test]
    fn test_cache_is_bounded() {
        let service = PanchangaService::new(2);
        let tz: Tz = "UTC".parse().unwrap();
        for d in 1..=5 {
            let date = NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
            service
                .panchanga(date, 0.0, 0.0, tz, Ayanamsha::Lahiri)
                .unwrap();
        }
        assert!(service.cached_entries() <= 2);
    }
}
