// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transit scanning: sign ingresses, stations and conjunctions over a
//! window of months.

use crate::models::names::sign_name;
use crate::models::panchanga::TimeWindow;
use crate::models::transit::{TransitEvent, TransitEventKind, TransitPosition, TransitReport};
use crate::models::{Ayanamsha, Body};
use crate::services::ephemeris::{norm180, sign_index, BodyPosition, Ephemeris};
use crate::time_utils::{format_utc_rfc3339, julian_day_ut};
use chrono::{DateTime, Duration, Months, Utc};

pub const MAX_MONTHS: u32 = 36;
pub const MAX_ORB_DEG: f64 = 10.0;

/// The Moon moves too far in a day for daily conjunction sampling.
const CONJUNCTION_BODIES: [Body; 7] = [
    Body::Sun,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
    Body::Rahu,
];

/// Errors from transit scanning.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransitError {
    #[error("months must be between 1 and {MAX_MONTHS}, got {0}")]
    MonthsOutOfRange(u32),

    #[error("orb_deg must be greater than 0 and at most {MAX_ORB_DEG}, got {0}")]
    OrbOutOfRange(f64),
}

/// Bisect between `lo` (predicate false) and `hi` (predicate true) to
/// one minute.
fn bisect<F>(mut lo: DateTime<Utc>, mut hi: DateTime<Utc>, pred: F) -> DateTime<Utc>
where
    F: Fn(DateTime<Utc>) -> bool,
{
    while hi - lo > Duration::minutes(1) {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi
}

struct Sample {
    time: DateTime<Utc>,
    positions: Vec<BodyPosition>,
}

impl Sample {
    fn of(&self, body: Body) -> &BodyPosition {
        // Sampled in Body::ALL order.
        &self.positions[Body::ALL.iter().position(|&b| b == body).unwrap_or(0)]
    }
}

fn ingress_events(eph: &Ephemeris, samples: &[Sample]) -> Vec<TransitEvent> {
    let mut events = Vec::new();
    for body in Body::ALL {
        for pair in samples.windows(2) {
            let before = sign_index(pair[0].of(body).longitude);
            let after = sign_index(pair[1].of(body).longitude);
            if before == after {
                continue;
            }
            let time = bisect(pair[0].time, pair[1].time, |t| {
                sign_index(eph.longitude(body, julian_day_ut(t))) != before
            });
            let longitude = eph.longitude(body, julian_day_ut(time));
            events.push(TransitEvent {
                kind: TransitEventKind::Ingress,
                time: format_utc_rfc3339(time),
                body,
                other: None,
                from_sign: Some(sign_name(before).to_string()),
                sign: Some(sign_name(sign_index(longitude)).to_string()),
                longitude,
                separation_deg: None,
                orb_window: None,
            });
        }
    }
    events
}

fn station_events(eph: &Ephemeris, samples: &[Sample]) -> Vec<TransitEvent> {
    let mut events = Vec::new();
    for body in Body::STATIONING {
        for pair in samples.windows(2) {
            let was_retro = pair[0].of(body).speed < 0.0;
            let is_retro = pair[1].of(body).speed < 0.0;
            if was_retro == is_retro {
                continue;
            }
            let time = bisect(pair[0].time, pair[1].time, |t| {
                (eph.position(body, julian_day_ut(t)).speed < 0.0) == is_retro
            });
            let longitude = eph.longitude(body, julian_day_ut(time));
            events.push(TransitEvent {
                kind: if is_retro {
                    TransitEventKind::StationRetrograde
                } else {
                    TransitEventKind::StationDirect
                },
                time: format_utc_rfc3339(time),
                body,
                other: None,
                from_sign: None,
                sign: Some(sign_name(sign_index(longitude)).to_string()),
                longitude,
                separation_deg: None,
                orb_window: None,
            });
        }
    }
    events
}

fn conjunction_events(eph: &Ephemeris, samples: &[Sample], orb: f64) -> Vec<TransitEvent> {
    let mut events = Vec::new();
    for (i, &a) in CONJUNCTION_BODIES.iter().enumerate() {
        for &b in &CONJUNCTION_BODIES[i + 1..] {
            let signed: Vec<f64> = samples
                .iter()
                .map(|s| norm180(s.of(a).longitude - s.of(b).longitude))
                .collect();

            let mut k = 0;
            while k < samples.len() {
                if signed[k].abs() > orb {
                    k += 1;
                    continue;
                }
                let run_start = k;
                while k + 1 < samples.len() && signed[k + 1].abs() <= orb {
                    k += 1;
                }
                let run_end = k;
                k += 1;

                let exact = (run_start..run_end)
                    .find(|&j| signed[j].signum() != signed[j + 1].signum())
                    .map(|j| {
                        let sign_before = signed[j].signum();
                        bisect(samples[j].time, samples[j + 1].time, |t| {
                            let jd = julian_day_ut(t);
                            norm180(eph.longitude(a, jd) - eph.longitude(b, jd)).signum()
                                != sign_before
                        })
                    })
                    .unwrap_or_else(|| {
                        let closest = (run_start..=run_end)
                            .min_by(|&x, &y| signed[x].abs().total_cmp(&signed[y].abs()))
                            .unwrap_or(run_start);
                        samples[closest].time
                    });

                let jd = julian_day_ut(exact);
                let (lon_a, lon_b) = (eph.longitude(a, jd), eph.longitude(b, jd));
                events.push(TransitEvent {
                    kind: TransitEventKind::Conjunction,
                    time: format_utc_rfc3339(exact),
                    body: a,
                    other: Some(b),
                    from_sign: None,
                    sign: Some(sign_name(sign_index(lon_a)).to_string()),
                    longitude: lon_a,
                    separation_deg: Some(norm180(lon_a - lon_b).abs()),
                    orb_window: Some(TimeWindow {
                        start: format_utc_rfc3339(samples[run_start].time),
                        end: format_utc_rfc3339(samples[run_end].time),
                    }),
                });
            }
        }
    }
    events
}

/// Scan `months` from `from` for transit events (Lahiri sidereal).
pub fn transits(from: DateTime<Utc>, months: u32, orb_deg: f64) -> Result<TransitReport, TransitError> {
    if !(1..=MAX_MONTHS).contains(&months) {
        return Err(TransitError::MonthsOutOfRange(months));
    }
    if !(orb_deg > 0.0 && orb_deg <= MAX_ORB_DEG) {
        return Err(TransitError::OrbOutOfRange(orb_deg));
    }

    let eph = Ephemeris::new(Ayanamsha::Lahiri);
    let to = from
        .checked_add_months(Months::new(months))
        .unwrap_or(from + Duration::days(i64::from(months) * 31));

    let mut samples = Vec::new();
    let mut t = from;
    while t <= to {
        let jd = julian_day_ut(t);
        samples.push(Sample {
            time: t,
            positions: Body::ALL.iter().map(|&b| eph.position(b, jd)).collect(),
        });
        t += Duration::days(1);
    }

    let positions = samples
        .first()
        .map(|s| {
            s.positions
                .iter()
                .map(|p| TransitPosition {
                    body: p.body,
                    longitude: p.longitude,
                    sign: sign_name(sign_index(p.longitude)).to_string(),
                    retrograde: p.retrograde,
                })
                .collect()
        })
        .unwrap_or_default();

    let mut events = ingress_events(&eph, &samples);
    events.extend(station_events(&eph, &samples));
    events.extend(conjunction_events(&eph, &samples, orb_deg));
    // RFC3339 UTC strings sort chronologically.
    events.sort_by(|x, y| x.time.cmp(&y.time));

    tracing::debug!(
        months,
        orb_deg,
        samples = samples.len(),
        events = events.len(),
        "Scanned transits"
    );

    Ok(TransitReport {
        from: format_utc_rfc3339(from),
        to: format_utc_rfc3339(to),
        orb_deg,
        positions,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_rejects_out_of_range_inputs() {
        assert_eq!(
            transits(start(), 0, 1.0).unwrap_err(),
            TransitError::MonthsOutOfRange(0)
        );
        assert_eq!(
            transits(start(), 37, 1.0).unwrap_err(),
            TransitError::MonthsOutOfRange(37)
        );
        assert!(matches!(
            transits(start(), 1, 0.0).unwrap_err(),
            TransitError::OrbOutOfRange(_)
        ));
    }

    #[test]
    fn test_sun_enters_one_sign_per_month() {
        let report = transits(start(), 12, 1.0).unwrap();
        let sun_ingresses = report
            .events
            .iter()
            .filter(|e| e.kind == TransitEventKind::Ingress && e.body == Body::Sun)
            .count();
        assert_eq!(sun_ingresses, 12);

        // Moon changes sign roughly every 2.5 days.
        let moon_ingresses = report
            .events
            .iter()
            .filter(|e| e.kind == TransitEventKind::Ingress && e.body == Body::Moon)
            .count();
        assert!((155..=170).contains(&moon_ingresses), "{moon_ingresses}");
        assert_eq!(report.positions.len(), 9);
    }

    #[test]
    fn test_mercury_stations_in_a_year() {
        let report = transits(start(), 12, 1.0).unwrap();
        let stations = report
            .events
            .iter()
            .filter(|e| {
                e.body == Body::Mercury
                    && matches!(
                        e.kind,
                        TransitEventKind::StationRetrograde | TransitEventKind::StationDirect
                    )
            })
            .count();
        // Three or four retrograde loops per year, two stations each.
        assert!((5..=8).contains(&stations), "{stations}");
    }

    #[test]
    fn test_events_sorted_and_conjunctions_within_orb() {
        let report = transits(start(), 6, 2.0).unwrap();
        for pair in report.events.windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
        for e in report
            .events
            .iter()
            .filter(|e| e.kind == TransitEventKind::Conjunction)
        {
            assert!(e.separation_deg.unwrap() <= 2.0 + 1e-6);
            assert!(e.other.is_some());
        }
    }

    #[test]
    fn test_bisect_finds_boundary() {
        let lo = start();
        let hi = lo + Duration::days(1);
        let boundary = lo + Duration::hours(7) + Duration::minutes(13);
        let found = bisect(lo, hi, |t| t >= boundary);
        assert!(found >= boundary && found - boundary <= Duration::minutes(1));
    }
}
