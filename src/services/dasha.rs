// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dasha (planetary period) timelines: Vimshottari, Yogini and Jaimini
//! Chara.

use crate::models::dasha::{DashaMethod, DashaPeriod, DashaTimeline};
use crate::models::names::{sign_lord, sign_name, NAKSHATRA_NAMES};
use crate::models::{Ayanamsha, Body};
use crate::services::ephemeris::{nakshatra_and_pada, norm360, sign_index, Ephemeris, SEG_27};
use crate::time_utils::{days, format_local_rfc3339, julian_day_ut};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub const DAYS_PER_YEAR: f64 = 365.2425;
/// Every timeline covers at least this many years.
const TIMELINE_YEARS: f64 = 120.0;
pub const MAX_LEVELS: u8 = 3;

pub const VIMSHOTTARI_ORDER: [Body; 9] = [
    Body::Ketu,
    Body::Venus,
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Rahu,
    Body::Jupiter,
    Body::Saturn,
    Body::Mercury,
];
pub const VIMSHOTTARI_YEARS: [f64; 9] = [7.0, 20.0, 6.0, 10.0, 7.0, 18.0, 16.0, 19.0, 17.0];

const YOGINIS: [(&str, Body, f64); 8] = [
    ("Mangala", Body::Moon, 1.0),
    ("Pingala", Body::Sun, 2.0),
    ("Dhanya", Body::Jupiter, 3.0),
    ("Bhramari", Body::Mars, 4.0),
    ("Bhadrika", Body::Mercury, 5.0),
    ("Ulka", Body::Saturn, 6.0),
    ("Siddha", Body::Venus, 7.0),
    ("Sankata", Body::Rahu, 8.0),
];

/// Errors from dasha computation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DashaError {
    #[error("levels must be between 1 and {MAX_LEVELS}, got {0}")]
    LevelsOutOfRange(u8),

    #[error("Chara dasha needs the birth location (lat and lon)")]
    LocationRequired,
}

/// Vimshottari lord of a nakshatra (1..27).
pub fn nakshatra_lord(nakshatra: u8) -> Body {
    VIMSHOTTARI_ORDER[usize::from(nakshatra.max(1) - 1) % 9]
}

/// A period before formatting.
#[derive(Debug, Clone)]
struct Span {
    lord: String,
    planet: Body,
    level: u8,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    years: f64,
    subs: Vec<Span>,
}

impl Span {
    fn format(&self, tz: Tz) -> DashaPeriod {
        DashaPeriod {
            lord: self.lord.clone(),
            planet: self.planet,
            level: self.level,
            start: format_local_rfc3339(self.start, tz),
            end: format_local_rfc3339(self.end, tz),
            years: self.years,
            sub_periods: self.subs.iter().map(|s| s.format(tz)).collect(),
        }
    }
}

/// Lay out `(index, years)` pairs back to back from `start`.
fn lay_out<F>(
    start: DateTime<Utc>,
    pieces: &[(usize, f64)],
    level: u8,
    label: &F,
) -> Vec<(usize, Span)>
where
    F: Fn(usize) -> (String, Body),
{
    let mut elapsed = 0.0;
    pieces
        .iter()
        .map(|&(idx, years)| {
            let (lord, planet) = label(idx);
            let span = Span {
                lord,
                planet,
                level,
                start: start + days(elapsed * DAYS_PER_YEAR),
                end: start + days((elapsed + years) * DAYS_PER_YEAR),
                years,
                subs: Vec::new(),
            };
            elapsed += years;
            (idx, span)
        })
        .collect()
}

/// A cyclic scheme whose sub-periods are proportional to the main periods
/// and start from the parent lord (Vimshottari, Yogini).
struct ProportionalScheme {
    entries: Vec<(String, Body, f64)>,
}

impl ProportionalScheme {
    fn vimshottari() -> Self {
        Self {
            entries: VIMSHOTTARI_ORDER
                .iter()
                .zip(VIMSHOTTARI_YEARS)
                .map(|(&b, y)| (b.name().to_string(), b, y))
                .collect(),
        }
    }

    fn yogini() -> Self {
        Self {
            entries: YOGINIS
                .iter()
                .map(|&(name, b, y)| (name.to_string(), b, y))
                .collect(),
        }
    }

    fn total_years(&self) -> f64 {
        self.entries.iter().map(|e| e.2).sum()
    }

    fn label(&self, idx: usize) -> (String, Body) {
        let (name, body, _) = &self.entries[idx % self.entries.len()];
        (name.clone(), *body)
    }

    fn subdivide(&self, parent: &mut Span, first: usize, max_level: u8) {
        if parent.level >= max_level {
            return;
        }
        let n = self.entries.len();
        let total = self.total_years();
        let pieces: Vec<(usize, f64)> = (0..n)
            .map(|k| {
                let idx = (first + k) % n;
                (idx, parent.years * self.entries[idx].2 / total)
            })
            .collect();
        let label = |i: usize| self.label(i);
        parent.subs = lay_out(parent.start, &pieces, parent.level + 1, &label)
            .into_iter()
            .map(|(idx, mut span)| {
                self.subdivide(&mut span, idx, max_level);
                span
            })
            .collect();
    }

    /// Main periods from `first`, covering the timeline from `start`.
    fn timeline(&self, first: usize, start: DateTime<Utc>, max_level: u8) -> Vec<Span> {
        let n = self.entries.len();
        let mut pieces = Vec::new();
        let mut covered = 0.0;
        let mut k = 0;
        while covered < TIMELINE_YEARS {
            let idx = (first + k) % n;
            pieces.push((idx, self.entries[idx].2));
            covered += self.entries[idx].2;
            k += 1;
        }
        let label = |i: usize| self.label(i);
        lay_out(start, &pieces, 1, &label)
            .into_iter()
            .map(|(idx, mut span)| {
                self.subdivide(&mut span, idx, max_level);
                span
            })
            .collect()
    }
}

/// Odd-footed (savya) signs are counted forward in Chara dasha.
fn is_savya(sign: u8) -> bool {
    matches!(sign, 1 | 2 | 3 | 7 | 8 | 9)
}

/// Step `n` signs from `sign` (1..12) forward or backward.
fn step_sign(sign: u8, n: i16, forward: bool) -> u8 {
    let delta = if forward { n } else { -n };
    ((i16::from(sign) - 1 + delta).rem_euclid(12) + 1) as u8
}

/// Chara dasha years of a sign given the sign each sign lord occupies.
fn chara_years(sign: u8, lord_sign: u8) -> f64 {
    let distance = if is_savya(sign) {
        (i16::from(lord_sign) - i16::from(sign)).rem_euclid(12)
    } else {
        (i16::from(sign) - i16::from(lord_sign)).rem_euclid(12)
    };
    if distance == 0 {
        12.0
    } else {
        f64::from(distance)
    }
}

fn sign_label(sign: u8) -> (String, Body) {
    (sign_name(sign).to_string(), sign_lord(sign))
}

/// Split a Chara period into twelve equal sign periods from the next sign.
fn chara_subdivide(parent: &mut Span, sign: u8, forward: bool, max_level: u8) {
    if parent.level >= max_level {
        return;
    }
    let pieces: Vec<(usize, f64)> = (1..=12)
        .map(|k| (usize::from(step_sign(sign, k, forward)), parent.years / 12.0))
        .collect();
    parent.subs = lay_out(parent.start, &pieces, parent.level + 1, &|s| sign_label(s as u8))
        .into_iter()
        .map(|(s, mut span)| {
            chara_subdivide(&mut span, s as u8, forward, max_level);
            span
        })
        .collect();
}

/// Chara dasha from the ascendant sign and the sign of each sign's lord.
fn chara_timeline(
    asc_sign: u8,
    lord_sign_of: impl Fn(u8) -> u8,
    start: DateTime<Utc>,
    max_level: u8,
) -> Vec<Span> {
    let forward = is_savya(step_sign(asc_sign, 8, true));
    let cycle: Vec<(u8, f64)> = (0..12)
        .map(|k| {
            let sign = step_sign(asc_sign, k, forward);
            (sign, chara_years(sign, lord_sign_of(sign)))
        })
        .collect();

    // Second cycle runs the complement to twelve years.
    let mut pieces: Vec<(usize, f64)> = cycle.iter().map(|&(s, y)| (usize::from(s), y)).collect();
    let mut covered: f64 = pieces.iter().map(|p| p.1).sum();
    for &(sign, years) in &cycle {
        if covered >= TIMELINE_YEARS {
            break;
        }
        let rest = 12.0 - years;
        if rest > 0.0 {
            pieces.push((usize::from(sign), rest));
            covered += rest;
        }
    }

    lay_out(start, &pieces, 1, &|s| sign_label(s as u8))
        .into_iter()
        .map(|(s, mut span)| {
            chara_subdivide(&mut span, s as u8, forward, max_level);
            span
        })
        .collect()
}

/// Compute a dasha timeline for a birth instant.
///
/// `location` (`lat`, `lon`) is needed only for Chara dasha.
pub fn dasha_timeline(
    birth: DateTime<Utc>,
    method: DashaMethod,
    levels: u8,
    tz: Tz,
    location: Option<(f64, f64)>,
) -> Result<DashaTimeline, DashaError> {
    if !(1..=MAX_LEVELS).contains(&levels) {
        return Err(DashaError::LevelsOutOfRange(levels));
    }
    let eph = Ephemeris::new(Ayanamsha::Lahiri);
    let jd = julian_day_ut(birth);
    let moon = eph.longitude(Body::Moon, jd);

    let (balance_years, spans) = match method {
        DashaMethod::Vimshottari | DashaMethod::Yogini => {
            proportional_from_moon(method, moon, birth, levels)
        }
        DashaMethod::CharA => {
            let (lat, lon) = location.ok_or(DashaError::LocationRequired)?;
            let asc_sign = sign_index(eph.ascendant(jd, lat, lon));
            let body_sign = |body: Body| sign_index(eph.longitude(body, jd));
            let spans = chara_timeline(asc_sign, |s| body_sign(sign_lord(s)), birth, levels);
            let first = spans.first().map(|s| s.years).unwrap_or_default();
            (first, spans)
        }
    };

    tracing::debug!(
        ?method,
        levels,
        periods = spans.len(),
        moon_longitude = moon,
        "Computed dasha timeline"
    );

    let (nak, pada) = nakshatra_and_pada(moon);
    Ok(DashaTimeline {
        method,
        birth: format_local_rfc3339(birth, tz),
        tz: tz.name().to_string(),
        moon_longitude: moon,
        moon_nakshatra: NAKSHATRA_NAMES[usize::from(nak - 1)].to_string(),
        moon_pada: pada,
        balance_years,
        periods: spans.iter().map(|s| s.format(tz)).collect(),
    })
}

/// Vimshottari or Yogini periods from the Moon's sidereal longitude.
///
/// The elapsed fraction of the birth nakshatra is the elapsed fraction of
/// the first period, so the timeline starts before birth.
fn proportional_from_moon(
    method: DashaMethod,
    moon: f64,
    birth: DateTime<Utc>,
    levels: u8,
) -> (f64, Vec<Span>) {
    let nak = (norm360(moon) / SEG_27).floor().min(26.0) as usize + 1;
    let traversed = (norm360(moon) % SEG_27) / SEG_27;

    let (scheme, first) = match method {
        DashaMethod::Yogini => {
            let idx = (nak + 3) % 8;
            (ProportionalScheme::yogini(), if idx == 0 { 7 } else { idx - 1 })
        }
        _ => (ProportionalScheme::vimshottari(), (nak - 1) % 9),
    };

    let first_years = scheme.entries[first].2;
    let elapsed = traversed * first_years;
    let start = birth - days(elapsed * DAYS_PER_YEAR);
    (first_years - elapsed, scheme.timeline(first, start, levels))
}
